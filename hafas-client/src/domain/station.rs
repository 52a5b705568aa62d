//! Station types.

use std::fmt;
use std::hash::{Hash, Hasher};

/// An operator-assigned station identifier.
///
/// Identifiers are opaque: they are stored as the exact text the operator
/// sent (or the decimal text of an integer id) and written back to the wire
/// unchanged. No numeric interpretation is ever applied.
///
/// # Examples
///
/// ```
/// use hafas_client::domain::StationId;
///
/// let id = StationId::from(8096009_u64);
/// assert_eq!(id.as_str(), "8096009");
///
/// // Leading zeros survive because nothing is parsed as a number
/// assert_eq!(StationId::new("000123").as_str(), "000123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(String);

impl StationId {
    /// Create an identifier from its wire text.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as it appears on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for StationId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for StationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A station or stop.
///
/// Stations compare and hash by identifier only: the same stop parsed from
/// two responses with different name spellings is still the same station.
///
/// # Examples
///
/// ```
/// use hafas_client::domain::Station;
///
/// let a = Station::new(8011160_u64).with_name("Berlin Hbf");
/// let b = Station::new("8011160");
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct Station {
    id: StationId,
    name: Option<String>,
    coordinates: Option<Coordinates>,
}

impl Station {
    /// Create a station known only by its identifier.
    pub fn new(id: impl Into<StationId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            coordinates: None,
        }
    }

    /// Attach a human-readable name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a position.
    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    pub fn id(&self) -> &StationId {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Station {}

impl Hash for Station {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} ({})", self.id),
            None => write!(f, "{}", self.id),
        }
    }
}
