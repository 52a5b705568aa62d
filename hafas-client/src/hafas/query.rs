//! Typed inputs for each operation.

use chrono::NaiveDateTime;

use crate::domain::{Journey, Product, ProductFilter, ReductionCard, Station};

/// Default station board window, in minutes.
const DEFAULT_BOARD_DURATION_MINS: u32 = 1;

/// Maximum number of travelers a fare request may carry.
pub const MAX_TRAVELERS: usize = 5;

/// What a location search may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationKind {
    /// Stations and stops only
    #[default]
    Station,
    /// Stations, addresses and points of interest
    All,
}

impl LocationKind {
    /// Wire value of the `loc.type` field.
    pub fn code(self) -> &'static str {
        match self {
            LocationKind::Station => "S",
            LocationKind::All => "ALL",
        }
    }
}

/// Free-text location search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationsQuery {
    pub name: String,
    pub kind: LocationKind,
    /// Upper bound on matches; operator default if unset
    pub max_results: Option<u32>,
}

impl LocationsQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: LocationKind::default(),
            max_results: None,
        }
    }

    pub fn with_kind(mut self, kind: LocationKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_max_results(mut self, n: u32) -> Self {
        self.max_results = Some(n);
        self
    }
}

/// Which side of a station board to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardDirection {
    Departure,
    Arrival,
}

impl BoardDirection {
    /// Wire value of the board `type` field.
    pub fn code(self) -> &'static str {
        match self {
            BoardDirection::Departure => "DEP",
            BoardDirection::Arrival => "ARR",
        }
    }
}

/// Station board (departures or arrivals) query.
#[derive(Debug, Clone)]
pub struct StationBoardQuery {
    pub station: Station,
    pub direction: BoardDirection,
    /// Start of the window; operator's "now" if unset
    pub when: Option<NaiveDateTime>,
    /// Window length in minutes
    pub duration_mins: u32,
    pub max_journeys: Option<u32>,
}

impl StationBoardQuery {
    pub fn new(station: Station, direction: BoardDirection) -> Self {
        Self {
            station,
            direction,
            when: None,
            duration_mins: DEFAULT_BOARD_DURATION_MINS,
            max_journeys: None,
        }
    }

    pub fn at(mut self, when: NaiveDateTime) -> Self {
        self.when = Some(when);
        self
    }

    pub fn with_duration(mut self, mins: u32) -> Self {
        self.duration_mins = mins;
        self
    }

    pub fn with_max_journeys(mut self, n: u32) -> Self {
        self.max_journeys = Some(n);
        self
    }
}

/// Journey search query.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hafas_client::domain::{Product, Station};
/// use hafas_client::hafas::JourneysQuery;
///
/// let when = NaiveDate::from_ymd_opt(2024, 3, 15)
///     .unwrap()
///     .and_hms_opt(8, 0, 0)
///     .unwrap();
/// let query = JourneysQuery::new(Station::new(8096009_u64), Station::new(8011160_u64), when)
///     .max_changes(0)
///     .product(Product::Bus, false);
///
/// assert_eq!(query.max_changes, 0);
/// assert!(query.via.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct JourneysQuery {
    pub origin: Station,
    pub destination: Station,
    /// Stations to pass through, in order
    pub via: Vec<Station>,
    /// Local departure date and time
    pub when: NaiveDateTime,
    /// Minimum change time in minutes
    pub min_change_time: u32,
    /// Maximum number of changes; `-1` for unlimited
    pub max_changes: i32,
    pub products: ProductFilter,
}

impl JourneysQuery {
    pub fn new(origin: Station, destination: Station, when: NaiveDateTime) -> Self {
        Self {
            origin,
            destination,
            via: Vec::new(),
            when,
            min_change_time: 0,
            max_changes: -1,
            products: ProductFilter::new(),
        }
    }

    pub fn via(mut self, station: Station) -> Self {
        self.via.push(station);
        self
    }

    pub fn min_change_time(mut self, mins: u32) -> Self {
        self.min_change_time = mins;
        self
    }

    pub fn max_changes(mut self, n: i32) -> Self {
        self.max_changes = n;
        self
    }

    pub fn product(mut self, product: Product, allowed: bool) -> Self {
        self.products = self.products.with(product, allowed);
        self
    }

    pub fn products(mut self, products: ProductFilter) -> Self {
        self.products = products;
        self
    }
}

/// A traveler for fare requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Traveler {
    /// Age in years
    pub age: i32,
    pub reduction_card: ReductionCard,
}

impl Traveler {
    pub fn new(age: i32, reduction_card: ReductionCard) -> Self {
        Self {
            age,
            reduction_card,
        }
    }
}

/// Fare options for a journey detail request.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketOptions {
    pub first_class: bool,
    pub travelers: Vec<Traveler>,
}

impl TicketOptions {
    /// Second class, one traveler.
    pub fn single(age: i32, reduction_card: ReductionCard) -> Self {
        Self {
            first_class: false,
            travelers: vec![Traveler::new(age, reduction_card)],
        }
    }

    pub fn first_class(mut self, first_class: bool) -> Self {
        self.first_class = first_class;
        self
    }

    pub fn with_traveler(mut self, traveler: Traveler) -> Self {
        self.travelers.push(traveler);
        self
    }
}

/// Journey detail (reconstruction) query.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyQuery {
    /// Reconstruction token
    pub id: String,
    /// Fare options; `None` fetches schedule data only
    pub tickets: Option<TicketOptions>,
}

impl JourneyQuery {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tickets: None,
        }
    }

    /// Refresh a journey returned by an earlier search.
    pub fn for_journey(journey: &Journey) -> Self {
        Self::new(journey.id())
    }

    pub fn with_tickets(mut self, tickets: TicketOptions) -> Self {
        self.tickets = Some(tickets);
        self
    }
}
