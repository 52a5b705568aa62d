//! Operator profiles.
//!
//! A [`Profile`] bundles everything that differs between HaFAS operators:
//! endpoint, locale, signing mode, envelope defaults, the product bitmask
//! table, and the table of formatter/parser functions. Operator profiles start
//! from [`Operations::GENERIC`] and replace the entries they extend. The
//! choice is made once, when the profile is built.

pub mod db;
pub mod vsn;

use std::fmt;

use chrono_tz::Tz;
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::{Journey, Product, ProductFilter, Station};

use super::error::HafasError;
use super::query::{JourneyQuery, JourneysQuery, LocationsQuery, StationBoardQuery};
use super::request::ServiceRequest;
use super::signing::Signing;
use super::{format, parse};

/// Bitmask value per product, as the operator encodes `jnyFltrL` and `cls`.
pub type ProductTable = &'static [(Product, u32)];

/// The ten standard HaFAS product classes.
pub const STANDARD_PRODUCTS: ProductTable = &[
    (Product::LongDistanceExpress, 1),
    (Product::LongDistance, 2),
    (Product::RegionalExpress, 4),
    (Product::Regional, 8),
    (Product::Suburban, 16),
    (Product::Bus, 32),
    (Product::Ferry, 64),
    (Product::Subway, 128),
    (Product::Tram, 256),
    (Product::Taxi, 512),
];

const DEFAULT_USER_AGENT: &str = concat!("hafas-client/", env!("CARGO_PKG_VERSION"));

/// Language and timezone the operator answers in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    /// Two-letter language code sent as `lang`
    pub language: String,
    pub timezone: Tz,
}

impl Locale {
    pub fn new(language: impl Into<String>, timezone: Tz) -> Self {
        Self {
            language: language.into(),
            timezone,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("de", Tz::Europe__Berlin)
    }
}

pub type FormatLocations = fn(&Profile, &LocationsQuery) -> Result<ServiceRequest, HafasError>;
pub type ParseLocations = fn(&Profile, &str) -> Result<Vec<Station>, HafasError>;
pub type FormatStationBoard =
    fn(&Profile, &StationBoardQuery) -> Result<ServiceRequest, HafasError>;
pub type ParseStationBoard = fn(&Profile, &str) -> Result<Vec<Journey>, HafasError>;
pub type FormatJourneys = fn(&Profile, &JourneysQuery) -> Result<ServiceRequest, HafasError>;
pub type ParseJourneys = fn(&Profile, &str) -> Result<Vec<Journey>, HafasError>;
pub type FormatJourney = fn(&Profile, &JourneyQuery) -> Result<ServiceRequest, HafasError>;
pub type ParseJourney = fn(&Profile, &str, &JourneyQuery) -> Result<Journey, HafasError>;

/// Formatter/parser pair for every operation.
#[derive(Clone, Copy)]
pub struct Operations {
    pub format_locations: FormatLocations,
    pub parse_locations: ParseLocations,
    pub format_station_board: FormatStationBoard,
    pub parse_station_board: ParseStationBoard,
    pub format_journeys: FormatJourneys,
    pub parse_journeys: ParseJourneys,
    pub format_journey: FormatJourney,
    pub parse_journey: ParseJourney,
}

impl Operations {
    /// Behavior shared by all operators.
    pub const GENERIC: Operations = Operations {
        format_locations: format::locations,
        parse_locations: parse::locations,
        format_station_board: format::station_board,
        parse_station_board: parse::station_board,
        format_journeys: format::journeys,
        parse_journeys: parse::journeys,
        format_journey: format::journey,
        parse_journey: parse::journey,
    };
}

impl Default for Operations {
    fn default() -> Self {
        Self::GENERIC
    }
}

impl fmt::Debug for Operations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operations").finish_non_exhaustive()
    }
}

/// Operator-specific configuration and behavior.
///
/// Profiles are immutable once built and can be shared freely between
/// clients and threads.
#[derive(Debug, Clone)]
pub struct Profile {
    name: &'static str,
    base_url: String,
    locale: Locale,
    signing: Signing,
    default_user_agent: String,
    request_defaults: Map<String, Value>,
    products: ProductTable,
    operations: Operations,
}

impl Profile {
    /// A profile with generic behavior, no signing and no envelope defaults.
    pub fn generic(base_url: impl Into<String>) -> Self {
        let locale = Locale::default();
        let mut request_defaults = Map::new();
        request_defaults.insert("lang".into(), Value::String(locale.language.clone()));

        Self {
            name: "generic",
            base_url: base_url.into(),
            locale,
            signing: Signing::None,
            default_user_agent: DEFAULT_USER_AGENT.to_string(),
            request_defaults,
            products: STANDARD_PRODUCTS,
            operations: Operations::GENERIC,
        }
    }

    /// Deutsche Bahn.
    pub fn db() -> Self {
        db::profile()
    }

    /// Verkehrsverbund Süd-Niedersachsen.
    pub fn vsn() -> Self {
        vsn::profile()
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.request_defaults
            .insert("lang".into(), Value::String(locale.language.clone()));
        self.locale = locale;
        self
    }

    pub fn with_signing(mut self, signing: Signing) -> Self {
        self.signing = signing;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.default_user_agent = user_agent.into();
        self
    }

    /// Replace the envelope defaults (`client`, `auth`, `ver`, ...).
    ///
    /// `lang` is always taken from the locale.
    pub fn with_request_defaults(mut self, mut defaults: Map<String, Value>) -> Self {
        defaults.insert("lang".into(), Value::String(self.locale.language.clone()));
        self.request_defaults = defaults;
        self
    }

    pub fn with_products(mut self, products: ProductTable) -> Self {
        self.products = products;
        self
    }

    pub fn with_operations(mut self, operations: Operations) -> Self {
        self.operations = operations;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// (language, timezone) defaults.
    pub fn locale(&self) -> (&str, Tz) {
        (&self.locale.language, self.locale.timezone)
    }

    pub fn timezone(&self) -> Tz {
        self.locale.timezone
    }

    pub fn signing(&self) -> &Signing {
        &self.signing
    }

    /// Query string to append to the base URL for this body, if any.
    pub fn sign(&self, body: &[u8]) -> Option<String> {
        self.signing.query_string(body)
    }

    pub fn default_user_agent(&self) -> &str {
        &self.default_user_agent
    }

    pub fn request_defaults(&self) -> &Map<String, Value> {
        &self.request_defaults
    }

    pub fn operations(&self) -> &Operations {
        &self.operations
    }

    pub fn products(&self) -> ProductTable {
        self.products
    }

    /// Encode a product filter as the operator's `jnyFltrL` value.
    ///
    /// Every product in the table starts enabled; the filter's overrides are
    /// then applied. Enabling a product the operator does not encode is an
    /// error; disabling one is a no-op.
    pub fn encode_products(&self, filter: &ProductFilter) -> Result<u32, HafasError> {
        for (product, allowed) in filter.iter() {
            if allowed && !self.products.iter().any(|(p, _)| *p == product) {
                return Err(HafasError::invalid_argument(format!(
                    "product '{product}' is not supported by profile '{}'",
                    self.name
                )));
            }
        }

        Ok(self
            .products
            .iter()
            .filter(|(product, _)| filter.get(*product).unwrap_or(true))
            .map(|(_, bits)| bits)
            .sum())
    }

    /// Map a `cls` value from `common.prodL` back to a product.
    pub fn product_for_class(&self, cls: u32) -> Option<Product> {
        let product = self
            .products
            .iter()
            .find(|(_, bits)| *bits == cls)
            .map(|(product, _)| *product);
        if product.is_none() {
            debug!(profile = self.name, cls, "unmapped product class");
        }
        product
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile::generic("https://example.invalid/bin/mgate.exe")
    }

    #[test]
    fn generic_defaults() {
        let profile = profile();
        assert_eq!(profile.name(), "generic");
        assert_eq!(profile.base_url(), "https://example.invalid/bin/mgate.exe");
        assert_eq!(profile.locale(), ("de", Tz::Europe__Berlin));
        assert_eq!(profile.signing(), &Signing::None);
        assert_eq!(profile.sign(b"{}"), None);
        assert_eq!(profile.request_defaults().get("lang"), Some(&Value::from("de")));
    }

    #[test]
    fn locale_drives_lang() {
        let profile = profile()
            .with_request_defaults(Map::new())
            .with_locale(Locale::new("en", Tz::Europe__London));
        assert_eq!(profile.request_defaults().get("lang"), Some(&Value::from("en")));
        assert_eq!(profile.timezone(), Tz::Europe__London);
    }

    #[test]
    fn all_products_by_default() {
        assert_eq!(profile().encode_products(&ProductFilter::new()).unwrap(), 1023);
    }

    #[test]
    fn disabled_products_are_subtracted() {
        let filter = ProductFilter::new()
            .with(Product::Bus, false)
            .with(Product::Taxi, false);
        assert_eq!(profile().encode_products(&filter).unwrap(), 1023 - 32 - 512);
    }

    #[test]
    fn only_long_distance() {
        let filter = ProductFilter::only(&[Product::LongDistanceExpress, Product::LongDistance]);
        assert_eq!(profile().encode_products(&filter).unwrap(), 3);
    }

    #[test]
    fn unsupported_product() {
        const RAIL_ONLY: ProductTable = &[(Product::Regional, 1), (Product::Suburban, 2)];
        let profile = profile().with_products(RAIL_ONLY);

        let err = profile
            .encode_products(&ProductFilter::new().with(Product::Ferry, true))
            .unwrap_err();
        assert!(matches!(err, HafasError::InvalidArgument(_)));

        // Disabling something the operator never offers is fine
        let filter = ProductFilter::new().with(Product::Ferry, false);
        assert_eq!(profile.encode_products(&filter).unwrap(), 3);
    }

    #[test]
    fn class_lookup() {
        let profile = profile();
        assert_eq!(profile.product_for_class(2), Some(Product::LongDistance));
        assert_eq!(profile.product_for_class(1024), None);
    }
}
