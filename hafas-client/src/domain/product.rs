//! Product categories (means of transport).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::DomainError;

/// A category of public transport service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Product {
    /// High-speed trains (ICE, TGV, Railjet)
    LongDistanceExpress,
    /// Intercity and Eurocity trains
    LongDistance,
    RegionalExpress,
    Regional,
    Suburban,
    Bus,
    Ferry,
    Subway,
    Tram,
    /// Group taxi and on-demand services
    Taxi,
}

impl Product {
    pub const ALL: [Product; 10] = [
        Product::LongDistanceExpress,
        Product::LongDistance,
        Product::RegionalExpress,
        Product::Regional,
        Product::Suburban,
        Product::Bus,
        Product::Ferry,
        Product::Subway,
        Product::Tram,
        Product::Taxi,
    ];

    /// The stable snake_case name, e.g. `"long_distance_express"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Product::LongDistanceExpress => "long_distance_express",
            Product::LongDistance => "long_distance",
            Product::RegionalExpress => "regional_express",
            Product::Regional => "regional",
            Product::Suburban => "suburban",
            Product::Bus => "bus",
            Product::Ferry => "ferry",
            Product::Subway => "subway",
            Product::Tram => "tram",
            Product::Taxi => "taxi",
        }
    }
}

impl FromStr for Product {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Product::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| DomainError::UnknownProduct(s.to_string()))
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller overrides for which products a search may use.
///
/// Products not mentioned keep the profile's default (enabled).
///
/// # Examples
///
/// ```
/// use hafas_client::domain::{Product, ProductFilter};
///
/// let filter = ProductFilter::from_names([("bus", false), ("tram", false)]).unwrap();
/// assert_eq!(filter.get(Product::Bus), Some(false));
/// assert_eq!(filter.get(Product::Regional), None);
///
/// assert!(ProductFilter::from_names([("zeppelin", true)]).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter(BTreeMap<Product, bool>);

impl ProductFilter {
    /// No overrides: every product the profile knows stays enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from product names.
    pub fn from_names<I, S>(entries: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (S, bool)>,
        S: AsRef<str>,
    {
        let mut filter = Self::new();
        for (name, allowed) in entries {
            filter = filter.with(name.as_ref().parse()?, allowed);
        }
        Ok(filter)
    }

    /// Override a single product.
    pub fn with(mut self, product: Product, allowed: bool) -> Self {
        self.0.insert(product, allowed);
        self
    }

    /// Keep only the given products, disabling all others.
    pub fn only(products: &[Product]) -> Self {
        Self(
            Product::ALL
                .into_iter()
                .map(|p| (p, products.contains(&p)))
                .collect(),
        )
    }

    /// The caller's override for a product, if any.
    pub fn get(&self, product: Product) -> Option<bool> {
        self.0.get(&product).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Product, bool)> + '_ {
        self.0.iter().map(|(p, allowed)| (*p, *allowed))
    }
}
