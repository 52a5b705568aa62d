//! Ticket offers attached to a journey.

use std::fmt;

/// A fare offer for a journey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// Fare name, e.g. "Super Sparpreis Europa"
    pub price_category: String,
    /// Class label, e.g. "1. Klasse"
    pub seat_category: String,
    /// Price in minor currency units (cents)
    pub price: i64,
    /// ISO 4217 currency code
    pub currency: String,
}

impl Ticket {
    pub fn new(
        price_category: impl Into<String>,
        seat_category: impl Into<String>,
        price: i64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            price_category: price_category.into(),
            seat_category: seat_category.into(),
            price,
            currency: currency.into(),
        }
    }
}

impl fmt::Display for Ticket {
    /// Formats as `"<category>, <class>: 49.90 EUR"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.price < 0 { "-" } else { "" };
        let abs = self.price.unsigned_abs();
        write!(
            f,
            "{}, {}: {sign}{}.{:02} {}",
            self.price_category,
            self.seat_category,
            abs / 100,
            abs % 100,
            self.currency
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_minor_units() {
        let ticket = Ticket::new("Flexpreis", "2. Klasse", 4990, "EUR");
        assert_eq!(ticket.to_string(), "Flexpreis, 2. Klasse: 49.90 EUR");

        let ticket = Ticket::new("Sparpreis", "1. Klasse", 5, "EUR");
        assert_eq!(ticket.to_string(), "Sparpreis, 1. Klasse: 0.05 EUR");
    }
}
