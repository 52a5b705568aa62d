//! Journey types.
//!
//! A `Journey` is one connection offered by the operator. It is identified by
//! an opaque reconstruction token which can be replayed to fetch its full
//! detail (legs, tickets).

use chrono::{Duration, NaiveDate};

use super::{Leg, LegMode, Ticket};

/// A connection between two stations.
///
/// Search results and board entries may carry only some fields; a detail
/// fetch returns a fresh, fully populated value.
#[derive(Debug, Clone)]
pub struct Journey {
    id: String,
    date: Option<NaiveDate>,
    duration: Option<Duration>,
    legs: Vec<Leg>,
    tickets: Option<Vec<Ticket>>,
}

impl Journey {
    /// A journey known only by its token, as returned by station boards.
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            date: None,
            duration: None,
            legs: Vec::new(),
            tickets: None,
        }
    }

    /// A journey with its schedule data.
    pub fn new(id: impl Into<String>, date: NaiveDate, duration: Duration, legs: Vec<Leg>) -> Self {
        Self {
            id: id.into(),
            date: Some(date),
            duration: Some(duration),
            legs,
            tickets: None,
        }
    }

    /// Attach ticket offers.
    pub fn with_tickets(mut self, tickets: Vec<Ticket>) -> Self {
        self.tickets = Some(tickets);
        self
    }

    /// The reconstruction token.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Ticket offers; `None` unless fetched with tickets requested.
    pub fn tickets(&self) -> Option<&[Ticket]> {
        self.tickets.as_deref()
    }

    /// Number of vehicle changes (public transport legs minus one).
    pub fn changes(&self) -> usize {
        self.legs
            .iter()
            .filter(|leg| leg.mode == LegMode::PublicTransport)
            .count()
            .saturating_sub(1)
    }

    /// Whether each leg starts where the previous one ended.
    pub fn is_contiguous(&self) -> bool {
        self.legs
            .windows(2)
            .all(|pair| pair[0].destination == pair[1].origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Station;
    use chrono::TimeZone;
    use chrono_tz::Europe::Berlin;

    fn leg(from: &str, to: &str, mode: LegMode) -> Leg {
        let mut leg = Leg::new(
            Station::new(from),
            Station::new(to),
            Berlin.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap(),
            Berlin.with_ymd_and_hms(2024, 3, 15, 11, 0, 0).unwrap(),
        );
        leg.mode = mode;
        leg
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn id_only() {
        let journey = Journey::from_id("T$A=1@O=Basel");
        assert_eq!(journey.id(), "T$A=1@O=Basel");
        assert!(journey.date().is_none());
        assert!(journey.legs().is_empty());
        assert!(journey.tickets().is_none());
        assert!(journey.is_contiguous());
    }

    #[test]
    fn contiguous_legs() {
        let journey = Journey::new(
            "x",
            date(),
            Duration::hours(2),
            vec![
                leg("A", "B", LegMode::PublicTransport),
                leg("B", "C", LegMode::Walking),
                leg("C", "D", LegMode::PublicTransport),
            ],
        );
        assert!(journey.is_contiguous());
        assert_eq!(journey.changes(), 1);
    }

    #[test]
    fn gap_between_legs() {
        let journey = Journey::new(
            "x",
            date(),
            Duration::hours(2),
            vec![
                leg("A", "B", LegMode::PublicTransport),
                leg("C", "D", LegMode::PublicTransport),
            ],
        );
        assert!(!journey.is_contiguous());
    }

    #[test]
    fn enrichment_keeps_schedule() {
        let journey = Journey::new("x", date(), Duration::hours(1), vec![])
            .with_tickets(vec![Ticket::new("Flexpreis", "2. Klasse", 1000, "EUR")]);
        assert_eq!(journey.date(), Some(date()));
        assert_eq!(journey.tickets().map(<[Ticket]>::len), Some(1));
    }
}
