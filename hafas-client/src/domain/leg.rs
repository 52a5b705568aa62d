//! Leg types.
//!
//! A `Leg` is one uninterrupted segment of a journey: a ride on a single
//! vehicle, or a walk/transfer between two stops.

use chrono::{DateTime, Duration};
use chrono_tz::Tz;

use super::{Product, Station};

/// How a leg is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegMode {
    /// A ride on a scheduled vehicle
    PublicTransport,
    /// Walking between stops
    Walking,
    /// Change within a station, or any other section without a ride
    Transfer,
}

/// One segment of a journey.
///
/// Timestamps are in the operator's timezone. Realtime values are only
/// present when the operator sent a prognosis.
#[derive(Debug, Clone)]
pub struct Leg {
    /// Operator trip identifier, for public transport legs
    pub id: Option<String>,
    pub origin: Station,
    pub destination: Station,
    pub scheduled_departure: DateTime<Tz>,
    pub realtime_departure: Option<DateTime<Tz>>,
    pub scheduled_arrival: DateTime<Tz>,
    pub realtime_arrival: Option<DateTime<Tz>>,
    pub departure_platform: Option<String>,
    pub arrival_platform: Option<String>,
    /// Line label, e.g. "IC 2013"
    pub name: Option<String>,
    pub product: Option<Product>,
    pub mode: LegMode,
    pub cancelled: bool,
}

impl Leg {
    /// Creates a public transport leg with only the scheduled times set.
    pub fn new(
        origin: Station,
        destination: Station,
        scheduled_departure: DateTime<Tz>,
        scheduled_arrival: DateTime<Tz>,
    ) -> Self {
        Self {
            id: None,
            origin,
            destination,
            scheduled_departure,
            realtime_departure: None,
            scheduled_arrival,
            realtime_arrival: None,
            departure_platform: None,
            arrival_platform: None,
            name: None,
            product: None,
            mode: LegMode::PublicTransport,
            cancelled: false,
        }
    }

    /// Best known departure: realtime if available, else scheduled.
    pub fn departure(&self) -> DateTime<Tz> {
        self.realtime_departure.unwrap_or(self.scheduled_departure)
    }

    /// Best known arrival: realtime if available, else scheduled.
    pub fn arrival(&self) -> DateTime<Tz> {
        self.realtime_arrival.unwrap_or(self.scheduled_arrival)
    }

    /// Departure delay, if a realtime departure is known.
    pub fn departure_delay(&self) -> Option<Duration> {
        self.realtime_departure
            .map(|rt| rt.signed_duration_since(self.scheduled_departure))
    }

    /// Arrival delay, if a realtime arrival is known.
    pub fn arrival_delay(&self) -> Option<Duration> {
        self.realtime_arrival
            .map(|rt| rt.signed_duration_since(self.scheduled_arrival))
    }

    /// Duration of this leg based on best known times.
    pub fn duration(&self) -> Duration {
        self.arrival().signed_duration_since(self.departure())
    }

    pub fn is_walking(&self) -> bool {
        self.mode == LegMode::Walking
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Berlin;

    fn at(h: u32, m: u32) -> DateTime<Tz> {
        Berlin.with_ymd_and_hms(2024, 3, 15, h, m, 0).unwrap()
    }

    fn make_leg() -> Leg {
        Leg::new(
            Station::new("8000105"),
            Station::new("8011160"),
            at(10, 0),
            at(14, 0),
        )
    }

    #[test]
    fn scheduled_only() {
        let leg = make_leg();
        assert_eq!(leg.departure(), at(10, 0));
        assert_eq!(leg.arrival(), at(14, 0));
        assert_eq!(leg.duration(), Duration::hours(4));
        assert!(leg.departure_delay().is_none());
        assert!(!leg.is_walking());
    }

    #[test]
    fn realtime_overrides_scheduled() {
        let mut leg = make_leg();
        leg.realtime_departure = Some(at(10, 5));
        leg.realtime_arrival = Some(at(14, 20));

        assert_eq!(leg.departure(), at(10, 5));
        assert_eq!(leg.departure_delay(), Some(Duration::minutes(5)));
        assert_eq!(leg.arrival_delay(), Some(Duration::minutes(20)));
        assert_eq!(leg.duration(), Duration::minutes(255));
    }
}
