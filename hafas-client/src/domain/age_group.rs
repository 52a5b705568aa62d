//! Passenger age classification for fare requests.

use std::fmt;

use super::DomainError;

/// Fare age bracket of a traveler.
///
/// Buckets are defined by exclusive upper bounds, checked in ascending order:
/// baby below 6, child below 15, young below 27, adult below 65, senior
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeGroup {
    Baby,
    Child,
    Young,
    Adult,
    Senior,
}

/// Exclusive upper bounds in ascending order. `Senior` is the fallthrough.
const UPPER_BOUNDS: [(AgeGroup, f64); 4] = [
    (AgeGroup::Baby, 6.0),
    (AgeGroup::Child, 15.0),
    (AgeGroup::Young, 27.0),
    (AgeGroup::Adult, 65.0),
];

impl AgeGroup {
    /// Classify a passenger age in years.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidAge`] for negative, NaN or infinite ages.
    ///
    /// # Examples
    ///
    /// ```
    /// use hafas_client::domain::AgeGroup;
    ///
    /// assert_eq!(AgeGroup::from_age(30.0).unwrap(), AgeGroup::Adult);
    /// assert_eq!(AgeGroup::from_age(65.0).unwrap(), AgeGroup::Senior);
    /// assert!(AgeGroup::from_age(-1.0).is_err());
    /// ```
    pub fn from_age(age: f64) -> Result<Self, DomainError> {
        if !age.is_finite() || age < 0.0 {
            return Err(DomainError::InvalidAge(age));
        }

        Ok(UPPER_BOUNDS
            .iter()
            .find(|(_, bound)| age < *bound)
            .map(|(group, _)| *group)
            .unwrap_or(AgeGroup::Senior))
    }

    /// The single-letter code the fare engine expects.
    pub fn code(self) -> &'static str {
        match self {
            AgeGroup::Baby => "B",
            AgeGroup::Child => "K",
            AgeGroup::Young => "Y",
            AgeGroup::Adult => "E",
            AgeGroup::Senior => "S",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn rank(group: AgeGroup) -> u8 {
        match group {
            AgeGroup::Baby => 0,
            AgeGroup::Child => 1,
            AgeGroup::Young => 2,
            AgeGroup::Adult => 3,
            AgeGroup::Senior => 4,
        }
    }

    proptest! {
        /// Older passengers never land in a younger bucket
        #[test]
        fn monotonic(a in 0.0f64..150.0, b in 0.0f64..150.0) {
            let (young, old) = if a <= b { (a, b) } else { (b, a) };
            let young = AgeGroup::from_age(young).unwrap();
            let old = AgeGroup::from_age(old).unwrap();
            prop_assert!(rank(young) <= rank(old));
        }

        /// Every non-negative integer age classifies
        #[test]
        fn integer_ages_classify(age in 0u32..200) {
            prop_assert!(AgeGroup::from_age(f64::from(age)).is_ok());
        }

        /// Every negative age is rejected
        #[test]
        fn negative_rejected(age in -1000.0f64..-0.0001) {
            prop_assert!(AgeGroup::from_age(age).is_err());
        }
    }
}
