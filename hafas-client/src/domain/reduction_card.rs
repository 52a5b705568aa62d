//! Loyalty and discount cards understood by fare requests.

use super::DomainError;

/// A discount card held by a traveler.
///
/// The numeric codes are the fare engine's; only the listed ones exist.
///
/// # Examples
///
/// ```
/// use hafas_client::domain::ReductionCard;
///
/// assert_eq!(ReductionCard::try_from(0).unwrap(), ReductionCard::None);
/// assert_eq!(ReductionCard::BahnCard50SecondClass.code(), 4);
/// assert!(ReductionCard::try_from(5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReductionCard {
    #[default]
    None,
    BahnCard25FirstClass,
    BahnCard25SecondClass,
    BahnCard50FirstClass,
    BahnCard50SecondClass,
    VorteilsCard,
    HalbtaxAboRailPlus,
    HalbtaxAbo,
    VoordeelurenaboRailPlus,
    Voordeelurenabo,
    ShCard,
    GeneralAbonnement,
}

impl ReductionCard {
    pub const ALL: [ReductionCard; 12] = [
        ReductionCard::None,
        ReductionCard::BahnCard25FirstClass,
        ReductionCard::BahnCard25SecondClass,
        ReductionCard::BahnCard50FirstClass,
        ReductionCard::BahnCard50SecondClass,
        ReductionCard::VorteilsCard,
        ReductionCard::HalbtaxAboRailPlus,
        ReductionCard::HalbtaxAbo,
        ReductionCard::VoordeelurenaboRailPlus,
        ReductionCard::Voordeelurenabo,
        ReductionCard::ShCard,
        ReductionCard::GeneralAbonnement,
    ];

    /// Wire code sent as `redtnCard`.
    pub fn code(self) -> u8 {
        match self {
            ReductionCard::None => 0,
            ReductionCard::BahnCard25FirstClass => 1,
            ReductionCard::BahnCard25SecondClass => 2,
            ReductionCard::BahnCard50FirstClass => 3,
            ReductionCard::BahnCard50SecondClass => 4,
            ReductionCard::VorteilsCard => 9,
            ReductionCard::HalbtaxAboRailPlus => 10,
            ReductionCard::HalbtaxAbo => 11,
            ReductionCard::VoordeelurenaboRailPlus => 12,
            ReductionCard::Voordeelurenabo => 13,
            ReductionCard::ShCard => 14,
            ReductionCard::GeneralAbonnement => 15,
        }
    }
}

impl TryFrom<u8> for ReductionCard {
    type Error = DomainError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        ReductionCard::ALL
            .into_iter()
            .find(|card| card.code() == code)
            .ok_or(DomainError::UnknownReductionCard(code))
    }
}
