//! Domain types for public transport data.
//!
//! This module contains the normalized model every operator's responses are
//! parsed into. Nothing here knows about the wire format.

mod age_group;
mod error;
mod journey;
mod leg;
mod product;
mod reduction_card;
mod station;
mod ticket;

pub use age_group::AgeGroup;
pub use error::DomainError;
pub use journey::Journey;
pub use leg::{Leg, LegMode};
pub use product::{Product, ProductFilter};
pub use reduction_card::ReductionCard;
pub use station::{Coordinates, Station, StationId};
pub use ticket::Ticket;
