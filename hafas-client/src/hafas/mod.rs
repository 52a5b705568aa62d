//! HaFAS `mgate` client.
//!
//! Translates typed queries into operator-specific request bodies and parses
//! the responses into the [`crate::domain`] model.
//!
//! Key characteristics of HaFAS:
//! - Every request is a `svcReqL` envelope carrying one method call
//!   (`LocMatch`, `StationBoard`, `TripSearch`, `Reconstruction`) plus fixed client
//!   identification fields that differ per operator
//! - Some operators require the body to be signed with an MD5-based
//!   checksum appended to the URL
//! - Responses reference stations and lines by index into a shared
//!   `common` table
//! - Dates are `YYYYMMDD`, times are `HHMMSS` with an optional day offset,
//!   both in the operator's local timezone

mod client;
mod error;
pub mod format;
pub mod mock;
pub mod parse;
pub mod profile;
mod query;
pub mod request;
mod signing;
pub mod time;
mod transport;
pub mod types;


pub use client::{ClientConfig, HafasClient};
pub use error::HafasError;
pub use mock::{MockTransport, SentRequest};
pub use profile::{Locale, Operations, ProductTable, Profile, STANDARD_PRODUCTS};
pub use query::{
    BoardDirection, JourneyQuery, JourneysQuery, LocationKind, LocationsQuery, MAX_TRAVELERS,
    StationBoardQuery, TicketOptions, Traveler,
};
pub use request::ServiceRequest;
pub use signing::Signing;
pub use time::TimeFormatError;
pub use transport::{Headers, ReqwestTransport, Transport, TransportConfig, TransportError};
