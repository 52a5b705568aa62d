//! HaFAS public transport client.
//!
//! Queries HaFAS `mgate` endpoints (station boards, journey search, journey
//! details with fares) and normalizes the answers into a shared model,
//! whichever operator served them.

pub mod domain;
pub mod hafas;
