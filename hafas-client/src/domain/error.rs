//! Domain error types.
//!
//! These errors represent invalid caller input in the domain layer. They are
//! raised before any request is built and are distinct from protocol errors.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Passenger age is negative, NaN or infinite
    #[error("invalid age '{0}'")]
    InvalidAge(f64),

    /// Reduction card code outside the known set
    #[error("unknown reduction card code {0}")]
    UnknownReductionCard(u8),

    /// Product name outside the known set
    #[error("unknown product '{0}'")]
    UnknownProduct(String),
}
