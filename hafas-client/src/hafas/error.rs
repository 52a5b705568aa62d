//! HaFAS client error types.

use std::fmt;

use crate::domain::DomainError;

use super::transport::TransportError;

/// Errors from formatting, sending or parsing a HaFAS request.
#[derive(Debug, thiserror::Error)]
pub enum HafasError {
    /// The operator answered with a non-OK status
    #[error("HaFAS returned error {code}: {text}")]
    Protocol { code: String, text: String },

    /// The response did not have the expected shape
    #[error("could not parse `{field}`: {message}")]
    Parse { field: String, message: String },

    /// Caller input rejected before any request was sent
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Delivery failed; passed through from the transport
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl HafasError {
    pub(crate) fn parse(field: impl Into<String>, message: impl fmt::Display) -> Self {
        HafasError::Parse {
            field: field.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        HafasError::InvalidArgument(message.into())
    }
}

impl From<DomainError> for HafasError {
    fn from(err: DomainError) -> Self {
        HafasError::InvalidArgument(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = HafasError::Protocol {
            code: "H890".into(),
            text: "Keine Verbindungen gefunden".into(),
        };
        assert_eq!(
            err.to_string(),
            "HaFAS returned error H890: Keine Verbindungen gefunden"
        );

        let err = HafasError::parse("svcResL[0].res.outConL[0].dur", "expected 6 or 8 digits");
        assert_eq!(
            err.to_string(),
            "could not parse `svcResL[0].res.outConL[0].dur`: expected 6 or 8 digits"
        );
    }

    #[test]
    fn domain_errors_are_invalid_arguments() {
        let err: HafasError = DomainError::InvalidAge(-3.0).into();
        assert!(matches!(err, HafasError::InvalidArgument(ref m) if m == "invalid age '-3'"));
    }

    #[test]
    fn transport_errors_pass_through() {
        let err: HafasError = TransportError::Status {
            status: 503,
            body: "maintenance".into(),
        }
        .into();
        assert_eq!(err.to_string(), "HTTP status 503: maintenance");
    }
}
