//! Error taxonomy
//!
//! Only `LoadError` and `AuthorizationError` stop a command from doing any
//! work. `ParseError` skips one ledger row, `ServiceError` fails one
//! person's reminder; both leave the rest of the batch running. Resolution
//! misses and duplicate registrations are scheduling outcomes, not errors
//! (see `features::reminders::Outcome`).

use std::time::Duration;
use thiserror::Error;

/// The ledger could not be fetched or read at all. Fatal to the whole run.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("ledger fetch failed: {0}")]
    Fetch(String),
    #[error("ledger is not readable CSV: {0}")]
    Malformed(String),
}

/// One row's currency fields could not be normalized. The row is skipped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("could not parse {field} {value:?} for {name}")]
pub struct ParseError {
    pub name: String,
    pub field: &'static str,
    pub value: String,
}

/// A call to the external notification service failed for one person.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("rate limited by the notification service")]
    RateLimited,
    #[error("recurrence {0:?} was rejected")]
    InvalidRecurrence(String),
    #[error("unknown recipient {0}")]
    UnknownRecipient(String),
    #[error("call timed out after {0:?}")]
    Timeout(Duration),
    #[error("transport failure: {0}")]
    Transport(String),
}

/// The actor is not a treasurer. Short-circuits with a fixed denial reply
/// and no state mutation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{actor} is not a treasurer")]
pub struct AuthorizationError {
    pub actor: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_names_the_row() {
        let err = ParseError {
            name: "Ana".into(),
            field: "balance",
            value: "n/a".into(),
        };
        assert_eq!(err.to_string(), "could not parse balance \"n/a\" for Ana");
    }

    #[test]
    fn test_service_error_display() {
        let err = ServiceError::InvalidRecurrence("whenever".into());
        assert_eq!(err.to_string(), "recurrence \"whenever\" was rejected");
        let err = ServiceError::Timeout(Duration::from_secs(10));
        assert!(err.to_string().contains("timed out"));
    }
}
