//! Bus layer errors.
//!
//! All errors implement [`ErrorCode`] with the `BUS_` prefix.
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`InvalidEventName`](BusError::InvalidEventName) | `BUS_INVALID_EVENT_NAME` | No |

use axon_types::ErrorCode;
use thiserror::Error;

/// Bus layer error.
///
/// Subscription is the only fallible bus operation; delivery failures are
/// contained and logged, never surfaced as errors (see [`crate::EventBus`]).
#[derive(Debug, Clone, Error)]
pub enum BusError {
    /// Event name is empty.
    ///
    /// Listeners are keyed by event name; an empty key can never be
    /// published to.
    ///
    /// **Not recoverable** - fix the event name.
    #[error("event name must not be empty")]
    InvalidEventName,
}

impl ErrorCode for BusError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidEventName => "BUS_INVALID_EVENT_NAME",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidEventName => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axon_types::assert_error_codes;

    fn all_variants() -> Vec<BusError> {
        vec![BusError::InvalidEventName]
    }

    #[test]
    fn all_error_codes_valid() {
        assert_error_codes(&all_variants(), "BUS_");
    }

    #[test]
    fn invalid_event_name_error() {
        let err = BusError::InvalidEventName;
        assert_eq!(err.code(), "BUS_INVALID_EVENT_NAME");
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("must not be empty"));
    }
}
