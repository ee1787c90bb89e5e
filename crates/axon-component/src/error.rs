//! Component lifecycle errors.
//!
//! All errors implement [`ErrorCode`] with the `COMPONENT_` prefix.
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`Init`](ComponentError::Init) | `COMPONENT_INIT_FAILED` | Yes |
//! | [`Destroy`](ComponentError::Destroy) | `COMPONENT_DESTROY_FAILED` | Yes |
//! | [`Config`](ComponentError::Config) | `COMPONENT_INVALID_CONFIG` | No |
//!
//! Lifecycle errors are contained, not propagated: the runtime catches
//! them at the call site and logs them, so one broken component cannot
//! keep its siblings from starting or stopping.

use axon_types::ErrorCode;
use thiserror::Error;

/// Component lifecycle error.
#[derive(Debug, Clone, Error)]
pub enum ComponentError {
    /// `initialize` did not complete.
    ///
    /// **Recoverable** - the component may initialize on a later
    /// attempt.
    #[error("initialize failed: {reason}")]
    Init {
        /// What went wrong.
        reason: String,
    },

    /// `destroy` did not complete.
    ///
    /// **Recoverable** - teardown of other components continues.
    #[error("destroy failed: {reason}")]
    Destroy {
        /// What went wrong.
        reason: String,
    },

    /// The construction-time configuration is unusable.
    ///
    /// **Not recoverable** - fix the configuration passed to `create`.
    #[error("invalid config: {reason}")]
    Config {
        /// What the configuration is missing or getting wrong.
        reason: String,
    },
}

impl ErrorCode for ComponentError {
    fn code(&self) -> &'static str {
        match self {
            Self::Init { .. } => "COMPONENT_INIT_FAILED",
            Self::Destroy { .. } => "COMPONENT_DESTROY_FAILED",
            Self::Config { .. } => "COMPONENT_INVALID_CONFIG",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Init { .. } | Self::Destroy { .. } => true,
            Self::Config { .. } => false,
        }
    }
}
