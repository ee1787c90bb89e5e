//! Factory layer errors.
//!
//! All errors implement [`ErrorCode`] with the `FACTORY_` prefix.
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`InvalidName`](FactoryError::InvalidName) | `FACTORY_INVALID_NAME` | No |
//! | [`NotRegistered`](FactoryError::NotRegistered) | `FACTORY_NOT_REGISTERED` | No |
//! | [`Resolution`](FactoryError::Resolution) | `FACTORY_RESOLUTION_FAILED` | follows the cause |
//! | [`Construction`](FactoryError::Construction) | `FACTORY_CONSTRUCTION_FAILED` | Yes |
//!
//! These cover the strict, resolution-time half of the error model:
//! `create` propagates them to its caller. Initialize and destroy
//! failures never appear here; the factory contains those and logs them.

use axon_registry::RegistryError;
use axon_types::ErrorCode;
use thiserror::Error;

/// Component factory error.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// Component name is empty.
    ///
    /// **Not recoverable** - fix the registration call.
    #[error("component name must not be empty")]
    InvalidName,

    /// No component class is registered under the name.
    ///
    /// **Not recoverable** - register the component first.
    #[error("component not registered: {name}")]
    NotRegistered {
        /// The unknown name.
        name: String,
    },

    /// A declared dependency could not be resolved.
    ///
    /// Recoverability follows the underlying registry error: a failed
    /// service constructor may succeed on retry, an unbound name or a
    /// cycle will not.
    #[error("dependency resolution failed: {0}")]
    Resolution(#[from] RegistryError),

    /// The component constructor returned an error.
    ///
    /// **Recoverable** - the cause may be transient.
    #[error("constructor for '{name}' failed: {reason}")]
    Construction {
        /// Component whose constructor failed.
        name: String,
        /// Stringified failure from the constructor.
        reason: String,
    },
}

impl ErrorCode for FactoryError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidName => "FACTORY_INVALID_NAME",
            Self::NotRegistered { .. } => "FACTORY_NOT_REGISTERED",
            Self::Resolution(_) => "FACTORY_RESOLUTION_FAILED",
            Self::Construction { .. } => "FACTORY_CONSTRUCTION_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidName | Self::NotRegistered { .. } => false,
            Self::Resolution(cause) => cause.is_recoverable(),
            Self::Construction { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axon_types::assert_error_codes;

    fn all_variants() -> Vec<FactoryError> {
        vec![
            FactoryError::InvalidName,
            FactoryError::NotRegistered { name: "x".into() },
            FactoryError::Resolution(RegistryError::NotFound { name: "dep".into() }),
            FactoryError::Construction {
                name: "x".into(),
                reason: "boom".into(),
            },
        ]
    }

    #[test]
    fn all_error_codes_valid() {
        assert_error_codes(&all_variants(), "FACTORY_");
    }

    #[test]
    fn resolution_recoverability_follows_cause() {
        let retryable = FactoryError::Resolution(RegistryError::Factory {
            name: "store".into(),
            reason: "disk offline".into(),
        });
        assert!(retryable.is_recoverable());

        let terminal = FactoryError::Resolution(RegistryError::NotFound { name: "x".into() });
        assert!(!terminal.is_recoverable());
    }

    #[test]
    fn resolution_display_names_dependency() {
        let err = FactoryError::Resolution(RegistryError::NotFound {
            name: "storage".into(),
        });
        assert!(err.to_string().contains("storage"));
    }
}
