//! Registry layer errors.
//!
//! All errors implement [`ErrorCode`] with the `REGISTRY_` prefix.
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`InvalidName`](RegistryError::InvalidName) | `REGISTRY_INVALID_NAME` | No |
//! | [`NotFound`](RegistryError::NotFound) | `REGISTRY_NOT_FOUND` | No |
//! | [`CircularDependency`](RegistryError::CircularDependency) | `REGISTRY_CIRCULAR_DEPENDENCY` | No |
//! | [`DepthExceeded`](RegistryError::DepthExceeded) | `REGISTRY_DEPTH_EXCEEDED` | No |
//! | [`Factory`](RegistryError::Factory) | `REGISTRY_FACTORY_FAILED` | Yes |
//! | [`WrongType`](RegistryError::WrongType) | `REGISTRY_WRONG_TYPE` | No |
//!
//! Resolution-time failures are strict: every one of these surfaces to
//! the immediate caller. The registry never swallows them.

use axon_types::ErrorCode;
use thiserror::Error;

/// Registry layer error.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// Service name is empty.
    ///
    /// **Not recoverable** - fix the registration call.
    #[error("service name must not be empty")]
    InvalidName,

    /// No instance, cached singleton, or factory is bound to the name.
    ///
    /// **Not recoverable** - register the service first.
    #[error("service not registered: {name}")]
    NotFound {
        /// The unbound name.
        name: String,
    },

    /// The dependency graph revisits a name already on the active
    /// resolution path.
    ///
    /// `path` holds the walk from the resolution root to the repeated
    /// name, repeated name included, e.g. `["a", "b", "c", "a"]`.
    ///
    /// **Not recoverable** - a configuration error.
    #[error("circular dependency detected: {}", .path.join(" -> "))]
    CircularDependency {
        /// Active path from the resolution root, ending at the repeat.
        path: Vec<String>,
    },

    /// Recursive resolution went deeper than the configured bound.
    ///
    /// Cycle detection catches true cycles; this bound catches
    /// pathological acyclic chains.
    ///
    /// **Not recoverable** - restructure the graph or raise the limit.
    #[error("resolution depth limit {limit} exceeded at '{name}'")]
    DepthExceeded {
        /// Name being resolved when the bound tripped.
        name: String,
        /// Configured `max_resolution_depth`.
        limit: usize,
    },

    /// A factory returned an error while constructing its service.
    ///
    /// **Recoverable** - the underlying cause may be transient.
    #[error("factory for '{name}' failed: {reason}")]
    Factory {
        /// Service whose factory failed.
        name: String,
        /// Stringified failure from the factory.
        reason: String,
    },

    /// The resolved value is not of the requested type.
    ///
    /// **Not recoverable** - the registration and the call disagree.
    #[error("service '{name}' is not a {expected}")]
    WrongType {
        /// Service whose value had the wrong type.
        name: String,
        /// The requested Rust type.
        expected: &'static str,
    },
}

impl ErrorCode for RegistryError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidName => "REGISTRY_INVALID_NAME",
            Self::NotFound { .. } => "REGISTRY_NOT_FOUND",
            Self::CircularDependency { .. } => "REGISTRY_CIRCULAR_DEPENDENCY",
            Self::DepthExceeded { .. } => "REGISTRY_DEPTH_EXCEEDED",
            Self::Factory { .. } => "REGISTRY_FACTORY_FAILED",
            Self::WrongType { .. } => "REGISTRY_WRONG_TYPE",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Factory { .. } => true,
            Self::InvalidName
            | Self::NotFound { .. }
            | Self::CircularDependency { .. }
            | Self::DepthExceeded { .. }
            | Self::WrongType { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axon_types::assert_error_codes;

    fn all_variants() -> Vec<RegistryError> {
        vec![
            RegistryError::InvalidName,
            RegistryError::NotFound { name: "x".into() },
            RegistryError::CircularDependency {
                path: vec!["a".into(), "b".into(), "a".into()],
            },
            RegistryError::DepthExceeded {
                name: "x".into(),
                limit: 32,
            },
            RegistryError::Factory {
                name: "x".into(),
                reason: "boom".into(),
            },
            RegistryError::WrongType {
                name: "x".into(),
                expected: "alloc::string::String",
            },
        ]
    }

    #[test]
    fn all_error_codes_valid() {
        assert_error_codes(&all_variants(), "REGISTRY_");
    }

    #[test]
    fn circular_dependency_names_full_path() {
        let err = RegistryError::CircularDependency {
            path: vec!["a".into(), "b".into(), "c".into(), "a".into()],
        };
        assert_eq!(
            err.to_string(),
            "circular dependency detected: a -> b -> c -> a"
        );
        assert!(!err.is_recoverable());
    }

    #[test]
    fn factory_failure_is_recoverable() {
        let err = RegistryError::Factory {
            name: "store".into(),
            reason: "disk offline".into(),
        };
        assert_eq!(err.code(), "REGISTRY_FACTORY_FAILED");
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("disk offline"));
    }
}
