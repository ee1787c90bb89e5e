//! Unified error interface for Axon.
//!
//! Every Axon error type implements [`ErrorCode`] so that callers can
//! branch on a stable machine-readable code instead of matching enum
//! variants across crate boundaries.
//!
//! # Design
//!
//! - **Machine-readable codes**: stable strings for programmatic handling
//! - **Recoverability info**: whether retrying or user action can help
//!
//! # Example
//!
//! ```
//! use axon_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum CacheError {
//!     Missing(String),
//!     Busy,
//! }
//!
//! impl ErrorCode for CacheError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Missing(_) => "CACHE_MISSING",
//!             Self::Busy => "CACHE_BUSY",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Busy)
//!     }
//! }
//!
//! let err = CacheError::Busy;
//! assert_eq!(err.code(), "CACHE_BUSY");
//! assert!(err.is_recoverable());
//! ```

/// Unified error code interface for Axon errors.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**: e.g., `"REGISTRY_NOT_FOUND"`
/// - **Crate-prefixed**: `"BUS_"`, `"REGISTRY_"`, `"COMPONENT_"`,
///   `"FACTORY_"`
/// - **Stable**: codes are an API contract and do not change once defined
///
/// # Recoverability
///
/// Recoverable means retrying may succeed or the caller can take
/// corrective action (transient condition, missing-but-addable entry).
/// Non-recoverable means the input or configuration is wrong and a retry
/// will fail identically (invalid name, dependency cycle, type mismatch).
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    ///
    /// UPPER_SNAKE_CASE, crate-prefixed, stable across versions.
    fn code(&self) -> &'static str;

    /// Returns whether the error is recoverable.
    fn is_recoverable(&self) -> bool;
}

/// Validates that an error code follows Axon conventions.
///
/// Checks that the code is non-empty, UPPER_SNAKE_CASE, and starts with
/// the expected crate prefix.
///
/// # Panics
///
/// Panics with a descriptive message if validation fails.
///
/// # Example
///
/// ```
/// use axon_types::{ErrorCode, assert_error_code};
///
/// #[derive(Debug)]
/// enum BusError { Closed }
///
/// impl ErrorCode for BusError {
///     fn code(&self) -> &'static str { "BUS_CLOSED" }
///     fn is_recoverable(&self) -> bool { false }
/// }
///
/// assert_error_code(&BusError::Closed, "BUS_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");

    assert!(
        code.starts_with(expected_prefix),
        "Error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );

    assert!(
        is_upper_snake_case(code),
        "Error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

/// Validates multiple error codes at once.
///
/// Use this to verify all variants of an error enum in one assertion.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

/// Checks if a string is UPPER_SNAKE_CASE.
fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }

    // No leading/trailing/doubled underscores
    if s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }

    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
