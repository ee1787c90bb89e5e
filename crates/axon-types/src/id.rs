//! Identifier types for Axon.
//!
//! UUID-based so identifiers stay unique without coordination and
//! serialize cleanly.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for a registered event listener.
///
/// The bus hands out a `ListenerId` at subscribe time; it is the handle
/// callers pass back to remove exactly that listener. Closures have no
/// identity of their own in Rust, so the id plays the role the callback
/// reference plays in looser runtimes.
///
/// # Example
///
/// ```
/// use axon_types::ListenerId;
///
/// let a = ListenerId::new();
/// let b = ListenerId::new();
/// assert_ne!(a, b);
/// assert!(format!("{a}").starts_with("lsn:"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub Uuid);

#[allow(clippy::new_without_default)] // Default intentionally not implemented - see below
impl ListenerId {
    /// Creates a new random listener ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

// NOTE: ListenerId intentionally does NOT implement Default.
// A fresh id minted by accident matches no registered listener, so
// construction must always be an explicit act.

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "lsn:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listener_id_uniqueness() {
        let a = ListenerId::new();
        let b = ListenerId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn listener_id_display() {
        let id = ListenerId::new();
        let display = format!("{id}");
        assert!(display.starts_with("lsn:"));
        assert!(display.contains(&id.uuid().to_string()));
    }

    #[test]
    fn listener_id_uuid() {
        let id = ListenerId::new();
        assert_eq!(id.uuid(), id.0);
    }

    #[test]
    fn listener_id_serde_roundtrip() {
        let id = ListenerId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: ListenerId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
