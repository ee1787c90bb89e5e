//! Type-erased service values.

use std::any::Any;
use std::sync::Arc;

/// The value form every registry table stores.
///
/// The registry enforces no type contract on registered values; callers
/// recover concrete types with
/// [`resolve_as`](crate::ServiceRegistry::resolve_as) or a manual
/// `Arc::downcast`.
pub type ServiceValue = Arc<dyn Any + Send + Sync>;

/// Wraps a concrete value for registration.
///
/// ```
/// use axon_registry::{ServiceRegistry, service_value};
///
/// let registry = ServiceRegistry::new();
/// registry.register_instance("answer", service_value(42u32)).unwrap();
/// ```
///
/// Do not wrap a value that is already an `Arc<T>`: that nests the arc
/// and a later downcast to `T` will fail. Coerce it instead
/// (`let v: ServiceValue = existing_arc;`).
#[must_use]
pub fn service_value<T: Send + Sync + 'static>(value: T) -> ServiceValue {
    Arc::new(value)
}
