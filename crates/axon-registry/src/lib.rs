//! # axon-registry
//!
//! Service directory for the axon runtime: names bound to values, with
//! factory-based construction and dependency injection on top.
//!
//! Three ways to bind a name:
//!
//! - [`ServiceRegistry::register_instance`] - a pre-built value
//! - [`ServiceFactory::new`] / [`ServiceFactory::new_async`] - a
//!   constructor the registry runs on demand, with declared
//!   dependencies resolved first
//! - [`Lifetime::Singleton`] factories cache their first value;
//!   [`Lifetime::Transient`] factories rebuild per resolution
//!
//! Resolution errors are strict: unknown names, dependency cycles, and
//! constructor failures all surface to the caller as [`RegistryError`]
//! values rather than being logged and swallowed. Callers that want
//! lenient lookups check [`ServiceRegistry::has`] first.

mod config;
mod error;
mod factory;
mod registry;
mod value;

pub use config::RegistryConfig;
pub use error::RegistryError;
pub use factory::{Lifetime, ServiceFactory};
pub use registry::ServiceRegistry;
pub use value::{ServiceValue, service_value};

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn public_surface_roundtrip() {
        let registry = ServiceRegistry::with_config(RegistryConfig::default());
        registry
            .register_factory(
                "svc",
                ServiceFactory::new(|_| Ok(service_value(7u32))).with_lifetime(Lifetime::Singleton),
            )
            .unwrap();
        let value = registry.resolve_as::<u32>("svc").await.unwrap();
        assert_eq!(*value, 7);
    }
}
