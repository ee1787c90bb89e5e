//! Composition root: builds the bus, registry, and factory together.
//!
//! There are no process-global accessors anywhere in axon. An
//! application constructs exactly one [`Axon`] at startup and passes
//! the handles it exposes down to whoever needs them; tests construct
//! their own and share nothing.

use axon_bus::EventBus;
use axon_registry::{RegistryConfig, ServiceRegistry};
use tracing::debug;

use crate::factory::ComponentFactory;

/// The wired coordination core.
///
/// Owns one [`EventBus`], one [`ServiceRegistry`], and one
/// [`ComponentFactory`] built on top of both. All three hand out cheap
/// shared clones, so "owns" means "is where bootstrap code finds them",
/// not exclusive access.
///
/// # Example
///
/// ```
/// use axon_runtime::Axon;
/// use axon_registry::service_value;
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let axon = Axon::builder().with_source_name("editor").build();
///
/// axon.registry()
///     .register_instance("settings", service_value(json!({"theme": "dark"})))
///     .unwrap();
///
/// axon.bus().publish("app:ready", json!({})).await;
/// axon.shutdown().await;
/// # }
/// ```
pub struct Axon {
    bus: EventBus,
    registry: ServiceRegistry,
    factory: ComponentFactory,
}

impl Axon {
    /// Creates a builder with default configuration.
    #[must_use]
    pub fn builder() -> AxonBuilder {
        AxonBuilder::new()
    }

    /// The shared event bus.
    #[must_use]
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// The shared service registry.
    #[must_use]
    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// The component factory.
    #[must_use]
    pub fn factory(&self) -> &ComponentFactory {
        &self.factory
    }

    /// Tears everything down.
    ///
    /// Destroys every cached singleton component (failures contained,
    /// in name order), then clears the registry and the bus listener
    /// tables. The `component:destroyed` events fire before the bus is
    /// cleared, so shutdown observers do hear them.
    pub async fn shutdown(&self) {
        self.factory.destroy_all().await;
        self.registry.clear();
        self.bus.clear_all();
        debug!("axon core shut down");
    }
}

/// Builder for [`Axon`].
///
/// # Example
///
/// ```
/// use axon_registry::RegistryConfig;
/// use axon_runtime::Axon;
///
/// let axon = Axon::builder()
///     .with_source_name("editor")
///     .with_registry_config(RegistryConfig {
///         max_resolution_depth: 16,
///     })
///     .with_bus_debug(true)
///     .build();
/// assert!(axon.bus().debug_enabled());
/// ```
pub struct AxonBuilder {
    source: String,
    registry_config: RegistryConfig,
    bus_debug: bool,
}

impl AxonBuilder {
    /// Creates a builder with the default source name (`"axon"`),
    /// default registry configuration, and bus debug tracing off.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: "axon".to_string(),
            registry_config: RegistryConfig::default(),
            bus_debug: false,
        }
    }

    /// Sets the default envelope source stamped by the bus.
    ///
    /// Components emitting through a `BaseComponent` override this with
    /// their own name; the builder's source shows up on bare
    /// `bus().publish` calls and on factory lifecycle events.
    #[must_use]
    pub fn with_source_name(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Sets the registry configuration.
    #[must_use]
    pub fn with_registry_config(mut self, config: RegistryConfig) -> Self {
        self.registry_config = config;
        self
    }

    /// Enables verbose bus tracing from the start.
    #[must_use]
    pub fn with_bus_debug(mut self, enabled: bool) -> Self {
        self.bus_debug = enabled;
        self
    }

    /// Builds the wired core.
    #[must_use]
    pub fn build(self) -> Axon {
        let bus = EventBus::with_source(self.source);
        bus.set_debug(self.bus_debug);
        let registry = ServiceRegistry::with_config(self.registry_config);
        let factory = ComponentFactory::new(registry.clone(), bus.clone());

        debug!("axon core built");
        Axon {
            bus,
            registry,
            factory,
        }
    }
}

impl Default for AxonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn builder_wires_shared_handles() {
        let axon = Axon::builder().with_source_name("test-core").build();

        // Factory and Axon expose the same underlying bus and registry.
        axon.registry()
            .register_instance("n", axon_registry::service_value(1u8))
            .unwrap();
        assert!(axon.factory().registry().has("n"));

        let seen = std::sync::Arc::new(parking_lot::Mutex::new(None));
        let slot = std::sync::Arc::clone(&seen);
        axon.factory()
            .bus()
            .subscribe("ping", move |envelope| {
                let slot = std::sync::Arc::clone(&slot);
                async move {
                    *slot.lock() = Some(envelope.source);
                    Ok(())
                }
            })
            .unwrap();

        axon.bus().publish("ping", json!({})).await;
        assert_eq!(seen.lock().take().as_deref(), Some("test-core"));
    }

    #[tokio::test]
    async fn shutdown_clears_registry_and_bus() {
        let axon = Axon::builder().build();
        axon.registry()
            .register_instance("svc", axon_registry::service_value(0u8))
            .unwrap();
        axon.bus()
            .subscribe("e", |_envelope| async { Ok(()) })
            .unwrap();

        axon.shutdown().await;

        assert!(axon.registry().names().is_empty());
        assert!(axon.bus().event_names().is_empty());
    }

    #[test]
    fn bus_debug_flag_applied() {
        let axon = Axon::builder().with_bus_debug(true).build();
        assert!(axon.bus().debug_enabled());

        let quiet = Axon::builder().build();
        assert!(!quiet.bus().debug_enabled());
    }
}
