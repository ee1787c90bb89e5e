//! ComponentFactory - turns registered component classes into live,
//! wired instances.
//!
//! ```text
//! create("editor", config)
//!     │
//!     ▼ look up registration            (miss → NotRegistered)
//!     ▼ singleton cache check           (hit → return, no lifecycle)
//!     ▼ resolve dependencies in order   (failure → Resolution)
//!     ▼ run constructor(config, deps)   (failure → Construction)
//!     ▼ inject EventBus                 (BusAware components)
//!     ▼ schedule deferred initialize    (Auto policy, Initializable)
//!     ▼ publish "component:created"
//!     │
//!     ▼ returns Arc<dyn Component>
//! ```
//!
//! # Error Asymmetry
//!
//! Everything up to and including construction is strict: the error
//! reaches the `create` caller. Everything after is contained: a failed
//! deferred initialize or a failed destroy is logged, and the
//! surrounding operation carries on. One broken component must not
//! keep its siblings from starting or stopping.

use std::collections::HashMap;
use std::sync::Arc;

use axon_bus::EventBus;
use axon_component::Component;
use axon_registry::{ServiceRegistry, ServiceValue};
use chrono::Utc;
use parking_lot::Mutex;
use serde_json::{Value, json};
use tracing::{debug, error};

use crate::error::FactoryError;

/// Event published after every successful `create`.
///
/// Payload: `{"name": string, "timestamp": integer-millis}`.
pub const COMPONENT_CREATED: &str = "component:created";

/// Event published after every `destroy`, even when the component's
/// own destroy capability failed.
///
/// Payload: `{"name": string, "timestamp": integer-millis}`.
pub const COMPONENT_DESTROYED: &str = "component:destroyed";

/// When the factory runs a component's initialize capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecyclePolicy {
    /// `create` schedules `initialize` on a fresh task right after
    /// construction; failures are logged, not returned.
    #[default]
    Auto,
    /// The caller drives `initialize` itself.
    Manual,
}

/// Per-registration options for [`ComponentFactory::register`].
#[derive(Debug, Clone, Default)]
pub struct ComponentOptions {
    /// Cache the first created instance and return it for every later
    /// `create` of the same name.
    pub singleton: bool,
    /// Service names resolved through the registry and passed to the
    /// constructor in this order.
    pub dependencies: Vec<String>,
    /// Initialize scheduling policy.
    pub lifecycle: LifecyclePolicy,
}

/// Constructor signature for component classes.
///
/// Receives the `create`-time config and the resolved dependencies, in
/// declaration order.
type ComponentConstructor =
    Arc<dyn Fn(Value, &[ServiceValue]) -> Result<Arc<dyn Component>, String> + Send + Sync>;

#[derive(Clone)]
struct Registration {
    constructor: ComponentConstructor,
    options: ComponentOptions,
}

#[derive(Default)]
struct FactoryState {
    registrations: HashMap<String, Registration>,
    singletons: HashMap<String, Arc<dyn Component>>,
}

struct FactoryInner {
    registry: ServiceRegistry,
    bus: EventBus,
    state: Mutex<FactoryState>,
}

/// Builds components from registered classes and drives their
/// lifecycle.
///
/// Clones share state. The factory owns nothing exclusively: the
/// registry and bus handed to [`new`](Self::new) are the same shared
/// handles the rest of the application uses.
///
/// # Example
///
/// ```
/// use axon_component::{BaseComponent, Component};
/// use axon_runtime::{Axon, ComponentOptions};
/// use serde_json::{Value, json};
/// use std::sync::Arc;
///
/// struct StatusBar {
///     base: BaseComponent,
/// }
///
/// impl Component for StatusBar {
///     fn name(&self) -> &str {
///         self.base.name()
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let axon = Axon::builder().build();
/// axon.factory()
///     .register(
///         "status-bar",
///         |config, _deps| {
///             Ok(Arc::new(StatusBar {
///                 base: BaseComponent::with_config("status-bar", config),
///             }) as Arc<dyn Component>)
///         },
///         ComponentOptions::default(),
///     )
///     .unwrap();
///
/// let bar = axon
///     .factory()
///     .create("status-bar", json!({"visible": true}))
///     .await
///     .unwrap();
/// assert_eq!(bar.name(), "status-bar");
/// # }
/// ```
#[derive(Clone)]
pub struct ComponentFactory {
    inner: Arc<FactoryInner>,
}

impl ComponentFactory {
    /// Creates a factory resolving dependencies through `registry` and
    /// publishing lifecycle events on `bus`.
    #[must_use]
    pub fn new(registry: ServiceRegistry, bus: EventBus) -> Self {
        Self {
            inner: Arc::new(FactoryInner {
                registry,
                bus,
                state: Mutex::new(FactoryState::default()),
            }),
        }
    }

    /// Registers a component class under `name`.
    ///
    /// Re-registering replaces the previous class and drops any cached
    /// singleton instance built from it.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::InvalidName`] when `name` is empty.
    pub fn register<F>(
        &self,
        name: &str,
        constructor: F,
        options: ComponentOptions,
    ) -> Result<(), FactoryError>
    where
        F: Fn(Value, &[ServiceValue]) -> Result<Arc<dyn Component>, String> + Send + Sync + 'static,
    {
        if name.is_empty() {
            return Err(FactoryError::InvalidName);
        }
        let mut state = self.inner.state.lock();
        state.singletons.remove(name);
        state.registrations.insert(
            name.to_string(),
            Registration {
                constructor: Arc::new(constructor),
                options,
            },
        );
        debug!(component = name, "component class registered");
        Ok(())
    }

    /// Creates (or, for singletons, returns the cached) instance of
    /// `name`.
    ///
    /// Construction order: resolve declared dependencies, run the
    /// constructor, inject the bus into [`BusAware`] components,
    /// schedule deferred initialize under the `Auto` policy, publish
    /// [`COMPONENT_CREATED`]. A singleton cache hit skips all of it and
    /// returns the existing instance.
    ///
    /// The deferred initialize runs on its own task; its failure is
    /// logged and never surfaces here.
    ///
    /// # Errors
    ///
    /// - [`FactoryError::NotRegistered`] when `name` is unknown
    /// - [`FactoryError::Resolution`] when a dependency fails to resolve
    /// - [`FactoryError::Construction`] when the constructor errors
    ///
    /// [`BusAware`]: axon_component::BusAware
    pub async fn create(
        &self,
        name: &str,
        config: Value,
    ) -> Result<Arc<dyn Component>, FactoryError> {
        let registration = {
            let state = self.inner.state.lock();
            if let Some(cached) = state.singletons.get(name) {
                // Cached singletons come back as-is: no re-resolution,
                // no second initialize, no duplicate created event.
                return Ok(cached.clone());
            }
            match state.registrations.get(name) {
                Some(registration) => registration.clone(),
                None => {
                    return Err(FactoryError::NotRegistered {
                        name: name.to_string(),
                    });
                }
            }
        };

        let mut deps = Vec::with_capacity(registration.options.dependencies.len());
        for dep in &registration.options.dependencies {
            deps.push(self.inner.registry.resolve(dep).await?);
        }

        let instance = (registration.constructor)(config, &deps).map_err(|reason| {
            FactoryError::Construction {
                name: name.to_string(),
                reason,
            }
        })?;

        // Bus first: by the time any deferred initialize runs, the
        // component can already publish and subscribe.
        if let Some(aware) = instance.as_bus_aware() {
            aware.set_event_bus(self.inner.bus.clone());
        }

        if registration.options.singleton {
            let mut state = self.inner.state.lock();
            if let Some(existing) = state.singletons.get(name) {
                // Lost a construction race; the cached instance wins
                // and this one is dropped without lifecycle.
                return Ok(existing.clone());
            }
            state.singletons.insert(name.to_string(), instance.clone());
        }

        if registration.options.lifecycle == LifecyclePolicy::Auto
            && instance.as_initializable().is_some()
        {
            let component = instance.clone();
            let component_name = name.to_string();
            tokio::spawn(async move {
                if let Some(init) = component.as_initializable() {
                    if let Err(error) = init.initialize().await {
                        error!(component = %component_name, %error, "deferred initialize failed");
                    }
                }
            });
        }

        self.inner
            .bus
            .publish(COMPONENT_CREATED, lifecycle_payload(name))
            .await;
        debug!(component = name, "component created");
        Ok(instance)
    }

    /// Tears down one instance.
    ///
    /// Runs the component's destroy capability if present (a failure is
    /// logged and swallowed), evicts the instance from the singleton
    /// cache when it is the cached one, and always publishes
    /// [`COMPONENT_DESTROYED`]. `name` is the registration name the
    /// instance was created under.
    pub async fn destroy(&self, instance: &Arc<dyn Component>, name: &str) {
        if let Some(destroyable) = instance.as_destroyable() {
            if let Err(error) = destroyable.destroy().await {
                error!(component = name, %error, "destroy failed; teardown continues");
            }
        }

        {
            let mut state = self.inner.state.lock();
            let cached_here = state
                .singletons
                .get(name)
                .is_some_and(|cached| Arc::ptr_eq(cached, instance));
            if cached_here {
                state.singletons.remove(name);
            }
        }

        self.inner
            .bus
            .publish(COMPONENT_DESTROYED, lifecycle_payload(name))
            .await;
        debug!(component = name, "component destroyed");
    }

    /// Tears down every cached singleton instance, in name order.
    ///
    /// Each destroy is contained; a failing component does not stop the
    /// loop.
    pub async fn destroy_all(&self) {
        let mut cached: Vec<(String, Arc<dyn Component>)> = {
            let state = self.inner.state.lock();
            state
                .singletons
                .iter()
                .map(|(name, component)| (name.clone(), component.clone()))
                .collect()
        };
        cached.sort_by(|a, b| a.0.cmp(&b.0));

        for (name, component) in cached {
            self.destroy(&component, &name).await;
        }
    }

    /// Every registered component name, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let state = self.inner.state.lock();
        let mut names: Vec<String> = state.registrations.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Whether a component class is registered under `name`.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.inner.state.lock().registrations.contains_key(name)
    }

    /// The registry dependencies are resolved through.
    #[must_use]
    pub fn registry(&self) -> &ServiceRegistry {
        &self.inner.registry
    }

    /// The bus lifecycle events are published on.
    #[must_use]
    pub fn bus(&self) -> &EventBus {
        &self.inner.bus
    }
}

/// Payload shared by both lifecycle events.
fn lifecycle_payload(name: &str) -> Value {
    json!({ "name": name, "timestamp": Utc::now().timestamp_millis() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axon_component::BaseComponent;
    use axon_types::ErrorCode;

    struct Inert {
        base: BaseComponent,
    }

    impl Component for Inert {
        fn name(&self) -> &str {
            self.base.name()
        }
    }

    fn inert_constructor(name: &'static str) -> impl Fn(Value, &[ServiceValue]) -> Result<Arc<dyn Component>, String> {
        move |config, _deps| {
            Ok(Arc::new(Inert {
                base: BaseComponent::with_config(name, config),
            }) as Arc<dyn Component>)
        }
    }

    fn factory() -> ComponentFactory {
        ComponentFactory::new(ServiceRegistry::new(), EventBus::new())
    }

    #[test]
    fn register_empty_name_rejected() {
        let factory = factory();
        let err = factory
            .register("", inert_constructor("x"), ComponentOptions::default())
            .unwrap_err();
        assert_eq!(err.code(), "FACTORY_INVALID_NAME");
    }

    #[tokio::test]
    async fn create_unregistered_fails() {
        let factory = factory();
        let err = factory.create("ghost", Value::Null).await.unwrap_err();
        assert_eq!(err.code(), "FACTORY_NOT_REGISTERED");
        assert!(err.to_string().contains("ghost"));
    }

    #[tokio::test]
    async fn constructor_failure_propagates() {
        let factory = factory();
        factory
            .register(
                "broken",
                |_config, _deps| Err("no display attached".to_string()),
                ComponentOptions::default(),
            )
            .unwrap();

        let err = factory.create("broken", Value::Null).await.unwrap_err();
        assert_eq!(err.code(), "FACTORY_CONSTRUCTION_FAILED");
        assert!(err.to_string().contains("no display attached"));
    }

    #[tokio::test]
    async fn missing_dependency_surfaces_as_resolution_error() {
        let factory = factory();
        factory
            .register(
                "needy",
                inert_constructor("needy"),
                ComponentOptions {
                    dependencies: vec!["ghost".into()],
                    ..Default::default()
                },
            )
            .unwrap();

        let err = factory.create("needy", Value::Null).await.unwrap_err();
        assert_eq!(err.code(), "FACTORY_RESOLUTION_FAILED");
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn names_sorted_and_presence_checked() {
        let factory = factory();
        factory
            .register("zeta", inert_constructor("zeta"), ComponentOptions::default())
            .unwrap();
        factory
            .register("alpha", inert_constructor("alpha"), ComponentOptions::default())
            .unwrap();

        assert_eq!(factory.names(), ["alpha", "zeta"]);
        assert!(factory.is_registered("alpha"));
        assert!(!factory.is_registered("omega"));
    }

    #[tokio::test]
    async fn reregistering_drops_cached_singleton() {
        let factory = factory();
        factory
            .register(
                "svc",
                inert_constructor("svc"),
                ComponentOptions {
                    singleton: true,
                    ..Default::default()
                },
            )
            .unwrap();
        let first = factory.create("svc", Value::Null).await.unwrap();

        factory
            .register(
                "svc",
                inert_constructor("svc"),
                ComponentOptions {
                    singleton: true,
                    ..Default::default()
                },
            )
            .unwrap();
        let second = factory.create("svc", Value::Null).await.unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
    }
}
