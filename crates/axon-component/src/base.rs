//! Reusable component core: name, bus wiring, config snapshot, teardown.
//!
//! Higher-level components embed a [`BaseComponent`] and delegate their
//! [`Component`](crate::Component) and [`BusAware`](crate::BusAware)
//! plumbing to it, keeping their own code to the domain logic.
//!
//! # Teardown Contract
//!
//! `destroy()` flips a latch, then releases the bus reference and the
//! config snapshot. After that every bus-facing method is a harmless
//! no-op: `emit` delivers to nobody, `on`/`once` hand back detached
//! subscriptions, `off` does nothing. Embedding components run their own
//! cleanup first and call `destroy()` last.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use axon_bus::{BusError, Envelope, EventBus, Subscription};
use axon_types::ListenerId;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use tracing::debug;

use crate::traits::BusAware;

/// Shared core every bus-facing component builds on.
///
/// Holds the component's name, an optional [`EventBus`] reference
/// (injected by the factory through [`BusAware`]), and an immutable
/// snapshot of the construction-time configuration.
///
/// # Example
///
/// ```
/// use axon_component::{BaseComponent, BusAware, Component};
/// use axon_bus::EventBus;
/// use serde_json::json;
///
/// struct StatusBar {
///     base: BaseComponent,
/// }
///
/// impl Component for StatusBar {
///     fn name(&self) -> &str {
///         self.base.name()
///     }
///
///     fn as_bus_aware(&self) -> Option<&dyn BusAware> {
///         Some(&self.base)
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let bar = StatusBar {
///     base: BaseComponent::with_config("status-bar", json!({"visible": true})),
/// };
/// bar.base.set_event_bus(EventBus::new());
/// bar.base.emit("status:ready", json!({})).await;
/// # }
/// ```
pub struct BaseComponent {
    name: String,
    bus: Mutex<Option<EventBus>>,
    config: RwLock<Option<Value>>,
    destroyed: AtomicBool,
}

impl BaseComponent {
    /// Creates an unwired core with no configuration.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bus: Mutex::new(None),
            config: RwLock::new(None),
            destroyed: AtomicBool::new(false),
        }
    }

    /// Creates an unwired core holding a configuration snapshot.
    #[must_use]
    pub fn with_config(name: impl Into<String>, config: Value) -> Self {
        Self {
            name: name.into(),
            bus: Mutex::new(None),
            config: RwLock::new(Some(config)),
            destroyed: AtomicBool::new(false),
        }
    }

    /// Returns the component's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the construction-time configuration snapshot.
    ///
    /// `None` when the component was built without one or has been
    /// destroyed.
    #[must_use]
    pub fn config(&self) -> Option<Value> {
        self.config.read().clone()
    }

    /// Returns a clone of the wired bus, if any.
    #[must_use]
    pub fn bus(&self) -> Option<EventBus> {
        self.bus.lock().clone()
    }

    /// Stores the shared bus. Ignored once destroyed.
    pub fn set_event_bus(&self, bus: EventBus) {
        if self.is_destroyed() {
            return;
        }
        *self.bus.lock() = Some(bus);
    }

    /// Publishes `data` under `event` with this component's name as the
    /// envelope source.
    ///
    /// Returns the number of listeners delivered to; `0` when the
    /// component is destroyed or no bus is wired.
    pub async fn emit(&self, event: &str, data: Value) -> usize {
        if self.is_destroyed() {
            return 0;
        }
        let Some(bus) = self.bus() else {
            return 0;
        };
        bus.publish_from(event, data, self.name.clone()).await
    }

    /// Registers a persistent listener through the wired bus.
    ///
    /// Returns a detached [`Subscription`] when the component is
    /// destroyed or unwired; unsubscribing a detached handle is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::InvalidEventName`] if `event` is empty.
    pub fn on<F, Fut>(&self, event: &str, listener: F) -> Result<Subscription, BusError>
    where
        F: Fn(Envelope) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), String>> + Send + 'static,
    {
        if self.is_destroyed() {
            return Ok(Subscription::detached());
        }
        match self.bus() {
            Some(bus) => bus.subscribe(event, listener),
            None => Ok(Subscription::detached()),
        }
    }

    /// Registers a one-shot listener through the wired bus.
    ///
    /// Same destroyed/unwired behavior as [`on`](Self::on).
    ///
    /// # Errors
    ///
    /// Returns [`BusError::InvalidEventName`] if `event` is empty.
    pub fn once<F, Fut>(&self, event: &str, listener: F) -> Result<Subscription, BusError>
    where
        F: Fn(Envelope) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), String>> + Send + 'static,
    {
        if self.is_destroyed() {
            return Ok(Subscription::detached());
        }
        match self.bus() {
            Some(bus) => bus.subscribe_once(event, listener),
            None => Ok(Subscription::detached()),
        }
    }

    /// Removes a listener by id. No-op when destroyed or unwired.
    pub fn off(&self, event: &str, id: ListenerId) {
        if self.is_destroyed() {
            return;
        }
        if let Some(bus) = self.bus() {
            bus.unsubscribe(event, id);
        }
    }

    /// Tears the component down. Idempotent.
    ///
    /// Releases the bus reference and the config snapshot; every later
    /// bus-facing call is a no-op. Embedding components call this after
    /// their own cleanup.
    pub fn destroy(&self) {
        if self.destroyed.swap(true, Ordering::SeqCst) {
            return;
        }
        *self.bus.lock() = None;
        *self.config.write() = None;
        debug!(component = %self.name, "component destroyed");
    }

    /// Whether [`destroy`](Self::destroy) has run.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }
}

impl BusAware for BaseComponent {
    fn set_event_bus(&self, bus: EventBus) {
        Self::set_event_bus(self, bus);
    }
}

impl std::fmt::Debug for BaseComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseComponent")
            .field("name", &self.name)
            .field("wired", &self.bus.lock().is_some())
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}
