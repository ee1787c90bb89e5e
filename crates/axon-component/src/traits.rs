//! Core traits for factory-built components.
//!
//! [`Component`] is the one mandatory trait; everything else is an
//! optional capability a component may expose through its `as_*`
//! accessors. Absence is fine, presence is called.
//!
//! # Trait Hierarchy
//!
//! ```text
//! Required:
//!   └── Component      (name + capability accessors)
//!
//! Optional capabilities:
//!   ├── Initializable  (async initialize, run by the factory)
//!   ├── Destroyable    (async destroy, run at teardown)
//!   └── BusAware       (receives the shared EventBus)
//! ```
//!
//! # Why Accessors Instead of Probing?
//!
//! The runtime never asks "does this object happen to have an
//! `initialize` method?". A component states its capabilities by
//! overriding the accessor, and the default answer is `None`. That
//! keeps the contract explicit and checkable at compile time.
//!
//! # Example
//!
//! ```
//! use axon_component::{BusAware, Component, ComponentError, Initializable};
//! use axon_bus::EventBus;
//! use async_trait::async_trait;
//! use parking_lot::Mutex;
//!
//! struct CacheComponent {
//!     name: String,
//!     bus: Mutex<Option<EventBus>>,
//! }
//!
//! impl Component for CacheComponent {
//!     fn name(&self) -> &str {
//!         &self.name
//!     }
//!
//!     fn as_initializable(&self) -> Option<&dyn Initializable> {
//!         Some(self)
//!     }
//!
//!     fn as_bus_aware(&self) -> Option<&dyn BusAware> {
//!         Some(self)
//!     }
//! }
//!
//! #[async_trait]
//! impl Initializable for CacheComponent {
//!     async fn initialize(&self) -> Result<(), ComponentError> {
//!         // warm the cache here
//!         Ok(())
//!     }
//! }
//!
//! impl BusAware for CacheComponent {
//!     fn set_event_bus(&self, bus: EventBus) {
//!         *self.bus.lock() = Some(bus);
//!     }
//! }
//! ```

use crate::error::ComponentError;
use async_trait::async_trait;
use axon_bus::EventBus;

/// A live, factory-built unit wired into the event bus world.
///
/// Implementations are shared behind `Arc<dyn Component>` and called
/// from async tasks, hence the `Send + Sync` bound and `&self` methods;
/// use interior mutability for state.
///
/// # Capability Accessors
///
/// | Accessor | Capability | Called by the runtime |
/// |----------|------------|-----------------------|
/// | `as_initializable` | [`Initializable`] | after construction, deferred |
/// | `as_destroyable` | [`Destroyable`] | at teardown |
/// | `as_bus_aware` | [`BusAware`] | during construction, before initialize |
///
/// Every accessor defaults to `None`; override the ones that apply.
pub trait Component: Send + Sync {
    /// Returns the component's name.
    ///
    /// Used for event payloads, logging, and the factory's singleton
    /// cache. Should match the name the component was registered under.
    fn name(&self) -> &str;

    /// Returns this component as an [`Initializable`] if supported.
    fn as_initializable(&self) -> Option<&dyn Initializable> {
        None
    }

    /// Returns this component as a [`Destroyable`] if supported.
    fn as_destroyable(&self) -> Option<&dyn Destroyable> {
        None
    }

    /// Returns this component as a [`BusAware`] if supported.
    fn as_bus_aware(&self) -> Option<&dyn BusAware> {
        None
    }
}

impl std::fmt::Debug for dyn Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component")
            .field("name", &self.name())
            .finish()
    }
}

/// Deferred startup work.
///
/// The factory schedules `initialize` on a separate task rather than
/// awaiting it inline, so `create` never blocks on slow startup. A
/// failure is caught and logged by the factory, never surfaced to the
/// `create` caller.
#[async_trait]
pub trait Initializable: Send + Sync {
    /// Runs the component's startup work.
    ///
    /// Called at most once per created instance. The event bus is
    /// already injected when this runs.
    ///
    /// # Errors
    ///
    /// Return `Err` when startup cannot complete; the component stays
    /// constructed but should treat itself as degraded.
    async fn initialize(&self) -> Result<(), ComponentError>;
}

/// Teardown work.
///
/// The factory catches and logs a failing `destroy` so one broken
/// component cannot block the teardown of its siblings.
#[async_trait]
pub trait Destroyable: Send + Sync {
    /// Releases the component's resources.
    ///
    /// Implementations built on [`BaseComponent`](crate::BaseComponent)
    /// finish by calling its `destroy()` after their own cleanup.
    ///
    /// # Errors
    ///
    /// Return `Err` when cleanup fails; teardown of other components
    /// continues regardless.
    async fn destroy(&self) -> Result<(), ComponentError>;
}

/// Receives the shared [`EventBus`].
///
/// The factory injects the bus during `create`, before any deferred
/// initialize runs, so startup work can already publish and subscribe.
pub trait BusAware: Send + Sync {
    /// Stores the bus for later emit/subscribe calls.
    fn set_event_bus(&self, bus: EventBus);
}
