//! Component contract for the axon runtime.
//!
//! This crate defines what a component *is*: a named unit, built by the
//! runtime's factory, that may expose optional lifecycle and bus
//! capabilities.
//!
//! # Crate Architecture
//!
//! This crate is part of the **SDK** layer:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         SDK Layer                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  axon-types     : ErrorCode, ListenerId                     │
//! │  axon-bus       : EventBus, Envelope, Subscription          │
//! │  axon-registry  : ServiceRegistry, ServiceFactory           │
//! │  axon-component : Component contract, BaseComponent ◄─ HERE │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    Coordination Layer                       │
//! │  axon-runtime   : ComponentFactory, bootstrap               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Core Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`Component`] | Mandatory: name + capability accessors |
//! | [`Initializable`] | Optional: deferred async startup |
//! | [`Destroyable`] | Optional: async teardown |
//! | [`BusAware`] | Optional: receives the shared [`EventBus`] |
//!
//! Capabilities are declared through `as_*` accessors returning
//! `Option<&dyn ...>`, all defaulting to `None`. The runtime calls
//! whatever is present and skips whatever is not.
//!
//! # BaseComponent
//!
//! [`BaseComponent`] covers the plumbing every bus-facing component
//! repeats: name, injected bus reference, config snapshot, and an
//! idempotent teardown latch. Embed one and delegate to it:
//!
//! ```
//! use axon_component::{BaseComponent, BusAware, Component, Destroyable, ComponentError};
//! use async_trait::async_trait;
//!
//! struct DocumentModel {
//!     base: BaseComponent,
//! }
//!
//! impl Component for DocumentModel {
//!     fn name(&self) -> &str {
//!         self.base.name()
//!     }
//!
//!     fn as_bus_aware(&self) -> Option<&dyn BusAware> {
//!         Some(&self.base)
//!     }
//!
//!     fn as_destroyable(&self) -> Option<&dyn Destroyable> {
//!         Some(self)
//!     }
//! }
//!
//! #[async_trait]
//! impl Destroyable for DocumentModel {
//!     async fn destroy(&self) -> Result<(), ComponentError> {
//!         // flush pending document state first, then:
//!         self.base.destroy();
//!         Ok(())
//!     }
//! }
//! ```
//!
//! # Related Crates
//!
//! - [`axon_bus`] - the bus injected through [`BusAware`]
//! - `axon-runtime` - constructs components and drives their lifecycle

mod base;
mod error;
mod traits;

pub mod testing;

pub use base::BaseComponent;
pub use error::ComponentError;
pub use traits::{BusAware, Component, Destroyable, Initializable};

// Re-export the bus handle components are wired with.
pub use axon_bus::EventBus;
