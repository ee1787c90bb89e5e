//! Coordination layer: component creation wired to dependency
//! resolution and lifecycle events.
//!
//! The SDK crates each cover one concern; this crate ties them
//! together:
//!
//! ```text
//!                    +----------------+
//!                    |      Axon      |   composition root
//!                    +-------+--------+
//!                            |
//!            +---------------+---------------+
//!            v               v               v
//!    +--------------+ +--------------+ +-----------------+
//!    |   EventBus   | |ServiceRegistry| |ComponentFactory |
//!    |  (axon-bus)  | |(axon-registry)| |  (this crate)   |
//!    +--------------+ +--------------+ +-----------------+
//!                            ^               |
//!                            +---------------+
//!                              resolves deps
//! ```
//!
//! A [`ComponentFactory`] looks up a registered constructor, resolves
//! its declared dependencies through the registry, hands the instance
//! the shared bus, runs deferred initialization for `Auto` components,
//! and announces the result as a `component:created` event.
//!
//! # Error Asymmetry
//!
//! Wiring mistakes fail loudly: a missing registration, an unresolvable
//! dependency, or a constructor error all surface as [`FactoryError`]
//! from [`ComponentFactory::create`]. Lifecycle callbacks fail quietly:
//! a failing `initialize` or `destroy` is logged and contained so one
//! misbehaving component cannot wedge startup or shutdown.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use axon_component::{BaseComponent, Component};
//! use axon_runtime::{Axon, ComponentOptions};
//! use serde_json::{Value, json};
//!
//! struct StatusBar {
//!     base: BaseComponent,
//! }
//!
//! impl Component for StatusBar {
//!     fn name(&self) -> &str {
//!         self.base.name()
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let axon = Axon::builder().with_source_name("editor").build();
//!
//! axon.factory()
//!     .register(
//!         "status-bar",
//!         |config: Value, _deps| {
//!             Ok(Arc::new(StatusBar {
//!                 base: BaseComponent::with_config("status-bar", config),
//!             }) as Arc<dyn Component>)
//!         },
//!         ComponentOptions {
//!             singleton: true,
//!             ..ComponentOptions::default()
//!         },
//!     )
//!     .unwrap();
//!
//! let bar = axon.factory().create("status-bar", json!({})).await.unwrap();
//! assert_eq!(bar.name(), "status-bar");
//! axon.shutdown().await;
//! # }
//! ```

mod bootstrap;
mod error;
mod factory;

pub use bootstrap::{Axon, AxonBuilder};
pub use error::FactoryError;
pub use factory::{
    COMPONENT_CREATED, COMPONENT_DESTROYED, ComponentFactory, ComponentOptions, LifecyclePolicy,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_surface_roundtrip() {
        let axon = Axon::builder().build();
        let options = ComponentOptions {
            singleton: true,
            lifecycle: LifecyclePolicy::Manual,
            ..ComponentOptions::default()
        };
        assert!(options.singleton);
        assert!(!axon.factory().is_registered("anything"));
        assert_eq!(COMPONENT_CREATED, "component:created");
        assert_eq!(COMPONENT_DESTROYED, "component:destroyed");
    }
}
