//! Testing helpers for component and bus integration tests.
//!
//! Provides two small harnesses usable without a factory or any
//! runtime wiring:
//!
//! - [`RecordingListener`]: subscribes to a bus and captures every
//!   delivered envelope for later assertions.
//! - [`ProbeComponent`] + [`ProbeState`]: a component that records its
//!   lifecycle (bus injection, initialize, destroy) into shared state
//!   the test keeps a handle to, with switchable failure injection.
//!
//! Because `publish` only completes after every listener has settled,
//! a recording made right after an awaited publish is already final;
//! no sleeping or polling is needed.
//!
//! # Example
//!
//! ```
//! use axon_bus::EventBus;
//! use axon_component::testing::RecordingListener;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let bus = EventBus::new();
//! let recorder = RecordingListener::new();
//! recorder.subscribe_to(&bus, "file:saved").unwrap();
//!
//! bus.publish("file:saved", json!({"path": "notes.md"})).await;
//!
//! assert_eq!(recorder.count(), 1);
//! assert_eq!(recorder.received()[0].data, json!({"path": "notes.md"}));
//! # }
//! ```
//!
//! # Probe Example
//!
//! ```
//! use axon_component::testing::{ProbeComponent, ProbeState};
//! use axon_component::Component;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let state = ProbeState::new();
//! let probe = ProbeComponent::new("probe", state.clone());
//!
//! let init = probe.as_initializable().unwrap();
//! init.initialize().await.unwrap();
//!
//! assert_eq!(state.init_calls(), 1);
//! # }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use axon_bus::{BusError, Envelope, EventBus, Subscription};
use parking_lot::Mutex;

use crate::base::BaseComponent;
use crate::error::ComponentError;
use crate::traits::{BusAware, Component, Destroyable, Initializable};

/// Captures every envelope delivered to it, in delivery order.
///
/// Clones share the same capture buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    received: Arc<Mutex<Vec<Envelope>>>,
}

impl RecordingListener {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes this recorder to `event` on `bus`.
    ///
    /// May be called multiple times to record several event names into
    /// the same buffer.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::InvalidEventName`] if `event` is empty.
    pub fn subscribe_to(&self, bus: &EventBus, event: &str) -> Result<Subscription, BusError> {
        let received = Arc::clone(&self.received);
        bus.subscribe(event, move |envelope| {
            let received = Arc::clone(&received);
            async move {
                received.lock().push(envelope);
                Ok(())
            }
        })
    }

    /// Returns a copy of everything recorded so far.
    #[must_use]
    pub fn received(&self) -> Vec<Envelope> {
        self.received.lock().clone()
    }

    /// Returns the recorded event names, in delivery order.
    #[must_use]
    pub fn event_names(&self) -> Vec<String> {
        self.received
            .lock()
            .iter()
            .map(|envelope| envelope.event.clone())
            .collect()
    }

    /// Returns the number of envelopes recorded.
    #[must_use]
    pub fn count(&self) -> usize {
        self.received.lock().len()
    }

    /// Empties the capture buffer.
    pub fn clear(&self) {
        self.received.lock().clear();
    }
}

/// Observation point shared between a [`ProbeComponent`] and the test
/// that created it.
///
/// The component typically disappears behind `Arc<dyn Component>` once
/// a factory constructs it; the state handle stays with the test.
#[derive(Debug, Default)]
pub struct ProbeState {
    init_calls: AtomicUsize,
    destroy_calls: AtomicUsize,
    fail_init: AtomicBool,
    fail_destroy: AtomicBool,
    wired: AtomicBool,
}

impl ProbeState {
    /// Creates a fresh state handle.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Makes the next `initialize` calls fail.
    pub fn set_fail_init(&self, fail: bool) {
        self.fail_init.store(fail, Ordering::SeqCst);
    }

    /// Makes the next `destroy` calls fail.
    pub fn set_fail_destroy(&self, fail: bool) {
        self.fail_destroy.store(fail, Ordering::SeqCst);
    }

    /// How many times `initialize` ran.
    #[must_use]
    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    /// How many times `destroy` ran.
    #[must_use]
    pub fn destroy_calls(&self) -> usize {
        self.destroy_calls.load(Ordering::SeqCst)
    }

    /// Whether `set_event_bus` was called.
    #[must_use]
    pub fn is_wired(&self) -> bool {
        self.wired.load(Ordering::SeqCst)
    }
}

/// A component exposing every capability, recording each call into its
/// [`ProbeState`].
///
/// `destroy` returns its configured failure before touching the
/// embedded base, so a failed teardown leaves the component live - the
/// same shape a partially broken production component would have.
pub struct ProbeComponent {
    base: BaseComponent,
    state: Arc<ProbeState>,
}

impl ProbeComponent {
    /// Creates a probe reporting into `state`.
    #[must_use]
    pub fn new(name: impl Into<String>, state: Arc<ProbeState>) -> Self {
        Self {
            base: BaseComponent::new(name),
            state,
        }
    }

    /// The embedded base, for wiring or teardown assertions.
    #[must_use]
    pub fn base(&self) -> &BaseComponent {
        &self.base
    }
}

impl Component for ProbeComponent {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn as_initializable(&self) -> Option<&dyn Initializable> {
        Some(self)
    }

    fn as_destroyable(&self) -> Option<&dyn Destroyable> {
        Some(self)
    }

    fn as_bus_aware(&self) -> Option<&dyn BusAware> {
        Some(self)
    }
}

#[async_trait]
impl Initializable for ProbeComponent {
    async fn initialize(&self) -> Result<(), ComponentError> {
        self.state.init_calls.fetch_add(1, Ordering::SeqCst);
        if self.state.fail_init.load(Ordering::SeqCst) {
            return Err(ComponentError::Init {
                reason: "probe configured to fail initialize".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Destroyable for ProbeComponent {
    async fn destroy(&self) -> Result<(), ComponentError> {
        self.state.destroy_calls.fetch_add(1, Ordering::SeqCst);
        if self.state.fail_destroy.load(Ordering::SeqCst) {
            return Err(ComponentError::Destroy {
                reason: "probe configured to fail destroy".into(),
            });
        }
        self.base.destroy();
        Ok(())
    }
}

impl BusAware for ProbeComponent {
    fn set_event_bus(&self, bus: EventBus) {
        self.state.wired.store(true, Ordering::SeqCst);
        self.base.set_event_bus(bus);
    }
}
