//! EventBus - decoupled communication between components.
//!
//! Producers and consumers of named occurrences never reference each
//! other; both sides hold a cheap clone of the bus.
//!
//! # Dispatch Phases
//!
//! ```text
//! publish("document:changed", data)
//!     │
//!     ▼ snapshot persistent + drain once   (one lock, no await)
//!     ▼ invoke persistent, settle together (lock released)
//!     ▼ invoke once, settle together       (lock released)
//!     │
//!     ▼ returns the number of listeners invoked
//! ```
//!
//! # Delivery Semantics
//!
//! - Listeners present when dispatch begins are the delivery set;
//!   listeners subscribed mid-dispatch only see future publishes.
//! - Within one class every listener is invoked before any returned
//!   future is awaited; completion is awaited collectively and a single
//!   failure is logged without disturbing the rest.
//! - Once-listeners are removed as a group when dispatch begins, so a
//!   re-entrant publish of the same event can never deliver to them
//!   twice.
//! - Delivery order within one event name is unspecified; callers must
//!   not rely on registration order.

use crate::envelope::Envelope;
use crate::error::BusError;
use axon_types::ListenerId;
use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, warn};

/// Future returned by one listener invocation.
///
/// Listener failures carry a plain message string; the bus logs them and
/// moves on (delivery errors are contained, not propagated).
pub type ListenerFuture = BoxFuture<'static, Result<(), String>>;

/// Type-erased listener as stored in the bus tables.
type StoredListener = Arc<dyn Fn(Envelope) -> ListenerFuture + Send + Sync>;

/// Boxes a caller-supplied closure into the stored form.
fn box_listener<F, Fut>(listener: F) -> StoredListener
where
    F: Fn(Envelope) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), String>> + Send + 'static,
{
    Arc::new(move |envelope| listener(envelope).boxed())
}

#[derive(Default)]
struct BusState {
    /// Persistent listeners: event name → listener id → listener.
    persistent: HashMap<String, HashMap<ListenerId, StoredListener>>,
    /// One-shot listeners, disjoint from the persistent table.
    once: HashMap<String, HashMap<ListenerId, StoredListener>>,
}

struct BusInner {
    state: Mutex<BusState>,
    /// Default `source` stamped into envelopes by [`EventBus::publish`].
    source: String,
    /// Verbose tracing toggle; no behavioral effect.
    debug: AtomicBool,
}

impl BusInner {
    fn debug_enabled(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    /// Removes the listener from both tables, pruning empty entries.
    fn remove_listener(&self, event: &str, id: ListenerId) -> bool {
        let mut state = self.state.lock();
        let mut removed = false;

        if let Some(listeners) = state.persistent.get_mut(event) {
            removed |= listeners.remove(&id).is_some();
            if listeners.is_empty() {
                state.persistent.remove(event);
            }
        }
        if let Some(listeners) = state.once.get_mut(event) {
            removed |= listeners.remove(&id).is_some();
            if listeners.is_empty() {
                state.once.remove(event);
            }
        }
        drop(state);

        if removed && self.debug_enabled() {
            debug!(event, %id, "listener removed");
        }
        removed
    }
}

/// Named-event publish/subscribe bus.
///
/// Cloning is cheap and every clone shares the same listener tables, so
/// the bus can be handed to each component at construction time.
///
/// # Example
///
/// ```
/// use axon_bus::EventBus;
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let bus = EventBus::new();
///
/// let sub = bus
///     .subscribe("file:saved", |envelope| async move {
///         println!("saved: {}", envelope.data);
///         Ok(())
///     })
///     .unwrap();
///
/// let delivered = bus.publish("file:saved", json!({"path": "a.md"})).await;
/// assert_eq!(delivered, 1);
///
/// sub.unsubscribe();
/// # }
/// ```
#[derive(Clone)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl EventBus {
    /// Creates a bus whose default envelope source is `"bus"`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_source("bus")
    }

    /// Creates a bus with a custom default envelope source.
    #[must_use]
    pub fn with_source(source: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(BusInner {
                state: Mutex::new(BusState::default()),
                source: source.into(),
                debug: AtomicBool::new(false),
            }),
        }
    }

    /// Registers a persistent listener for `event`.
    ///
    /// The listener runs on every publish of `event` until removed. The
    /// returned [`Subscription`] removes exactly this listener; calling
    /// its `unsubscribe()` twice is a no-op the second time. Dropping
    /// the handle does NOT unsubscribe.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::InvalidEventName`] if `event` is empty.
    pub fn subscribe<F, Fut>(&self, event: &str, listener: F) -> Result<Subscription, BusError>
    where
        F: Fn(Envelope) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), String>> + Send + 'static,
    {
        let id = self.insert(event, box_listener(listener), false)?;
        Ok(Subscription {
            event: event.to_owned(),
            id,
            bus: Arc::downgrade(&self.inner),
        })
    }

    /// Registers a listener invoked at most once.
    ///
    /// The listener is removed after its single delivery, even if it
    /// fails. The returned [`Subscription`] removes it early; after the
    /// delivery it is stale and unsubscribing through it is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::InvalidEventName`] if `event` is empty.
    pub fn subscribe_once<F, Fut>(&self, event: &str, listener: F) -> Result<Subscription, BusError>
    where
        F: Fn(Envelope) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), String>> + Send + 'static,
    {
        let id = self.insert(event, box_listener(listener), true)?;
        Ok(Subscription {
            event: event.to_owned(),
            id,
            bus: Arc::downgrade(&self.inner),
        })
    }

    fn insert(&self, event: &str, listener: StoredListener, once: bool) -> Result<ListenerId, BusError> {
        if event.is_empty() {
            return Err(BusError::InvalidEventName);
        }

        let id = ListenerId::new();
        {
            let mut state = self.inner.state.lock();
            let table = if once {
                &mut state.once
            } else {
                &mut state.persistent
            };
            table.entry(event.to_owned()).or_default().insert(id, listener);
        }

        if self.inner.debug_enabled() {
            debug!(event, %id, once, "listener subscribed");
        }
        Ok(id)
    }

    /// Removes the listener with `id` from both the persistent and once
    /// collections for `event`. No-op if absent.
    pub fn unsubscribe(&self, event: &str, id: ListenerId) {
        self.inner.remove_listener(event, id);
    }

    /// Publishes `data` under `event` and awaits delivery.
    ///
    /// Builds an [`Envelope`] stamped with the bus default source,
    /// delivers it to every persistent listener registered when dispatch
    /// begins, then to the once-listeners captured and cleared at that
    /// same moment. Completion means every listener present at dispatch
    /// time was invoked and every returned future finished, successfully
    /// or not. A failing listener is logged, never surfaced here.
    ///
    /// Returns the number of listeners invoked.
    pub async fn publish(&self, event: &str, data: Value) -> usize {
        let source = self.inner.source.clone();
        self.dispatch(event, data, source).await
    }

    /// Same as [`publish`](Self::publish) with a caller-supplied
    /// envelope source.
    pub async fn publish_from(&self, event: &str, data: Value, source: impl Into<String>) -> usize {
        self.dispatch(event, data, source.into()).await
    }

    async fn dispatch(&self, event: &str, data: Value, source: String) -> usize {
        let envelope = Envelope::new(event, data, source);

        if self.inner.debug_enabled() {
            debug!(event, "dispatch start");
        }

        // Both classes are captured in one critical section when
        // dispatch begins; listeners subscribed mid-dispatch, from a
        // listener body included, only see future publishes. The once
        // set is drained in the same section, so a re-entrant publish
        // of the same event can never observe it again.
        let (persistent, once) = {
            let mut state = self.inner.state.lock();
            let persistent: Vec<StoredListener> = state
                .persistent
                .get(event)
                .map(|listeners| listeners.values().cloned().collect())
                .unwrap_or_default();
            let once: Vec<StoredListener> = state
                .once
                .remove(event)
                .map(|listeners| listeners.into_values().collect())
                .unwrap_or_default();
            (persistent, once)
        };

        let mut delivered = settle(event, &envelope, persistent).await;
        delivered += settle(event, &envelope, once).await;

        if self.inner.debug_enabled() {
            debug!(event, delivered, "dispatch complete");
        }
        delivered
    }

    /// Removes all listener state for one event. Teardown only.
    pub fn clear_event(&self, event: &str) {
        let mut state = self.inner.state.lock();
        state.persistent.remove(event);
        state.once.remove(event);
    }

    /// Removes all listener state. Teardown only.
    pub fn clear_all(&self) {
        let mut state = self.inner.state.lock();
        state.persistent.clear();
        state.once.clear();
    }

    /// Returns the number of listeners (both classes) for `event`.
    #[must_use]
    pub fn listener_count(&self, event: &str) -> usize {
        let state = self.inner.state.lock();
        state.persistent.get(event).map_or(0, |l| l.len())
            + state.once.get(event).map_or(0, |l| l.len())
    }

    /// Returns the sorted names of events with at least one listener.
    #[must_use]
    pub fn event_names(&self) -> Vec<String> {
        let state = self.inner.state.lock();
        let mut names: Vec<String> = state
            .persistent
            .keys()
            .chain(state.once.keys())
            .cloned()
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Enables or disables verbose subscribe/publish/unsubscribe tracing.
    pub fn set_debug(&self, enabled: bool) {
        self.inner.debug.store(enabled, Ordering::Relaxed);
    }

    /// Returns whether verbose tracing is enabled.
    #[must_use]
    pub fn debug_enabled(&self) -> bool {
        self.inner.debug_enabled()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Invokes every listener in one class, then awaits all returned futures
/// together. Individual failures are logged; the count of invoked
/// listeners is returned either way.
async fn settle(event: &str, envelope: &Envelope, listeners: Vec<StoredListener>) -> usize {
    if listeners.is_empty() {
        return 0;
    }
    let delivered = listeners.len();

    // Every listener is invoked before any future is awaited.
    let pending: Vec<ListenerFuture> = listeners
        .iter()
        .map(|listener| listener(envelope.clone()))
        .collect();

    for result in join_all(pending).await {
        if let Err(reason) = result {
            warn!(event, %reason, "listener failed during delivery");
        }
    }
    delivered
}

/// Handle for removing a registered listener.
///
/// Holds a weak reference to the bus: once the bus is gone (or the handle
/// was created [`detached`](Subscription::detached)), `unsubscribe()` is
/// inert. Dropping the handle does NOT unsubscribe.
pub struct Subscription {
    event: String,
    id: ListenerId,
    bus: Weak<BusInner>,
}

impl Subscription {
    /// Removes the listener this handle was created for. Idempotent.
    pub fn unsubscribe(&self) {
        if let Some(inner) = self.bus.upgrade() {
            inner.remove_listener(&self.event, self.id);
        }
    }

    /// Returns the event name this subscription is bound to.
    #[must_use]
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Returns the listener id, usable with [`EventBus::unsubscribe`].
    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Creates a handle connected to no bus; `unsubscribe()` is a no-op.
    ///
    /// Used where an API must hand back a subscription but the listener
    /// was never registered (e.g. a torn-down component).
    #[must_use]
    pub fn detached() -> Self {
        Self {
            event: String::new(),
            id: ListenerId::new(),
            bus: Weak::new(),
        }
    }

    /// Returns `true` if no live bus backs this handle.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.bus.strong_count() == 0
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("event", &self.event)
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axon_types::ErrorCode;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    fn counting_listener(
        counter: &Arc<AtomicUsize>,
    ) -> impl Fn(Envelope) -> BoxFuture<'static, Result<(), String>> + Send + Sync + 'static {
        let counter = Arc::clone(counter);
        move |_envelope| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
            .boxed()
        }
    }

    #[tokio::test]
    async fn subscribe_and_publish_delivers() {
        let bus = EventBus::new();
        let calls = Arc::new(AtomicUsize::new(0));

        bus.subscribe("e", counting_listener(&calls)).unwrap();

        let delivered = bus.publish("e", json!({"n": 1})).await;
        assert_eq!(delivered, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn publish_without_listeners_delivers_zero() {
        let bus = EventBus::new();
        assert_eq!(bus.publish("silent", Value::Null).await, 0);
    }

    #[tokio::test]
    async fn listener_receives_envelope() {
        let bus = EventBus::with_source("test-bus");
        let seen = Arc::new(Mutex::new(None));

        let slot = Arc::clone(&seen);
        bus.subscribe("document:changed", move |envelope| {
            let slot = Arc::clone(&slot);
            async move {
                *slot.lock() = Some(envelope);
                Ok(())
            }
        })
        .unwrap();

        bus.publish("document:changed", json!({"id": 3})).await;

        let envelope = seen.lock().take().expect("listener should have run");
        assert_eq!(envelope.event, "document:changed");
        assert_eq!(envelope.data, json!({"id": 3}));
        assert_eq!(envelope.source, "test-bus");
        assert!(envelope.timestamp > 0);
    }

    #[tokio::test]
    async fn publish_from_overrides_source() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(None));

        let slot = Arc::clone(&seen);
        bus.subscribe("file:saved", move |envelope| {
            let slot = Arc::clone(&slot);
            async move {
                *slot.lock() = Some(envelope.source);
                Ok(())
            }
        })
        .unwrap();

        bus.publish_from("file:saved", Value::Null, "editor").await;
        assert_eq!(seen.lock().take().as_deref(), Some("editor"));
    }

    #[tokio::test]
    async fn publish_targets_single_event_name() {
        let bus = EventBus::new();
        let a_calls = Arc::new(AtomicUsize::new(0));
        let b_calls = Arc::new(AtomicUsize::new(0));

        bus.subscribe("a", counting_listener(&a_calls)).unwrap();
        bus.subscribe("b", counting_listener(&b_calls)).unwrap();

        bus.publish("a", Value::Null).await;

        assert_eq!(a_calls.load(Ordering::SeqCst), 1);
        assert_eq!(b_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn once_listener_fires_exactly_once() {
        let bus = EventBus::new();
        let calls = Arc::new(AtomicUsize::new(0));

        bus.subscribe_once("e", counting_listener(&calls)).unwrap();

        bus.publish("e", Value::Null).await;
        bus.publish("e", Value::Null).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(bus.listener_count("e"), 0);
    }

    #[tokio::test]
    async fn once_listener_removed_even_when_it_fails() {
        let bus = EventBus::new();

        bus.subscribe_once("e", |_envelope| async { Err("once failure".to_string()) })
            .unwrap();

        let delivered = bus.publish("e", Value::Null).await;
        assert_eq!(delivered, 1);
        assert_eq!(bus.listener_count("e"), 0);
        assert_eq!(bus.publish("e", Value::Null).await, 0);
    }

    #[tokio::test]
    async fn failing_listener_does_not_block_others() {
        let bus = EventBus::new();
        let ok_calls = Arc::new(AtomicUsize::new(0));

        bus.subscribe("e", |_envelope| async { Err("boom".to_string()) })
            .unwrap();
        bus.subscribe("e", counting_listener(&ok_calls)).unwrap();

        let delivered = bus.publish("e", json!({})).await;

        assert_eq!(delivered, 2);
        assert_eq!(ok_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn persistent_class_delivered_before_once_class() {
        let bus = EventBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        // Registered once-first; delivery is still persistent-first.
        let log = Arc::clone(&order);
        bus.subscribe_once("e", move |_envelope| {
            let log = Arc::clone(&log);
            async move {
                log.lock().push("once");
                Ok(())
            }
        })
        .unwrap();

        let log = Arc::clone(&order);
        bus.subscribe("e", move |_envelope| {
            let log = Arc::clone(&log);
            async move {
                log.lock().push("persistent");
                Ok(())
            }
        })
        .unwrap();

        bus.publish("e", Value::Null).await;

        assert_eq!(*order.lock(), vec!["persistent", "once"]);
    }

    #[tokio::test]
    async fn subscription_unsubscribe_idempotent() {
        let bus = EventBus::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let sub = bus.subscribe("e", counting_listener(&calls)).unwrap();
        assert_eq!(bus.listener_count("e"), 1);

        sub.unsubscribe();
        assert_eq!(bus.listener_count("e"), 0);

        sub.unsubscribe();
        assert_eq!(bus.listener_count("e"), 0);

        bus.publish("e", Value::Null).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unsubscribe_removes_once_listener() {
        let bus = EventBus::new();
        let sub = bus
            .subscribe_once("e", |_envelope| async { Ok(()) })
            .unwrap();

        assert_eq!(bus.listener_count("e"), 1);
        bus.unsubscribe("e", sub.id());
        assert_eq!(bus.listener_count("e"), 0);
    }

    #[test]
    fn unsubscribe_unknown_id_is_noop() {
        let bus = EventBus::new();
        bus.subscribe("e", |_envelope| async { Ok(()) }).unwrap();

        bus.unsubscribe("e", ListenerId::new());
        bus.unsubscribe("other", ListenerId::new());

        assert_eq!(bus.listener_count("e"), 1);
    }

    #[tokio::test]
    async fn listener_subscribed_during_dispatch_sees_only_future_events() {
        let bus = EventBus::new();
        let late_calls = Arc::new(AtomicUsize::new(0));

        let reentrant_bus = bus.clone();
        let late = Arc::clone(&late_calls);
        bus.subscribe("e", move |_envelope| {
            let bus = reentrant_bus.clone();
            let late = Arc::clone(&late);
            async move {
                bus.subscribe("e", counting_listener(&late))
                    .map_err(|e| e.to_string())?;
                Ok(())
            }
        })
        .unwrap();

        bus.publish("e", Value::Null).await;
        assert_eq!(late_calls.load(Ordering::SeqCst), 0);

        bus.publish("e", Value::Null).await;
        assert_eq!(late_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn once_listener_subscribed_during_dispatch_fires_on_next_publish() {
        let bus = EventBus::new();
        let late_calls = Arc::new(AtomicUsize::new(0));

        let reentrant_bus = bus.clone();
        let late = Arc::clone(&late_calls);
        bus.subscribe("e", move |_envelope| {
            let bus = reentrant_bus.clone();
            let late = Arc::clone(&late);
            async move {
                bus.subscribe_once("e", counting_listener(&late))
                    .map_err(|e| e.to_string())?;
                Ok(())
            }
        })
        .unwrap();

        bus.publish("e", Value::Null).await;
        assert_eq!(late_calls.load(Ordering::SeqCst), 0);

        bus.publish("e", Value::Null).await;
        assert_eq!(late_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn once_listener_republishing_same_event_runs_once() {
        let bus = EventBus::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let reentrant_bus = bus.clone();
        let counter = Arc::clone(&calls);
        bus.subscribe_once("e", move |_envelope| {
            let bus = reentrant_bus.clone();
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                bus.publish("e", Value::Null).await;
                Ok(())
            }
        })
        .unwrap();

        bus.publish("e", Value::Null).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn listener_can_publish_other_event() {
        let bus = EventBus::new();
        let relayed = Arc::new(AtomicUsize::new(0));

        bus.subscribe("relay:out", counting_listener(&relayed))
            .unwrap();

        let relay_bus = bus.clone();
        bus.subscribe("relay:in", move |envelope| {
            let bus = relay_bus.clone();
            async move {
                bus.publish("relay:out", envelope.data).await;
                Ok(())
            }
        })
        .unwrap();

        bus.publish("relay:in", json!("payload")).await;
        assert_eq!(relayed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn subscribe_empty_event_name_rejected() {
        let bus = EventBus::new();

        let err = bus
            .subscribe("", |_envelope| async { Ok(()) })
            .unwrap_err();
        assert_eq!(err.code(), "BUS_INVALID_EVENT_NAME");

        let err = bus
            .subscribe_once("", |_envelope| async { Ok(()) })
            .unwrap_err();
        assert_eq!(err.code(), "BUS_INVALID_EVENT_NAME");
    }

    #[test]
    fn event_names_sorted_union() {
        let bus = EventBus::new();
        bus.subscribe("b:x", |_envelope| async { Ok(()) }).unwrap();
        bus.subscribe_once("a:y", |_envelope| async { Ok(()) })
            .unwrap();

        assert_eq!(bus.event_names(), vec!["a:y".to_string(), "b:x".to_string()]);
    }

    #[test]
    fn listener_count_covers_both_classes() {
        let bus = EventBus::new();
        bus.subscribe("e", |_envelope| async { Ok(()) }).unwrap();
        bus.subscribe("e", |_envelope| async { Ok(()) }).unwrap();
        bus.subscribe_once("e", |_envelope| async { Ok(()) })
            .unwrap();

        assert_eq!(bus.listener_count("e"), 3);
        assert_eq!(bus.listener_count("missing"), 0);
    }

    #[tokio::test]
    async fn clear_event_removes_both_classes() {
        let bus = EventBus::new();
        let calls = Arc::new(AtomicUsize::new(0));

        bus.subscribe("e", counting_listener(&calls)).unwrap();
        bus.subscribe_once("e", counting_listener(&calls)).unwrap();
        bus.subscribe("other", counting_listener(&calls)).unwrap();

        bus.clear_event("e");

        assert_eq!(bus.listener_count("e"), 0);
        assert_eq!(bus.listener_count("other"), 1);
        assert_eq!(bus.publish("e", Value::Null).await, 0);
    }

    #[test]
    fn clear_all_removes_everything() {
        let bus = EventBus::new();
        bus.subscribe("a", |_envelope| async { Ok(()) }).unwrap();
        bus.subscribe_once("b", |_envelope| async { Ok(()) })
            .unwrap();

        bus.clear_all();

        assert!(bus.event_names().is_empty());
    }

    #[test]
    fn detached_subscription_is_inert() {
        let sub = Subscription::detached();
        assert!(sub.is_detached());
        sub.unsubscribe();
        sub.unsubscribe();
    }

    #[test]
    fn subscription_outliving_bus_is_inert() {
        let sub = {
            let bus = EventBus::new();
            bus.subscribe("e", |_envelope| async { Ok(()) }).unwrap()
        };

        assert!(sub.is_detached());
        sub.unsubscribe();
    }

    #[tokio::test]
    async fn debug_toggle_has_no_behavioral_effect() {
        let bus = EventBus::new();
        let calls = Arc::new(AtomicUsize::new(0));
        bus.subscribe("e", counting_listener(&calls)).unwrap();

        bus.set_debug(true);
        assert!(bus.debug_enabled());
        assert_eq!(bus.publish("e", Value::Null).await, 1);

        bus.set_debug(false);
        assert!(!bus.debug_enabled());
        assert_eq!(bus.publish("e", Value::Null).await, 1);

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
