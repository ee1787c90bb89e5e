//! Named-event publish/subscribe for the Axon runtime.
//!
//! Components communicate exclusively by emitting and subscribing to
//! named events; they never hold direct references to each other's
//! internals.
//!
//! ```text
//! ┌────────────┐  publish("document:changed", data)   ┌────────────┐
//! │  Producer  │ ───────────────► EventBus ─────────► │  Listener  │
//! │ Component  │                     │                │ Component  │
//! └────────────┘                     ▼                └────────────┘
//!                      Envelope {type, data, timestamp, source}
//! ```
//!
//! Two listener classes exist per event name: **persistent** (until
//! unsubscribed) and **one-shot** (removed after a single delivery).
//! Delivery is awaited: `publish` resolves once every listener present
//! at dispatch time has been invoked and every returned future has
//! settled, tolerating individual failures. See [`EventBus`] for the
//! exact phase ordering.
//!
//! # Error Handling
//!
//! Subscribing returns [`BusError`] (implements
//! [`axon_types::ErrorCode`], `BUS_` prefix). Delivery failures are
//! contained: logged via `tracing`, never raised to the publisher.

mod bus;
mod envelope;
mod error;

pub use bus::{EventBus, ListenerFuture, Subscription};
pub use envelope::Envelope;
pub use error::BusError;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn public_surface_roundtrip() {
        let bus = EventBus::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let sub: Subscription = bus
            .subscribe("smoke:event", move |envelope: Envelope| {
                let counter = Arc::clone(&counter);
                async move {
                    assert_eq!(envelope.event, "smoke:event");
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            })
            .expect("subscribe should accept a named event");

        let delivered = bus.publish("smoke:event", json!(1)).await;
        assert_eq!(delivered, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        sub.unsubscribe();
        assert_eq!(bus.publish("smoke:event", json!(2)).await, 0);
    }
}
