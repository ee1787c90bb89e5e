//! Core types for the Axon component-coordination runtime.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       SDK Layer                              │
//! │  (What application components depend on)                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  axon-types     : ListenerId, ErrorCode          ◄── HERE   │
//! │  axon-bus       : Envelope, EventBus, Subscription          │
//! │  axon-registry  : ServiceRegistry, ServiceFactory           │
//! │  axon-component : Component trait, BaseComponent            │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Coordination Layer                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  axon-runtime   : ComponentFactory, bootstrap               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! This crate sits at the bottom of the stack: identifier types and the
//! [`ErrorCode`] contract every Axon error implements. It knows nothing
//! about buses, registries, or components.
//!
//! # Example
//!
//! ```
//! use axon_types::ListenerId;
//!
//! let id = ListenerId::new();
//! println!("listener {id}");
//! ```

mod error;
mod id;

pub use error::{ErrorCode, assert_error_code, assert_error_codes};
pub use id::ListenerId;
