//! Shared State
//!
//! This module implements the shared-state container and its binding bridge.
//!
//! # Concepts
//!
//! ## SharedValue
//!
//! A [`SharedValue`] is a container for one piece of mutable state. When the
//! value is replaced via [`SharedValue::set`], every registered subscriber
//! is invoked synchronously, in registration order, with a reference to the
//! new value. Cloning a `SharedValue` produces another handle to the same
//! underlying state, so a container can be handed to any number of
//! components.
//!
//! ## Subscriptions
//!
//! [`SharedValue::subscribe`] returns a monotonic [`SubscriptionId`] that is
//! the only removal key: [`SharedValue::unsubscribe`] takes the id, and a
//! [`Subscription`] guard unsubscribes automatically when dropped.
//! Subscriber failures are never used to remove entries; a fallible
//! subscriber reports a [`SubscriberError`] to the container's optional
//! error handler and stays registered.
//!
//! ## Bindings
//!
//! [`SharedValue::bind`] connects the container to a host framework's
//! local-state slot ([`StateSlot`]) and returns a [`Binding`]: the current
//! value, a [`Setter`] that writes back through the container, and the
//! subscription guard that tears the wiring down when the component
//! unmounts.
//!
//! # Implementation Notes
//!
//! All operations run to completion on the calling thread; there are no
//! suspension points and no background work. Notification iterates over a
//! snapshot of the subscriber list, so subscribing or unsubscribing from
//! inside a callback is safe and takes effect on the next `set`. Calling
//! `set` from inside a subscriber is not supported: it will not deadlock,
//! but the interleaving of the nested notification pass is unspecified.

mod binding;
mod container;
mod error;
mod subscriber;

pub use binding::{Binding, Setter, StateSlot};
pub use container::SharedValue;
pub use error::SubscriberError;
pub use subscriber::{Subscription, SubscriptionId};
