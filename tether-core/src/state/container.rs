//! SharedValue Implementation
//!
//! A SharedValue is the container at the center of the crate. It holds one
//! value and the ordered list of subscribers interested in it.
//!
//! # How Notification Works
//!
//! 1. `set` stores the new value first, then walks the subscriber list in
//!    registration order, invoking each callback with a reference to the
//!    new value. A subscriber that reads the container during its own
//!    invocation therefore sees the value it was notified with.
//!
//! 2. The walk iterates over a snapshot of the list taken before the first
//!    callback runs. Subscribing or unsubscribing from inside a callback is
//!    safe and becomes visible on the next `set`.
//!
//! 3. A failing subscriber is reported to the container's error handler
//!    (or logged) and stays registered. Nothing propagates out of `set`.
//!
//! # Thread Safety
//!
//! The container is designed for a single UI thread but is safe to share:
//! the value and the subscriber list are each protected by a RwLock, and
//! handles clone cheaply (all state is behind Arc). Calling `set` from
//! inside a subscriber is not supported; the snapshot keeps it from
//! deadlocking, but the nested pass's interleaving is unspecified.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{debug, trace, warn};

use super::binding::{Binding, StateSlot};
use super::error::{ErrorHandler, SubscriberError};
use super::subscriber::{Subscription, SubscriptionId};

/// Callback invoked with each new value.
type Callback<T> = Arc<dyn Fn(&T) -> Result<(), SubscriberError> + Send + Sync>;

/// One registered subscriber: its removal key and its callback.
struct SubscriberEntry<T> {
    id: SubscriptionId,
    callback: Callback<T>,
}

impl<T> Clone for SubscriberEntry<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            callback: Arc::clone(&self.callback),
        }
    }
}

/// A container for one piece of state shared across components.
///
/// # Type Parameters
///
/// - `T`: The type of the stored value. Must be Clone + Send + Sync. The
///   Clone bound is what makes [`SharedValue::get`] hand out structurally
///   independent values; a type that cannot be cloned cannot be stored.
///
/// # Example
///
/// ```rust,ignore
/// let title = SharedValue::new(String::from("untitled"));
///
/// let id = title.subscribe(|t| println!("title changed to {t}"));
///
/// title.set(String::from("draft"));   // notifies the subscriber
/// assert_eq!(title.get(), "draft");
///
/// title.unsubscribe(id);
/// ```
pub struct SharedValue<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// The current value, protected by RwLock.
    value: Arc<RwLock<T>>,

    /// Registered subscribers, in notification order.
    subscribers: Arc<RwLock<Vec<SubscriberEntry<T>>>>,

    /// Optional sink for subscriber failures.
    error_handler: Arc<RwLock<Option<ErrorHandler>>>,

    /// Source of monotonic subscription ids for this container.
    next_id: Arc<AtomicU64>,
}

impl<T> SharedValue<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a new container with the given initial value.
    pub fn new(initial: T) -> Self {
        Self {
            value: Arc::new(RwLock::new(initial)),
            subscribers: Arc::new(RwLock::new(Vec::new())),
            error_handler: Arc::new(RwLock::new(None)),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Get a clone of the current value.
    ///
    /// The returned value is structurally independent: mutating it never
    /// affects the stored state or other readers.
    pub fn get(&self) -> T {
        self.value.read().expect("value lock poisoned").clone()
    }

    /// Read the current value by reference, without cloning.
    ///
    /// Useful when the value is expensive to clone and the caller only
    /// needs to inspect it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.value.read().expect("value lock poisoned");
        f(&guard)
    }

    /// Replace the value and notify all subscribers.
    ///
    /// The store happens before any subscriber runs; subscribers are then
    /// invoked synchronously, in registration order, with a reference to
    /// the new value. `set` returns only after the last subscriber has run.
    pub fn set(&self, value: T) {
        {
            let mut guard = self.value.write().expect("value lock poisoned");
            *guard = value.clone();
        }

        self.notify_subscribers(&value);
    }

    /// Update the value using a function of the current value.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let new_value = {
            let guard = self.value.read().expect("value lock poisoned");
            f(&guard)
        };
        self.set(new_value);
    }

    /// Register a subscriber, returning its id.
    ///
    /// The callback is invoked on every subsequent [`SharedValue::set`].
    /// Each call registers a distinct subscription with a fresh id, even
    /// for an identical callback; removal is only ever by id.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.push_entry(Arc::new(move |value: &T| {
            callback(value);
            Ok(())
        }))
    }

    /// Register a subscriber that can report failure.
    ///
    /// A returned error is passed to the error handler installed via
    /// [`SharedValue::set_error_handler`] (or logged if there is none).
    /// The subscriber stays registered either way; failure is a report,
    /// not a removal request.
    pub fn subscribe_fallible<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) -> Result<(), SubscriberError> + Send + Sync + 'static,
    {
        self.push_entry(Arc::new(callback))
    }

    /// Remove the subscriber with the given id.
    ///
    /// Unknown ids are ignored, so unsubscribing twice is harmless.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut subscribers = self.subscribers.write().expect("subscriber lock poisoned");
        let before = subscribers.len();
        subscribers.retain(|entry| entry.id != id);

        if subscribers.len() < before {
            debug!(?id, "subscriber removed");
        } else {
            debug!(?id, "unsubscribe for unknown id ignored");
        }
    }

    /// Install a handler for subscriber failures.
    ///
    /// The handler receives the failing subscription's id and the error it
    /// reported. It replaces any previously installed handler.
    pub fn set_error_handler<F>(&self, handler: F)
    where
        F: Fn(SubscriptionId, &SubscriberError) + Send + Sync + 'static,
    {
        *self
            .error_handler
            .write()
            .expect("error handler lock poisoned") = Some(Box::new(handler));
    }

    /// Remove the installed error handler, if any.
    ///
    /// Subsequent failures are logged instead.
    pub fn clear_error_handler(&self) {
        *self
            .error_handler
            .write()
            .expect("error handler lock poisoned") = None;
    }

    /// Get the number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .expect("subscriber lock poisoned")
            .len()
    }

    /// Bind this container to a component's local-state slot.
    ///
    /// Reads the current value, subscribes a forwarder that writes every
    /// new value into `slot`, and returns the hook-shaped [`Binding`]:
    /// the value, a setter, and the guard that tears the wiring down when
    /// dropped.
    pub fn bind<S>(&self, slot: S) -> Binding<T>
    where
        S: StateSlot<T> + Send + Sync + 'static,
    {
        Binding::bind(self, slot)
    }

    /// Value-only variant of [`SharedValue::bind`].
    ///
    /// For components that display the value but never write it back.
    pub fn bind_value<S>(&self, slot: S) -> (T, Subscription<T>)
    where
        S: StateSlot<T> + Send + Sync + 'static,
    {
        let (value, _, subscription) = Binding::bind(self, slot).into_parts();
        (value, subscription)
    }

    fn push_entry(&self, callback: Callback<T>) -> SubscriptionId {
        let id = SubscriptionId::from_raw(self.next_id.fetch_add(1, Ordering::Relaxed));

        self.subscribers
            .write()
            .expect("subscriber lock poisoned")
            .push(SubscriberEntry { id, callback });

        debug!(?id, "subscriber registered");
        id
    }

    /// Notify all subscribers that the value has changed.
    ///
    /// Iterates over a snapshot so callbacks may subscribe or unsubscribe
    /// without deadlocking; such changes apply from the next pass.
    fn notify_subscribers(&self, value: &T) {
        let snapshot: Vec<SubscriberEntry<T>> = self
            .subscribers
            .read()
            .expect("subscriber lock poisoned")
            .clone();

        trace!(count = snapshot.len(), "notifying subscribers");

        for entry in &snapshot {
            if let Err(error) = (entry.callback)(value) {
                self.report_failure(entry.id, &error);
            }
        }
    }

    fn report_failure(&self, id: SubscriptionId, error: &SubscriberError) {
        let handler = self
            .error_handler
            .read()
            .expect("error handler lock poisoned");

        match handler.as_ref() {
            Some(handler) => handler(id, error),
            None => warn!(?id, %error, "subscriber failed during notification"),
        }
    }
}

impl<T> Clone for SharedValue<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Cloning produces another handle to the same container, not a copy
    /// of the value.
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            subscribers: Arc::clone(&self.subscribers),
            error_handler: Arc::clone(&self.error_handler),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl<T> Debug for SharedValue<T>
where
    T: Clone + Send + Sync + Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedValue")
            .field("value", &self.get())
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
