//! Subscription identity and lifetime.
//!
//! Every call to [`SharedValue::subscribe`](super::SharedValue::subscribe)
//! yields a fresh [`SubscriptionId`], and the id is the only removal key.
//! Removing by id rather than by callback identity means two registrations
//! of the same closure are two distinct subscriptions, and unsubscribing one
//! can never disturb the other.
//!
//! [`Subscription`] is the RAII form: it unsubscribes when dropped, which is
//! how a component's teardown detaches its binding from the container.

use std::fmt::Debug;

use super::container::SharedValue;

/// Unique identifier for a subscriber registration.
///
/// Ids are monotonic per container and never reused within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Guard tying a subscription to a scope.
///
/// Dropping the guard unsubscribes from the container. Call
/// [`Subscription::detach`] to keep the subscription alive for the rest of
/// the process instead, e.g. for an observer owned by start-up code.
pub struct Subscription<T>
where
    T: Clone + Send + Sync + 'static,
{
    shared: SharedValue<T>,
    id: SubscriptionId,
    detached: bool,
}

impl<T> Subscription<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub(crate) fn new(shared: SharedValue<T>, id: SubscriptionId) -> Self {
        Self {
            shared,
            id,
            detached: false,
        }
    }

    /// The id of the underlying registration.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Consume the guard without unsubscribing.
    ///
    /// The subscription then lives until the container itself is dropped.
    pub fn detach(mut self) {
        self.detached = true;
    }
}

impl<T> Drop for Subscription<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn drop(&mut self) {
        if !self.detached {
            self.shared.unsubscribe(self.id);
        }
    }
}

impl<T> Debug for Subscription<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("detached", &self.detached)
            .finish()
    }
}
