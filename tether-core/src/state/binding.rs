//! Binding bridge between a container and a component's local state.
//!
//! Host UI frameworks give each component a local-state slot: a cell whose
//! writes schedule a re-render of that component. This module connects a
//! [`SharedValue`] to such a slot so the component tracks the shared value
//! without the value being threaded through the component tree.
//!
//! [`SharedValue::bind`] returns the hook-shaped triple the component
//! expects: the current value, a [`Setter`] that writes back through the
//! container (and thereby re-renders every other bound component), and the
//! [`Subscription`] guard that detaches the slot when the component
//! unmounts.

use super::container::SharedValue;
use super::subscriber::Subscription;

/// A component's local-state slot, as supplied by the host framework.
///
/// Writing to the slot is expected to trigger the owning component's
/// re-render; this crate only calls it, it never renders anything itself.
/// Any `Fn(T)` closure is a slot.
pub trait StateSlot<T> {
    /// Push a new value into the slot.
    fn write(&self, value: T);
}

impl<T, F> StateSlot<T> for F
where
    F: Fn(T),
{
    fn write(&self, value: T) {
        self(value)
    }
}

/// A write handle for a shared value.
///
/// Cloneable; every clone writes through to the same container, notifying
/// all subscribers.
pub struct Setter<T>
where
    T: Clone + Send + Sync + 'static,
{
    shared: SharedValue<T>,
}

impl<T> Setter<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Replace the shared value, notifying all subscribers.
    pub fn set(&self, value: T) {
        self.shared.set(value);
    }

    /// Update the shared value using a function of the current value.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        self.shared.update(f);
    }
}

impl<T> Clone for Setter<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

/// An active binding between a container and one component.
///
/// Holds the value observed at bind time, the setter, and the subscription
/// keeping the component's slot wired to the container. Dropping the
/// binding (or just its subscription) detaches the slot.
pub struct Binding<T>
where
    T: Clone + Send + Sync + 'static,
{
    value: T,
    setter: Setter<T>,
    subscription: Subscription<T>,
}

impl<T> Binding<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub(crate) fn bind<S>(shared: &SharedValue<T>, slot: S) -> Self
    where
        S: StateSlot<T> + Send + Sync + 'static,
    {
        let value = shared.get();
        let id = shared.subscribe(move |new_value: &T| slot.write(new_value.clone()));

        Self {
            value,
            setter: Setter {
                shared: shared.clone(),
            },
            subscription: Subscription::new(shared.clone(), id),
        }
    }

    /// The shared value as observed when the binding was created.
    ///
    /// Later values arrive through the bound slot, not here.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The write handle for the shared value.
    pub fn setter(&self) -> &Setter<T> {
        &self.setter
    }

    /// Replace the shared value, notifying all subscribers.
    pub fn set(&self, value: T) {
        self.setter.set(value);
    }

    /// The subscription keeping the slot wired to the container.
    pub fn subscription(&self) -> &Subscription<T> {
        &self.subscription
    }

    /// Split the binding into its parts.
    pub fn into_parts(self) -> (T, Setter<T>, Subscription<T>) {
        (self.value, self.setter, self.subscription)
    }
}
