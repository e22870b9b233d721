//! Integration Tests for Shared State
//!
//! These tests exercise the container, subscriptions, and the binding
//! bridge together, the way a host framework would drive them.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use tether_core::state::{SharedValue, SubscriberError, SubscriptionId};

/// The value observed right after construction is the initial value.
#[test]
fn construction_stores_initial_value() {
    let shared = SharedValue::new(String::from("initial"));
    assert_eq!(shared.get(), "initial");
}

/// set replaces the value; get observes it through any handle.
#[test]
fn set_is_visible_through_all_handles() {
    let shared = SharedValue::new(1);
    let other = shared.clone();

    shared.set(2);
    assert_eq!(other.get(), 2);
}

/// get hands out an independent clone; mutating it never writes back.
#[test]
fn get_isolates_callers_from_shared_state() {
    let shared = SharedValue::new(vec![String::from("a")]);

    let mut copy = shared.get();
    copy.push(String::from("b"));

    assert_eq!(shared.get(), vec![String::from("a")]);
    assert_eq!(shared.with(|v| v.len()), 1);
}

/// A subscriber runs exactly once per set, synchronously, before set returns.
#[test]
fn notification_is_synchronous_and_exact() {
    let shared = SharedValue::new(0);
    let observed = Arc::new(Mutex::new(Vec::new()));

    let observed_clone = observed.clone();
    shared.subscribe(move |value| {
        observed_clone.lock().unwrap().push(*value);
    });

    shared.set(10);
    // set has returned; the notification already happened.
    assert_eq!(*observed.lock().unwrap(), vec![10]);

    shared.set(20);
    assert_eq!(*observed.lock().unwrap(), vec![10, 20]);
}

/// Registration order is notification order across subscriber kinds.
#[test]
fn mixed_subscribers_notify_in_registration_order() {
    let shared = SharedValue::new(0);
    let log: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

    let log1 = log.clone();
    shared.subscribe(move |_| log1.lock().unwrap().push("first"));

    let log2 = log.clone();
    shared.subscribe_fallible(move |_| {
        log2.lock().unwrap().push("second");
        Ok(())
    });

    let log3 = log.clone();
    shared.subscribe(move |_| log3.lock().unwrap().push("third"));

    shared.set(5);
    assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
}

/// A failing subscriber reaches the error handler and keeps its slot;
/// everyone else is notified in the same pass and in later ones.
#[test]
fn failure_reporting_does_not_disturb_other_subscribers() {
    let shared = SharedValue::new(0);
    let reported: Arc<Mutex<Vec<SubscriptionId>>> = Arc::new(Mutex::new(Vec::new()));
    let healthy_runs = Arc::new(AtomicI32::new(0));

    let reported_clone = reported.clone();
    shared.set_error_handler(move |id, _error| {
        reported_clone.lock().unwrap().push(id);
    });

    let failing = shared.subscribe_fallible(|_: &i32| Err(SubscriberError::new("view torn down")));

    let healthy_clone = healthy_runs.clone();
    shared.subscribe(move |_| {
        healthy_clone.fetch_add(1, Ordering::SeqCst);
    });

    shared.set(1);
    shared.set(2);

    assert_eq!(*reported.lock().unwrap(), vec![failing, failing]);
    assert_eq!(healthy_runs.load(Ordering::SeqCst), 2);
    assert_eq!(shared.subscriber_count(), 2);
}

/// The full hook flow: two components bind, one writes, the other's slot
/// re-renders with the new value, and unmounting detaches cleanly.
#[test]
fn binding_bridges_two_components() {
    let shared = SharedValue::new(String::from("light"));

    // Component A mounts.
    let slot_a = Arc::new(Mutex::new(None::<String>));
    let a = slot_a.clone();
    let binding_a = shared.bind(move |theme: String| {
        *a.lock().unwrap() = Some(theme);
    });
    assert_eq!(binding_a.value(), "light");

    // Component B mounts.
    let slot_b = Arc::new(Mutex::new(None::<String>));
    let b = slot_b.clone();
    let binding_b = shared.bind(move |theme: String| {
        *b.lock().unwrap() = Some(theme);
    });

    // A writes through its setter; both slots observe the change.
    binding_a.set(String::from("dark"));
    assert_eq!(slot_a.lock().unwrap().as_deref(), Some("dark"));
    assert_eq!(slot_b.lock().unwrap().as_deref(), Some("dark"));
    assert_eq!(shared.get(), "dark");

    // B unmounts; further writes only reach A.
    drop(binding_b);
    binding_a.setter().set(String::from("sepia"));
    assert_eq!(slot_a.lock().unwrap().as_deref(), Some("sepia"));
    assert_eq!(slot_b.lock().unwrap().as_deref(), Some("dark"));
    assert_eq!(shared.subscriber_count(), 1);
}

/// A setter kept after into_parts still writes once its subscription is
/// dropped; it is a plain write handle, not a subscription.
#[test]
fn setter_outlives_its_subscription() {
    let shared = SharedValue::new(0);

    let (value, setter, subscription) = shared.bind(|_: i32| {}).into_parts();
    assert_eq!(value, 0);

    drop(subscription);
    assert_eq!(shared.subscriber_count(), 0);

    setter.set(8);
    assert_eq!(shared.get(), 8);
}

/// The documented process-lifetime pattern: a container owned by a
/// OnceLock, initialized once, shared everywhere.
#[test]
fn once_lock_owned_singleton() {
    static COUNTER: OnceLock<SharedValue<u64>> = OnceLock::new();

    fn counter() -> &'static SharedValue<u64> {
        COUNTER.get_or_init(|| SharedValue::new(0))
    }

    counter().update(|v| v + 1);
    counter().update(|v| v + 1);
    assert_eq!(counter().get(), 2);
}
