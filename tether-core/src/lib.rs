//! Tether Core
//!
//! This crate provides the shared-state container used by the Tether UI
//! toolkit. It lets independently rendered components share a single piece
//! of mutable state without threading it through the component tree:
//!
//! - A [`state::SharedValue`] holds one value and an ordered list of
//!   subscribers.
//! - Components subscribe to changes and are notified synchronously, in
//!   registration order, whenever the value is replaced.
//! - A binding bridge gives a component the hook-shaped pair of
//!   (current value, setter) while wiring its local re-render slot into the
//!   container for the lifetime of the binding.
//!
//! The crate does no rendering and no scheduling of its own: the host
//! framework supplies the re-render mechanism behind the
//! [`state::StateSlot`] trait, and the container only calls it.
//!
//! # Example
//!
//! ```rust,ignore
//! use tether_core::state::SharedValue;
//!
//! let counter = SharedValue::new(0);
//!
//! // Observe every change.
//! let id = counter.subscribe(|value| {
//!     println!("counter is now {value}");
//! });
//!
//! counter.set(5);        // prints: "counter is now 5"
//! counter.update(|v| v + 1);
//!
//! counter.unsubscribe(id);
//! ```
//!
//! # Process-lifetime containers
//!
//! A shared value is typically created once per logical piece of state and
//! lives until process exit. Own that explicitly from start-up code rather
//! than relying on load-time side effects:
//!
//! ```rust,ignore
//! use std::sync::OnceLock;
//! use tether_core::state::SharedValue;
//!
//! static THEME: OnceLock<SharedValue<Theme>> = OnceLock::new();
//!
//! fn theme() -> &'static SharedValue<Theme> {
//!     THEME.get_or_init(|| SharedValue::new(Theme::default()))
//! }
//! ```

pub mod state;
