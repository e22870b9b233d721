//! Error types for subscriber notification.
//!
//! A subscriber that cannot apply an update reports a [`SubscriberError`].
//! The container passes the error, together with the failing subscription's
//! id, to an optional error handler installed via
//! [`SharedValue::set_error_handler`](super::SharedValue::set_error_handler).
//! Failures are a reporting channel only: they never remove the subscriber
//! and never propagate out of `set`.

use thiserror::Error;

use super::subscriber::SubscriptionId;

/// Handler invoked when a subscriber fails during a notification pass.
pub(crate) type ErrorHandler = Box<dyn Fn(SubscriptionId, &SubscriberError) + Send + Sync>;

/// A subscriber failed to apply a value update.
///
/// Produced by subscribers registered with
/// [`SharedValue::subscribe_fallible`](super::SharedValue::subscribe_fallible),
/// typically when the downstream side of the subscriber is gone (a closed
/// channel, a torn-down view).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("subscriber failed to apply update: {reason}")]
pub struct SubscriberError {
    reason: String,
}

impl SubscriberError {
    /// Create an error with the given human-readable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The reason this subscriber failed.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<String> for SubscriberError {
    fn from(reason: String) -> Self {
        Self { reason }
    }
}

impl From<&str> for SubscriberError {
    fn from(reason: &str) -> Self {
        Self {
            reason: reason.to_owned(),
        }
    }
}
