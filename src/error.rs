//! Error types used by the event handles.
//!
//! The core operations (`record`, `has_event`, `take`, `notify`) never fail: they
//! run on trusted internal calls. The only recoverable failure is asking an
//! endpoint for an event kind it does not report, which [`EventError`] describes.

use thiserror::Error;

use crate::events::{EndpointKind, EventKind};

/// # Errors produced when binding or draining event handles.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    /// The endpoint type does not report this event kind.
    #[error("event kind {kind} is not supported by a {endpoint} endpoint")]
    Unsupported {
        /// The requested event kind.
        kind: EventKind,
        /// The endpoint type that rejected it.
        endpoint: EndpointKind,
    },
}

impl EventError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use qos_events::{EndpointKind, EventError, EventKind};
    ///
    /// let err = EventError::Unsupported {
    ///     kind: EventKind::LivelinessLost,
    ///     endpoint: EndpointKind::Subscription,
    /// };
    /// assert_eq!(err.as_label(), "event_unsupported");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EventError::Unsupported { .. } => "event_unsupported",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            EventError::Unsupported { kind, endpoint } => {
                format!("unsupported: kind={kind} endpoint={endpoint}")
            }
        }
    }
}
