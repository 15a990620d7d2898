//! # Event handle: one endpoint, one kind.
//!
//! An [`EventHandle`] is what an application holds per event it cares about
//! ("deadline missed on reader X"). Creating one checks that the endpoint type
//! reports the kind, so every later call on the handle is valid.
//!
//! ## Example
//! ```rust
//! use qos_events::{EndpointEvents, EndpointKind, EventError, EventHandle, EventKind};
//!
//! let reader = EndpointEvents::builder(EndpointKind::Subscription).build();
//!
//! let deadline = EventHandle::new(reader.clone(), EventKind::RequestedDeadlineMissed)?;
//! assert!(!deadline.has_event());
//!
//! let err = EventHandle::new(reader, EventKind::LivelinessLost).err().unwrap();
//! assert_eq!(err.as_label(), "event_unsupported");
//! # Ok::<(), EventError>(())
//! ```

use std::sync::Arc;

use super::endpoint::EndpointEvents;
use crate::error::EventError;
use crate::events::{EventKind, EventStatus};

/// An endpoint paired with one of its supported event kinds.
#[derive(Clone)]
pub struct EventHandle {
    endpoint: Arc<EndpointEvents>,
    kind: EventKind,
}

impl EventHandle {
    /// Binds `kind` on `endpoint`.
    ///
    /// Fails with [`EventError::Unsupported`] if the endpoint type does not
    /// report `kind`.
    pub fn new(endpoint: Arc<EndpointEvents>, kind: EventKind) -> Result<Self, EventError> {
        if !endpoint.supports(kind) {
            return Err(EventError::Unsupported {
                kind,
                endpoint: endpoint.endpoint(),
            });
        }
        Ok(Self { endpoint, kind })
    }

    /// Bound event kind.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Bound endpoint.
    pub fn endpoint(&self) -> &Arc<EndpointEvents> {
        &self.endpoint
    }

    /// True if the event occurred since the last [`EventHandle::take`].
    pub fn has_event(&self) -> bool {
        self.endpoint.has_event(self.kind)
    }

    /// Returns the accumulated status and resets its deltas.
    pub fn take(&self) -> Result<EventStatus, EventError> {
        // Unreachable for handles built through `new`, which checked `kind`.
        self.endpoint
            .take(self.kind)
            .ok_or_else(|| EventError::Unsupported {
                kind: self.kind,
                endpoint: self.endpoint.endpoint(),
            })
    }

    /// Registers the endpoint's notification callback.
    ///
    /// The callback is per endpoint, not per kind: it counts occurrences of
    /// every kind the endpoint reports.
    pub fn set_callback<U, F>(&self, user_data: U, callback: F)
    where
        U: Send + 'static,
        F: Fn(&U, usize) + Send + 'static,
    {
        self.endpoint.set_callback(user_data, callback);
    }

    /// Unregisters the endpoint's notification callback.
    pub fn clear_callback(&self) {
        self.endpoint.clear_callback();
    }
}
