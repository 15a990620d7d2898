//! # Status event classification.
//!
//! The [`EventKind`] enum names every status category an endpoint can report.
//! Which kinds are valid for a given endpoint depends on its [`EndpointKind`]:
//! - **Subscription** endpoints (data readers): `RequestedDeadlineMissed`, `LivelinessChanged`
//! - **Publication** endpoints (data writers): `OfferedDeadlineMissed`, `LivelinessLost`
//!
//! ## Example
//! ```rust
//! use qos_events::{EndpointKind, EventKind};
//!
//! assert!(EndpointKind::Subscription.supports(EventKind::LivelinessChanged));
//! assert!(!EndpointKind::Subscription.supports(EventKind::LivelinessLost));
//! assert_eq!(EventKind::RequestedDeadlineMissed.as_label(), "requested_deadline_missed");
//! ```

use std::fmt;

/// Classification of endpoint status events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    // === Subscription events ===
    /// A matched writer failed to publish within the requested deadline period.
    ///
    /// Carries: [`DeadlineMissedStatus`](crate::DeadlineMissedStatus)
    RequestedDeadlineMissed,

    /// The liveliness of one or more matched writers changed.
    ///
    /// Carries: [`LivelinessChangedStatus`](crate::LivelinessChangedStatus)
    LivelinessChanged,

    // === Publication events ===
    /// This writer failed to publish within its offered deadline period.
    ///
    /// Carries: [`DeadlineMissedStatus`](crate::DeadlineMissedStatus)
    OfferedDeadlineMissed,

    /// This writer failed to assert its liveliness in time.
    ///
    /// Carries: [`LivelinessLostStatus`](crate::LivelinessLostStatus)
    LivelinessLost,
}

impl EventKind {
    /// Number of distinct kinds; sizes the per-kind tables.
    pub const COUNT: usize = 4;

    /// All kinds, in index order.
    pub const ALL: [EventKind; Self::COUNT] = [
        EventKind::RequestedDeadlineMissed,
        EventKind::LivelinessChanged,
        EventKind::OfferedDeadlineMissed,
        EventKind::LivelinessLost,
    ];

    /// Stable slot index in `0..COUNT`.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            EventKind::RequestedDeadlineMissed => 0,
            EventKind::LivelinessChanged => 1,
            EventKind::OfferedDeadlineMissed => 2,
            EventKind::LivelinessLost => 3,
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(self) -> &'static str {
        match self {
            EventKind::RequestedDeadlineMissed => "requested_deadline_missed",
            EventKind::LivelinessChanged => "liveliness_changed",
            EventKind::OfferedDeadlineMissed => "offered_deadline_missed",
            EventKind::LivelinessLost => "liveliness_lost",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Role of the endpoint that owns the status tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointKind {
    /// Data reader side.
    Subscription,
    /// Data writer side.
    Publication,
}

impl EndpointKind {
    /// Whether this endpoint type reports the given event kind.
    #[inline]
    pub fn supports(self, kind: EventKind) -> bool {
        matches!(
            (self, kind),
            (
                EndpointKind::Subscription,
                EventKind::RequestedDeadlineMissed | EventKind::LivelinessChanged
            ) | (
                EndpointKind::Publication,
                EventKind::OfferedDeadlineMissed | EventKind::LivelinessLost
            )
        )
    }

    /// Kinds supported by this endpoint type.
    pub fn kinds(self) -> impl Iterator<Item = EventKind> {
        EventKind::ALL.into_iter().filter(move |k| self.supports(*k))
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(self) -> &'static str {
        match self {
            EndpointKind::Subscription => "subscription",
            EndpointKind::Publication => "publication",
        }
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}
