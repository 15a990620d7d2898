//! # Status records: absolute counters plus unread deltas.
//!
//! Every status type splits its fields in two groups:
//! - **absolute** fields (`total_count`, `alive_count`, ...) carry the latest running
//!   total reported by the transport and are **overwritten** on each update;
//! - **delta** fields (`*_change`) carry occurrences since the last read and are
//!   **accumulated** until a consumer drains them.
//!
//! ## Rules
//! - [`Status::merge`] overwrites absolute fields and adds delta fields.
//! - [`Status::drain`] returns a copy and zeroes the delta fields; absolute fields stay.
//! - Delta accumulation saturates at the `i32` bounds instead of wrapping.
//!
//! ## Example
//! ```rust
//! use qos_events::{DeadlineMissedStatus, Status};
//!
//! let mut record = DeadlineMissedStatus::default();
//! record.merge(&DeadlineMissedStatus { total_count: 2, total_count_change: 2 });
//! record.merge(&DeadlineMissedStatus { total_count: 3, total_count_change: 1 });
//!
//! let seen = record.drain();
//! assert_eq!(seen, DeadlineMissedStatus { total_count: 3, total_count_change: 3 });
//! assert_eq!(record.total_count_change, 0);
//! assert_eq!(record.total_count, 3);
//! ```

use super::EventKind;

/// Behavior shared by all status records.
pub trait Status: Copy + Default {
    /// Folds a transport update into this record.
    fn merge(&mut self, update: &Self);

    /// Returns the current record and resets its delta fields.
    fn drain(&mut self) -> Self;

    /// True if any delta field is non-zero.
    fn has_changes(&self) -> bool;
}

/// Deadline missed counters (requested on readers, offered on writers).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeadlineMissedStatus {
    /// Total number of missed deadlines observed so far.
    pub total_count: i32,
    /// Missed deadlines since the last read.
    pub total_count_change: i32,
}

impl Status for DeadlineMissedStatus {
    fn merge(&mut self, update: &Self) {
        self.total_count = update.total_count;
        self.total_count_change = self
            .total_count_change
            .saturating_add(update.total_count_change);
    }

    fn drain(&mut self) -> Self {
        let out = *self;
        self.total_count_change = 0;
        out
    }

    fn has_changes(&self) -> bool {
        self.total_count_change != 0
    }
}

/// Liveliness counters of the writers matched by a reader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LivelinessChangedStatus {
    /// Matched writers currently considered alive.
    pub alive_count: i32,
    /// Matched writers currently considered not alive.
    pub not_alive_count: i32,
    /// Change of `alive_count` since the last read (may be negative).
    pub alive_count_change: i32,
    /// Change of `not_alive_count` since the last read (may be negative).
    pub not_alive_count_change: i32,
}

impl Status for LivelinessChangedStatus {
    fn merge(&mut self, update: &Self) {
        self.alive_count = update.alive_count;
        self.not_alive_count = update.not_alive_count;
        self.alive_count_change = self
            .alive_count_change
            .saturating_add(update.alive_count_change);
        self.not_alive_count_change = self
            .not_alive_count_change
            .saturating_add(update.not_alive_count_change);
    }

    fn drain(&mut self) -> Self {
        let out = *self;
        self.alive_count_change = 0;
        self.not_alive_count_change = 0;
        out
    }

    fn has_changes(&self) -> bool {
        self.alive_count_change != 0 || self.not_alive_count_change != 0
    }
}

/// Liveliness lost counters of a writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LivelinessLostStatus {
    /// Total number of times liveliness was lost.
    pub total_count: i32,
    /// Losses since the last read.
    pub total_count_change: i32,
}

impl Status for LivelinessLostStatus {
    fn merge(&mut self, update: &Self) {
        self.total_count = update.total_count;
        self.total_count_change = self
            .total_count_change
            .saturating_add(update.total_count_change);
    }

    fn drain(&mut self) -> Self {
        let out = *self;
        self.total_count_change = 0;
        out
    }

    fn has_changes(&self) -> bool {
        self.total_count_change != 0
    }
}

/// A status record tagged with its [`EventKind`].
///
/// Used both as the update handed in by the transport and as the snapshot
/// handed out by `take`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    /// A reader missed its requested deadline.
    RequestedDeadlineMissed(DeadlineMissedStatus),
    /// Writers matched to a reader became alive or not alive.
    LivelinessChanged(LivelinessChangedStatus),
    /// A writer missed its offered deadline.
    OfferedDeadlineMissed(DeadlineMissedStatus),
    /// A writer failed to assert its liveliness in time.
    LivelinessLost(LivelinessLostStatus),
}

impl EventStatus {
    /// Zeroed record for `kind`.
    pub fn empty(kind: EventKind) -> Self {
        match kind {
            EventKind::RequestedDeadlineMissed => {
                EventStatus::RequestedDeadlineMissed(Default::default())
            }
            EventKind::LivelinessChanged => EventStatus::LivelinessChanged(Default::default()),
            EventKind::OfferedDeadlineMissed => {
                EventStatus::OfferedDeadlineMissed(Default::default())
            }
            EventKind::LivelinessLost => EventStatus::LivelinessLost(Default::default()),
        }
    }

    /// Kind this record belongs to.
    pub fn kind(&self) -> EventKind {
        match self {
            EventStatus::RequestedDeadlineMissed(_) => EventKind::RequestedDeadlineMissed,
            EventStatus::LivelinessChanged(_) => EventKind::LivelinessChanged,
            EventStatus::OfferedDeadlineMissed(_) => EventKind::OfferedDeadlineMissed,
            EventStatus::LivelinessLost(_) => EventKind::LivelinessLost,
        }
    }

    /// Folds `update` into this record.
    ///
    /// Returns `false` and leaves `self` untouched if the kinds differ.
    pub fn merge(&mut self, update: &EventStatus) -> bool {
        match (self, update) {
            (EventStatus::RequestedDeadlineMissed(r), EventStatus::RequestedDeadlineMissed(u))
            | (EventStatus::OfferedDeadlineMissed(r), EventStatus::OfferedDeadlineMissed(u)) => {
                r.merge(u)
            }
            (EventStatus::LivelinessChanged(r), EventStatus::LivelinessChanged(u)) => r.merge(u),
            (EventStatus::LivelinessLost(r), EventStatus::LivelinessLost(u)) => r.merge(u),
            _ => return false,
        }
        true
    }

    /// Returns the current record and resets its delta fields.
    pub fn drain(&mut self) -> EventStatus {
        match self {
            EventStatus::RequestedDeadlineMissed(r) => {
                EventStatus::RequestedDeadlineMissed(r.drain())
            }
            EventStatus::LivelinessChanged(r) => EventStatus::LivelinessChanged(r.drain()),
            EventStatus::OfferedDeadlineMissed(r) => EventStatus::OfferedDeadlineMissed(r.drain()),
            EventStatus::LivelinessLost(r) => EventStatus::LivelinessLost(r.drain()),
        }
    }

    /// True if any delta field is non-zero.
    pub fn has_changes(&self) -> bool {
        match self {
            EventStatus::RequestedDeadlineMissed(r) | EventStatus::OfferedDeadlineMissed(r) => {
                r.has_changes()
            }
            EventStatus::LivelinessChanged(r) => r.has_changes(),
            EventStatus::LivelinessLost(r) => r.has_changes(),
        }
    }

    /// Deadline counters, for either deadline kind.
    pub fn as_deadline_missed(&self) -> Option<&DeadlineMissedStatus> {
        match self {
            EventStatus::RequestedDeadlineMissed(r) | EventStatus::OfferedDeadlineMissed(r) => {
                Some(r)
            }
            _ => None,
        }
    }

    /// Liveliness-changed counters, if this is that kind.
    pub fn as_liveliness_changed(&self) -> Option<&LivelinessChangedStatus> {
        match self {
            EventStatus::LivelinessChanged(r) => Some(r),
            _ => None,
        }
    }

    /// Liveliness-lost counters, if this is that kind.
    pub fn as_liveliness_lost(&self) -> Option<&LivelinessLostStatus> {
        match self {
            EventStatus::LivelinessLost(r) => Some(r),
            _ => None,
        }
    }
}
