//! # Per-endpoint status aggregation.
//!
//! [`StatusAggregator`] keeps one [`EventStatus`] record and one unread flag per
//! event kind. Transport threads fold updates in with [`StatusAggregator::record`];
//! consumers poll with [`StatusAggregator::has_event`] and drain with
//! [`StatusAggregator::take`].
//!
//! ## Locking
//! ```text
//! record(update)
//!   ├─► data lock:   merge record, set unread flag, clone attached condition
//!   └─► cond lock:   notify_all            (data lock already released)
//!
//! take(kind)
//!   └─► data lock:   copy record, zero deltas, clear unread flag
//!
//! has_event(kind)
//!   └─► relaxed atomic load, no lock
//! ```
//!
//! ## Rules
//! - Absolute fields are overwritten; delta fields are accumulated until `take`.
//! - Every `record` sets the flag, even when all deltas are zero.
//! - Every `record` signals the attached condition, even with no waiters.
//! - Only `take` resets deltas and clears the flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_utils::CachePadded;
use parking_lot::Mutex;

use super::condition::WaitCondition;
use crate::events::{EndpointKind, EventKind, EventStatus};

/// State guarded by the data lock.
struct Records {
    slots: [EventStatus; EventKind::COUNT],
    condition: Option<Arc<WaitCondition>>,
}

/// Status records and unread flags of one endpoint.
pub struct StatusAggregator {
    endpoint: EndpointKind,
    records: Mutex<Records>,
    unread: [CachePadded<AtomicBool>; EventKind::COUNT],
}

impl StatusAggregator {
    /// Creates empty records for every kind `endpoint` supports.
    pub fn new(endpoint: EndpointKind, condition: Option<Arc<WaitCondition>>) -> Self {
        Self {
            endpoint,
            records: Mutex::new(Records {
                slots: EventKind::ALL.map(EventStatus::empty),
                condition,
            }),
            unread: Default::default(),
        }
    }

    /// Endpoint type these records belong to.
    #[inline]
    pub fn endpoint(&self) -> EndpointKind {
        self.endpoint
    }

    /// Folds a transport update into the record of its kind.
    ///
    /// Returns `false` without touching any state if the endpoint does not
    /// support the update's kind. Transport callers never hit that path.
    pub fn record(&self, update: &EventStatus) -> bool {
        let kind = update.kind();
        if !self.endpoint.supports(kind) {
            return false;
        }

        let condition = {
            let mut records = self.records.lock();
            records.slots[kind.index()].merge(update);
            self.unread[kind.index()].store(true, Ordering::Relaxed);
            records.condition.clone()
        };

        if let Some(condition) = condition {
            condition.signal();
        }
        true
    }

    /// True if a `record` for `kind` happened since the last `take`.
    ///
    /// Lock-free; `false` for kinds the endpoint does not support.
    #[inline]
    pub fn has_event(&self, kind: EventKind) -> bool {
        self.endpoint.supports(kind) && self.unread[kind.index()].load(Ordering::Relaxed)
    }

    /// Returns the record for `kind`, resetting its deltas and unread flag.
    ///
    /// `None` (and no mutation) if the endpoint does not support `kind`.
    pub fn take(&self, kind: EventKind) -> Option<EventStatus> {
        if !self.endpoint.supports(kind) {
            return None;
        }
        let mut records = self.records.lock();
        let out = records.slots[kind.index()].drain();
        self.unread[kind.index()].store(false, Ordering::Relaxed);
        Some(out)
    }

    /// Replaces the condition signalled by `record`.
    pub fn attach_condition(&self, condition: Arc<WaitCondition>) {
        self.records.lock().condition = Some(condition);
    }

    /// Stops signalling any condition. Returns the one that was attached.
    pub fn detach_condition(&self) -> Option<Arc<WaitCondition>> {
        self.records.lock().condition.take()
    }
}
