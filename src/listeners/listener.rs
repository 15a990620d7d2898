//! # Status listener traits.
//!
//! Each handler receives the source entity as an opaque `&dyn Any` (endpoint
//! implementations ignore it) and a borrowed status carrying absolute counts
//! plus the deltas since the transport's previous report.
//!
//! ## Rules
//! - Handlers may be invoked from any transport thread, concurrently across kinds.
//! - Handlers must not block beyond short lock contention.
//!
//! ## Example
//! ```rust
//! use std::any::Any;
//! use std::sync::atomic::{AtomicI32, Ordering};
//! use qos_events::{DeadlineMissedStatus, LivelinessChangedStatus, ReaderListener};
//!
//! #[derive(Default)]
//! struct Counter(AtomicI32);
//!
//! impl ReaderListener for Counter {
//!     fn on_requested_deadline_missed(&self, _: &dyn Any, status: &DeadlineMissedStatus) {
//!         self.0.fetch_add(status.total_count_change, Ordering::Relaxed);
//!     }
//!
//!     fn on_liveliness_changed(&self, _: &dyn Any, _: &LivelinessChangedStatus) {}
//! }
//!
//! let c = Counter::default();
//! c.on_requested_deadline_missed(&(), &DeadlineMissedStatus { total_count: 2, total_count_change: 2 });
//! assert_eq!(c.0.load(Ordering::Relaxed), 2);
//! ```

use std::any::Any;

use crate::events::{DeadlineMissedStatus, LivelinessChangedStatus, LivelinessLostStatus};

/// Status handlers of a data reader.
pub trait ReaderListener: Send + Sync {
    /// A matched writer missed the requested deadline.
    fn on_requested_deadline_missed(&self, reader: &dyn Any, status: &DeadlineMissedStatus);

    /// Liveliness of matched writers changed.
    fn on_liveliness_changed(&self, reader: &dyn Any, status: &LivelinessChangedStatus);
}

/// Status handlers of a data writer.
pub trait WriterListener: Send + Sync {
    /// This writer missed its offered deadline.
    fn on_offered_deadline_missed(&self, writer: &dyn Any, status: &DeadlineMissedStatus);

    /// This writer lost liveliness.
    fn on_liveliness_lost(&self, writer: &dyn Any, status: &LivelinessLostStatus);
}
