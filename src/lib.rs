//! # qos-events
//!
//! **qos-events** bridges asynchronous status events of a publish/subscribe
//! transport (deadline missed, liveliness changed/lost) to application code.
//!
//! The transport reports status changes from its own threads. Applications
//! either poll (`has_event` / `take`), block on a shared [`WaitCondition`],
//! or register a callback that fires for every occurrence. Occurrences seen
//! before a callback registers are counted and handed to it on registration.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   transport thread(s)
//!          │ on_requested_deadline_missed / on_liveliness_changed / ...
//!          ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  EndpointEvents (one per reader / writer)                       │
//! │                                                                 │
//! │  ┌───────────────────────────┐     ┌─────────────────────────┐  │
//! │  │ StatusAggregator          │     │ CallbackDispatcher      │  │
//! │  │ - record per kind         │     │ - optional callback     │  │
//! │  │   (absolute + deltas)     │     │   + user data           │  │
//! │  │ - unread flag per kind    │     │ - backlog counter       │  │
//! │  └──────┬────────────┬───────┘     └───────────┬─────────────┘  │
//! └─────────┼────────────┼─────────────────────────┼────────────────┘
//!           │            │ signal                  │ callback(&data, n)
//!           │            ▼                         ▼
//!           │     WaitCondition (shared)      application / executor
//!           │            │
//!           ▼            ▼
//!      has_event() / take()  ◄── consumer thread (poll or wait)
//! ```
//!
//! ### Record sequence
//! ```text
//! record(update)
//!   ├─► lock data       → overwrite absolute, add deltas, set flag → unlock
//!   ├─► lock condition  → notify_all                               → unlock
//!   └─► lock dispatcher → callback(&data, 1) or backlog += 1       → unlock
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                          |
//! |-------------------|--------------------------------------------------------------|---------------------------------------------|
//! | **Events**        | Event kinds, endpoint types and status records.              | [`EventKind`], [`EventStatus`], [`Status`]  |
//! | **Aggregation**   | Race-free accumulate-and-drain per kind.                     | [`StatusAggregator`]                        |
//! | **Notification**  | Callback delivery with pre-registration backlog.             | [`CallbackDispatcher`], [`Backlog`]         |
//! | **Waiting**       | Check-then-sleep protocol shared with waiters.               | [`WaitCondition`]                           |
//! | **Transport**     | Handler traits the transport calls.                          | [`ReaderListener`], [`WriterListener`]      |
//! | **Endpoints**     | Facade, builder, configuration and per-kind handles.         | [`EndpointEvents`], [`EventHandle`]         |
//! | **Errors**        | Typed error for unsupported kinds.                           | [`EventError`]                              |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use qos_events::{
//!     DeadlineMissedStatus, EndpointEvents, EndpointKind, EventKind, ReaderListener,
//! };
//!
//! let reader = EndpointEvents::builder(EndpointKind::Subscription)
//!     .name("sensors/temperature")
//!     .build();
//!
//! // Transport reports three missed deadlines before anyone listens.
//! for i in 1..=3 {
//!     reader.on_requested_deadline_missed(
//!         &(),
//!         &DeadlineMissedStatus { total_count: i, total_count_change: 1 },
//!     );
//! }
//!
//! // A late callback still learns about all three, in one call.
//! let seen = Arc::new(AtomicUsize::new(0));
//! reader.set_callback(Arc::clone(&seen), |seen: &Arc<AtomicUsize>, n| {
//!     seen.fetch_add(n, Ordering::Relaxed);
//! });
//! assert_eq!(seen.load(Ordering::Relaxed), 3);
//!
//! // Draining returns the latest total and the summed deltas.
//! let status = reader.take(EventKind::RequestedDeadlineMissed).unwrap();
//! assert_eq!(
//!     status.as_deadline_missed(),
//!     Some(&DeadlineMissedStatus { total_count: 3, total_count_change: 3 })
//! );
//! assert!(!reader.has_event(EventKind::RequestedDeadlineMissed));
//! ```
mod core;
mod error;
mod events;
mod listeners;

// ---- Public re-exports ----

pub use crate::core::{
    Backlog, CallbackDispatcher, Config, EndpointEvents, EndpointEventsBuilder, EventHandle,
    StatusAggregator, WaitCondition,
};
pub use error::EventError;
pub use events::{
    DeadlineMissedStatus, EndpointKind, EventKind, EventStatus, LivelinessChangedStatus,
    LivelinessLostStatus, Status,
};
pub use listeners::{ReaderListener, WriterListener};
