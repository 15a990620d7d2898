//! # Transport-facing status listeners.
//!
//! The transport reports status changes by calling one handler per event kind.
//! These traits fix the handler signatures; [`EndpointEvents`](crate::EndpointEvents)
//! implements both.
//!
//! ## Architecture
//! ```text
//! transport thread ──► ReaderListener::on_liveliness_changed(reader, &status)
//!                          │
//!                          ▼
//!                   EndpointEvents ──► StatusAggregator::record()
//!                                  └─► CallbackDispatcher::notify()
//! ```

mod listener;

pub use listener::{ReaderListener, WriterListener};
