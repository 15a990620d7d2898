//! Endpoint event core: aggregation, dispatch and wait signalling.
//!
//! The public entry point is [`EndpointEvents`], built through
//! [`EndpointEventsBuilder`]. The two halves it combines are public too, for
//! callers that wire them differently.
//!
//! Internal modules:
//! - [`aggregator`]: per-kind records and unread flags (data lock);
//! - [`condition`]: shared mutex + condvar used by waiting consumers;
//! - [`dispatcher`]: callback registration and the pre-registration backlog;
//! - [`endpoint`]: facade sequencing record → signal → notify;
//! - [`handle`]: endpoint + kind pair with a supported-kind check;
//! - [`builder`], [`config`]: construction.
//!
//! ## Lock order
//! ```text
//! data lock ──(released)──► condition lock ──(released)──► dispatcher lock
//! ```
//! No two of these are ever held at once by this crate.

mod aggregator;
mod builder;
mod condition;
mod config;
mod dispatcher;
mod endpoint;
mod handle;

pub use aggregator::StatusAggregator;
pub use builder::EndpointEventsBuilder;
pub use condition::WaitCondition;
pub use config::{Backlog, Config};
pub use dispatcher::CallbackDispatcher;
pub use endpoint::EndpointEvents;
pub use handle::EventHandle;
