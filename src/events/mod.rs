//! Status events: kinds and records.
//!
//! This module groups the event **data model** shared by the aggregator,
//! the dispatcher and the transport-facing listener traits.
//!
//! ## Contents
//! - [`EventKind`], [`EndpointKind`] classification and the supported-kind query
//! - [`Status`] and the concrete records ([`DeadlineMissedStatus`],
//!   [`LivelinessChangedStatus`], [`LivelinessLostStatus`]) tagged by [`EventStatus`]

mod kind;
mod status;

pub use kind::{EndpointKind, EventKind};
pub use status::{
    DeadlineMissedStatus, EventStatus, LivelinessChangedStatus, LivelinessLostStatus, Status,
};
