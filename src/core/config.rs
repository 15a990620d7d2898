//! # Endpoint event configuration.
//!
//! Provides [`Config`], the per-endpoint settings consumed by
//! [`EndpointEventsBuilder`](crate::EndpointEventsBuilder), and the [`Backlog`]
//! policy applied when a callback registers after events already occurred.

/// What to do with occurrences buffered before a callback registers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Backlog {
    /// Deliver the buffered count to the new callback in one call.
    #[default]
    Replay,
    /// Reset the buffered count without delivering it.
    Discard,
}

/// Configuration for one endpoint's event machinery.
///
/// ## Field semantics
/// - `backlog`: policy for occurrences buffered while no callback was registered
///
/// ## Notes
/// All fields are public; start from `Config::default()` and override.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Backlog policy used by the endpoint's dispatcher.
    ///
    /// Default: [`Backlog::Replay`], so a late callback still learns about
    /// every occurrence. A single registration can override it through
    /// [`EndpointEvents::set_callback_with`](crate::EndpointEvents::set_callback_with).
    pub backlog: Backlog,
}

impl Config {
    /// Configuration that drops events buffered before registration.
    #[inline]
    pub fn discarding_backlog() -> Self {
        Self {
            backlog: Backlog::Discard,
        }
    }
}
