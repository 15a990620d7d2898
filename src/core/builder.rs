use std::borrow::Cow;
use std::sync::Arc;

use super::{condition::WaitCondition, config::Config, endpoint::EndpointEvents};
use crate::events::EndpointKind;

/// Builder for constructing an [`EndpointEvents`] with optional wiring.
pub struct EndpointEventsBuilder {
    endpoint: EndpointKind,
    name: Cow<'static, str>,
    cfg: Config,
    condition: Option<Arc<WaitCondition>>,
}

impl EndpointEventsBuilder {
    /// Creates a builder for an endpoint of type `endpoint` with default config.
    pub fn new(endpoint: EndpointKind) -> Self {
        Self {
            endpoint,
            name: Cow::Borrowed(endpoint.as_label()),
            cfg: Config::default(),
            condition: None,
        }
    }

    /// Sets the name attached to log records (defaults to the endpoint type).
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Replaces the configuration.
    pub fn config(mut self, cfg: Config) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets the wait condition signalled on every recorded event.
    ///
    /// The condition is shared: whoever waits on it keeps its own `Arc`.
    pub fn with_condition(mut self, condition: Arc<WaitCondition>) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Builds and returns the endpoint event state.
    ///
    /// Records start zeroed, flags cleared, no callback registered.
    pub fn build(self) -> Arc<EndpointEvents> {
        tracing::debug!(
            endpoint = %self.name,
            kind = %self.endpoint,
            backlog = ?self.cfg.backlog,
            "endpoint events created"
        );
        Arc::new(EndpointEvents::new_internal(
            self.name,
            self.endpoint,
            self.cfg,
            self.condition,
        ))
    }
}
