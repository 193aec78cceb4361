//! The event pipeline: finalize, filter, log, send.

use std::sync::Arc;

use analytics_shared::AnalyticsEvent;

use crate::clock::{Clock, SystemClock};
use crate::config::AnalyticsConfig;
use crate::error::DeliveryError;
use crate::logging::{ConsoleSink, DebugSink};
use crate::transport::{HttpTransport, OutboundRequest, Transport};

/// Delivers events to the configured endpoint.
///
/// Cloning is cheap; every clone shares the same config and transport.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<Inner>,
}

struct Inner {
    config: AnalyticsConfig,
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn DebugSink>,
}

impl Dispatcher {
    /// Dispatcher with the HTTP transport, system clock and console sink.
    pub fn new(config: AnalyticsConfig) -> Self {
        Self::with_parts(
            config,
            Arc::new(HttpTransport::new()),
            Arc::new(SystemClock),
            Arc::new(ConsoleSink),
        )
    }

    pub fn with_parts(
        config: AnalyticsConfig,
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn DebugSink>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                transport,
                clock,
                sink,
            }),
        }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.inner.config
    }

    /// Finalize `event` and try to deliver it.
    ///
    /// Never fails: a dropped event, a transport error and a non-2xx answer
    /// all end the same way for the caller. In debug mode the outgoing event
    /// and any failure are reported to the debug sink.
    pub async fn dispatch(&self, event: AnalyticsEvent) {
        let Some(event) = self.finalize(event) else {
            return;
        };

        let debug = self.inner.config.debug();
        if debug {
            self.inner.sink.outgoing(&event);
        }

        if let Err(error) = self.deliver(&event).await {
            if debug {
                self.inner.sink.failed(&event, &error);
            }
        }
    }

    /// Stamp the event and run it through `before_send`.
    ///
    /// A missing or zero timestamp is replaced with the current time. Returns
    /// `None` when the hook drops the event; otherwise the hook's result
    /// replaces the event entirely. Reserved keys left in `extra` are folded
    /// into the typed fields on both sides of the hook.
    pub fn finalize(&self, event: AnalyticsEvent) -> Option<AnalyticsEvent> {
        let event = event.normalized();
        let timestamp = event
            .timestamp
            .filter(|ts| *ts != 0)
            .unwrap_or_else(|| self.inner.clock.now_millis());
        let event = AnalyticsEvent {
            timestamp: Some(timestamp),
            ..event
        };

        match self.inner.config.before_send() {
            Some(hook) => hook(event).map(AnalyticsEvent::normalized),
            None => Some(event),
        }
    }

    async fn deliver(&self, event: &AnalyticsEvent) -> Result<(), DeliveryError> {
        let request = OutboundRequest {
            url: self.inner.config.endpoint().clone(),
            headers: self.inner.config.headers().clone(),
            body: serde_json::to_vec(event)?,
        };
        self.inner.transport.send(request).await
    }
}
