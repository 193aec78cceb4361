//! The tracking facade handed to host code.

use std::fmt::Display;
use std::sync::Arc;

use analytics_shared::{error_chain, AnalyticsEvent, ErrorReport, MetricName, PageView};

use crate::clock::{Clock, SystemClock};
use crate::config::AnalyticsConfig;
use crate::dispatcher::Dispatcher;
use crate::element::DescribeElement;
use crate::logging::{ConsoleSink, DebugSink};
use crate::page::{default_page, PageContext};
use crate::runtime::spawn_detached;
use crate::transport::{HttpTransport, Transport};
use crate::vitals::VitalsSource;

/// Fire-and-forget event tracking.
///
/// Build one from the app's config at startup and clone it wherever tracking
/// is needed. Every `track_*` call returns immediately; delivery happens in the
/// background and its outcome is never reported back.
#[derive(Clone)]
pub struct Analytics {
    dispatcher: Dispatcher,
    page: Arc<dyn PageContext>,
}

impl Analytics {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self::builder(config).build()
    }

    pub fn builder(config: AnalyticsConfig) -> AnalyticsBuilder {
        AnalyticsBuilder {
            config,
            transport: Arc::new(HttpTransport::new()),
            clock: Arc::new(SystemClock),
            sink: Arc::new(ConsoleSink),
            page: default_page(),
            vitals: None,
        }
    }

    /// The underlying pipeline, for hosts that want to await a dispatch.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn track_event(&self, event: AnalyticsEvent) {
        self.send(event);
    }

    /// Track a page view. A missing or empty `title` falls back to the page
    /// context's title.
    pub fn track_page_view(&self, path: impl Into<String>, title: Option<&str>) {
        self.send(self.page_view(path, title));
    }

    pub fn track_error(&self, error: impl Display, error_info: Option<String>) {
        self.send(error_event(error, error_info));
    }

    /// Track an error, using its `source()` chain as the error info.
    pub fn track_error_chain(&self, error: &(dyn std::error::Error + 'static)) {
        self.send(error_event(error, error_chain(error)));
    }

    pub fn track_click(&self, element: &dyn DescribeElement) {
        self.send(element.to_click().into());
    }

    /// Build the event `track_page_view` would send.
    pub fn page_view(&self, path: impl Into<String>, title: Option<&str>) -> AnalyticsEvent {
        let title = match title {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => self.page.title(),
        };
        PageView {
            path: path.into(),
            title: Some(title),
            referrer: Some(self.page.referrer()),
        }
        .into()
    }

    fn send(&self, event: AnalyticsEvent) {
        let dispatcher = self.dispatcher.clone();
        spawn_detached(async move { dispatcher.dispatch(event).await });
    }
}

/// Build the event `track_error` would send.
pub fn error_event(error: impl Display, error_info: Option<String>) -> AnalyticsEvent {
    ErrorReport {
        error: error.to_string(),
        error_info,
    }
    .into()
}

pub struct AnalyticsBuilder {
    config: AnalyticsConfig,
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn DebugSink>,
    page: Arc<dyn PageContext>,
    vitals: Option<Arc<dyn VitalsSource>>,
}

impl AnalyticsBuilder {
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn debug_sink(mut self, sink: Arc<dyn DebugSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn page(mut self, page: impl PageContext + 'static) -> Self {
        self.page = Arc::new(page);
        self
    }

    /// Source of web-vitals metrics. Only subscribed to when the config
    /// enables web vitals.
    pub fn vitals(mut self, source: Arc<dyn VitalsSource>) -> Self {
        self.vitals = Some(source);
        self
    }

    pub fn build(self) -> Analytics {
        let dispatcher = Dispatcher::with_parts(self.config, self.transport, self.clock, self.sink);

        if dispatcher.config().include_web_vitals() {
            match &self.vitals {
                Some(source) => subscribe_vitals(source.as_ref(), &dispatcher),
                None => crate::log_debug!("web vitals enabled but no metric source was provided"),
            }
        }

        Analytics {
            dispatcher,
            page: self.page,
        }
    }
}

fn subscribe_vitals(source: &dyn VitalsSource, dispatcher: &Dispatcher) {
    for name in MetricName::ALL {
        let dispatcher = dispatcher.clone();
        source.on_metric(
            name,
            Arc::new(move |metric| {
                let dispatcher = dispatcher.clone();
                spawn_detached(async move { dispatcher.dispatch(metric.into()).await });
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use analytics_shared::{Metric, Rating};
    use serde_json::json;
    use tokio::sync::mpsc::UnboundedReceiver;

    use super::*;
    use crate::clock::FixedClock;
    use crate::element::ElementSnapshot;
    use crate::page::StaticPage;
    use crate::testing::{RecordingSink, RecordingTransport};
    use crate::transport::OutboundRequest;
    use crate::vitals::VitalsHub;

    const T: i64 = 1_704_067_200_000;

    fn analytics(
        include_web_vitals: bool,
        vitals: Option<Arc<dyn VitalsSource>>,
    ) -> (Analytics, UnboundedReceiver<OutboundRequest>) {
        let config = AnalyticsConfig::builder("https://api.example.com/analytics")
            .debug(true)
            .include_web_vitals(include_web_vitals)
            .build()
            .unwrap();
        let (transport, sent) = RecordingTransport::new();
        let mut builder = Analytics::builder(config)
            .transport(transport)
            .clock(FixedClock(T))
            .debug_sink(Arc::new(RecordingSink::default()))
            .page(StaticPage::new("Test Document", "https://example.com/referrer"));
        if let Some(source) = vitals {
            builder = builder.vitals(source);
        }
        (builder.build(), sent)
    }

    #[tokio::test]
    async fn test_track_event() {
        let (analytics, mut sent) = analytics(false, None);

        analytics.track_event(AnalyticsEvent::new("test-event").with_property("test", true));

        assert_eq!(
            sent.recv().await.unwrap().json(),
            json!({ "name": "test-event", "properties": { "test": true }, "timestamp": T })
        );
    }

    #[tokio::test]
    async fn test_track_page_view_with_title() {
        let (analytics, mut sent) = analytics(false, None);

        analytics.track_page_view("/test-page", Some("Test Page"));

        assert_eq!(
            sent.recv().await.unwrap().json(),
            json!({
                "name": "pageview",
                "properties": {
                    "path": "/test-page",
                    "title": "Test Page",
                    "referrer": "https://example.com/referrer"
                },
                "timestamp": T
            })
        );
    }

    #[tokio::test]
    async fn test_track_page_view_defaults_title() {
        let (analytics, mut sent) = analytics(false, None);

        analytics.track_page_view("/x", None);
        assert_eq!(
            sent.recv().await.unwrap().json()["properties"]["title"],
            json!("Test Document")
        );

        analytics.track_page_view("/x", Some(""));
        assert_eq!(
            sent.recv().await.unwrap().json()["properties"]["title"],
            json!("Test Document")
        );
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Error: Test error")]
    struct TestError;

    #[tokio::test]
    async fn test_track_error() {
        let (analytics, mut sent) = analytics(false, None);

        analytics.track_error(TestError, None);

        assert_eq!(
            sent.recv().await.unwrap().json(),
            json!({
                "name": "error",
                "properties": { "error": "Error: Test error" },
                "timestamp": T
            })
        );
    }

    #[derive(Debug, thiserror::Error)]
    #[error("request failed")]
    struct Wrapped(#[source] TestError);

    #[tokio::test]
    async fn test_track_error_chain() {
        let (analytics, mut sent) = analytics(false, None);

        analytics.track_error_chain(&Wrapped(TestError));

        assert_eq!(
            sent.recv().await.unwrap().json()["properties"],
            json!({ "error": "request failed", "errorInfo": "caused by: Error: Test error" })
        );
    }

    #[tokio::test]
    async fn test_track_click() {
        let (analytics, mut sent) = analytics(false, None);

        analytics.track_click(&ElementSnapshot::new("test-button", "test-class", "Track Click"));
        assert_eq!(
            sent.recv().await.unwrap().json()["properties"],
            json!({
                "elementId": "test-button",
                "elementClass": "test-class",
                "elementText": "Track Click"
            })
        );

        let link = ElementSnapshot::new("", "nav-link", "View Pricing")
            .link("https://example.com/pricing");
        analytics.track_click(&link);
        assert_eq!(
            sent.recv().await.unwrap().json()["properties"]["href"],
            json!("https://example.com/pricing")
        );
    }

    #[tokio::test]
    async fn test_web_vitals_subscribed_when_enabled() {
        let hub = Arc::new(VitalsHub::new());
        let (_analytics, mut sent) = analytics(true, Some(hub.clone()));

        for name in MetricName::ALL {
            assert_eq!(hub.report(Metric::new(name, "v1", 1.0, Rating::Good)), 1);
        }

        let mut names = Vec::new();
        for _ in MetricName::ALL {
            let body = sent.recv().await.unwrap().json();
            assert_eq!(body["name"], json!("web-vitals"));
            assert_eq!(body["properties"]["rating"], json!("good"));
            names.push(body["properties"]["name"].as_str().unwrap().to_string());
        }
        names.sort();
        assert_eq!(names, ["CLS", "FCP", "FID", "LCP", "TTFB"]);
    }

    #[tokio::test]
    async fn test_web_vitals_ignored_when_disabled() {
        let hub = Arc::new(VitalsHub::new());
        let (_analytics, _sent) = analytics(false, Some(hub.clone()));

        assert_eq!(hub.report(Metric::new(MetricName::Lcp, "v1", 1.0, Rating::Good)), 0);
    }
}
