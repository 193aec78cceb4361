//! Analytics demo - sends one of each event kind to `ANALYTICS_ENDPOINT`.
//!
//! ```text
//! ANALYTICS_ENDPOINT=https://api.example.com/analytics ANALYTICS_DEBUG=1 analytics-demo
//! ```

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use analytics_tracker::{
        error_event, Analytics, AnalyticsConfig, AnalyticsEvent, DescribeElement, ElementSnapshot,
        Metric, MetricName, Rating, StaticPage,
    };
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("analytics_tracker=debug")),
        )
        .init();

    let config = AnalyticsConfig::from_env()?
        .before_send(|event| {
            Some(
                event
                    .with_property("appVersion", env!("CARGO_PKG_VERSION"))
                    .with_property("environment", "demo"),
            )
        })
        .build()?;

    let analytics = Analytics::builder(config)
        .page(StaticPage::new("Analytics Tracking Demo", ""))
        .build();
    let dispatcher = analytics.dispatcher();

    // Each dispatch is awaited here only so the process does not exit with
    // requests still in flight.
    dispatcher
        .dispatch(
            AnalyticsEvent::new("custom_event")
                .with_property("action", "demo_action")
                .with_property("category", "demo")
                .with_property("label", "Demo Custom Event"),
        )
        .await;

    dispatcher
        .dispatch(analytics.page_view("/demo-page", Some("Demo Page View")))
        .await;

    dispatcher.dispatch(error_event("Demo Error", None)).await;

    let button = ElementSnapshot::new("click-track-button", "demo-button", "Track Click");
    dispatcher.dispatch(button.to_click().into()).await;

    let metric = Metric::new(MetricName::Ttfb, "v3-demo", 120.0, Rating::Good);
    dispatcher.dispatch(metric.into()).await;

    tracing::info!("demo events sent");
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
