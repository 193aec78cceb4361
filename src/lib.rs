//! Analytics Tracker - client-side event reporting
//!
//! Collects custom events, page views, errors, clicks and web-vitals metrics
//! and posts each one as JSON to a configured endpoint. Runs natively on
//! tokio and in the browser (wasm32) on `fetch`.
//!
//! Delivery is best effort: nothing is queued, retried or batched, and a
//! failed request never surfaces to the caller.

pub mod logging;

pub mod clock;
pub mod config;
pub mod dispatcher;
pub mod element;
pub mod error;
pub mod page;
pub mod runtime;
pub mod tracker;
pub mod transport;
pub mod vitals;

#[cfg(test)]
mod testing;

pub use analytics_shared as shared;
pub use analytics_shared::{
    AnalyticsEvent, Click, ErrorReport, Metric, MetricName, PageView, Properties, Rating,
};
pub use config::{AnalyticsConfig, AnalyticsConfigBuilder, BeforeSend};
pub use dispatcher::Dispatcher;
pub use element::{DescribeElement, ElementSnapshot};
pub use error::{ConfigError, DeliveryError};
pub use page::{PageContext, StaticPage};
pub use tracker::{error_event, Analytics, AnalyticsBuilder};
pub use transport::{HttpTransport, OutboundRequest, Transport};
pub use vitals::{MetricCallback, VitalsHub, VitalsSource};
