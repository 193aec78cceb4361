//! Analytics configuration.
//!
//! A config is built once at startup and never mutated afterwards. Validation
//! happens in [`AnalyticsConfigBuilder::build`], so a running dispatcher only
//! ever sees a well-formed endpoint and header set.

use std::fmt;
use std::sync::Arc;

use analytics_shared::{AnalyticsEvent, CONTENT_TYPE_JSON};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use url::Url;

use crate::error::ConfigError;

/// Transform/filter gate applied to every event before delivery.
///
/// Returning `None` drops the event.
pub type BeforeSend = Arc<dyn Fn(AnalyticsEvent) -> Option<AnalyticsEvent> + Send + Sync>;

#[derive(Clone)]
pub struct AnalyticsConfig {
    endpoint: Url,
    debug: bool,
    include_web_vitals: bool,
    headers: HeaderMap,
    before_send: Option<BeforeSend>,
}

impl AnalyticsConfig {
    pub fn builder(endpoint: impl Into<String>) -> AnalyticsConfigBuilder {
        AnalyticsConfigBuilder {
            endpoint: endpoint.into(),
            debug: false,
            include_web_vitals: false,
            custom_headers: Vec::new(),
            before_send: None,
        }
    }

    /// Read configuration from environment variables.
    ///
    /// - `ANALYTICS_ENDPOINT`: destination URL (required)
    /// - `ANALYTICS_DEBUG`: "1" | "true" | "yes" | "on" (default: off)
    /// - `ANALYTICS_WEB_VITALS`: same values as `ANALYTICS_DEBUG`
    /// - `ANALYTICS_HEADERS`: comma-separated `Name=value` pairs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<AnalyticsConfigBuilder, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<AnalyticsConfigBuilder, ConfigError> {
        let endpoint =
            lookup("ANALYTICS_ENDPOINT").ok_or(ConfigError::MissingVar("ANALYTICS_ENDPOINT"))?;
        let headers = match lookup("ANALYTICS_HEADERS") {
            Some(raw) => parse_header_list(&raw)?,
            None => Vec::new(),
        };

        Ok(AnalyticsConfig::builder(endpoint)
            .debug(lookup("ANALYTICS_DEBUG").is_some_and(|v| parse_flag(&v)))
            .include_web_vitals(lookup("ANALYTICS_WEB_VITALS").is_some_and(|v| parse_flag(&v)))
            .headers(headers))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn include_web_vitals(&self) -> bool {
        self.include_web_vitals
    }

    /// Headers sent with every request: the JSON content type, then the custom
    /// headers applied on top of it.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn before_send(&self) -> Option<&BeforeSend> {
        self.before_send.as_ref()
    }
}

impl fmt::Debug for AnalyticsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyticsConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("debug", &self.debug)
            .field("include_web_vitals", &self.include_web_vitals)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("before_send", &self.before_send.is_some())
            .finish()
    }
}

pub struct AnalyticsConfigBuilder {
    endpoint: String,
    debug: bool,
    include_web_vitals: bool,
    custom_headers: Vec<(String, String)>,
    before_send: Option<BeforeSend>,
}

impl AnalyticsConfigBuilder {
    /// Log outgoing events and delivery failures.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Subscribe to web-vitals metrics when the tracker starts.
    pub fn include_web_vitals(mut self, include: bool) -> Self {
        self.include_web_vitals = include;
        self
    }

    /// Add a header to every request. Later entries win over earlier ones with
    /// the same name, including `Content-Type`.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.push((name.into(), value.into()));
        self
    }

    pub fn headers<K, V>(mut self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.custom_headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn before_send(
        mut self,
        hook: impl Fn(AnalyticsEvent) -> Option<AnalyticsEvent> + Send + Sync + 'static,
    ) -> Self {
        self.before_send = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> Result<AnalyticsConfig, ConfigError> {
        let endpoint =
            resolve_endpoint(&self.endpoint).map_err(|source| ConfigError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                source,
            })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
        for (name, value) in self.custom_headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ConfigError::InvalidHeaderName(name.clone()))?;
            let header_value =
                HeaderValue::from_str(&value).map_err(|_| ConfigError::InvalidHeaderValue(name))?;
            headers.insert(header_name, header_value);
        }

        Ok(AnalyticsConfig {
            endpoint,
            debug: self.debug,
            include_web_vitals: self.include_web_vitals,
            headers,
            before_send: self.before_send,
        })
    }
}

/// In the browser a relative endpoint resolves against the current page, as
/// `fetch` would.
#[cfg(target_arch = "wasm32")]
fn resolve_endpoint(raw: &str) -> Result<Url, url::ParseError> {
    let page = web_sys::window().and_then(|window| window.location().href().ok());
    resolve_against(raw, page.as_deref())
}

#[cfg(not(target_arch = "wasm32"))]
fn resolve_endpoint(raw: &str) -> Result<Url, url::ParseError> {
    resolve_against(raw, None)
}

/// Parse `raw`, joining it onto `base` when it is relative.
fn resolve_against(raw: &str, base: Option<&str>) -> Result<Url, url::ParseError> {
    match (Url::parse(raw), base) {
        (Err(url::ParseError::RelativeUrlWithoutBase), Some(base)) => Url::parse(base)?.join(raw),
        (parsed, _) => parsed,
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Parse `Name=value,Other=value`. Empty segments are skipped.
fn parse_header_list(raw: &str) -> Result<Vec<(String, String)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (name, value) = entry
                .split_once('=')
                .ok_or_else(|| ConfigError::MalformedHeaders(entry.to_string()))?;
            Ok((name.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}
