//! Web-vitals metric types.
//!
//! A [`Metric`] mirrors the result object the browser web-vitals library hands
//! to its callbacks; it is forwarded as-is in the properties of a `web-vitals`
//! event.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::models::AnalyticsEvent;
use crate::protocol::EVENT_WEB_VITALS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MetricName {
    /// First contentful paint
    Fcp,
    /// Largest contentful paint
    Lcp,
    /// Cumulative layout shift
    Cls,
    /// First input delay
    Fid,
    /// Time to first byte
    Ttfb,
}

impl MetricName {
    /// Every metric, in the order subscriptions are registered.
    pub const ALL: [MetricName; 5] = [
        MetricName::Fcp,
        MetricName::Lcp,
        MetricName::Cls,
        MetricName::Fid,
        MetricName::Ttfb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::Fcp => "FCP",
            MetricName::Lcp => "LCP",
            MetricName::Cls => "CLS",
            MetricName::Fid => "FID",
            MetricName::Ttfb => "TTFB",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricName::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownMetric(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rating {
    Good,
    NeedsImprovement,
    Poor,
}

impl FromStr for Rating {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(Rating::Good),
            "needs-improvement" => Ok(Rating::NeedsImprovement),
            "poor" => Ok(Rating::Poor),
            other => Err(ParseError::UnknownRating(other.to_string())),
        }
    }
}

/// One performance metric emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub name: MetricName,
    /// Unique per page load and metric.
    pub id: String,
    pub value: f64,
    pub rating: Rating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation_type: Option<String>,
}

impl Metric {
    pub fn new(name: MetricName, id: impl Into<String>, value: f64, rating: Rating) -> Self {
        Self {
            name,
            id: id.into(),
            value,
            rating,
            delta: None,
            navigation_type: None,
        }
    }
}

impl From<Metric> for AnalyticsEvent {
    fn from(metric: Metric) -> Self {
        let properties = match serde_json::to_value(&metric) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        AnalyticsEvent::new(EVENT_WEB_VITALS).with_properties(properties)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_metric_event_carries_raw_result() {
        let mut metric = Metric::new(MetricName::Lcp, "v3-123", 2450.5, Rating::NeedsImprovement);
        metric.navigation_type = Some("navigate".into());

        let event: AnalyticsEvent = metric.into();
        assert_eq!(event.name, "web-vitals");
        assert_eq!(
            serde_json::to_value(&event.properties).unwrap(),
            json!({
                "name": "LCP",
                "id": "v3-123",
                "value": 2450.5,
                "rating": "needs-improvement",
                "navigationType": "navigate"
            })
        );
    }

    #[test]
    fn test_parse_names_and_ratings() {
        assert_eq!("ttfb".parse::<MetricName>(), Ok(MetricName::Ttfb));
        assert_eq!("CLS".parse::<MetricName>(), Ok(MetricName::Cls));
        assert_eq!(
            "INP".parse::<MetricName>(),
            Err(ParseError::UnknownMetric("INP".into()))
        );
        assert_eq!("poor".parse::<Rating>(), Ok(Rating::Poor));
        assert!("bad".parse::<Rating>().is_err());
    }
}
