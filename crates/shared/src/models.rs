//! Event data model: the generic [`AnalyticsEvent`] and the shaped events the
//! tracking helpers build.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use crate::protocol::{EVENT_CLICK, EVENT_ERROR, EVENT_PAGEVIEW};

/// Untyped property bag carried by every event.
pub type Properties = Map<String, Value>;

// --- Generic event ---

/// A named, timestamped record of something that happened in the host
/// application.
///
/// On the wire this is a flat JSON object. `None` fields are omitted, and any
/// extra top-level fields (added by a `before_send` transform, for example)
/// are kept next to `name`, `properties` and `timestamp`. The reserved keys
/// never live in `extra`: [`AnalyticsEvent::with_field`] and
/// [`AnalyticsEvent::normalized`] move them onto the typed fields so each one
/// appears once on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsEvent {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
    /// Epoch milliseconds. Fractional values are truncated when decoding.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_timestamp"
    )]
    pub timestamp: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalyticsEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set a single property, creating the property bag if needed.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Replace the whole property bag.
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Add a top-level field outside of `properties`.
    ///
    /// `name`, `properties` and `timestamp` set the typed fields instead.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_field(key.into(), value.into());
        self
    }

    /// Move reserved keys found in `extra` onto the typed fields.
    pub fn normalized(mut self) -> Self {
        for key in RESERVED_FIELDS {
            if let Some(value) = self.extra.remove(key) {
                self.set_field(key.to_string(), value);
            }
        }
        self
    }

    fn set_field(&mut self, key: String, value: Value) {
        match key.as_str() {
            "name" => {
                self.name = match value {
                    Value::String(name) => name,
                    other => other.to_string(),
                }
            }
            "properties" => {
                self.properties = match value {
                    Value::Object(map) => Some(map),
                    _ => None,
                }
            }
            "timestamp" => {
                self.timestamp = match &value {
                    Value::Number(number) => timestamp_from_number(Some(number)),
                    _ => None,
                }
            }
            _ => {
                self.extra.insert(key, value);
            }
        }
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref()?.get(key)
    }

    /// Decode the property bag into one of the shaped events.
    ///
    /// Returns `None` if there are no properties or they do not match `T`.
    pub fn properties_as<T: DeserializeOwned>(&self) -> Option<T> {
        let properties = self.properties.clone()?;
        serde_json::from_value(Value::Object(properties)).ok()
    }
}

/// Top-level keys backed by typed fields of [`AnalyticsEvent`].
const RESERVED_FIELDS: [&str; 3] = ["name", "properties", "timestamp"];

fn timestamp_from_number(number: Option<&Number>) -> Option<i64> {
    let number = number?;
    number.as_i64().or_else(|| number.as_f64().map(|ms| ms as i64))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<Number>::deserialize(deserializer)?;
    Ok(timestamp_from_number(number.as_ref()))
}

/// Serialize a shape into a property bag. Shapes are plain structs of strings
/// and options, so anything other than an object means there is nothing to
/// carry.
fn to_properties<T: Serialize>(shape: &T) -> Properties {
    match serde_json::to_value(shape) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

// --- Page views ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
}

impl From<PageView> for AnalyticsEvent {
    fn from(view: PageView) -> Self {
        AnalyticsEvent::new(EVENT_PAGEVIEW).with_properties(to_properties(&view))
    }
}

// --- Errors ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    /// String rendering of the error.
    pub error: String,
    /// Optional stack context, omitted on the wire when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_info: Option<String>,
}

impl ErrorReport {
    pub fn new(error: impl std::fmt::Display) -> Self {
        Self {
            error: error.to_string(),
            error_info: None,
        }
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.error_info = Some(info.into());
        self
    }
}

impl From<ErrorReport> for AnalyticsEvent {
    fn from(report: ErrorReport) -> Self {
        AnalyticsEvent::new(EVENT_ERROR).with_properties(to_properties(&report))
    }
}

/// Render the `source()` chain of an error, one cause per line.
///
/// Returns `None` when the error has no source.
pub fn error_chain(error: &(dyn std::error::Error + 'static)) -> Option<String> {
    let mut causes = Vec::new();
    let mut current = error.source();
    while let Some(cause) = current {
        causes.push(format!("caused by: {cause}"));
        current = cause.source();
    }
    if causes.is_empty() {
        None
    } else {
        Some(causes.join("\n"))
    }
}

// --- Clicks ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Click {
    pub element_id: String,
    pub element_class: String,
    pub element_text: String,
    /// Link target, present only when the clicked element is a hyperlink.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl From<Click> for AnalyticsEvent {
    fn from(click: Click) -> Self {
        AnalyticsEvent::new(EVENT_CLICK).with_properties(to_properties(&click))
    }
}
