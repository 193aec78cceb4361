//! Wire-level constants shared by the sender and receivers.

/// Content type of every analytics request body.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Event names produced by the built-in tracking helpers.
pub const EVENT_PAGEVIEW: &str = "pageview";
pub const EVENT_ERROR: &str = "error";
pub const EVENT_CLICK: &str = "click";
pub const EVENT_WEB_VITALS: &str = "web-vitals";

/// Prefix used on every diagnostic line.
pub const LOG_PREFIX: &str = "[Analytics]";
