//! Cross-platform logging.
//!
//! Log lines go to `web_sys::console` in the browser and to `tracing`
//! everywhere else. The [`DebugSink`] trait sits on top so the dispatcher's
//! debug output can be captured or redirected by the host.

use analytics_shared::{AnalyticsEvent, LOG_PREFIX};

use crate::error::DeliveryError;

#[cfg(target_arch = "wasm32")]
pub fn log_info_impl(msg: &str) {
    web_sys::console::log_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_info_impl(msg: &str) {
    tracing::info!("{}", msg);
}

#[cfg(target_arch = "wasm32")]
pub fn log_error_impl(msg: &str) {
    web_sys::console::error_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_error_impl(msg: &str) {
    tracing::error!("{}", msg);
}

#[cfg(target_arch = "wasm32")]
pub fn log_warn_impl(msg: &str) {
    web_sys::console::warn_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_warn_impl(msg: &str) {
    tracing::warn!("{}", msg);
}

#[cfg(target_arch = "wasm32")]
pub fn log_debug_impl(msg: &str) {
    web_sys::console::debug_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_debug_impl(msg: &str) {
    tracing::debug!("{}", msg);
}

/// Log an info message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logging::log_info_impl(&format!($($arg)*))
    };
}

/// Log an error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logging::log_error_impl(&format!($($arg)*))
    };
}

/// Log a warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logging::log_warn_impl(&format!($($arg)*))
    };
}

/// Log a debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logging::log_debug_impl(&format!($($arg)*))
    };
}

/// Receives the dispatcher's diagnostics when debug mode is on.
pub trait DebugSink: Send + Sync {
    /// Called with the finalized event right before it is sent.
    fn outgoing(&self, event: &AnalyticsEvent);

    /// Called when sending `event` failed.
    fn failed(&self, event: &AnalyticsEvent, error: &DeliveryError);
}

/// Default sink: the platform console.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl DebugSink for ConsoleSink {
    fn outgoing(&self, event: &AnalyticsEvent) {
        match serde_json::to_string(event) {
            Ok(json) => crate::log_info!("{} {}", LOG_PREFIX, json),
            Err(_) => crate::log_info!("{} {:?}", LOG_PREFIX, event),
        }
    }

    fn failed(&self, event: &AnalyticsEvent, error: &DeliveryError) {
        crate::log_error!(
            "{} Failed to send event '{}': {}",
            LOG_PREFIX,
            event.name,
            error
        );
    }
}
