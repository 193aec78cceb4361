//! Web-vitals subscription.
//!
//! Measuring the metrics is the host platform's job. A [`VitalsSource`] only
//! has to call back once per emitted metric; [`VitalsHub`] is a source the host
//! feeds by hand, for example from a JS bridge to the web-vitals library.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use analytics_shared::{Metric, MetricName};

pub type MetricCallback = Arc<dyn Fn(Metric) + Send + Sync>;

pub trait VitalsSource: Send + Sync {
    /// Register `callback` for every future emission of `name`.
    fn on_metric(&self, name: MetricName, callback: MetricCallback);
}

#[derive(Default)]
pub struct VitalsHub {
    subscribers: Mutex<HashMap<MetricName, Vec<MetricCallback>>>,
}

impl VitalsHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand `metric` to every callback registered for its name.
    ///
    /// Returns the number of callbacks invoked.
    pub fn report(&self, metric: Metric) -> usize {
        // Callbacks run outside the lock so they may subscribe again.
        let callbacks = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&metric.name)
            .cloned()
            .unwrap_or_default();

        for callback in &callbacks {
            callback(metric.clone());
        }
        callbacks.len()
    }
}

impl VitalsSource for VitalsHub {
    fn on_metric(&self, name: MetricName, callback: MetricCallback) {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name)
            .or_default()
            .push(callback);
    }
}
