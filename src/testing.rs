//! Test doubles for the transport and debug sink.

use std::sync::Mutex;

use analytics_shared::AnalyticsEvent;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::error::DeliveryError;
use crate::logging::DebugSink;
use crate::transport::{OutboundRequest, Transport};

impl OutboundRequest {
    pub(crate) fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// Records every request and answers with a fixed status.
pub(crate) struct RecordingTransport {
    sent: UnboundedSender<OutboundRequest>,
    fail_status: Option<u16>,
}

impl RecordingTransport {
    pub(crate) fn new() -> (Self, UnboundedReceiver<OutboundRequest>) {
        let (sent, rx) = unbounded_channel();
        let transport = Self {
            sent,
            fail_status: None,
        };
        (transport, rx)
    }

    pub(crate) fn failing(status: u16) -> (Self, UnboundedReceiver<OutboundRequest>) {
        let (sent, rx) = unbounded_channel();
        let transport = Self {
            sent,
            fail_status: Some(status),
        };
        (transport, rx)
    }
}

#[async_trait::async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: OutboundRequest) -> Result<(), DeliveryError> {
        let _ = self.sent.send(request);
        match self.fail_status {
            Some(status) => Err(DeliveryError::Status { status }),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub(crate) struct RecordingSink {
    lines: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub(crate) fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl DebugSink for RecordingSink {
    fn outgoing(&self, event: &AnalyticsEvent) {
        let json = serde_json::to_string(event).unwrap();
        self.lines
            .lock()
            .unwrap()
            .push(format!("outgoing {} {}", event.name, json));
    }

    fn failed(&self, event: &AnalyticsEvent, error: &DeliveryError) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("failed {}: {}", event.name, error));
    }
}
