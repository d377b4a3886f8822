//! Parent-frame messaging
//!
//! Inbound messages are decoded into [`HostMessage`]; outbound height reports
//! go through a [`ParentPort`], which is `window.parent.postMessage` in the
//! browser and a [`RecordingPort`] in tests.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::DEFAULT_MESSAGE_TYPE;
use crate::core::theme::Theme;
use crate::core::{WidgetError, WidgetResult};

/// Literal string message asking for a height report
pub const REQUEST_HEIGHT: &str = "requestHeight";

/// `action` of an outbound height report
pub const SET_HEIGHT_ACTION: &str = "setHeight";

/// Message received from the parent frame
#[derive(Debug, Clone, PartialEq)]
pub enum HostMessage {
    /// Post the current height now
    RequestHeight,
    /// Switch to the given theme
    SetTheme(Theme),
    /// Opaque payload for the embedder's private API
    PrivateApi(Value),
}

impl HostMessage {
    /// Decodes a message event payload
    pub fn parse(data: &Value) -> WidgetResult<Self> {
        match data {
            Value::String(s) if s == REQUEST_HEIGHT => Ok(Self::RequestHeight),
            Value::Object(map) => match map.get("action").and_then(Value::as_str) {
                Some("setTheme") => {
                    let theme = map.get("theme").unwrap_or(&Value::Null);
                    Theme::from_payload(theme).map(Self::SetTheme)
                }
                Some("privateApi") => Ok(Self::PrivateApi(data.clone())),
                Some(action) => Err(WidgetError::unroutable(format!(
                    "unknown action '{action}'"
                ))),
                None => Err(WidgetError::unroutable("object without an action")),
            },
            other => Err(WidgetError::unroutable(format!("unexpected payload {other}"))),
        }
    }
}

/// Outbound `{type, action: "setHeight", height}` message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeightReport {
    /// Message tag the parent filters on
    #[serde(rename = "type")]
    pub message_type: String,
    /// Always `setHeight`
    pub action: String,
    /// Content height in pixels
    pub height: u32,
}

impl HeightReport {
    /// Creates a report with the given tag
    #[must_use]
    pub fn new(message_type: impl Into<String>, height: u32) -> Self {
        Self {
            message_type: message_type.into(),
            action: SET_HEIGHT_ACTION.to_string(),
            height,
        }
    }
}

/// Clamps a measured height to whole non-negative pixels
#[must_use]
pub fn clamp_height(measured: f64) -> u32 {
    if measured.is_nan() || measured <= 0.0 {
        0
    } else if measured >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        measured.round() as u32
    }
}

/// Where height reports are sent
pub trait ParentPort {
    /// Posts one report to the parent frame
    fn post(&mut self, report: &HeightReport) -> WidgetResult<()>;
}

/// Port that keeps every report it is given
#[derive(Debug, Default, Clone)]
pub struct RecordingPort {
    sent: Vec<HeightReport>,
}

impl RecordingPort {
    /// Creates an empty port
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports posted so far, oldest first
    #[must_use]
    pub fn sent(&self) -> &[HeightReport] {
        &self.sent
    }

    /// Most recent report
    #[must_use]
    pub fn last(&self) -> Option<&HeightReport> {
        self.sent.last()
    }

    /// Forgets every report
    pub fn clear(&mut self) {
        self.sent.clear();
    }
}

impl ParentPort for RecordingPort {
    fn post(&mut self, report: &HeightReport) -> WidgetResult<()> {
        self.sent.push(report.clone());
        Ok(())
    }
}

/// Callback receiving `privateApi` messages
pub type PrivateApiHandler = Box<dyn FnMut(&Value)>;

/// Routes messages between the widget and its parent frame
pub struct HostBridge {
    message_type: String,
    private_api: Option<PrivateApiHandler>,
}

impl fmt::Debug for HostBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostBridge")
            .field("message_type", &self.message_type)
            .field("private_api", &self.private_api.is_some())
            .finish()
    }
}

impl Default for HostBridge {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGE_TYPE)
    }
}

impl HostBridge {
    /// Creates a bridge tagging reports with `message_type`
    #[must_use]
    pub fn new(message_type: impl Into<String>) -> Self {
        Self {
            message_type: message_type.into(),
            private_api: None,
        }
    }

    /// Tag placed in the `type` field of reports
    #[must_use]
    pub fn message_type(&self) -> &str {
        &self.message_type
    }

    /// Installs the `privateApi` callback, replacing any previous one
    pub fn register_private_api(&mut self, handler: impl FnMut(&Value) + 'static) {
        self.private_api = Some(Box::new(handler));
    }

    /// True if a `privateApi` callback is installed
    #[must_use]
    pub fn has_private_api(&self) -> bool {
        self.private_api.is_some()
    }

    /// Hands a payload to the `privateApi` callback; returns false if none is installed
    pub fn forward_private_api(&mut self, payload: &Value) -> bool {
        match self.private_api.as_mut() {
            Some(handler) => {
                handler(payload);
                true
            }
            None => false,
        }
    }

    /// Posts one height report
    pub fn report_height(&self, port: &mut impl ParentPort, height: u32) -> WidgetResult<()> {
        let report = HeightReport::new(self.message_type.as_str(), height);
        tracing::debug!(height, "posting height report");
        port.post(&report)
    }
}
