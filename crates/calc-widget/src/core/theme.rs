//! Light/dark theme state

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{WidgetError, WidgetResult};

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme (no marker on the document root)
    #[default]
    Light,
    /// Dark theme (`dark` class on the document root)
    Dark,
}

impl Theme {
    /// Class toggled on the document root for the dark theme
    pub const DARK_CLASS: &'static str = "dark";

    /// Returns true for the dark theme
    #[must_use]
    pub const fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    /// Returns the opposite theme
    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Reads a theme from a `setTheme` payload.
    ///
    /// Accepts `"dark"`/`"light"` in any case, or a boolean where `true`
    /// means dark.
    pub fn from_payload(payload: &Value) -> WidgetResult<Self> {
        match payload {
            Value::Bool(true) => Ok(Theme::Dark),
            Value::Bool(false) => Ok(Theme::Light),
            Value::String(name) if name.eq_ignore_ascii_case("dark") => Ok(Theme::Dark),
            Value::String(name) if name.eq_ignore_ascii_case("light") => Ok(Theme::Light),
            other => Err(WidgetError::unroutable(format!(
                "setTheme with unsupported theme {other}"
            ))),
        }
    }
}
