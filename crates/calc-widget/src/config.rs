//! Widget configuration
//!
//! Defaults match the stock host page; embedders can override them with a
//! JSON object passed to `start_with_config`.

use serde::{Deserialize, Serialize};

use crate::core::theme::Theme;
use crate::core::view::View;
use crate::core::{WidgetError, WidgetResult};
use crate::surface::MountPoint;

/// Default `type` tag on outbound messages
pub const DEFAULT_MESSAGE_TYPE: &str = "myApp";

/// Default `postMessage` target origin
pub const DEFAULT_TARGET_ORIGIN: &str = "*";

/// CSS selectors locating the mount points in the host page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct MountSelectors {
    /// Header whose text is the current view name
    pub header: String,
    /// Dropdown menu for narrow layouts
    pub menu: String,
    /// Navigation bar for wide layouts
    pub nav_bar: String,
    /// Container for the two theme buttons
    pub theme_toggle: String,
    /// Main content container
    pub content: String,
    /// Hamburger button that opens the dropdown (optional in the page)
    pub menu_button: String,
}

impl Default for MountSelectors {
    fn default() -> Self {
        Self {
            header: "h1".to_string(),
            menu: "#ddMenu".to_string(),
            nav_bar: "#navBar".to_string(),
            theme_toggle: "#themeToggleContainer".to_string(),
            content: "#app".to_string(),
            menu_button: "#menuButton".to_string(),
        }
    }
}

impl MountSelectors {
    /// Selector for a mount point
    #[must_use]
    pub fn selector(&self, mount: MountPoint) -> &str {
        match mount {
            MountPoint::Header => &self.header,
            MountPoint::Menu => &self.menu,
            MountPoint::NavBar => &self.nav_bar,
            MountPoint::ThemeToggle => &self.theme_toggle,
            MountPoint::Content => &self.content,
        }
    }
}

/// Configuration for the widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Mount point selectors
    pub selectors: MountSelectors,
    /// `type` field of outbound height reports
    pub message_type: String,
    /// Target origin passed to `postMessage`
    pub target_origin: String,
    /// View shown after load
    pub initial_view: View,
    /// Theme applied at load
    pub initial_theme: Theme,
    /// Maximum log level (`trace`..`error`)
    pub log_level: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            selectors: MountSelectors::default(),
            message_type: DEFAULT_MESSAGE_TYPE.to_string(),
            target_origin: DEFAULT_TARGET_ORIGIN.to_string(),
            initial_view: View::Calculator,
            initial_theme: Theme::Light,
            log_level: "info".to_string(),
        }
    }
}

impl WidgetConfig {
    /// Create a new builder
    #[must_use]
    pub fn builder() -> WidgetConfigBuilder {
        WidgetConfigBuilder::default()
    }

    /// Parses and validates a JSON configuration; missing fields use defaults
    pub fn from_json(json: &str) -> WidgetResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| WidgetError::InvalidConfig {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot
    pub fn validate(&self) -> WidgetResult<()> {
        if let Some(mount) = MountPoint::ALL
            .into_iter()
            .find(|mount| self.selectors.selector(*mount).trim().is_empty())
        {
            return Err(WidgetError::InvalidConfig {
                message: format!("selector '{mount}' is empty"),
            });
        }
        if self.message_type.is_empty() {
            return Err(WidgetError::InvalidConfig {
                message: "messageType is empty".to_string(),
            });
        }
        if self.target_origin.is_empty() {
            return Err(WidgetError::InvalidConfig {
                message: "targetOrigin is empty".to_string(),
            });
        }
        self.max_level()?;
        Ok(())
    }

    /// Parses `log_level`
    pub fn max_level(&self) -> WidgetResult<tracing::Level> {
        self.log_level
            .parse()
            .map_err(|_| WidgetError::InvalidConfig {
                message: format!("unknown log level '{}'", self.log_level),
            })
    }
}

/// Builder for `WidgetConfig`
#[derive(Debug, Clone, Default)]
pub struct WidgetConfigBuilder {
    config: WidgetConfig,
}

impl WidgetConfigBuilder {
    /// Set all mount point selectors
    #[must_use]
    pub fn selectors(mut self, selectors: MountSelectors) -> Self {
        self.config.selectors = selectors;
        self
    }

    /// Set the outbound message `type` tag
    #[must_use]
    pub fn message_type(mut self, message_type: impl Into<String>) -> Self {
        self.config.message_type = message_type.into();
        self
    }

    /// Set the `postMessage` target origin
    #[must_use]
    pub fn target_origin(mut self, origin: impl Into<String>) -> Self {
        self.config.target_origin = origin.into();
        self
    }

    /// Set the view shown after load
    #[must_use]
    pub fn initial_view(mut self, view: View) -> Self {
        self.config.initial_view = view;
        self
    }

    /// Set the theme applied at load
    #[must_use]
    pub fn initial_theme(mut self, theme: Theme) -> Self {
        self.config.initial_theme = theme;
        self
    }

    /// Set the maximum log level
    #[must_use]
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.log_level = level.into();
        self
    }

    /// Build the configuration
    #[must_use]
    pub fn build(self) -> WidgetConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WidgetConfig::default();
        assert_eq!(config.message_type, "myApp");
        assert_eq!(config.target_origin, "*");
        assert_eq!(config.initial_view, View::Calculator);
        assert_eq!(config.initial_theme, Theme::Light);
        assert_eq!(config.selectors.content, "#app");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_selector_lookup() {
        let selectors = MountSelectors::default();
        assert_eq!(selectors.selector(MountPoint::Header), "h1");
        assert_eq!(selectors.selector(MountPoint::ThemeToggle), "#themeToggleContainer");
    }

    #[test]
    fn test_builder() {
        let config = WidgetConfig::builder()
            .message_type("calc")
            .target_origin("https://host.example")
            .initial_view(View::About)
            .initial_theme(Theme::Dark)
            .log_level("debug")
            .build();
        assert_eq!(config.message_type, "calc");
        assert_eq!(config.target_origin, "https://host.example");
        assert_eq!(config.initial_view, View::About);
        assert!(config.initial_theme.is_dark());
        assert_eq!(config.max_level(), Ok(tracing::Level::DEBUG));
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            WidgetConfig::from_json(r##"{"initialView": "Contact", "selectors": {"content": "#main"}}"##)
                .unwrap();
        assert_eq!(config.initial_view, View::Contact);
        assert_eq!(config.selectors.content, "#main");
        assert_eq!(config.selectors.header, "h1");
        assert_eq!(config.message_type, "myApp");
    }

    #[test]
    fn test_from_json_empty_object() {
        assert_eq!(WidgetConfig::from_json("{}").unwrap(), WidgetConfig::default());
    }

    #[test]
    fn test_from_json_rejects_unknown_view() {
        let err = WidgetConfig::from_json(r#"{"initialView": "Settings"}"#).unwrap_err();
        assert!(matches!(err, WidgetError::InvalidConfig { .. }));
    }

    #[test]
    fn test_from_json_rejects_unknown_field() {
        assert!(WidgetConfig::from_json(r#"{"colour": "red"}"#).is_err());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(WidgetConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_validate_empty_selector() {
        let mut config = WidgetConfig::default();
        config.selectors.nav_bar = " ".to_string();
        assert_eq!(
            config.validate(),
            Err(WidgetError::InvalidConfig {
                message: "selector 'navBar' is empty".to_string()
            })
        );
    }

    #[test]
    fn test_validate_log_level() {
        let config = WidgetConfig::builder().log_level("loud").build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_message_type() {
        let config = WidgetConfig::builder().message_type("").build();
        assert!(config.validate().is_err());
    }
}
