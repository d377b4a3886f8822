//! The widget: one view model plus the event handlers that mutate it
//!
//! [`Widget`] is generic over where it renders ([`Surface`]) and where its
//! height reports go ([`ParentPort`]), so the same code runs against the
//! browser and against [`crate::dom::MockDom`].

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::bridge::{HostBridge, HostMessage, ParentPort};
use crate::config::WidgetConfig;
use crate::core::calculator::Calculator;
use crate::core::theme::Theme;
use crate::core::view::View;
use crate::core::{WidgetError, WidgetResult};
use crate::render;
use crate::surface::{MountPoint, Surface};

/// All widget state
#[derive(Debug, Clone, Default)]
pub struct ViewModel {
    /// The one active view
    pub current_view: View,
    /// Active color theme
    pub theme: Theme,
    /// Dropdown menu visibility
    pub menu_open: bool,
    /// Calculator buffer
    pub calculator: Calculator,
}

/// An input the widget reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// Page finished loading
    Load,
    /// A menu or nav bar item was clicked
    NavigateTo(String),
    /// The hamburger button was clicked
    ToggleMenu,
    /// A theme button was clicked
    ToggleTheme,
    /// A keypad button was clicked
    KeyPress(String),
    /// The parent frame sent a message
    HostMessage(Value),
    /// The observed content changed size
    Resized,
}

/// The embeddable widget
#[derive(Debug)]
pub struct Widget<S, P> {
    model: ViewModel,
    bridge: HostBridge,
    surface: S,
    port: P,
}

impl<S: Surface, P: ParentPort> Widget<S, P> {
    /// Creates a widget; nothing is rendered until [`Widget::start`]
    #[must_use]
    pub fn new(surface: S, port: P, config: &WidgetConfig) -> Self {
        Self {
            model: ViewModel {
                current_view: config.initial_view,
                theme: config.initial_theme,
                ..ViewModel::default()
            },
            bridge: HostBridge::new(config.message_type.as_str()),
            surface,
            port,
        }
    }

    /// Renders every mount point and posts the load height report.
    ///
    /// Fails with `MissingMountPoint` before touching the page if any
    /// container is absent.
    pub fn start(&mut self) -> WidgetResult<()> {
        if let Err(err) = self.surface.ensure_mounted() {
            error!(%err, "widget cannot start");
            return Err(err);
        }
        self.surface.set_html(MountPoint::Menu, &render::render_menu())?;
        self.surface
            .set_html(MountPoint::NavBar, &render::render_nav_bar())?;
        self.apply_theme()?;
        self.show(self.model.current_view)?;
        self.report_height()?;
        info!(view = %self.model.current_view, theme = ?self.model.theme, "widget started");
        Ok(())
    }

    /// Switches to the named view and posts one height report.
    ///
    /// Unknown names fail with `InvalidView` and change nothing.
    pub fn set_view(&mut self, name: &str) -> WidgetResult<View> {
        let view: View = name.parse()?;
        self.show(view)?;
        self.report_height()?;
        debug!(%view, "view changed");
        Ok(view)
    }

    /// Flips the theme and returns the new one
    pub fn toggle_theme(&mut self) -> WidgetResult<Theme> {
        let theme = self.model.theme.toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    /// Applies a theme to the document root and the toggle buttons
    pub fn set_theme(&mut self, theme: Theme) -> WidgetResult<()> {
        self.model.theme = theme;
        self.apply_theme()?;
        debug!(?theme, "theme applied");
        Ok(())
    }

    /// Opens or closes the dropdown menu and returns the new state
    pub fn toggle_menu(&mut self) -> WidgetResult<bool> {
        self.set_menu_open(!self.model.menu_open)?;
        Ok(self.model.menu_open)
    }

    /// Feeds a keypad label to the calculator.
    ///
    /// Evaluation failures come back as `MalformedExpression` after the
    /// display already shows `<expr>=Error`. Keys outside the Calculator
    /// view are ignored.
    pub fn press_key(&mut self, label: &str) -> WidgetResult<()> {
        if self.model.current_view != View::Calculator {
            debug!(label, view = %self.model.current_view, "key ignored outside calculator");
            return Ok(());
        }
        let outcome = self.model.calculator.press(label);
        self.surface.set_display(
            self.model.calculator.display(),
            self.model.calculator.has_error(),
        )?;
        debug!(label, display = self.model.calculator.display(), "key pressed");
        outcome
    }

    /// Handles a message from the parent frame
    pub fn receive_message(&mut self, data: &Value) -> WidgetResult<()> {
        match HostMessage::parse(data)? {
            HostMessage::RequestHeight => self.report_height().map(|_| ()),
            HostMessage::SetTheme(theme) => self.set_theme(theme),
            HostMessage::PrivateApi(payload) => {
                if !self.bridge.forward_private_api(&payload) {
                    debug!("privateApi message without a registered handler");
                }
                Ok(())
            }
        }
    }

    /// Installs the `privateApi` callback
    pub fn register_private_api(&mut self, handler: impl FnMut(&Value) + 'static) {
        self.bridge.register_private_api(handler);
    }

    /// Posts the current content height and returns it
    pub fn report_height(&mut self) -> WidgetResult<u32> {
        let height = self.surface.content_height();
        self.bridge.report_height(&mut self.port, height)?;
        Ok(height)
    }

    /// Runs one event to completion.
    ///
    /// Recoverable errors are logged and swallowed; only fatal and host
    /// errors are returned.
    pub fn handle_event(&mut self, event: WidgetEvent) -> WidgetResult<()> {
        let result = match &event {
            WidgetEvent::Load => self.start(),
            WidgetEvent::NavigateTo(name) => self.set_view(name).map(|_| ()),
            WidgetEvent::ToggleMenu => self.toggle_menu().map(|_| ()),
            WidgetEvent::ToggleTheme => self.toggle_theme().map(|_| ()),
            WidgetEvent::KeyPress(label) => self.press_key(label),
            WidgetEvent::HostMessage(data) => self.receive_message(data),
            WidgetEvent::Resized => self.report_height().map(|_| ()),
        };

        match result {
            Ok(()) => Ok(()),
            Err(err @ WidgetError::MalformedExpression { .. }) => {
                debug!(%err, "expression rejected");
                Ok(())
            }
            Err(err @ (WidgetError::InvalidView { .. } | WidgetError::UnroutableHostMessage { .. })) => {
                warn!(%err, ?event, "event ignored");
                Ok(())
            }
            Err(err) => {
                error!(%err, ?event, "event failed");
                Err(err)
            }
        }
    }

    /// Current state
    #[must_use]
    pub fn model(&self) -> &ViewModel {
        &self.model
    }

    /// Active view
    #[must_use]
    pub fn view(&self) -> View {
        self.model.current_view
    }

    /// Active theme
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.model.theme
    }

    /// Render target
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable render target
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Report destination
    #[must_use]
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Mutable report destination
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Sets the title, closes the menu and renders `view`.
    ///
    /// Re-rendering the calculator always starts from an empty buffer.
    fn show(&mut self, view: View) -> WidgetResult<()> {
        self.surface.set_title(view.as_str())?;
        self.set_menu_open(false)?;
        if view == View::Calculator {
            self.model.calculator.reset();
        }
        self.surface.set_html(
            MountPoint::Content,
            &render::render_view(view, &self.model.calculator),
        )?;
        self.model.current_view = view;
        Ok(())
    }

    fn set_menu_open(&mut self, open: bool) -> WidgetResult<()> {
        self.surface.set_menu_open(open)?;
        self.model.menu_open = open;
        Ok(())
    }

    fn apply_theme(&mut self) -> WidgetResult<()> {
        self.surface.set_dark(self.model.theme.is_dark())?;
        self.surface.set_html(
            MountPoint::ThemeToggle,
            &render::render_theme_toggle(self.model.theme),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::RecordingPort;
    use crate::dom::MockDom;
    use serde_json::json;

    fn started() -> Widget<MockDom, RecordingPort> {
        let mut widget = Widget::new(
            MockDom::host_page(),
            RecordingPort::new(),
            &WidgetConfig::default(),
        );
        widget.start().unwrap();
        widget
    }

    fn press_all(widget: &mut Widget<MockDom, RecordingPort>, labels: &[&str]) {
        for label in labels {
            let _ = widget.press_key(label);
        }
    }

    #[test]
    fn test_start_renders_everything() {
        let widget = started();
        let dom = widget.surface();
        assert_eq!(dom.title(), Some("Calculator"));
        assert_eq!(dom.display_text(), Some(""));
        assert!(dom.html(MountPoint::Menu).unwrap().contains(r#"data-view="About""#));
        assert!(dom.html(MountPoint::NavBar).unwrap().contains(r#"data-view="Contact""#));
        assert!(dom.html(MountPoint::ThemeToggle).unwrap().contains(">Dark</button>"));
        assert!(!dom.is_menu_open());
        assert!(!dom.is_dark());
        assert_eq!(widget.port().sent().len(), 1);
    }

    #[test]
    fn test_start_missing_mount_point_is_fatal() {
        let mut widget = Widget::new(
            MockDom::host_page().without(MountPoint::Content),
            RecordingPort::new(),
            &WidgetConfig::default(),
        );
        let err = widget.start().unwrap_err();
        assert!(err.is_fatal());
        assert!(widget.port().sent().is_empty());
        assert_eq!(widget.surface().title(), Some(""));
    }

    #[test]
    fn test_start_honours_config() {
        let config = WidgetConfig::builder()
            .initial_view(View::Contact)
            .initial_theme(Theme::Dark)
            .message_type("calc")
            .build();
        let mut widget = Widget::new(MockDom::host_page(), RecordingPort::new(), &config);
        widget.start().unwrap();
        assert_eq!(widget.surface().title(), Some("Contact"));
        assert!(widget.surface().is_dark());
        assert_eq!(widget.port().last().unwrap().message_type, "calc");
    }

    #[test]
    fn test_set_view_updates_title_and_reports_once() {
        let mut widget = started();
        widget.port_mut().clear();

        assert_eq!(widget.set_view("About").unwrap(), View::About);
        assert_eq!(widget.surface().title(), Some("About"));
        assert!(widget
            .surface()
            .html(MountPoint::Content)
            .unwrap()
            .contains("About This Application"));
        assert_eq!(widget.port().sent().len(), 1);
    }

    #[test]
    fn test_set_view_invalid_changes_nothing() {
        let mut widget = started();
        widget.toggle_menu().unwrap();
        widget.port_mut().clear();

        let err = widget.set_view("Settings").unwrap_err();
        assert_eq!(
            err,
            WidgetError::InvalidView {
                name: "Settings".into()
            }
        );
        assert_eq!(widget.view(), View::Calculator);
        assert!(widget.model().menu_open);
        assert_eq!(widget.surface().title(), Some("Calculator"));
        assert!(widget.port().sent().is_empty());
    }

    #[test]
    fn test_set_view_closes_menu() {
        let mut widget = started();
        assert!(widget.toggle_menu().unwrap());
        assert!(widget.surface().is_menu_open());
        widget.set_view("Contact").unwrap();
        assert!(!widget.model().menu_open);
        assert!(!widget.surface().is_menu_open());
    }

    #[test]
    fn test_calculator_rerender_discards_buffer() {
        let mut widget = started();
        press_all(&mut widget, &["1", "+", "2"]);
        widget.set_view("Calculator").unwrap();
        assert_eq!(widget.surface().display_text(), Some(""));
        assert_eq!(widget.model().calculator.display(), "");
    }

    #[test]
    fn test_press_key_updates_display() {
        let mut widget = started();
        press_all(&mut widget, &["2", "+", "3"]);
        assert_eq!(widget.surface().display_text(), Some("2+3"));
        widget.press_key("calculate").unwrap();
        assert_eq!(widget.surface().display_text(), Some("2+3=5"));
    }

    #[test]
    fn test_press_key_malformed() {
        let mut widget = started();
        press_all(&mut widget, &["2", "+"]);
        let err = widget.press_key("calculate").unwrap_err();
        assert!(matches!(err, WidgetError::MalformedExpression { .. }));
        assert_eq!(widget.surface().display_text(), Some("2+=Error"));
    }

    #[test]
    fn test_press_key_outside_calculator_is_ignored() {
        let mut widget = started();
        widget.set_view("About").unwrap();
        widget.press_key("7").unwrap();
        assert_eq!(widget.model().calculator.display(), "");
    }

    #[test]
    fn test_toggle_theme() {
        let mut widget = started();
        assert_eq!(widget.toggle_theme().unwrap(), Theme::Dark);
        assert!(widget.surface().is_dark());
        let toggle = widget.surface().html(MountPoint::ThemeToggle).unwrap();
        assert!(toggle.contains("rounded block bg-yellow-400"));
        assert_eq!(widget.toggle_theme().unwrap(), Theme::Light);
        assert!(!widget.surface().is_dark());
    }

    #[test]
    fn test_receive_request_height() {
        let mut widget = started();
        widget.surface_mut().set_content_height(333);
        widget.receive_message(&json!("requestHeight")).unwrap();
        assert_eq!(widget.port().last().unwrap().height, 333);
    }

    #[test]
    fn test_receive_set_theme() {
        let mut widget = started();
        widget
            .receive_message(&json!({"action": "setTheme", "theme": "dark"}))
            .unwrap();
        assert_eq!(widget.theme(), Theme::Dark);
        assert!(widget.surface().is_dark());
    }

    #[test]
    fn test_receive_unroutable() {
        let mut widget = started();
        let err = widget.receive_message(&json!({"action": "explode"})).unwrap_err();
        assert!(matches!(err, WidgetError::UnroutableHostMessage { .. }));
    }

    #[test]
    fn test_handle_event_swallows_recoverable_errors() {
        let mut widget = started();
        assert!(widget
            .handle_event(WidgetEvent::NavigateTo("Settings".into()))
            .is_ok());
        assert!(widget
            .handle_event(WidgetEvent::HostMessage(json!(7)))
            .is_ok());
        assert!(widget
            .handle_event(WidgetEvent::KeyPress("calculate".into()))
            .is_ok());
        assert_eq!(widget.surface().display_text(), Some("=Error"));
    }

    #[test]
    fn test_handle_event_resized_reports() {
        let mut widget = started();
        widget.port_mut().clear();
        widget.handle_event(WidgetEvent::Resized).unwrap();
        assert_eq!(widget.port().sent().len(), 1);
    }

    #[test]
    fn test_handle_event_load_propagates_fatal() {
        let mut widget = Widget::new(
            MockDom::empty(),
            RecordingPort::new(),
            &WidgetConfig::default(),
        );
        assert!(widget.handle_event(WidgetEvent::Load).is_err());
    }
}
