//! Unified widget driver
//!
//! Test logic is written once against [`WidgetDriver`] and run against any
//! implementation: [`MockDriver`] natively, and the `BrowserDriver` in
//! `tests/web.rs`, which reads the live document under `wasm-bindgen-test`.

use crate::bridge::{HeightReport, RecordingPort};
use crate::config::WidgetConfig;
use crate::core::view::View;
use crate::core::WidgetResult;
use crate::dom::MockDom;
use crate::render::theme_toggle_buttons;
use crate::widget::Widget;

/// User-level interactions with a mounted widget
pub trait WidgetDriver {
    /// Clicks the menu item for `name`
    fn navigate(&mut self, name: &str) -> WidgetResult<View>;

    /// Clicks a keypad button
    fn press(&mut self, label: &str) -> WidgetResult<()>;

    /// Clicks the visible theme button
    fn toggle_theme(&mut self);

    /// Header text
    fn title(&self) -> String;

    /// Calculator display text (empty outside the Calculator view)
    fn display(&self) -> String;

    /// True if the document root carries the dark marker
    fn is_dark(&self) -> bool;

    /// Number of theme buttons currently shown
    fn visible_toggles(&self) -> usize;

    /// Height reports posted so far
    fn reports(&self) -> Vec<HeightReport>;
}

/// Native driver: a widget mounted on the stock mock page
#[derive(Debug)]
pub struct MockDriver {
    widget: Widget<MockDom, RecordingPort>,
}

impl MockDriver {
    /// Mounts and starts a widget with the default configuration
    pub fn new() -> WidgetResult<Self> {
        Self::with_config(&WidgetConfig::default())
    }

    /// Mounts and starts a widget with `config`
    pub fn with_config(config: &WidgetConfig) -> WidgetResult<Self> {
        let mut widget = Widget::new(MockDom::host_page(), RecordingPort::new(), config);
        widget.start()?;
        Ok(Self { widget })
    }

    /// The underlying widget
    #[must_use]
    pub fn widget(&self) -> &Widget<MockDom, RecordingPort> {
        &self.widget
    }

    /// The underlying widget, mutably
    pub fn widget_mut(&mut self) -> &mut Widget<MockDom, RecordingPort> {
        &mut self.widget
    }
}

impl WidgetDriver for MockDriver {
    fn navigate(&mut self, name: &str) -> WidgetResult<View> {
        self.widget.set_view(name)
    }

    fn press(&mut self, label: &str) -> WidgetResult<()> {
        self.widget.press_key(label)
    }

    fn toggle_theme(&mut self) {
        // MockDom writes are infallible once started
        let _ = self.widget.toggle_theme();
    }

    fn title(&self) -> String {
        self.widget.surface().title().unwrap_or_default().to_string()
    }

    fn display(&self) -> String {
        self.widget
            .surface()
            .display_text()
            .unwrap_or_default()
            .to_string()
    }

    fn is_dark(&self) -> bool {
        self.widget.surface().is_dark()
    }

    fn visible_toggles(&self) -> usize {
        theme_toggle_buttons(self.widget.theme())
            .iter()
            .filter(|button| button.visible)
            .count()
    }

    fn reports(&self) -> Vec<HeightReport> {
        self.widget.port().sent().to_vec()
    }
}

// ===== Unified Test Specifications =====
// These work with ANY WidgetDriver implementation

fn enter<D: WidgetDriver>(driver: &mut D, labels: &[&str]) {
    for label in labels {
        let _ = driver.press(label);
    }
}

/// Verifies navigation sets the title and reports height once per switch
pub fn verify_navigation<D: WidgetDriver>(driver: &mut D) {
    for view in View::ALL {
        let before = driver.reports().len();
        assert_eq!(driver.navigate(view.as_str()).unwrap(), view);
        assert_eq!(driver.title(), view.as_str());
        assert_eq!(driver.reports().len(), before + 1);
    }

    let before = driver.reports().len();
    assert!(driver.navigate("Settings").is_err());
    assert_eq!(driver.reports().len(), before);
    assert_eq!(driver.title(), View::Contact.as_str());
}

/// Verifies keypad arithmetic end to end
pub fn verify_arithmetic<D: WidgetDriver>(driver: &mut D) {
    driver.navigate("Calculator").unwrap();

    enter(driver, &["2", "+", "3", "calculate"]);
    assert_eq!(driver.display(), "2+3=5");
    driver.press("clear").unwrap();

    enter(driver, &["2", "**", "3", "calculate"]);
    assert_eq!(driver.display(), "2**3=8");
    driver.press("clear").unwrap();

    enter(driver, &["6", "/", "0", "calculate"]);
    assert_eq!(driver.display(), "6/0=Infinity");
    driver.press("clear").unwrap();
    assert_eq!(driver.display(), "");
}

/// Verifies malformed input shows an error instead of failing hard
pub fn verify_malformed<D: WidgetDriver>(driver: &mut D) {
    driver.navigate("Calculator").unwrap();

    enter(driver, &["2", "+"]);
    assert!(driver.press("calculate").is_err());
    assert_eq!(driver.display(), "2+=Error");
    driver.press("clear").unwrap();

    assert!(driver.press("calculate").is_err());
    assert_eq!(driver.display(), "=Error");
    driver.press("clear").unwrap();
}

/// Verifies theme toggling is an involution with one visible button
pub fn verify_theme<D: WidgetDriver>(driver: &mut D) {
    let initial = driver.is_dark();
    driver.toggle_theme();
    assert_ne!(driver.is_dark(), initial);
    assert_eq!(driver.visible_toggles(), 1);
    driver.toggle_theme();
    assert_eq!(driver.is_dark(), initial);
    assert_eq!(driver.visible_toggles(), 1);
}

/// Complete verification suite
pub fn run_full_specification<D: WidgetDriver>(driver: &mut D) {
    verify_navigation(driver);
    verify_arithmetic(driver);
    verify_malformed(driver);
    verify_theme(driver);
}
