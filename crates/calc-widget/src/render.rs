//! Markup for every mount point
//!
//! All functions are pure: the same model always yields the same HTML.
//! Buttons carry `data-view` / `data-key` / `data-theme-toggle` attributes so
//! a single delegated click listener per container can route them.

use crate::core::calculator::{Calculator, KEYPAD_COLUMNS, KEYPAD_LABELS};
use crate::core::theme::Theme;
use crate::core::view::View;

/// Class that hides an element
pub const HIDDEN_CLASS: &str = "hidden";

/// Element id of the calculator display
pub const MONITOR_ID: &str = "monitor";

/// Class added to the display while it shows an evaluation error
pub const MONITOR_ERROR_CLASS: &str = "monitor-error";

/// Escapes text for use in element content or attribute values
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Renders the content container for a view
#[must_use]
pub fn render_view(view: View, calculator: &Calculator) -> String {
    match view {
        View::Calculator => render_calculator(calculator),
        View::About => render_about(),
        View::Contact => render_contact(),
    }
}

// ============================================================================
// Calculator
// ============================================================================

/// A keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// Label, also the text appended to the buffer
    pub label: &'static str,
    /// Grid columns spanned
    pub span: usize,
}

impl KeypadButton {
    /// Renders the button
    #[must_use]
    pub fn render(&self) -> String {
        let span = if self.span > 1 {
            format!(" col-span-{}", self.span)
        } else {
            String::new()
        };
        let label = escape_html(self.label);
        format!(
            r#"<div class="bg-blue-400 dark:bg-gray-600 hover:bg-blue-600 dark:hover:bg-gray-700 text-white{span} py-1 rounded-md text-center text-lg font-bold cursor-pointer d-btn" data-key="{label}">{label}</div>"#
        )
    }
}

/// Returns the keypad in grid order; `calculate` spans four columns
#[must_use]
pub fn keypad_buttons() -> Vec<KeypadButton> {
    KEYPAD_LABELS
        .iter()
        .map(|&label| KeypadButton {
            label,
            span: if label == "calculate" {
                KEYPAD_COLUMNS - 1
            } else {
                1
            },
        })
        .collect()
}

/// Renders the display contents' class list
#[must_use]
pub fn monitor_classes(has_error: bool) -> String {
    let mut classes = String::from(
        "bg-white dark:bg-gray-800 border-4 border-blue-400 dark:border-gray-700 h-20 flex items-center col-span-5 text-blue-800 dark:text-white p-2 rounded-lg mb-2 font-bold text-4xl",
    );
    if has_error {
        classes.push(' ');
        classes.push_str(MONITOR_ERROR_CLASS);
    }
    classes
}

/// Renders the read-only display plus the 5-column keypad
#[must_use]
pub fn render_calculator(calculator: &Calculator) -> String {
    let buttons: String = keypad_buttons().iter().map(KeypadButton::render).collect();
    format!(
        r#"<div id="{MONITOR_ID}" class="{}" aria-readonly="true">{}</div><div class="grid grid-cols-{KEYPAD_COLUMNS} gap-2">{buttons}</div>"#,
        monitor_classes(calculator.has_error()),
        escape_html(calculator.display()),
    )
}

// ============================================================================
// Static views
// ============================================================================

/// Contact email shown on the Contact view
pub const CONTACT_EMAIL: &str = "mohammad.abu.ahmad@e.braude.co.il";

/// Contact phone shown on the Contact view
pub const CONTACT_PHONE: &str = "+1 (234) 567-890";

/// Renders the About view
#[must_use]
pub fn render_about() -> String {
    concat!(
        r#"<div class="p-4">"#,
        r#"<h2 class="text-2xl font-bold mb-4">About This Application</h2>"#,
        r#"<p class="mb-4">This application demonstrates basic functionality including a calculator, an about section, and a contact section.</p>"#,
        "</div>"
    )
    .to_string()
}

/// Renders the Contact view
#[must_use]
pub fn render_contact() -> String {
    format!(
        concat!(
            r#"<div class="p-4">"#,
            r#"<h2 class="text-2xl font-bold mb-4">Contact Us</h2>"#,
            r#"<p class="mb-4">If you have any questions or feedback, please reach out to us at:</p>"#,
            r#"<ul class="list-disc list-inside mb-4">"#,
            r#"<li>Email: <a href="mailto:{email}" class="text-blue-600 underline">{email}</a></li>"#,
            r#"<li>Phone: <a href="tel:+972-5400000000" class="text-blue-600 underline">{phone}</a></li>"#,
            "</ul></div>"
        ),
        email = CONTACT_EMAIL,
        phone = escape_html(CONTACT_PHONE),
    )
}

// ============================================================================
// Menu and navigation
// ============================================================================

/// Renders the dropdown menu items
#[must_use]
pub fn render_menu() -> String {
    View::ALL
        .iter()
        .map(|view| {
            format!(
                r#"<button class="block py-1 px-2" data-view="{name}">{name}</button>"#,
                name = view.as_str()
            )
        })
        .collect()
}

/// Renders the navigation bar items
#[must_use]
pub fn render_nav_bar() -> String {
    View::ALL
        .iter()
        .map(|view| format!(r#"<button data-view="{name}">{name}</button>"#, name = view.as_str()))
        .collect()
}

// ============================================================================
// Theme toggle
// ============================================================================

/// One of the two theme buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleButton {
    /// Button text (the theme it switches to)
    pub text: &'static str,
    /// Whether the button is shown
    pub visible: bool,
    /// Color classes
    pub palette: &'static str,
}

impl ToggleButton {
    /// Renders the button
    #[must_use]
    pub fn render(&self) -> String {
        let display = if self.visible { "block" } else { HIDDEN_CLASS };
        format!(
            r#"<button class="py-1 px-2 rounded {display} {}" data-theme-toggle="{}">{}</button>"#,
            self.palette,
            self.text.to_ascii_lowercase(),
            self.text
        )
    }
}

/// Returns the Dark and Light buttons; only the one for the other theme is visible
#[must_use]
pub fn theme_toggle_buttons(theme: Theme) -> [ToggleButton; 2] {
    [
        ToggleButton {
            text: "Dark",
            visible: !theme.is_dark(),
            palette: "bg-blue-500 hover:bg-blue-600 text-white",
        },
        ToggleButton {
            text: "Light",
            visible: theme.is_dark(),
            palette: "bg-yellow-400 hover:bg-yellow-500 text-black",
        },
    ]
}

/// Renders the theme toggle container
#[must_use]
pub fn render_theme_toggle(theme: Theme) -> String {
    theme_toggle_buttons(theme)
        .iter()
        .map(ToggleButton::render)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("1<2&3>\"'"), "1&lt;2&amp;3&gt;&quot;&#39;");
        assert_eq!(escape_html("2**3=8"), "2**3=8");
    }

    #[test]
    fn test_keypad_order_and_span() {
        let buttons = keypad_buttons();
        let labels: Vec<_> = buttons.iter().map(|b| b.label).collect();
        assert_eq!(
            labels,
            vec![
                "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "+", "-", "*", "/", "**",
                "calculate", "clear"
            ]
        );
        for button in &buttons {
            let expected = if button.label == "calculate" { 4 } else { 1 };
            assert_eq!(button.span, expected, "span of {}", button.label);
        }
    }

    #[test]
    fn test_calculator_markup() {
        let html = render_calculator(&Calculator::new());
        assert!(html.starts_with(r#"<div id="monitor""#));
        assert!(html.contains("grid-cols-5"));
        assert!(html.contains(r#"data-key="calculate">calculate</div>"#));
        assert!(html.contains("col-span-4"));
        assert_eq!(html.matches("d-btn").count(), 17);
        assert!(!html.contains(MONITOR_ERROR_CLASS));
    }

    #[test]
    fn test_calculator_markup_shows_buffer_and_error() {
        let mut calc = Calculator::new();
        let _ = calc.press("2");
        let _ = calc.press("+");
        let _ = calc.press("calculate");
        let html = render_calculator(&calc);
        assert!(html.contains(">2+=Error</div>"));
        assert!(html.contains(MONITOR_ERROR_CLASS));
    }

    #[test]
    fn test_render_is_idempotent() {
        let calc = Calculator::new();
        for view in View::ALL {
            assert_eq!(render_view(view, &calc), render_view(view, &calc));
        }
    }

    #[test]
    fn test_static_views() {
        let calc = Calculator::new();
        assert!(render_view(View::About, &calc).contains("About This Application"));
        let contact = render_view(View::Contact, &calc);
        assert!(contact.contains("Contact Us"));
        assert!(contact.contains(&format!("mailto:{CONTACT_EMAIL}")));
        assert!(contact.contains(CONTACT_PHONE));
    }

    #[test]
    fn test_menu_and_nav_list_every_view() {
        for html in [render_menu(), render_nav_bar()] {
            for view in View::ALL {
                assert!(html.contains(&format!(r#"data-view="{view}""#)));
            }
            assert_eq!(html.matches("<button").count(), 3);
        }
    }

    #[test]
    fn test_exactly_one_toggle_visible() {
        for theme in [Theme::Light, Theme::Dark] {
            let visible = theme_toggle_buttons(theme)
                .iter()
                .filter(|b| b.visible)
                .count();
            assert_eq!(visible, 1);
        }
    }

    #[test]
    fn test_light_theme_offers_dark() {
        let [dark, light] = theme_toggle_buttons(Theme::Light);
        assert!(dark.visible);
        assert!(!light.visible);
        let html = render_theme_toggle(Theme::Light);
        assert!(html.contains(r#"rounded block bg-blue-500"#));
        assert!(html.contains(r#"rounded hidden bg-yellow-400"#));
    }

    #[test]
    fn test_dark_theme_offers_light() {
        let [dark, light] = theme_toggle_buttons(Theme::Dark);
        assert!(!dark.visible);
        assert!(light.visible);
    }
}
