//! Property-based tests for the widget

#![allow(clippy::unwrap_used)]

use calc_widget::prelude::*;
use proptest::prelude::*;

// ===== Strategy definitions =====

/// Any keypad label that appends to the buffer
fn append_key_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("0"),
        Just("1"),
        Just("2"),
        Just("3"),
        Just("4"),
        Just("5"),
        Just("6"),
        Just("7"),
        Just("8"),
        Just("9"),
        Just("+"),
        Just("-"),
        Just("*"),
        Just("/"),
        Just("**"),
    ]
}

/// Any keypad label, including `calculate` and `clear`
fn any_key_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        8 => append_key_strategy(),
        1 => Just("calculate"),
        1 => Just("clear"),
    ]
}

fn view_strategy() -> impl Strategy<Value = View> {
    prop_oneof![Just(View::Calculator), Just(View::About), Just(View::Contact)]
}

fn started() -> Widget<MockDom, RecordingPort> {
    let mut widget = Widget::new(
        MockDom::host_page(),
        RecordingPort::new(),
        &WidgetConfig::default(),
    );
    widget.start().unwrap();
    widget
}

proptest! {
    /// Without calculate/clear the display is the concatenation of keystrokes
    #[test]
    fn prop_display_is_concatenation(keys in prop::collection::vec(append_key_strategy(), 0..30)) {
        let mut widget = started();
        for key in &keys {
            widget.press_key(key).unwrap();
        }
        let expected: String = keys.concat();
        prop_assert_eq!(widget.surface().display_text(), Some(expected.as_str()));
    }

    /// `clear` empties the buffer whatever came before
    #[test]
    fn prop_clear_resets(keys in prop::collection::vec(any_key_strategy(), 0..30)) {
        let mut widget = started();
        for key in &keys {
            let _ = widget.press_key(key);
        }
        widget.press_key("clear").unwrap();
        prop_assert_eq!(widget.surface().display_text(), Some(""));
        prop_assert!(!widget.model().calculator.has_error());
    }

    /// No key sequence panics, and `calculate` always leaves `<expr>=<something>`
    #[test]
    fn prop_calculate_never_panics(keys in prop::collection::vec(append_key_strategy(), 0..20)) {
        let mut calc = Calculator::new();
        for key in &keys {
            calc.press(key).unwrap();
        }
        let expr = keys.concat();
        let outcome = calc.press("calculate");
        let prefix = format!("{expr}=");
        prop_assert!(calc.display().starts_with(&prefix));
        prop_assert_eq!(outcome.is_err(), calc.display().ends_with("=Error"));
    }

    /// Display mirrors the buffer after every transition
    #[test]
    fn prop_display_mirrors_buffer(keys in prop::collection::vec(any_key_strategy(), 0..30)) {
        let mut widget = started();
        for key in &keys {
            let _ = widget.press_key(key);
            prop_assert_eq!(
                widget.surface().display_text(),
                Some(widget.model().calculator.display())
            );
        }
    }

    /// Toggling the theme twice is the identity
    #[test]
    fn prop_theme_toggle_involution(dark_start in any::<bool>(), toggles in 0usize..10) {
        let theme = if dark_start { Theme::Dark } else { Theme::Light };
        let config = WidgetConfig::builder().initial_theme(theme).build();
        let mut widget = Widget::new(MockDom::host_page(), RecordingPort::new(), &config);
        widget.start().unwrap();

        for _ in 0..toggles {
            widget.toggle_theme().unwrap();
            widget.toggle_theme().unwrap();
        }
        prop_assert_eq!(widget.theme(), theme);
        prop_assert_eq!(widget.surface().is_dark(), dark_start);

        let toggle_html = widget.surface().html(MountPoint::ThemeToggle).unwrap();
        prop_assert_eq!(toggle_html.matches("rounded block").count(), 1);
    }

    /// Every view switch posts exactly one height report
    #[test]
    fn prop_one_report_per_view_switch(views in prop::collection::vec(view_strategy(), 1..15)) {
        let mut widget = started();
        for view in &views {
            let before = widget.port().sent().len();
            widget.set_view(view.as_str()).unwrap();
            prop_assert_eq!(widget.port().sent().len(), before + 1);
        }
    }

    /// After `set_view(v)` the header reads `v`
    #[test]
    fn prop_title_equals_view(view in view_strategy()) {
        let mut widget = started();
        widget.set_view(view.as_str()).unwrap();
        prop_assert_eq!(widget.surface().title(), Some(view.as_str()));
        prop_assert_eq!(widget.view(), view);
    }

    /// Names outside the three views are rejected without side effects
    #[test]
    fn prop_unknown_view_rejected(name in "[A-Za-z]{1,12}") {
        prop_assume!(View::ALL.iter().all(|v| v.as_str() != name));
        let mut widget = started();
        let before = widget.port().sent().len();
        let is_invalid_view = matches!(widget.set_view(&name), Err(WidgetError::InvalidView { .. }));
        prop_assert!(is_invalid_view);
        prop_assert_eq!(widget.port().sent().len(), before);
        prop_assert_eq!(widget.view(), View::Calculator);
    }

    /// Reported heights never go negative, whatever the page measures
    #[test]
    fn prop_height_clamped(measured in any::<f64>()) {
        let height = calc_widget::bridge::clamp_height(measured);
        if measured.is_nan() || measured <= 0.0 {
            prop_assert_eq!(height, 0);
        }
    }
}
