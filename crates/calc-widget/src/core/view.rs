//! Top-level views

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::WidgetError;

/// One of the three mutually exclusive screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum View {
    /// Calculator display and keypad
    #[default]
    Calculator,
    /// About text
    About,
    /// Contact details
    Contact,
}

impl View {
    /// All views in menu order
    pub const ALL: [View; 3] = [View::Calculator, View::About, View::Contact];

    /// Returns the view name, also used as the header title
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            View::Calculator => "Calculator",
            View::About => "About",
            View::Contact => "Contact",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = WidgetError;

    /// Names are matched exactly, as written on the menu buttons
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|view| view.as_str() == name)
            .ok_or_else(|| WidgetError::InvalidView {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_names() {
        for view in View::ALL {
            assert_eq!(view.as_str().parse::<View>(), Ok(view));
        }
    }

    #[test]
    fn test_parse_invalid_name() {
        assert_eq!(
            "Settings".parse::<View>(),
            Err(WidgetError::InvalidView {
                name: "Settings".into()
            })
        );
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("about".parse::<View>().is_err());
        assert!("".parse::<View>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(View::Contact.to_string(), "Contact");
    }

    #[test]
    fn test_default_is_calculator() {
        assert_eq!(View::default(), View::Calculator);
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&View::About).unwrap();
        assert_eq!(json, "\"About\"");
        let view: View = serde_json::from_str("\"Contact\"").unwrap();
        assert_eq!(view, View::Contact);
    }
}
