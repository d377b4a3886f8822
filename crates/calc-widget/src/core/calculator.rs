//! Calculator buffer state machine
//!
//! The display mirrors a single string buffer. Keys append to it, `clear`
//! empties it and `calculate` rewrites it to `"<expr>=<result>"`.

use crate::core::evaluator::{format_number, Evaluator};
use crate::core::{WidgetError, WidgetResult};

/// Text shown in place of a result when the buffer cannot be evaluated
pub const ERROR_MARKER: &str = "Error";

/// Keypad labels in grid order
pub const KEYPAD_LABELS: [&str; 17] = [
    "1",
    "2",
    "3",
    "4",
    "5",
    "6",
    "7",
    "8",
    "9",
    "0",
    "+",
    "-",
    "*",
    "/",
    "**",
    CalcKey::CALCULATE,
    CalcKey::CLEAR,
];

/// Number of columns in the keypad grid
pub const KEYPAD_COLUMNS: usize = 5;

/// A keypad press, decoded from its button label
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalcKey {
    /// Any label that is appended verbatim (digits, operators)
    Append(String),
    /// Evaluate the buffer
    Calculate,
    /// Empty the buffer
    Clear,
}

impl CalcKey {
    /// Label of the evaluate button
    pub const CALCULATE: &'static str = "calculate";
    /// Label of the reset button
    pub const CLEAR: &'static str = "clear";

    /// Decodes a button label
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            Self::CALCULATE => Self::Calculate,
            Self::CLEAR => Self::Clear,
            other => Self::Append(other.to_string()),
        }
    }

    /// Returns the button label for this key
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Append(text) => text,
            Self::Calculate => Self::CALCULATE,
            Self::Clear => Self::CLEAR,
        }
    }
}

/// Outcome of the last `calculate`
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Expression evaluated to a value
    Value(f64),
    /// Expression was rejected
    Failed(WidgetError),
}

/// Calculator state: the pending input buffer
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    evaluator: Evaluator,
    buffer: String,
    last_outcome: Option<Outcome>,
}

impl Calculator {
    /// Creates a calculator with an empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the text the display must show
    #[must_use]
    pub fn display(&self) -> &str {
        &self.buffer
    }

    /// Returns the outcome of the last `calculate`, cleared by any other key
    #[must_use]
    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    /// Returns true if the display currently shows an evaluation error
    #[must_use]
    pub fn has_error(&self) -> bool {
        matches!(self.last_outcome, Some(Outcome::Failed(_)))
    }

    /// Handles a keypad label and returns the evaluation error, if any.
    ///
    /// The error is already reflected in the display; callers only log it.
    pub fn press(&mut self, label: &str) -> WidgetResult<()> {
        self.apply(CalcKey::from_label(label))
    }

    /// Applies a decoded key
    pub fn apply(&mut self, key: CalcKey) -> WidgetResult<()> {
        match key {
            CalcKey::Append(text) => {
                self.last_outcome = None;
                self.buffer.push_str(&text);
                Ok(())
            }
            CalcKey::Clear => {
                self.reset();
                Ok(())
            }
            CalcKey::Calculate => self.calculate(),
        }
    }

    /// Empties the buffer
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.last_outcome = None;
    }

    /// Evaluates the trimmed buffer and rewrites it to `"<expr>=<result>"`
    pub fn calculate(&mut self) -> WidgetResult<()> {
        let expr = self.buffer.trim().to_string();
        match self.evaluator.evaluate_str(&expr) {
            Ok(value) => {
                self.buffer = format!("{expr}={}", format_number(value));
                self.last_outcome = Some(Outcome::Value(value));
                Ok(())
            }
            Err(err) => {
                self.buffer = format!("{expr}={ERROR_MARKER}");
                self.last_outcome = Some(Outcome::Failed(err.clone()));
                Err(err)
            }
        }
    }
}
