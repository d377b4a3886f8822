//! Platform-independent widget core
//!
//! Everything in here is plain Rust: the view/theme state, the calculator
//! buffer and its arithmetic evaluator. Nothing touches the DOM.

pub mod calculator;
pub mod evaluator;
mod operations;
pub mod parser;
pub mod theme;
pub mod view;

pub use operations::Operation;

use thiserror::Error;

/// Result type for widget operations
pub type WidgetResult<T> = Result<T, WidgetError>;

/// Errors raised by the widget
///
/// `MissingMountPoint` and `InvalidConfig` are fatal at startup.
/// `InvalidView` and `UnroutableHostMessage` are logged and ignored by the
/// event loop. `MalformedExpression` is shown in the calculator display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    /// View name outside `{Calculator, About, Contact}`
    #[error("Unknown view: '{name}'")]
    InvalidView {
        /// The rejected name
        name: String,
    },

    /// Calculator buffer is not a valid arithmetic expression
    #[error("Malformed expression: {reason}")]
    MalformedExpression {
        /// What the parser tripped over
        reason: String,
    },

    /// A required container is absent from the host page
    #[error("Mount point '{name}' not found (selector '{selector}')")]
    MissingMountPoint {
        /// Logical mount point name
        name: String,
        /// Selector that failed to match
        selector: String,
    },

    /// Inbound parent message that no handler accepts
    #[error("Unroutable host message: {message}")]
    UnroutableHostMessage {
        /// Description of the message
        message: String,
    },

    /// Configuration could not be parsed or validated
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Error message
        message: String,
    },

    /// The browser rejected a DOM or messaging call
    #[error("Host call failed: {message}")]
    Host {
        /// Error message
        message: String,
    },
}

impl WidgetError {
    /// Creates a `MalformedExpression` error
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedExpression {
            reason: reason.into(),
        }
    }

    /// Creates an `UnroutableHostMessage` error
    #[must_use]
    pub fn unroutable(message: impl Into<String>) -> Self {
        Self::UnroutableHostMessage {
            message: message.into(),
        }
    }

    /// Creates a `Host` error
    #[must_use]
    pub fn host(message: impl Into<String>) -> Self {
        Self::Host {
            message: message.into(),
        }
    }

    /// Returns true if the widget cannot continue after this error
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingMountPoint { .. } | Self::InvalidConfig { .. }
        )
    }
}
