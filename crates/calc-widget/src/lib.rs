//! Calc Widget - embeddable tabbed calculator
//!
//! A small widget meant to live inside an `<iframe>`: a Calculator / About /
//! Contact tab set with a light/dark theme toggle. It keeps its parent frame
//! informed of its height through `postMessage`.
//!
//! Everything except the `wasm` adapter is platform independent, so the whole
//! widget is tested natively against [`dom::MockDom`].
//!
//! # Example
//!
//! ```rust
//! use calc_widget::prelude::*;
//!
//! let mut widget = Widget::new(MockDom::host_page(), RecordingPort::new(), &WidgetConfig::default());
//! widget.start().unwrap();
//!
//! for key in ["2", "**", "3", "calculate"] {
//!     widget.press_key(key).unwrap();
//! }
//! assert_eq!(widget.surface().display_text(), Some("2**3=8"));
//!
//! widget.set_view("About").unwrap();
//! assert_eq!(widget.surface().title(), Some("About"));
//! assert_eq!(widget.port().sent().len(), 2);
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod bridge;
pub mod config;
pub mod core;
pub mod dom;
pub mod driver;
pub mod render;
pub mod surface;
pub mod widget;

/// Browser bindings (`wasm-bindgen` / `web-sys`)
#[cfg(feature = "wasm")]
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::bridge::{HeightReport, HostBridge, HostMessage, ParentPort, RecordingPort};
    pub use crate::config::{MountSelectors, WidgetConfig};
    pub use crate::core::calculator::{CalcKey, Calculator};
    pub use crate::core::evaluator::{format_number, Evaluator};
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::theme::Theme;
    pub use crate::core::view::View;
    pub use crate::core::{Operation, WidgetError, WidgetResult};
    pub use crate::dom::{DomElement, MockDom};
    pub use crate::driver::{MockDriver, WidgetDriver};
    pub use crate::surface::{MountPoint, Surface};
    pub use crate::widget::{ViewModel, Widget, WidgetEvent};
}
