//! Browser frontend
//!
//! Thin `web-sys` adapters around [`crate::widget::Widget`] plus the
//! `wasm-bindgen` exports a host page calls.

mod app;
mod browser;
pub mod logging;

pub use app::{register_private_api, start, start_with_config, BrowserWidget};
pub use browser::{BrowserParent, BrowserSurface};
