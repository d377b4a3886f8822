//! `web-sys` implementations of [`Surface`] and [`ParentPort`]

use std::fmt;

use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Window};

use crate::bridge::{clamp_height, HeightReport, ParentPort};
use crate::config::MountSelectors;
use crate::core::theme::Theme;
use crate::core::{WidgetError, WidgetResult};
use crate::dom::{MENU_CLOSE_ICON_ID, MENU_OPEN_ICON_ID};
use crate::render::{HIDDEN_CLASS, MONITOR_ERROR_CLASS, MONITOR_ID};
use crate::surface::{MountPoint, Surface};

/// Renders the error message a JS exception carries
pub(crate) fn js_error(value: &JsValue) -> WidgetError {
    WidgetError::host(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}

/// The live host page
pub struct BrowserSurface {
    document: Document,
    selectors: MountSelectors,
    header: Element,
    menu: Element,
    nav_bar: Element,
    theme_toggle: Element,
    content: Element,
}

impl fmt::Debug for BrowserSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowserSurface")
            .field("selectors", &self.selectors)
            .finish_non_exhaustive()
    }
}

impl BrowserSurface {
    /// Resolves every mount point; the first one missing is an error
    pub fn locate(document: Document, selectors: &MountSelectors) -> WidgetResult<Self> {
        let find = |mount: MountPoint| -> WidgetResult<Element> {
            let selector = selectors.selector(mount);
            document
                .query_selector(selector)
                .map_err(|e| js_error(&e))?
                .ok_or_else(|| WidgetError::MissingMountPoint {
                    name: mount.name().to_string(),
                    selector: selector.to_string(),
                })
        };

        Ok(Self {
            header: find(MountPoint::Header)?,
            menu: find(MountPoint::Menu)?,
            nav_bar: find(MountPoint::NavBar)?,
            theme_toggle: find(MountPoint::ThemeToggle)?,
            content: find(MountPoint::Content)?,
            selectors: selectors.clone(),
            document,
        })
    }

    fn element(&self, mount: MountPoint) -> &Element {
        match mount {
            MountPoint::Header => &self.header,
            MountPoint::Menu => &self.menu,
            MountPoint::NavBar => &self.nav_bar,
            MountPoint::ThemeToggle => &self.theme_toggle,
            MountPoint::Content => &self.content,
        }
    }

    fn set_class(element: &Element, class: &str, on: bool) -> WidgetResult<()> {
        element
            .class_list()
            .toggle_with_force(class, on)
            .map(|_| ())
            .map_err(|e| js_error(&e))
    }
}

impl Surface for BrowserSurface {
    fn ensure_mounted(&self) -> WidgetResult<()> {
        match MountPoint::ALL
            .into_iter()
            .find(|mount| !self.element(*mount).is_connected())
        {
            Some(mount) => Err(WidgetError::MissingMountPoint {
                name: mount.name().to_string(),
                selector: self.selectors.selector(mount).to_string(),
            }),
            None => Ok(()),
        }
    }

    fn set_title(&mut self, title: &str) -> WidgetResult<()> {
        self.header.set_text_content(Some(title));
        Ok(())
    }

    fn set_html(&mut self, mount: MountPoint, html: &str) -> WidgetResult<()> {
        self.element(mount).set_inner_html(html);
        Ok(())
    }

    fn set_menu_open(&mut self, open: bool) -> WidgetResult<()> {
        Self::set_class(&self.menu, HIDDEN_CLASS, !open)?;
        // The icons are decoration; pages without them still work
        if let Some(icon) = self.document.get_element_by_id(MENU_OPEN_ICON_ID) {
            Self::set_class(&icon, HIDDEN_CLASS, open)?;
        }
        if let Some(icon) = self.document.get_element_by_id(MENU_CLOSE_ICON_ID) {
            Self::set_class(&icon, HIDDEN_CLASS, !open)?;
        }
        Ok(())
    }

    fn set_dark(&mut self, dark: bool) -> WidgetResult<()> {
        let root = self
            .document
            .document_element()
            .ok_or_else(|| WidgetError::host("document has no root element"))?;
        Self::set_class(&root, Theme::DARK_CLASS, dark)
    }

    fn set_display(&mut self, text: &str, error: bool) -> WidgetResult<()> {
        let monitor = self
            .document
            .get_element_by_id(MONITOR_ID)
            .ok_or_else(|| WidgetError::host("calculator display is not mounted"))?;
        monitor.set_text_content(Some(text));
        Self::set_class(&monitor, MONITOR_ERROR_CLASS, error)
    }

    fn content_height(&self) -> u32 {
        self.document
            .body()
            .map_or(0, |body| clamp_height(f64::from(body.scroll_height())))
    }
}

/// Posts height reports to `window.parent`
pub struct BrowserParent {
    window: Window,
    target_origin: String,
}

impl fmt::Debug for BrowserParent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowserParent")
            .field("target_origin", &self.target_origin)
            .finish()
    }
}

impl BrowserParent {
    /// Creates a port posting with the given target origin
    pub fn new(window: Window, target_origin: impl Into<String>) -> Self {
        Self {
            window,
            target_origin: target_origin.into(),
        }
    }
}

impl ParentPort for BrowserParent {
    fn post(&mut self, report: &HeightReport) -> WidgetResult<()> {
        let message = js_sys::Object::new();
        let fields = [
            ("type", JsValue::from_str(&report.message_type)),
            ("action", JsValue::from_str(&report.action)),
            ("height", JsValue::from_f64(f64::from(report.height))),
        ];
        for (key, value) in fields {
            js_sys::Reflect::set(&message, &JsValue::from_str(key), &value)
                .map_err(|e| js_error(&e))?;
        }

        // A top-level page is its own parent
        let parent = self
            .window
            .parent()
            .map_err(|e| js_error(&e))?
            .unwrap_or_else(|| self.window.clone());
        parent
            .post_message(&message, &self.target_origin)
            .map_err(|e| js_error(&e))
    }
}
