//! Mock DOM for native testing
//!
//! Models just enough of the host page (the five mount points, the menu
//! icons, the document root and the calculator display) to run the whole
//! widget without a browser.

use std::collections::HashMap;

use crate::config::MountSelectors;
use crate::core::theme::Theme;
use crate::core::{WidgetError, WidgetResult};
use crate::render::{HIDDEN_CLASS, MONITOR_ERROR_CLASS, MONITOR_ID};
use crate::surface::{MountPoint, Surface};

/// Element id of the icon shown while the menu is closed
pub const MENU_OPEN_ICON_ID: &str = "menuOpenIcon";

/// Element id of the icon shown while the menu is open
pub const MENU_CLOSE_ICON_ID: &str = "menuCloseIcon";

const ROOT_ID: &str = "root";
const HEADER_HEIGHT: u32 = 64;
const BLOCK_HEIGHT: u32 = 24;

/// Represents a DOM element
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Inner markup, when set through `set_html`
    pub inner_html: String,
    /// CSS classes
    pub classes: Vec<String>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            inner_html: String::new(),
            classes: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content = text.to_string();
    }

    /// Adds a class
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes a class
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Adds the class if `on`, removes it otherwise
    pub fn set_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Returns false if the element carries the hidden class
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.has_class(HIDDEN_CLASS)
    }
}

/// Mock host page
#[derive(Debug)]
pub struct MockDom {
    /// Elements by ID
    elements: HashMap<String, DomElement>,
    /// Element ID behind each mount point
    mounts: HashMap<MountPoint, String>,
    /// Fixed height reported instead of the layout estimate
    height_override: Option<u32>,
}

impl Default for MockDom {
    fn default() -> Self {
        Self::host_page()
    }
}

impl MockDom {
    /// Creates a page with only the document root
    #[must_use]
    pub fn empty() -> Self {
        let mut dom = Self {
            elements: HashMap::new(),
            mounts: HashMap::new(),
            height_override: None,
        };
        dom.register_element(DomElement::new("html").with_id(ROOT_ID));
        dom
    }

    /// Creates the stock host page: header, menu with its two icons,
    /// navigation bar, theme toggle container and content container
    #[must_use]
    pub fn host_page() -> Self {
        let mut dom = Self::empty();
        dom.mount(MountPoint::Header, DomElement::new("h1").with_id("header"));
        dom.mount(
            MountPoint::Menu,
            DomElement::new("div")
                .with_id("ddMenu")
                .with_class(HIDDEN_CLASS),
        );
        dom.mount(MountPoint::NavBar, DomElement::new("nav").with_id("navBar"));
        dom.mount(
            MountPoint::ThemeToggle,
            DomElement::new("div").with_id("themeToggleContainer"),
        );
        dom.mount(MountPoint::Content, DomElement::new("main").with_id("app"));
        dom.register_element(DomElement::new("svg").with_id(MENU_OPEN_ICON_ID));
        dom.register_element(
            DomElement::new("svg")
                .with_id(MENU_CLOSE_ICON_ID)
                .with_class(HIDDEN_CLASS),
        );
        dom
    }

    /// Returns the page with one mount point removed
    #[must_use]
    pub fn without(mut self, mount: MountPoint) -> Self {
        if let Some(id) = self.mounts.remove(&mount) {
            self.elements.remove(&id);
        }
        self
    }

    /// Registers an element as a mount point
    pub fn mount(&mut self, mount: MountPoint, element: DomElement) {
        self.mounts.insert(mount, element.id.clone());
        self.register_element(element);
    }

    /// Registers an element for ID lookup
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Gets the element behind a mount point
    #[must_use]
    pub fn mounted(&self, mount: MountPoint) -> Option<&DomElement> {
        self.mounts.get(&mount).and_then(|id| self.elements.get(id))
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Header text
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.mounted(MountPoint::Header)
            .map(|e| e.text_content.as_str())
    }

    /// Markup of a mount point
    #[must_use]
    pub fn html(&self, mount: MountPoint) -> Option<&str> {
        self.mounted(mount).map(|e| e.inner_html.as_str())
    }

    /// Calculator display text, if the calculator is mounted
    #[must_use]
    pub fn display_text(&self) -> Option<&str> {
        self.get_element_text(MONITOR_ID)
    }

    /// True if the document root carries the dark marker
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.get_element(ROOT_ID)
            .is_some_and(|root| root.has_class(Theme::DARK_CLASS))
    }

    /// True if the dropdown menu is visible
    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.mounted(MountPoint::Menu).is_some_and(DomElement::is_visible)
    }

    /// Pins the reported content height
    pub fn set_content_height(&mut self, height: u32) {
        self.height_override = Some(height);
    }

    fn mounted_mut(&mut self, mount: MountPoint) -> WidgetResult<&mut DomElement> {
        let id = self.mounts.get(&mount).ok_or_else(|| missing(mount))?;
        self.elements.get_mut(id).ok_or_else(|| missing(mount))
    }

    fn estimated_height(&self) -> u32 {
        let blocks = self.html(MountPoint::Content).map_or(0, |html| {
            ["<div", "<p", "<li", "<h2"]
                .iter()
                .map(|tag| html.matches(tag).count())
                .sum::<usize>()
        });
        HEADER_HEIGHT + BLOCK_HEIGHT * blocks as u32
    }
}

fn missing(mount: MountPoint) -> WidgetError {
    WidgetError::MissingMountPoint {
        name: mount.name().to_string(),
        selector: MountSelectors::default().selector(mount).to_string(),
    }
}

/// Pulls the display text out of freshly rendered calculator markup
fn monitor_text(html: &str) -> Option<&str> {
    let start = html.find(&format!(r#"id="{MONITOR_ID}""#))?;
    let open_end = start + html[start..].find('>')? + 1;
    let close = open_end + html[open_end..].find("</div>")?;
    Some(&html[open_end..close])
}

impl Surface for MockDom {
    fn ensure_mounted(&self) -> WidgetResult<()> {
        MountPoint::ALL
            .iter()
            .find(|mount| self.mounted(**mount).is_none())
            .map_or(Ok(()), |mount| Err(missing(*mount)))
    }

    fn set_title(&mut self, title: &str) -> WidgetResult<()> {
        self.mounted_mut(MountPoint::Header)?.set_text(title);
        Ok(())
    }

    fn set_html(&mut self, mount: MountPoint, html: &str) -> WidgetResult<()> {
        self.mounted_mut(mount)?.inner_html = html.to_string();

        if mount == MountPoint::Content {
            self.elements.remove(MONITOR_ID);
            if let Some(text) = monitor_text(html) {
                let mut monitor = DomElement::new("div").with_id(MONITOR_ID).with_text(text);
                monitor.set_class(MONITOR_ERROR_CLASS, html.contains(MONITOR_ERROR_CLASS));
                self.register_element(monitor);
            }
        }
        Ok(())
    }

    fn set_menu_open(&mut self, open: bool) -> WidgetResult<()> {
        self.mounted_mut(MountPoint::Menu)?
            .set_class(HIDDEN_CLASS, !open);
        if let Some(icon) = self.elements.get_mut(MENU_OPEN_ICON_ID) {
            icon.set_class(HIDDEN_CLASS, open);
        }
        if let Some(icon) = self.elements.get_mut(MENU_CLOSE_ICON_ID) {
            icon.set_class(HIDDEN_CLASS, !open);
        }
        Ok(())
    }

    fn set_dark(&mut self, dark: bool) -> WidgetResult<()> {
        if let Some(root) = self.elements.get_mut(ROOT_ID) {
            root.set_class(Theme::DARK_CLASS, dark);
        }
        Ok(())
    }

    fn set_display(&mut self, text: &str, error: bool) -> WidgetResult<()> {
        let monitor = self
            .elements
            .get_mut(MONITOR_ID)
            .ok_or_else(|| WidgetError::host("calculator display is not mounted"))?;
        monitor.set_text(text);
        monitor.set_class(MONITOR_ERROR_CLASS, error);
        Ok(())
    }

    fn content_height(&self) -> u32 {
        self.height_override
            .unwrap_or_else(|| self.estimated_height())
    }
}
