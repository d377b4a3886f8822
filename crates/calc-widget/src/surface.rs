//! Mount-point abstraction
//!
//! The widget never touches the DOM directly. It writes through a
//! [`Surface`], implemented by [`crate::dom::MockDom`] for native tests and by
//! the `web-sys` adapter in the browser.

use std::fmt;

use crate::core::WidgetResult;

/// Containers the widget renders into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MountPoint {
    /// Page header showing the current view name
    Header,
    /// Dropdown menu (narrow layouts)
    Menu,
    /// Navigation bar (wide layouts)
    NavBar,
    /// Theme button container
    ThemeToggle,
    /// Main content container
    Content,
}

impl MountPoint {
    /// Every required mount point
    pub const ALL: [MountPoint; 5] = [
        MountPoint::Header,
        MountPoint::Menu,
        MountPoint::NavBar,
        MountPoint::ThemeToggle,
        MountPoint::Content,
    ];

    /// Logical name used in error messages
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            MountPoint::Header => "header",
            MountPoint::Menu => "menu",
            MountPoint::NavBar => "navBar",
            MountPoint::ThemeToggle => "themeToggle",
            MountPoint::Content => "content",
        }
    }
}

impl fmt::Display for MountPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Write access to the host page
pub trait Surface {
    /// Fails with `MissingMountPoint` if any required container is absent
    fn ensure_mounted(&self) -> WidgetResult<()>;

    /// Sets the header text
    fn set_title(&mut self, title: &str) -> WidgetResult<()>;

    /// Replaces a container's markup; old handlers go with the old nodes
    fn set_html(&mut self, mount: MountPoint, html: &str) -> WidgetResult<()>;

    /// Shows or hides the dropdown menu and swaps the open/close icons
    fn set_menu_open(&mut self, open: bool) -> WidgetResult<()>;

    /// Adds or removes the dark marker on the document root
    fn set_dark(&mut self, dark: bool) -> WidgetResult<()>;

    /// Updates the calculator display text in place
    fn set_display(&mut self, text: &str, error: bool) -> WidgetResult<()>;

    /// Current content height in whole pixels
    fn content_height(&self) -> u32;
}
