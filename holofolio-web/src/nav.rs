//! Sidebar navigation state
//!
//! The hamburger icon, the sidebar panel and the dimming overlay all render
//! from the single `open` flag held here, so they can never disagree.

use crate::config::MOBILE_BREAKPOINT;

/// What the host should do after a link was selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavAction {
    /// Selector of the section to scroll to (the link's href)
    pub scroll_to: Option<String>,
    /// Whether the sidebar was closed as part of the selection
    pub close_sidebar: bool,
}

/// Open/closed state of the sidebar and the active link
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    open: bool,
    active: Option<usize>,
}

impl NavState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Index of the highlighted link, if any
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Flip the sidebar open/closed
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Close the sidebar (outside click)
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Select a link: it becomes the only active one, and on narrow
    /// viewports an open sidebar closes itself.
    pub fn select(&mut self, index: usize, href: Option<&str>, viewport_width: f64) -> NavAction {
        self.active = Some(index);

        let close_sidebar = self.open && viewport_width <= MOBILE_BREAKPOINT;
        if close_sidebar {
            self.open = false;
        }

        NavAction {
            scroll_to: href
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .map(str::to_string),
            close_sidebar,
        }
    }
}
