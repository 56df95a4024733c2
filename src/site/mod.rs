//! Page state of the portfolio site as a value with pure transitions. Each
//! handler takes the current state and returns the next one; rendering reads
//! the state and never mutates it.

#[cfg(test)]
#[path = "site_test.rs"]
mod tests;

use std::{fmt::Display, str::FromStr};

use eyre::bail;

use crate::content::ContentStore;

/// Scroll offset past which the header switches to its condensed style.
pub const HEADER_CONDENSE_OFFSET: f64 = 10.0;

/// Distance below the viewport top used to decide the active section.
pub const SECTION_PROBE_OFFSET: f64 = 100.0;

/// Viewport width above which the mobile menu is never shown.
pub const MOBILE_BREAKPOINT: u32 = 768;

/// Article cards shown while the list is collapsed.
pub const COLLAPSED_ARTICLES: usize = 3;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    #[default]
    Home,
    About,
    Blog,
    Contact,
}

/// Vertical extent of a rendered section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBounds {
    pub section: Section,
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    None,
    /// Article modal, keyed by article key.
    Article(String),
    /// Certificate lightbox, keyed by full image URL.
    Certificate(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    AltArrowUp,
    AltArrowDown,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageState {
    active_section: Section,
    header_condensed: bool,
    mobile_menu_open: bool,
    articles_expanded: bool,
    overlay: Overlay,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Home,
        Section::About,
        Section::Blog,
        Section::Contact,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::About => "about",
            Section::Blog => "blog",
            Section::Contact => "contact",
        }
    }

    fn index(&self) -> usize {
        Section::ALL
            .iter()
            .position(|s| s == self)
            .unwrap_or_default()
    }

    pub fn next(&self) -> Option<Section> {
        Section::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(&self) -> Option<Section> {
        self.index()
            .checked_sub(1)
            .and_then(|idx| Section::ALL.get(idx).copied())
    }
}

impl FromStr for Section {
    type Err = eyre::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let section = match s.to_ascii_lowercase().replace(' ', "").as_str() {
            "home" => Section::Home,
            "about" | "aboutme" => Section::About,
            "blog" => Section::Blog,
            "contact" => Section::Contact,
            other => bail!("unknown section {}", other),
        };
        Ok(section)
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_section(&self) -> Section {
        self.active_section
    }

    pub fn header_condensed(&self) -> bool {
        self.header_condensed
    }

    pub fn mobile_menu_open(&self) -> bool {
        self.mobile_menu_open
    }

    pub fn articles_expanded(&self) -> bool {
        self.articles_expanded
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Background scrolling is disabled while an article is open.
    pub fn scroll_locked(&self) -> bool {
        matches!(self.overlay, Overlay::Article(_))
    }

    /// Number of article cards to render out of `total`.
    pub fn visible_article_count(&self, total: usize) -> usize {
        if self.articles_expanded {
            total
        } else {
            total.min(COLLAPSED_ARTICLES)
        }
    }

    pub fn section_clicked(mut self, section: Section) -> Self {
        self.active_section = section;
        self.mobile_menu_open = false;
        self
    }

    pub fn scrolled(mut self, scroll_y: f64, bounds: &[SectionBounds]) -> Self {
        self.header_condensed = scroll_y > HEADER_CONDENSE_OFFSET;

        let probe = scroll_y + SECTION_PROBE_OFFSET;
        if let Some(bound) = bounds
            .iter()
            .find(|b| probe >= b.top && probe < b.top + b.height)
        {
            self.active_section = bound.section;
        }
        self
    }

    pub fn mobile_menu_toggled(mut self) -> Self {
        self.mobile_menu_open = !self.mobile_menu_open;
        self
    }

    pub fn viewport_resized(mut self, width: u32) -> Self {
        if width > MOBILE_BREAKPOINT {
            self.mobile_menu_open = false;
        }
        self
    }

    pub fn key_pressed(self, key: Key) -> Self {
        match key {
            // Escape only dismisses overlays; the mobile menu stays as is.
            Key::Escape => self.overlay_closed(),
            Key::AltArrowDown => match self.active_section.next() {
                Some(section) => self.section_clicked(section),
                None => self,
            },
            Key::AltArrowUp => match self.active_section.previous() {
                Some(section) => self.section_clicked(section),
                None => self,
            },
        }
    }

    pub fn view_all_toggled(mut self) -> Self {
        self.articles_expanded = !self.articles_expanded;
        self
    }

    /// Opens the article modal. Keys missing from the collection leave the
    /// state unchanged.
    pub fn article_opened(mut self, key: &str, content: &dyn ContentStore) -> Self {
        if content.get(key).is_none() {
            log::debug!("Unknown article {}", key);
            return self;
        }
        self.overlay = Overlay::Article(key.to_string());
        self
    }

    pub fn certificate_opened(mut self, image_url: &str) -> Self {
        if image_url.is_empty() {
            return self;
        }
        self.overlay = Overlay::Certificate(image_url.to_string());
        self
    }

    pub fn overlay_closed(mut self) -> Self {
        self.overlay = Overlay::None;
        self
    }
}
