//! Action enum: all user-initiated intents and internal events.

use crate::filter::FilterScope;
use crate::modal::CloseTrigger;
use crate::surface::{ControlRef, SurfaceKind};

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    Header,
    HomePreview,
    LiveList,
    UpcomingList,
    SearchResults,
    ModalView,
    HelpOverlay,
}

impl ComponentId {
    pub fn for_surface(kind: SurfaceKind) -> Self {
        match kind {
            SurfaceKind::HomePreview => Self::HomePreview,
            SurfaceKind::Primary => Self::LiveList,
            SurfaceKind::Upcoming => Self::UpcomingList,
            SurfaceKind::SearchIndex => Self::SearchResults,
        }
    }
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Navigation ───────────────────────────────────────────────────────────
    SwitchPage(Page),
    NextPage,
    PrevPage,

    // ── Filter/search ────────────────────────────────────────────────────────
    OpenFilter,
    CloseFilter,
    /// Raw input text; settles through the debouncer.
    FilterChanged(FilterScope, String),

    // ── Matches ──────────────────────────────────────────────────────────────
    Reload,
    Watch(ControlRef),

    // ── Viewer ───────────────────────────────────────────────────────────────
    CloseModal(CloseTrigger),
    LaunchPlayer,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleHelp,
    ToggleKeys,
    CopyToClipboard(String), // text to copy

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Resize(u16, u16),
}

/// Which page (tab) is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Live,
    Upcoming,
    Search,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Live, Page::Upcoming, Page::Search];

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Live => "live",
            Self::Upcoming => "upcoming",
            Self::Search => "search",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == label)
    }

    pub fn next(self) -> Self {
        match self {
            Self::Home => Self::Live,
            Self::Live => Self::Upcoming,
            Self::Upcoming => Self::Search,
            Self::Search => Self::Home,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Home => Self::Search,
            Self::Live => Self::Home,
            Self::Upcoming => Self::Live,
            Self::Search => Self::Upcoming,
        }
    }

    /// The filter input shown on this page, if any.
    pub fn filter_scope(self) -> Option<FilterScope> {
        match self {
            Self::Home => Some(FilterScope::Home),
            Self::Search => Some(FilterScope::Search),
            Self::Live | Self::Upcoming => None,
        }
    }
}
