//! PageManager: which page is showing, which of its panes has focus, and
//! whether the keys bar is on.
//!
//! Each page shows a fixed set of card panes. Only Home has more than one
//! (the preview strip above the full live list); `cycle_focus` moves between
//! them.

use crate::action::Page;
use crate::surface::SurfaceKind;

pub struct PageManager {
    page: Page,
    home_preview: bool,
    focus: usize,
    pub show_keys_bar: bool,
}

impl PageManager {
    pub fn new(home_preview: bool) -> Self {
        Self {
            page: Page::default(),
            home_preview,
            focus: 0,
            show_keys_bar: true,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    /// Panes shown on `page`, top to bottom.
    pub fn panes(&self, page: Page) -> &'static [SurfaceKind] {
        match page {
            Page::Home if self.home_preview => &[SurfaceKind::HomePreview, SurfaceKind::Primary],
            Page::Home | Page::Live => &[SurfaceKind::Primary],
            Page::Upcoming => &[SurfaceKind::Upcoming],
            Page::Search => &[SurfaceKind::SearchIndex],
        }
    }

    pub fn set_page(&mut self, page: Page) {
        if self.page != page {
            self.page = page;
            self.focus = 0;
        }
    }

    /// The pane that receives list keys.
    pub fn focused(&self) -> SurfaceKind {
        let panes = self.panes(self.page);
        panes[self.focus.min(panes.len() - 1)]
    }

    pub fn cycle_focus(&mut self) {
        let len = self.panes(self.page).len();
        self.focus = (self.focus + 1) % len;
    }

    /// Focus `kind` if it is on the current page.
    pub fn focus_pane(&mut self, kind: SurfaceKind) {
        if let Some(pos) = self.panes(self.page).iter().position(|&k| k == kind) {
            self.focus = pos;
        }
    }

    pub fn toggle_keys_bar(&mut self) {
        self.show_keys_bar = !self.show_keys_bar;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_cycles_between_preview_and_live() {
        let mut pages = PageManager::new(true);
        assert_eq!(pages.focused(), SurfaceKind::HomePreview);
        pages.cycle_focus();
        assert_eq!(pages.focused(), SurfaceKind::Primary);
        pages.cycle_focus();
        assert_eq!(pages.focused(), SurfaceKind::HomePreview);
    }

    #[test]
    fn test_home_without_preview_focuses_live() {
        let mut pages = PageManager::new(false);
        assert_eq!(pages.focused(), SurfaceKind::Primary);
        pages.cycle_focus();
        assert_eq!(pages.focused(), SurfaceKind::Primary);
    }

    #[test]
    fn test_switching_page_resets_focus() {
        let mut pages = PageManager::new(true);
        pages.cycle_focus();
        pages.set_page(pages.page().next());
        assert_eq!(pages.page(), Page::Live);
        assert_eq!(pages.focused(), SurfaceKind::Primary);
        pages.set_page(Page::Search);
        assert_eq!(pages.focused(), SurfaceKind::SearchIndex);
        pages.set_page(pages.page().prev());
        assert_eq!(pages.focused(), SurfaceKind::Upcoming);
        pages.set_page(Page::Home);
        assert_eq!(pages.focused(), SurfaceKind::HomePreview);
    }

    #[test]
    fn test_focus_pane_ignores_panes_off_page() {
        let mut pages = PageManager::new(true);
        pages.focus_pane(SurfaceKind::Upcoming);
        assert_eq!(pages.focused(), SurfaceKind::HomePreview);
        pages.focus_pane(SurfaceKind::Primary);
        assert_eq!(pages.focused(), SurfaceKind::Primary);
    }
}
