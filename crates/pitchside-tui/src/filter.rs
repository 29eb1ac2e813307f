//! Incremental title filter over rendered surfaces.
//!
//! Filtering only flips `CardNode::hidden`. Nodes are never removed or
//! reordered, so applying the same query twice is a no-op.

use crate::surface::{CardNode, SurfaceKind, SurfaceSet};

/// Which input a query came from, and therefore which surfaces it scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterScope {
    Home,
    Search,
}

impl FilterScope {
    pub fn surfaces(self) -> &'static [SurfaceKind] {
        match self {
            Self::Home => &[SurfaceKind::HomePreview, SurfaceKind::Primary],
            Self::Search => &[SurfaceKind::SearchIndex],
        }
    }
}

pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// `query` must already be normalized.
pub fn title_matches(query: &str, title: &str) -> bool {
    query.is_empty() || title.to_lowercase().contains(query)
}

pub fn apply_filter(raw_query: &str, nodes: &mut [CardNode]) {
    let query = normalize_query(raw_query);
    for node in nodes.iter_mut() {
        node.hidden = !title_matches(&query, &node.card.title);
    }
}

/// The last settled query per input. Re-applied after every render so fresh
/// nodes respect what the user already typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub home: String,
    pub search: String,
}

impl FilterState {
    pub fn query(&self, scope: FilterScope) -> &str {
        match scope {
            FilterScope::Home => &self.home,
            FilterScope::Search => &self.search,
        }
    }

    pub fn set(&mut self, scope: FilterScope, query: String) {
        match scope {
            FilterScope::Home => self.home = query,
            FilterScope::Search => self.search = query,
        }
    }
}

impl SurfaceSet {
    pub fn apply_scoped_filter(&mut self, scope: FilterScope, raw_query: &str) {
        for &kind in scope.surfaces() {
            if let Some(surface) = self.get_mut(kind) {
                apply_filter(raw_query, surface.nodes_mut());
            }
        }
    }

    pub fn reapply_filters(&mut self, filters: &FilterState) {
        for scope in [FilterScope::Home, FilterScope::Search] {
            self.apply_scoped_filter(scope, filters.query(scope));
        }
    }
}
