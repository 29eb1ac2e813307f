//! Card surfaces: the four independent targets the renderer writes into.
//!
//! Every surface owns its own `CardNode`s. The search index is built by
//! cloning the already-rendered primary and upcoming nodes, so hiding a node
//! in one surface never touches another. Optional surfaces that are switched
//! off in the config are simply absent and every operation skips them.

use pitchside_proto::CanonicalCard;
use serde_json::Value;

pub const LIST_SKELETONS: usize = 6;
pub const PREVIEW_SKELETONS: usize = 4;

pub const WATCH_LABEL: &str = "▶ Watch";
pub const LOADING_LABEL: &str = "Loading...";
pub const LOAD_ERROR_PREFIX: &str = "Error loading matches";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Primary,
    Upcoming,
    HomePreview,
    SearchIndex,
}

impl SurfaceKind {
    pub const ALL: [SurfaceKind; 4] = [
        SurfaceKind::HomePreview,
        SurfaceKind::Primary,
        SurfaceKind::Upcoming,
        SurfaceKind::SearchIndex,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Primary => "live",
            Self::Upcoming => "upcoming",
            Self::HomePreview => "live now",
            Self::SearchIndex => "results",
        }
    }

    fn skeleton_count(self) -> usize {
        match self {
            Self::HomePreview => PREVIEW_SKELETONS,
            _ => LIST_SKELETONS,
        }
    }
}

/// The per-card watch button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchControl {
    pub enabled: bool,
    pub label: String,
}

impl WatchControl {
    pub fn new() -> Self {
        Self {
            enabled: true,
            label: WATCH_LABEL.to_string(),
        }
    }

    /// Disable and show the loading label. Returns the label to restore later.
    pub fn begin_loading(&mut self) -> String {
        self.enabled = false;
        std::mem::replace(&mut self.label, LOADING_LABEL.to_string())
    }

    pub fn restore(&mut self, label: String) {
        self.enabled = true;
        self.label = label;
    }
}

impl Default for WatchControl {
    fn default() -> Self {
        Self::new()
    }
}

/// One rendered card inside one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct CardNode {
    pub card: CanonicalCard,
    pub hidden: bool,
    pub control: WatchControl,
}

impl CardNode {
    pub fn build(raw: &Value) -> Self {
        Self {
            card: CanonicalCard::from_raw(raw),
            hidden: false,
            control: WatchControl::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceContent {
    Skeleton(usize),
    Cards(Vec<CardNode>),
    Error(String),
}

/// Addresses one watch control. `generation` ties the address to a specific
/// rendering so a late resolution cannot touch a node from a later load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlRef {
    pub surface: SurfaceKind,
    pub index: usize,
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub struct Surface {
    kind: SurfaceKind,
    content: SurfaceContent,
    generation: u64,
}

impl Surface {
    pub fn new(kind: SurfaceKind) -> Self {
        Self {
            kind,
            content: SurfaceContent::Cards(Vec::new()),
            generation: 0,
        }
    }

    pub fn content(&self) -> &SurfaceContent {
        &self.content
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the whole content. Every replacement starts a new generation.
    fn replace(&mut self, content: SurfaceContent) {
        self.content = content;
        self.generation += 1;
    }

    pub fn show_skeleton(&mut self) {
        self.replace(SurfaceContent::Skeleton(self.kind.skeleton_count()));
    }

    pub fn set_cards(&mut self, nodes: Vec<CardNode>) {
        self.replace(SurfaceContent::Cards(nodes));
    }

    pub fn show_error(&mut self, message: &str) {
        self.replace(SurfaceContent::Error(message.to_string()));
    }

    pub fn nodes(&self) -> &[CardNode] {
        match &self.content {
            SurfaceContent::Cards(nodes) => nodes,
            _ => &[],
        }
    }

    pub fn nodes_mut(&mut self) -> &mut [CardNode] {
        match &mut self.content {
            SurfaceContent::Cards(nodes) => nodes,
            _ => &mut [],
        }
    }

    /// Indices of nodes not hidden by a filter, in render order.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.nodes()
            .iter()
            .enumerate()
            .filter(|(_, node)| !node.hidden)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn control_ref(&self, index: usize) -> Option<ControlRef> {
        (index < self.nodes().len()).then_some(ControlRef {
            surface: self.kind,
            index,
            generation: self.generation,
        })
    }
}

/// Owns every surface. Home preview and search index are optional.
#[derive(Debug, Clone)]
pub struct SurfaceSet {
    primary: Surface,
    upcoming: Surface,
    home_preview: Option<Surface>,
    search_index: Option<Surface>,
    preview_len: usize,
}

impl SurfaceSet {
    pub fn new(home_preview: bool, search_index: bool, preview_len: usize) -> Self {
        Self {
            primary: Surface::new(SurfaceKind::Primary),
            upcoming: Surface::new(SurfaceKind::Upcoming),
            home_preview: home_preview.then(|| Surface::new(SurfaceKind::HomePreview)),
            search_index: search_index.then(|| Surface::new(SurfaceKind::SearchIndex)),
            preview_len,
        }
    }

    pub fn get(&self, kind: SurfaceKind) -> Option<&Surface> {
        match kind {
            SurfaceKind::Primary => Some(&self.primary),
            SurfaceKind::Upcoming => Some(&self.upcoming),
            SurfaceKind::HomePreview => self.home_preview.as_ref(),
            SurfaceKind::SearchIndex => self.search_index.as_ref(),
        }
    }

    pub fn get_mut(&mut self, kind: SurfaceKind) -> Option<&mut Surface> {
        match kind {
            SurfaceKind::Primary => Some(&mut self.primary),
            SurfaceKind::Upcoming => Some(&mut self.upcoming),
            SurfaceKind::HomePreview => self.home_preview.as_mut(),
            SurfaceKind::SearchIndex => self.search_index.as_mut(),
        }
    }

    /// Placeholders on the list surfaces while a load is in flight. The
    /// search index keeps its cards so a failed reload leaves them usable.
    pub fn show_skeletons(&mut self) {
        self.primary.show_skeleton();
        self.upcoming.show_skeleton();
        if let Some(preview) = self.home_preview.as_mut() {
            preview.show_skeleton();
        }
    }

    /// Replace every surface from freshly normalized records.
    ///
    /// Primary and home preview each build their own nodes from the live
    /// records; the search index clones primary then upcoming afterwards.
    pub fn render(&mut self, live: &[Value], upcoming: &[Value]) {
        self.primary.set_cards(live.iter().map(CardNode::build).collect());
        self.upcoming
            .set_cards(upcoming.iter().map(CardNode::build).collect());

        let preview_len = self.preview_len;
        if let Some(preview) = self.home_preview.as_mut() {
            preview.set_cards(
                live.iter()
                    .take(preview_len)
                    .map(CardNode::build)
                    .collect(),
            );
        }

        if let Some(index) = self.search_index.as_mut() {
            let mirrored = self
                .primary
                .nodes()
                .iter()
                .chain(self.upcoming.nodes())
                .cloned()
                .collect();
            index.set_cards(mirrored);
        }
    }

    /// Failed load: the three list surfaces show the error, the search index
    /// keeps whatever it had.
    pub fn render_error(&mut self, message: &str) {
        let text = format!("{}: {}", LOAD_ERROR_PREFIX, message);
        self.primary.show_error(&text);
        self.upcoming.show_error(&text);
        if let Some(preview) = self.home_preview.as_mut() {
            preview.show_error(&text);
        }
    }

    /// The node a control belongs to, if that rendering is still current.
    pub fn node(&self, control: ControlRef) -> Option<&CardNode> {
        let surface = self.get(control.surface)?;
        if surface.generation() != control.generation {
            return None;
        }
        surface.nodes().get(control.index)
    }

    pub fn node_mut(&mut self, control: ControlRef) -> Option<&mut CardNode> {
        let surface = self.get_mut(control.surface)?;
        if surface.generation() != control.generation {
            return None;
        }
        surface.nodes_mut().get_mut(control.index)
    }

    pub fn counts(&self) -> (usize, usize) {
        (self.primary.nodes().len(), self.upcoming.nodes().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(titles: &[&str]) -> Vec<Value> {
        titles.iter().map(|t| json!({ "title": t, "stream": t })).collect()
    }

    fn titles(surface: &Surface) -> Vec<&str> {
        surface.nodes().iter().map(|n| n.card.title.as_str()).collect()
    }

    #[test]
    fn test_skeleton_counts() {
        let mut set = SurfaceSet::new(true, true, 4);
        set.show_skeletons();
        assert_eq!(set.get(SurfaceKind::Primary).unwrap().content(), &SurfaceContent::Skeleton(6));
        assert_eq!(set.get(SurfaceKind::Upcoming).unwrap().content(), &SurfaceContent::Skeleton(6));
        assert_eq!(
            set.get(SurfaceKind::HomePreview).unwrap().content(),
            &SurfaceContent::Skeleton(4)
        );
        assert!(set.get(SurfaceKind::SearchIndex).unwrap().nodes().is_empty());
    }

    #[test]
    fn test_render_fills_every_surface() {
        let mut set = SurfaceSet::new(true, true, 2);
        set.render(&records(&["a", "b", "c"]), &records(&["d"]));
        assert_eq!(titles(set.get(SurfaceKind::Primary).unwrap()), ["a", "b", "c"]);
        assert_eq!(titles(set.get(SurfaceKind::Upcoming).unwrap()), ["d"]);
        assert_eq!(titles(set.get(SurfaceKind::HomePreview).unwrap()), ["a", "b"]);
        assert_eq!(
            titles(set.get(SurfaceKind::SearchIndex).unwrap()),
            ["a", "b", "c", "d"]
        );
        assert_eq!(set.counts(), (3, 1));
    }

    #[test]
    fn test_render_replaces_previous_content() {
        let mut set = SurfaceSet::new(true, true, 4);
        set.render(&records(&["a", "b"]), &records(&["c"]));
        set.render(&records(&["x"]), &[]);
        assert_eq!(titles(set.get(SurfaceKind::Primary).unwrap()), ["x"]);
        assert!(set.get(SurfaceKind::Upcoming).unwrap().nodes().is_empty());
        assert_eq!(titles(set.get(SurfaceKind::SearchIndex).unwrap()), ["x"]);
    }

    #[test]
    fn test_surfaces_own_independent_nodes() {
        let mut set = SurfaceSet::new(true, true, 4);
        set.render(&records(&["a"]), &[]);
        set.get_mut(SurfaceKind::Primary).unwrap().nodes_mut()[0].hidden = true;
        assert!(!set.get(SurfaceKind::HomePreview).unwrap().nodes()[0].hidden);
        assert!(!set.get(SurfaceKind::SearchIndex).unwrap().nodes()[0].hidden);

        let control = set.get(SurfaceKind::SearchIndex).unwrap().control_ref(0).unwrap();
        set.node_mut(control).unwrap().control.begin_loading();
        assert!(set.get(SurfaceKind::Primary).unwrap().nodes()[0].control.enabled);
    }

    #[test]
    fn test_error_leaves_search_index_stale() {
        let mut set = SurfaceSet::new(true, true, 4);
        set.render(&records(&["a"]), &records(&["b"]));
        set.render_error("HTTP 503");
        let expected = SurfaceContent::Error("Error loading matches: HTTP 503".to_string());
        assert_eq!(set.get(SurfaceKind::Primary).unwrap().content(), &expected);
        assert_eq!(set.get(SurfaceKind::Upcoming).unwrap().content(), &expected);
        assert_eq!(set.get(SurfaceKind::HomePreview).unwrap().content(), &expected);
        assert_eq!(titles(set.get(SurfaceKind::SearchIndex).unwrap()), ["a", "b"]);
    }

    #[test]
    fn test_failed_reload_keeps_search_index_cards() {
        let mut set = SurfaceSet::new(true, true, 4);
        set.render(&records(&["a", "b"]), &records(&["c"]));
        set.show_skeletons();
        assert_eq!(set.get(SurfaceKind::Primary).unwrap().content(), &SurfaceContent::Skeleton(6));
        assert_eq!(titles(set.get(SurfaceKind::SearchIndex).unwrap()), ["a", "b", "c"]);

        set.render_error("HTTP 503");
        assert!(matches!(
            set.get(SurfaceKind::Primary).unwrap().content(),
            SurfaceContent::Error(_)
        ));
        assert_eq!(titles(set.get(SurfaceKind::SearchIndex).unwrap()), ["a", "b", "c"]);
    }

    #[test]
    fn test_absent_surfaces_are_skipped() {
        let mut set = SurfaceSet::new(false, false, 4);
        set.show_skeletons();
        set.render(&records(&["a"]), &[]);
        set.render_error("boom");
        assert!(set.get(SurfaceKind::HomePreview).is_none());
        assert!(set.get(SurfaceKind::SearchIndex).is_none());
        assert!(set.get_mut(SurfaceKind::HomePreview).is_none());
    }

    #[test]
    fn test_stale_control_ref_is_rejected() {
        let mut set = SurfaceSet::new(false, false, 4);
        set.render(&records(&["a"]), &[]);
        let control = set.get(SurfaceKind::Primary).unwrap().control_ref(0).unwrap();
        assert!(set.node(control).is_some());
        set.render(&records(&["a"]), &[]);
        assert!(set.node(control).is_none());
        assert!(set.node_mut(control).is_none());
    }

    #[test]
    fn test_control_ref_out_of_range() {
        let mut set = SurfaceSet::new(false, false, 4);
        set.render(&records(&["a"]), &[]);
        assert!(set.get(SurfaceKind::Primary).unwrap().control_ref(1).is_none());
    }

    #[test]
    fn test_watch_control_loading_round_trip() {
        let mut control = WatchControl::new();
        let label = control.begin_loading();
        assert!(!control.enabled);
        assert_eq!(control.label, LOADING_LABEL);
        control.restore(label);
        assert_eq!(control, WatchControl::new());
    }
}
