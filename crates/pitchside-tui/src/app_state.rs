//! AppState: shared read-only data passed to all components during render/event.
//!
//! Components read this for surfaces and viewer state, but never mutate it.
//! The App event-loop is the only thing that writes to AppState.

use chrono::{DateTime, Local};

use crate::action::Page;
use crate::filter::FilterState;
use crate::modal::ModalController;
use crate::surface::SurfaceSet;
use crate::widgets::status_bar::InputMode;

/// Where the last load cycle ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded {
        at: DateTime<Local>,
        live: usize,
        upcoming: usize,
    },
    Failed {
        at: DateTime<Local>,
        message: String,
    },
}

pub struct AppState {
    // ── Data ────────────────────────────────────────────────────────────────
    pub surfaces: SurfaceSet,
    pub filters: FilterState,
    pub load: LoadStatus,
    pub base_url: String,

    // ── Viewer ──────────────────────────────────────────────────────────────
    pub modal: ModalController,
    pub player_command: String,
    pub player_running: bool,

    // ── UI mode ─────────────────────────────────────────────────────────────
    pub page: Page,
    pub input_mode: InputMode,
}

impl AppState {
    pub fn new(surfaces: SurfaceSet, base_url: String, player_command: String) -> Self {
        Self {
            surfaces,
            filters: FilterState::default(),
            load: LoadStatus::Idle,
            base_url,
            modal: ModalController::new(),
            player_command,
            player_running: false,
            page: Page::default(),
            input_mode: InputMode::Normal,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadStatus::Loading)
    }
}
