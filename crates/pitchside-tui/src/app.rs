//! App: the component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background tasks:
//!   terminal input, load results, stream resolutions, settled filters, viewer timers.
//! - The event loop draws when something changed, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::anyhow;
use chrono::Local;
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use pitchside_proto::config::Config;
use pitchside_proto::{Gateway, GatewayError, Normalized};

use crate::{
    action::{Action, ComponentId, Page},
    app_state::{AppState, LoadStatus},
    component::Component,
    components::{
        card_pane::CardPane, header::Header, help_overlay::HelpOverlay, modal_view::ModalView,
    },
    debounce::Debouncer,
    filter::FilterScope,
    modal::ModalCommand,
    player::Player,
    surface::{SurfaceKind, SurfaceSet, LOAD_ERROR_PREFIX},
    watch::{begin_watch, finish_watch, spawn_resolution, WatchOutcome, WatchResult, WatchStart},
    widgets::{
        filter_input::{FilterAction, FilterInput},
        status_bar::{self, InputMode},
        toast::ToastManager,
    },
    workspace::PageManager,
};

// ── Internal event bus ────────────────────────────────────────────────────────

pub enum AppMessage {
    Event(Event),
    /// A `/scrape` load finished. Carries the sequence number it was issued with.
    Loaded(u64, Result<Normalized, GatewayError>),
    Resolved(WatchOutcome),
    /// A filter input went quiet; apply this raw query.
    FilterSettled(FilterScope, String),
    ModalPhaseElapsed(u64),
}

impl From<WatchOutcome> for AppMessage {
    fn from(outcome: WatchOutcome) -> Self {
        Self::Resolved(outcome)
    }
}

// ── Persistence serde structs ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, Default)]
struct UiSessionState {
    page: String,
    home_query: String,
    search_query: String,
}

// ── Pane layout rects (for mouse hit-testing) ─────────────────────────────────

#[derive(Default, Clone)]
struct PaneAreas {
    frame: Rect,
    header: Rect,
    input: Rect,
    panes: Vec<(SurfaceKind, Rect)>,
}

/// The four card panes, one per surface.
struct Panes {
    home: CardPane,
    live: CardPane,
    upcoming: CardPane,
    search: CardPane,
}

impl Panes {
    fn new() -> Self {
        Self {
            home: CardPane::new(SurfaceKind::HomePreview, '1'),
            live: CardPane::new(SurfaceKind::Primary, '2'),
            upcoming: CardPane::new(SurfaceKind::Upcoming, '3'),
            search: CardPane::new(SurfaceKind::SearchIndex, '4'),
        }
    }

    fn get_mut(&mut self, kind: SurfaceKind) -> &mut CardPane {
        match kind {
            SurfaceKind::HomePreview => &mut self.home,
            SurfaceKind::Primary => &mut self.live,
            SurfaceKind::Upcoming => &mut self.upcoming,
            SurfaceKind::SearchIndex => &mut self.search,
        }
    }

    fn iter_mut(&mut self) -> [&mut CardPane; 4] {
        [
            &mut self.home,
            &mut self.live,
            &mut self.upcoming,
            &mut self.search,
        ]
    }
}

pub struct App {
    state: AppState,
    gateway: Gateway,
    config: Config,
    tx: mpsc::Sender<AppMessage>,
    rx: Option<mpsc::Receiver<AppMessage>>,

    // ── Components ────────────────────────────────────────────────────────────
    panes: Panes,
    header: Header,
    modal_view: ModalView,
    help_overlay: HelpOverlay,
    home_input: FilterInput,
    search_input: FilterInput,

    // ── UI infrastructure ─────────────────────────────────────────────────────
    home_debounce: Debouncer,
    search_debounce: Debouncer,
    toast: ToastManager,
    pages: PageManager,
    player: Option<Player>,
    areas: PaneAreas,

    /// Bumped per load; results carrying an older number are dropped.
    load_seq: u64,
    session_path: PathBuf,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, gateway: Gateway, session_path: PathBuf) -> Self {
        let (tx, rx) = mpsc::channel::<AppMessage>(1024);
        let ui = &config.ui;
        let surfaces = SurfaceSet::new(ui.home_preview, ui.search_index, ui.home_preview_len);
        let state = AppState::new(
            surfaces,
            gateway.base_url().to_string(),
            config.player.command.clone(),
        );

        let mut app = Self {
            state,
            gateway,
            tx,
            rx: Some(rx),
            panes: Panes::new(),
            header: Header::new(),
            modal_view: ModalView::new(),
            help_overlay: HelpOverlay::new(),
            home_input: FilterInput::new("filter live matches…"),
            search_input: FilterInput::new("search all matches…"),
            home_debounce: Debouncer::new(ui.filter_debounce()),
            search_debounce: Debouncer::new(ui.filter_debounce()),
            toast: ToastManager::new(),
            pages: PageManager::new(ui.home_preview),
            player: None,
            areas: PaneAreas::default(),
            load_seq: 0,
            session_path,
            should_quit: false,
            config,
        };
        app.restore_session(load_ui_session_state(&app.session_path));
        app
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut rx = self
            .rx
            .take()
            .ok_or_else(|| anyhow!("event loop already started"))?;

        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = self.tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        self.start_load();

        // ── Periodic timers ───────────────────────────────────────────────────
        // Toast expiry, spinner animation and player liveness: 100ms
        let mut toast_tick = tokio::time::interval(Duration::from_millis(100));
        toast_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut refresh = self.config.ui.refresh_interval().map(|period| {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval
        });

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    const MAX_DRAIN: usize = 256;
                    let mut redraw = self.handle_message(msg);
                    let mut drained = 0usize;
                    while drained < MAX_DRAIN {
                        let Ok(next) = rx.try_recv() else { break };
                        drained += 1;
                        redraw |= self.handle_message(next);
                    }
                    needs_redraw = redraw;
                }

                _ = toast_tick.tick() => {
                    let had_toasts = !self.toast.is_empty();
                    self.toast.tick();
                    let player_changed = self.sync_player();
                    needs_redraw = had_toasts || player_changed;
                }

                _ = tick_opt(&mut refresh) => {
                    if !self.state.is_loading() {
                        debug!("auto-refresh");
                        self.start_load();
                        needs_redraw = true;
                    }
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        self.save_ui_session_state();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    // ── Message handling ──────────────────────────────────────────────────────

    /// Returns whether the screen needs a redraw.
    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                if key.kind == KeyEventKind::Release {
                    return false;
                }
                for action in self.handle_key(key) {
                    self.dispatch(action);
                }
            }
            AppMessage::Event(Event::Mouse(mouse)) => {
                let actions = self.handle_mouse(mouse);
                if actions.is_empty() && !matches!(mouse.kind, MouseEventKind::Down(_)) {
                    return false;
                }
                for action in actions {
                    self.dispatch(action);
                }
            }
            AppMessage::Event(Event::Resize(w, h)) => self.dispatch(Action::Resize(w, h)),
            AppMessage::Event(_) => return false,

            AppMessage::Loaded(seq, result) => {
                if seq != self.load_seq {
                    debug!("dropping load #{} (current #{})", seq, self.load_seq);
                    return false;
                }
                self.finish_load(result);
            }

            AppMessage::Resolved(outcome) => {
                match finish_watch(&mut self.state.surfaces, outcome) {
                    WatchResult::Play { title, link } => {
                        info!("opening viewer for {:?}", title);
                        self.modal_command(ModalCommand::Open { title, src: link });
                        if self.config.player.autoplay {
                            self.launch_player();
                        }
                    }
                    WatchResult::Notice(message) => self.toast.warning(message),
                }
            }

            AppMessage::FilterSettled(scope, raw) => {
                debug!("filter {:?} settled: {:?}", scope, raw);
                self.state.surfaces.apply_scoped_filter(scope, &raw);
                self.state.filters.set(scope, raw);
            }

            AppMessage::ModalPhaseElapsed(generation) => {
                self.modal_command(ModalCommand::PhaseElapsed(generation));
            }
        }
        self.sync_input_mode();
        true
    }

    // ── Loading ───────────────────────────────────────────────────────────────

    /// Put every surface into its placeholder state and fetch `/scrape`.
    fn start_load(&mut self) {
        self.load_seq += 1;
        let seq = self.load_seq;
        self.state.load = LoadStatus::Loading;
        self.state.surfaces.show_skeletons();
        self.toast.spinner("loading matches…");
        info!("load #{}: GET {}", seq, self.gateway.endpoint("scrape"));

        let gateway = self.gateway.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = gateway.scrape().await;
            if tx.send(AppMessage::Loaded(seq, result)).await.is_err() {
                warn!("load #{}: event loop gone", seq);
            }
        });
    }

    fn finish_load(&mut self, result: Result<Normalized, GatewayError>) {
        self.toast.dismiss_spinner();
        let at = Local::now();
        match result {
            Ok(normalized) => {
                self.state
                    .surfaces
                    .render(&normalized.live, &normalized.upcoming);
                let (live, upcoming) = self.state.surfaces.counts();
                info!("load #{}: {} live, {} upcoming", self.load_seq, live, upcoming);
                self.state.surfaces.reapply_filters(&self.state.filters);
                self.state.load = LoadStatus::Loaded { at, live, upcoming };
            }
            Err(e) => {
                let message = e.to_string();
                warn!("load #{} failed: {}", self.load_seq, message);
                self.state.surfaces.render_error(&message);
                self.toast.error(format!("{}: {}", LOAD_ERROR_PREFIX, message));
                self.state.load = LoadStatus::Failed { at, message };
            }
        }
    }

    // ── Viewer ────────────────────────────────────────────────────────────────

    /// Feed the viewer state machine and schedule whatever timer it asks for.
    fn modal_command(&mut self, command: ModalCommand) {
        let transition = self.state.modal.apply(command);
        debug!("viewer -> {}", self.state.modal.phase().label());
        if transition.content_changed && self.player.take().is_some() {
            debug!("viewer content changed, stopping player");
        }
        if transition.content_changed {
            self.state.player_running = false;
        }
        if let Some(timer) = transition.timer {
            let tx = self.tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(timer.delay).await;
                let _ = tx
                    .send(AppMessage::ModalPhaseElapsed(timer.generation))
                    .await;
            });
        }
    }

    fn launch_player(&mut self) {
        let link = self.state.modal.src().to_string();
        if link.is_empty() {
            return;
        }
        if let Some(player) = self.player.as_mut() {
            if player.link() == link && player.is_running() {
                self.toast.info("already playing");
                return;
            }
        }
        self.player = None;
        match Player::launch(&self.config.player, &link) {
            Ok(player) => {
                self.player = Some(player);
                self.state.player_running = true;
                self.toast
                    .info(format!("playing in {}", self.config.player.command));
            }
            Err(e) => {
                warn!("player: {}", e);
                self.toast.error(e.to_string());
            }
        }
    }

    /// Notice an external player exiting on its own. Returns true on change.
    fn sync_player(&mut self) -> bool {
        let running = self.player.as_mut().is_some_and(Player::is_running);
        if !running {
            self.player = None;
        }
        let changed = running != self.state.player_running;
        self.state.player_running = running;
        changed
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            return vec![Action::Quit];
        }

        // Viewer captures all keys while it accepts input
        if self.state.modal.is_interactive() {
            return self.modal_view.handle_key(key, &self.state);
        }

        // Help overlay captures all keys when visible
        if self.help_overlay.visible {
            let actions = self.help_overlay.handle_key(key, &self.state);
            if !actions.is_empty() {
                return actions;
            }
            // Any other key closes the overlay
            return vec![Action::ToggleHelp];
        }

        if self.state.input_mode == InputMode::Filter {
            return self.handle_filter_key(key);
        }

        match key.code {
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Char('?') => return vec![Action::ToggleHelp],
            KeyCode::Char('K') => return vec![Action::ToggleKeys],
            KeyCode::Char('r') => return vec![Action::Reload],
            KeyCode::Char(c @ '1'..='4') => {
                let idx = (c as usize) - ('1' as usize);
                return vec![Action::SwitchPage(Page::ALL[idx])];
            }
            KeyCode::Tab => return vec![Action::NextPage],
            KeyCode::BackTab => return vec![Action::PrevPage],
            KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                self.pages.cycle_focus();
                return vec![];
            }
            KeyCode::Char('/') => {
                if self.pages.page().filter_scope().is_some() {
                    return vec![Action::OpenFilter];
                }
                return vec![];
            }
            _ => {}
        }

        // Dispatch to the focused pane
        let focused = self.pages.focused();
        self.panes.get_mut(focused).handle_key(key, &self.state)
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> Vec<Action> {
        let Some(scope) = self.pages.page().filter_scope() else {
            return vec![Action::CloseFilter];
        };
        match key.code {
            KeyCode::Tab => return vec![Action::CloseFilter, Action::NextPage],
            KeyCode::BackTab => return vec![Action::CloseFilter, Action::PrevPage],
            // Arrows still move the list selection while typing
            KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown => {
                let focused = self.pages.focused();
                return self.panes.get_mut(focused).handle_key(key, &self.state);
            }
            _ => {}
        }
        match self.input_mut(scope).handle_key(key) {
            FilterAction::Changed(raw) => vec![Action::FilterChanged(scope, raw)],
            FilterAction::Confirmed | FilterAction::Cancelled => vec![Action::CloseFilter],
            FilterAction::None => vec![],
        }
    }

    fn input_mut(&mut self, scope: FilterScope) -> &mut FilterInput {
        match scope {
            FilterScope::Home => &mut self.home_input,
            FilterScope::Search => &mut self.search_input,
        }
    }

    // ── Mouse handling ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let is_click = matches!(
            event.kind,
            MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        );
        if !is_click {
            return vec![];
        }

        let col = event.column;
        let row = event.row;

        fn hit(r: Rect, col: u16, row: u16) -> bool {
            r.width > 0
                && r.height > 0
                && col >= r.x
                && col < r.x + r.width
                && row >= r.y
                && row < r.y + r.height
        }

        // The viewer is modal: it gets every click, inside or out.
        if self.state.modal.is_visible() {
            return self
                .modal_view
                .handle_mouse(event, self.areas.frame, &self.state);
        }
        if self.help_overlay.visible {
            return match event.kind {
                MouseEventKind::Down(_) => vec![Action::ToggleHelp],
                _ => vec![],
            };
        }

        let areas = self.areas.clone();
        if hit(areas.header, col, row) {
            return self.header.handle_mouse(event, areas.header, &self.state);
        }
        if hit(areas.input, col, row) && matches!(event.kind, MouseEventKind::Down(_)) {
            return vec![Action::OpenFilter];
        }
        for (kind, rect) in areas.panes {
            if hit(rect, col, row) {
                self.pages.focus_pane(kind);
                return self.panes.get_mut(kind).handle_mouse(event, rect, &self.state);
            }
        }
        vec![]
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        // Broadcast action to all components first
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            for pane in self.panes.iter_mut() {
                out.extend(pane.on_action(&action, s));
            }
            out.extend(self.header.on_action(&action, s));
            out.extend(self.modal_view.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out
        };

        self.apply_action(action);

        // Dispatch any secondary actions (depth-limited to 1 level)
        for a in secondary {
            self.apply_action(a);
        }
        self.sync_input_mode();
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            // ── Navigation ────────────────────────────────────────────────────
            Action::SwitchPage(page) => self.set_page(page),
            Action::NextPage => self.set_page(self.pages.page().next()),
            Action::PrevPage => self.set_page(self.pages.page().prev()),

            // ── Filter/search ─────────────────────────────────────────────────
            Action::OpenFilter => {
                if let Some(scope) = self.pages.page().filter_scope() {
                    self.input_mut(scope).activate();
                    self.state.input_mode = InputMode::Filter;
                }
            }
            Action::CloseFilter => {
                self.home_input.deactivate();
                self.search_input.deactivate();
                self.state.input_mode = InputMode::Normal;
            }
            Action::FilterChanged(scope, raw) => {
                let tx = self.tx.clone();
                let debouncer = match scope {
                    FilterScope::Home => &mut self.home_debounce,
                    FilterScope::Search => &mut self.search_debounce,
                };
                debouncer.schedule(async move {
                    let _ = tx.send(AppMessage::FilterSettled(scope, raw)).await;
                });
            }

            // ── Matches ───────────────────────────────────────────────────────
            Action::Reload => {
                if self.state.is_loading() {
                    debug!("reload while loading, superseding load #{}", self.load_seq);
                }
                self.start_load();
            }
            Action::Watch(control) => match begin_watch(&mut self.state.surfaces, control) {
                WatchStart::Ignored => {}
                WatchStart::NoStream(notice) => self.toast.warning(notice),
                WatchStart::Started(request) => {
                    info!("resolving stream for {:?}", request.title);
                    spawn_resolution(self.gateway.clone(), request, self.tx.clone());
                }
            },

            // ── Viewer ────────────────────────────────────────────────────────
            Action::CloseModal(trigger) => {
                debug!("viewer close via {:?}", trigger);
                self.modal_command(ModalCommand::Close(trigger));
            }
            Action::LaunchPlayer => self.launch_player(),

            // ── UI toggles ────────────────────────────────────────────────────
            Action::ToggleHelp => {} // handled by HelpOverlay::on_action
            Action::ToggleKeys => self.pages.toggle_keys_bar(),
            Action::CopyToClipboard(text) => {
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
                    Ok(()) => {
                        // Truncate for toast display
                        let display = if text.chars().count() > 40 {
                            format!("{}…", text.chars().take(40).collect::<String>())
                        } else {
                            text
                        };
                        self.toast.success(format!("copied: {}", display));
                    }
                    Err(e) => {
                        warn!("clipboard error: {}", e);
                        self.toast.error(format!("clipboard error: {}", e));
                    }
                }
            }

            // ── System ────────────────────────────────────────────────────────
            Action::Quit => self.should_quit = true,
            Action::Resize(_, _) => {}
        }
    }

    fn set_page(&mut self, page: Page) {
        if page.filter_scope().is_none() || page.filter_scope() != self.pages.page().filter_scope() {
            self.home_input.deactivate();
            self.search_input.deactivate();
        }
        self.pages.set_page(page);
        self.state.page = page;
    }

    /// The component that currently owns the keyboard.
    fn focused_component(&self) -> ComponentId {
        if self.state.input_mode == InputMode::Viewer {
            self.modal_view.id()
        } else if self.help_overlay.visible {
            self.help_overlay.id()
        } else {
            ComponentId::for_surface(self.pages.focused())
        }
    }

    fn sync_input_mode(&mut self) {
        self.state.input_mode = if self.state.modal.is_interactive() {
            InputMode::Viewer
        } else if self.home_input.is_active() || self.search_input.is_active() {
            InputMode::Filter
        } else {
            InputMode::Normal
        };
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        use crate::theme::C_BG;
        use ratatui::widgets::Block;
        let area = frame.area();

        frame.render_widget(
            Block::default().style(ratatui::style::Style::default().bg(C_BG)),
            area,
        );

        // ── Outer layout: header | body | (keys bar) ─────────────────────────
        let status_h = if self.pages.show_keys_bar { 1u16 } else { 0 };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(status_h),
            ])
            .split(area);

        self.areas.frame = area;
        self.areas.header = outer[0];
        self.header.draw(frame, outer[0], false, &self.state);

        if self.pages.show_keys_bar {
            status_bar::draw_keys_bar(frame, outer[2], self.state.input_mode, self.pages.page());
        }

        self.draw_body(frame, outer[1]);

        // ── Overlays ──────────────────────────────────────────────────────────
        self.modal_view.draw(frame, area, true, &self.state);
        self.help_overlay.draw(frame, area, false, &self.state);

        // ── Toast notifications (topmost layer) ──────────────────────────────
        self.toast.draw(frame, area);
    }

    fn draw_body(&mut self, frame: &mut ratatui::Frame, area: Rect) {
        let page = self.pages.page();

        // Query row on the pages that have one
        let list_area = match page.filter_scope() {
            Some(scope) => {
                let split = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(1), Constraint::Min(0)])
                    .split(area);
                self.areas.input = split[0];
                match scope {
                    FilterScope::Home => self.home_input.draw(frame, split[0]),
                    FilterScope::Search => self.search_input.draw(frame, split[0]),
                }
                split[1]
            }
            None => {
                self.areas.input = Rect::default();
                area
            }
        };

        let kinds = self.pages.panes(page);
        let rects: Vec<Rect> = if kinds.len() > 1 {
            // Preview strip sized to its cards, the full list takes the rest
            let preview_h = (self.config.ui.home_preview_len as u16)
                .saturating_mul(2)
                .saturating_add(2)
                .min(list_area.height / 2);
            Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(preview_h), Constraint::Min(0)])
                .split(list_area)
                .to_vec()
        } else {
            vec![list_area]
        };

        self.areas.panes.clear();
        let owner = self.focused_component();
        for (&kind, rect) in kinds.iter().zip(rects) {
            let pane = self.panes.get_mut(kind);
            let focused = pane.id() == owner;
            pane.draw(frame, rect, focused, &self.state);
            self.areas.panes.push((kind, rect));
        }
    }

    // ── Session persistence ───────────────────────────────────────────────────

    fn restore_session(&mut self, session: UiSessionState) {
        if let Some(page) = Page::from_label(&session.page) {
            self.set_page(page);
        }
        for (scope, query) in [
            (FilterScope::Home, session.home_query),
            (FilterScope::Search, session.search_query),
        ] {
            if query.is_empty() {
                continue;
            }
            self.input_mut(scope).set_value(&query);
            self.state.filters.set(scope, query);
        }
    }

    fn session_state(&self) -> UiSessionState {
        UiSessionState {
            page: self.pages.page().label().to_string(),
            home_query: self.state.filters.query(FilterScope::Home).to_string(),
            search_query: self.state.filters.query(FilterScope::Search).to_string(),
        }
    }

    fn save_ui_session_state(&self) {
        if let Err(e) = save_ui_session_state(&self.session_path, &self.session_state()) {
            warn!("saving {}: {}", self.session_path.display(), e);
        }
    }
}

/// Tick an optional interval; never resolves when there is none.
async fn tick_opt(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

fn load_ui_session_state(path: &Path) -> UiSessionState {
    let Ok(content) = std::fs::read_to_string(path) else {
        return UiSessionState::default();
    };
    serde_json::from_str(&content).unwrap_or_default()
}

fn save_ui_session_state(path: &Path, state: &UiSessionState) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(state)?)?;
    Ok(())
}
