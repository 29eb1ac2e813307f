//! CardPane component: one scrollable list of match cards backed by a surface.
//!
//! Each card takes two rows: title (with a LIVE badge) and note plus the
//! watch control. Hidden nodes are skipped; `selected` indexes the visible
//! nodes, not the surface.

use std::time::Instant;

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use pitchside_proto::markup::terminal_safe;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    surface::{CardNode, ControlRef, Surface, SurfaceContent, SurfaceKind},
    theme::{
        style_live_badge, style_muted, style_selected, C_BADGE_ERR, C_BADGE_PENDING, C_ERROR,
        C_MUTED, C_PRIMARY, C_SECONDARY, C_SKELETON, C_WATCH,
    },
    widgets::pane_chrome::{pane_chrome, Badge},
};

const CARD_ROWS: u16 = 2;
const PAGE_STEP: usize = 10;
const DOUBLE_CLICK_MS: u128 = 400;

pub struct CardPane {
    kind: SurfaceKind,
    number_key: char,
    selected: usize,
    scroll_offset: usize,
    last_click: Option<(usize, Instant)>,
}

impl CardPane {
    pub fn new(kind: SurfaceKind, number_key: char) -> Self {
        Self {
            kind,
            number_key,
            selected: 0,
            scroll_offset: 0,
            last_click: None,
        }
    }

    fn surface<'a>(&self, state: &'a AppState) -> Option<&'a Surface> {
        state.surfaces.get(self.kind)
    }

    fn visible(&self, state: &AppState) -> Vec<usize> {
        self.surface(state)
            .map(Surface::visible_indices)
            .unwrap_or_default()
    }

    fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn select_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    fn select_down(&mut self, n: usize, len: usize) {
        self.selected = (self.selected + n).min(len.saturating_sub(1));
    }

    /// Control of the selected visible card.
    pub fn selected_control(&self, state: &AppState) -> Option<ControlRef> {
        let visible = self.visible(state);
        let index = *visible.get(self.selected.min(visible.len().checked_sub(1)?))?;
        self.surface(state)?.control_ref(index)
    }

    fn selected_node<'a>(&self, state: &'a AppState) -> Option<&'a CardNode> {
        state.surfaces.node(self.selected_control(state)?)
    }

    fn watch_selected(&self, state: &AppState) -> Vec<Action> {
        self.selected_control(state)
            .map(|c| vec![Action::Watch(c)])
            .unwrap_or_default()
    }

    fn ensure_visible(&mut self, rows: usize) {
        if rows == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + rows {
            self.scroll_offset = self.selected + 1 - rows;
        }
    }

    fn badge(&self, state: &AppState) -> Option<(String, ratatui::style::Color)> {
        let surface = self.surface(state)?;
        match surface.content() {
            SurfaceContent::Skeleton(_) => Some(("…".to_string(), C_BADGE_PENDING)),
            SurfaceContent::Error(_) => Some(("ERR".to_string(), C_BADGE_ERR)),
            SurfaceContent::Cards(nodes) => {
                let shown = nodes.iter().filter(|n| !n.hidden).count();
                let text = if shown == nodes.len() {
                    nodes.len().to_string()
                } else {
                    format!("{}/{}", shown, nodes.len())
                };
                Some((text, C_SECONDARY))
            }
        }
    }

    fn draw_cards(&mut self, frame: &mut Frame, inner: Rect, focused: bool, state: &AppState) {
        let Some(surface) = self.surface(state) else {
            return;
        };
        let nodes = surface.nodes();
        let visible = surface.visible_indices();
        if nodes.is_empty() {
            let msg = match self.kind {
                SurfaceKind::Upcoming => "  nothing scheduled",
                SurfaceKind::SearchIndex => "  nothing to search yet",
                _ => "  no live matches right now",
            };
            frame.render_widget(Paragraph::new(Span::styled(msg, style_muted())), inner);
            return;
        }
        if visible.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("  no matches for this search", style_muted())),
                inner,
            );
            return;
        }

        self.clamp(visible.len());
        let rows = (inner.height / CARD_ROWS) as usize;
        self.ensure_visible(rows);

        let width = inner.width as usize;
        let mut lines: Vec<Line> = Vec::with_capacity(rows * CARD_ROWS as usize);
        for (pos, &index) in visible.iter().enumerate().skip(self.scroll_offset).take(rows) {
            let is_selected = focused && pos == self.selected;
            lines.extend(card_lines(&nodes[index], width, is_selected));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// Truncate to at most `width` terminal columns, marking the cut with `…`.
pub fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn card_lines(node: &CardNode, width: usize, selected: bool) -> [Line<'static>; 2] {
    let card = &node.card;
    let base = if selected { style_selected() } else { Style::default() };
    let marker = if selected { "▌" } else { " " };

    let mut title_spans = vec![Span::styled(marker, base.fg(C_WATCH))];
    let mut budget = width.saturating_sub(2);
    if card.is_live {
        title_spans.push(Span::styled(" LIVE ", style_live_badge()));
        title_spans.push(Span::styled(" ", base));
        budget = budget.saturating_sub(7);
    }
    title_spans.push(Span::styled(
        fit(&terminal_safe(&card.title), budget),
        base.fg(C_PRIMARY).add_modifier(Modifier::BOLD),
    ));

    let control = &node.control;
    let control_text = format!("[{}]", control.label);
    let control_style = if control.enabled {
        base.fg(C_WATCH)
    } else {
        base.fg(C_MUTED).add_modifier(Modifier::ITALIC)
    };
    let mut detail_spans = vec![Span::styled(marker, base.fg(C_WATCH))];
    if !card.note.is_empty() {
        let note_budget = width.saturating_sub(control_text.width() + 4);
        detail_spans.push(Span::styled(
            format!("{}  ", fit(&terminal_safe(&card.note), note_budget)),
            base.fg(C_SECONDARY),
        ));
    }
    detail_spans.push(Span::styled(control_text, control_style));

    [
        Line::from(title_spans).style(base),
        Line::from(detail_spans).style(base),
    ]
}

fn skeleton_lines(count: usize, width: usize) -> Vec<Line<'static>> {
    let long = "░".repeat(width.saturating_sub(4).min(36));
    let short = "░".repeat(width.saturating_sub(4).min(18));
    let style = Style::default().fg(C_SKELETON);
    (0..count)
        .flat_map(|_| {
            [
                Line::from(Span::styled(format!("  {}", long), style)),
                Line::from(Span::styled(format!("  {}", short), style)),
            ]
        })
        .collect()
}

impl Component for CardPane {
    fn id(&self) -> ComponentId {
        ComponentId::for_surface(self.kind)
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let len = self.visible(state).len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.select_down(1, len),
            KeyCode::PageUp => self.select_up(PAGE_STEP),
            KeyCode::PageDown => self.select_down(PAGE_STEP, len),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => self.selected = len.saturating_sub(1),
            KeyCode::Enter | KeyCode::Char('w') => return self.watch_selected(state),
            KeyCode::Char('y') => {
                if let Some(node) = self.selected_node(state) {
                    if node.card.has_stream() {
                        return vec![Action::CopyToClipboard(node.card.stream_ref.clone())];
                    }
                }
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        let len = self.visible(state).len();
        match event.kind {
            MouseEventKind::ScrollUp => self.select_up(1),
            MouseEventKind::ScrollDown => self.select_down(1, len),
            MouseEventKind::Down(MouseButton::Left) => {
                if event.row <= area.y {
                    return vec![];
                }
                let rel_row = (event.row - area.y - 1) / CARD_ROWS;
                let pos = self.scroll_offset + rel_row as usize;
                if pos >= len {
                    return vec![];
                }
                let now = Instant::now();
                let is_double = self
                    .last_click
                    .map(|(p, t)| p == pos && t.elapsed().as_millis() < DOUBLE_CLICK_MS)
                    .unwrap_or(false);
                self.selected = pos;
                if is_double {
                    self.last_click = None;
                    return self.watch_selected(state);
                }
                self.last_click = Some((pos, now));
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::Reload = action {
            self.selected = 0;
            self.scroll_offset = 0;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let badge = self.badge(state);
        let block = pane_chrome(
            self.kind.title(),
            Some(self.number_key),
            focused,
            badge.as_ref().map(|(text, color)| Badge {
                text: text.as_str(),
                color: *color,
            }),
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(surface) = self.surface(state) else {
            frame.render_widget(
                Paragraph::new(Span::styled("  disabled in config", style_muted())),
                inner,
            );
            return;
        };

        match surface.content() {
            SurfaceContent::Skeleton(count) => {
                frame.render_widget(
                    Paragraph::new(skeleton_lines(*count, inner.width as usize)),
                    inner,
                );
            }
            SurfaceContent::Error(message) => {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        format!("  {}", terminal_safe(message)),
                        Style::default().fg(C_ERROR),
                    ))
                    .wrap(Wrap { trim: true }),
                    inner,
                );
            }
            SurfaceContent::Cards(_) => self.draw_cards(frame, inner, focused, state),
        }
    }
}
