//! ModalView component: the stream viewer drawn over everything else.
//!
//! Reads `AppState::modal` and turns keys and clicks into viewer actions. A
//! click outside the viewer box counts as a backdrop close.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use pitchside_proto::markup::terminal_safe;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::help_overlay::centered_rect,
    modal::{CloseTrigger, ModalPhase},
    theme::{C_ACCENT, C_MODAL_BG, C_MUTED, C_PANEL_BORDER, C_PRIMARY, C_SECONDARY, C_WATCH},
};

const VIEWER_WIDTH_PCT: u16 = 70;
const VIEWER_HEIGHT: u16 = 11;
const CLOSE_LABEL: &str = "[x]";

pub struct ModalView;

impl ModalView {
    pub fn new() -> Self {
        Self
    }

    pub fn viewer_rect(area: Rect) -> Rect {
        centered_rect(VIEWER_WIDTH_PCT, VIEWER_HEIGHT, area)
    }

    fn close_control_rect(viewer: Rect) -> Rect {
        let w = CLOSE_LABEL.len() as u16 + 2;
        Rect {
            x: (viewer.x + viewer.width).saturating_sub(w + 1),
            y: viewer.y,
            width: w,
            height: 1,
        }
    }
}

fn contains(r: Rect, col: u16, row: u16) -> bool {
    r.width > 0
        && r.height > 0
        && col >= r.x
        && col < r.x + r.width
        && row >= r.y
        && row < r.y + r.height
}

impl Component for ModalView {
    fn id(&self) -> ComponentId {
        ComponentId::ModalView
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !state.modal.is_interactive() {
            return vec![];
        }
        match key.code {
            KeyCode::Esc => vec![Action::CloseModal(CloseTrigger::Escape)],
            KeyCode::Char('x') => vec![Action::CloseModal(CloseTrigger::CloseControl)],
            KeyCode::Char('o') | KeyCode::Enter => vec![Action::LaunchPlayer],
            KeyCode::Char('y') if !state.modal.src().is_empty() => {
                vec![Action::CopyToClipboard(state.modal.src().to_string())]
            }
            _ => vec![],
        }
    }

    /// `area` is the whole frame.
    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        if !state.modal.is_interactive() || event.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        let viewer = Self::viewer_rect(area);
        if !contains(viewer, event.column, event.row) {
            return vec![Action::CloseModal(CloseTrigger::Backdrop)];
        }
        if contains(Self::close_control_rect(viewer), event.column, event.row) {
            return vec![Action::CloseModal(CloseTrigger::CloseControl)];
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let modal = &state.modal;
        if !modal.is_visible() {
            return;
        }

        // Dim the page behind; the opening and closing frames use a quieter border.
        frame
            .buffer_mut()
            .set_style(area, Style::default().add_modifier(Modifier::DIM));
        let settled = modal.phase() == ModalPhase::Open;
        let border = if settled { C_ACCENT } else { C_PANEL_BORDER };

        let viewer = Self::viewer_rect(area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(C_MODAL_BG))
            .title(Line::from(Span::styled(
                format!(" {} ", terminal_safe(modal.title())),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )))
            .title_top(
                Line::from(Span::styled(
                    format!(" {} ", CLOSE_LABEL),
                    Style::default().fg(C_SECONDARY),
                ))
                .right_aligned(),
            );

        let mut lines = vec![Line::from("")];
        if modal.src().is_empty() {
            lines.push(Line::from(Span::styled("  closing…", Style::default().fg(C_MUTED))));
        } else {
            lines.push(Line::from(Span::styled("  stream", Style::default().fg(C_MUTED))));
            lines.push(Line::from(Span::styled(
                format!("  {}", terminal_safe(modal.src())),
                Style::default().fg(C_WATCH),
            )));
            lines.push(Line::from(""));
            let player = if state.player_running {
                Span::styled(
                    format!("  ▶ playing in {}", state.player_command),
                    Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(
                    format!("  o  open in {}", state.player_command),
                    Style::default().fg(C_SECONDARY),
                )
            };
            lines.push(Line::from(player));
            lines.push(Line::from(Span::styled(
                "  y  copy link    esc  close",
                Style::default().fg(C_MUTED),
            )));
        }

        frame.render_widget(Clear, viewer);
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            viewer,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::ModalCommand;
    use crate::surface::SurfaceSet;
    use ratatui::crossterm::event::KeyModifiers;

    fn open_state() -> AppState {
        let mut state = AppState::new(SurfaceSet::new(true, true, 4), String::new(), "mpv".into());
        state.modal.apply(ModalCommand::Open {
            title: "A vs B".into(),
            src: "https://x/embed".into(),
        });
        state
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_keys_map_to_viewer_actions() {
        let state = open_state();
        let mut view = ModalView::new();
        assert!(matches!(
            view.handle_key(key(KeyCode::Esc), &state).as_slice(),
            [Action::CloseModal(CloseTrigger::Escape)]
        ));
        assert!(matches!(
            view.handle_key(key(KeyCode::Char('x')), &state).as_slice(),
            [Action::CloseModal(CloseTrigger::CloseControl)]
        ));
        assert!(matches!(
            view.handle_key(key(KeyCode::Char('o')), &state).as_slice(),
            [Action::LaunchPlayer]
        ));
        assert!(matches!(
            view.handle_key(key(KeyCode::Char('y')), &state).as_slice(),
            [Action::CopyToClipboard(link)] if link == "https://x/embed"
        ));
    }

    #[test]
    fn test_click_outside_is_backdrop_close() {
        let state = open_state();
        let mut view = ModalView::new();
        let area = Rect::new(0, 0, 100, 40);
        assert!(matches!(
            view.handle_mouse(click(0, 0), area, &state).as_slice(),
            [Action::CloseModal(CloseTrigger::Backdrop)]
        ));
        let viewer = ModalView::viewer_rect(area);
        assert!(view
            .handle_mouse(click(viewer.x + 2, viewer.y + 3), area, &state)
            .is_empty());
        let close = ModalView::close_control_rect(viewer);
        assert!(matches!(
            view.handle_mouse(click(close.x + 1, close.y), area, &state).as_slice(),
            [Action::CloseModal(CloseTrigger::CloseControl)]
        ));
    }

    #[test]
    fn test_closed_viewer_ignores_input() {
        let state = AppState::new(SurfaceSet::new(true, true, 4), String::new(), String::new());
        let mut view = ModalView::new();
        assert!(view.handle_key(key(KeyCode::Esc), &state).is_empty());
        assert!(view
            .handle_mouse(click(0, 0), Rect::new(0, 0, 100, 40), &state)
            .is_empty());
    }
}
