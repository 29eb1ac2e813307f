//! Status bar: bottom line with the input mode and keybindings.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::Page;
use crate::theme::{C_MODE_FILTER, C_MODE_NORMAL, C_MODE_VIEWER, C_MUTED};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Filter,
    Viewer,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Filter => "FILTER",
            Self::Viewer => "VIEWER",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Filter => C_MODE_FILTER,
            Self::Viewer => C_MODE_VIEWER,
        }
    }
}

fn keys_hint(mode: InputMode, page: Page) -> &'static str {
    match mode {
        InputMode::Normal => match page.filter_scope() {
            Some(_) => " ↑↓/jk select  Enter watch  / search  r reload  Tab/1-4 pages  y copy ref  ? help  q quit",
            None => " ↑↓/jk select  Enter watch  r reload  Tab/1-4 pages  y copy ref  ? help  q quit",
        },
        InputMode::Filter => " type to filter  ↑↓ move  Enter keep  Esc clear+close  Tab next page",
        InputMode::Viewer => " o/Enter play  y copy link  Esc/x close",
    }
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode, page: Page) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default().fg(mode.color()).add_modifier(Modifier::BOLD),
        ),
        Span::styled(keys_hint(mode, page), Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
