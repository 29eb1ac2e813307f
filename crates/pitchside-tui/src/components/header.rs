//! Header component: 2-row top bar.
//!
//! Row 1: app name and the page tabs.
//! Row 2: load status (counts and last refresh time) and the data source.
//!
//! Not focusable; clicking a tab switches page.

use ratatui::crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    action::{Action, ComponentId, Page},
    app_state::{AppState, LoadStatus},
    component::Component,
    theme::{C_ACCENT, C_ERROR, C_LIVE, C_MUTED, C_NUMBER_HINT, C_PRIMARY, C_SECONDARY},
};

const BRAND: &str = " pitchside ";

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    fn tab_label(index: usize, page: Page) -> String {
        format!(" {} {} ", index + 1, page.label())
    }

    /// Column span of each tab on row 1, in page order.
    fn tab_spans(x: u16) -> Vec<(Page, u16, u16)> {
        let mut col = x + BRAND.width() as u16 + 1;
        Page::ALL
            .iter()
            .enumerate()
            .map(|(i, &page)| {
                let w = Self::tab_label(i, page).width() as u16;
                let span = (page, col, col + w);
                col += w + 1;
                span
            })
            .collect()
    }

    fn status_line(state: &AppState) -> Line<'static> {
        let mut spans = vec![Span::raw(" ")];
        match &state.load {
            LoadStatus::Idle => spans.push(Span::styled("waiting", Style::default().fg(C_MUTED))),
            LoadStatus::Loading => {
                spans.push(Span::styled("loading matches…", Style::default().fg(C_SECONDARY)))
            }
            LoadStatus::Loaded { at, live, upcoming } => {
                spans.push(Span::styled("● ", Style::default().fg(C_LIVE)));
                spans.push(Span::styled(
                    format!("{} live", live),
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::styled(
                    format!(" · {} upcoming · updated {}", upcoming, at.format("%H:%M:%S")),
                    Style::default().fg(C_SECONDARY),
                ));
            }
            LoadStatus::Failed { at, message } => {
                spans.push(Span::styled(
                    format!("✗ {} ({})", message, at.format("%H:%M:%S")),
                    Style::default().fg(C_ERROR),
                ));
            }
        }
        spans.push(Span::styled(
            format!("  {}", state.base_url),
            Style::default().fg(C_MUTED),
        ));
        Line::from(spans)
    }
}

impl Component for Header {
    fn id(&self) -> ComponentId {
        ComponentId::Header
    }

    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) || event.row != area.y {
            return vec![];
        }
        Self::tab_spans(area.x)
            .into_iter()
            .find(|&(_, start, end)| event.column >= start && event.column < end)
            .map(|(page, _, _)| vec![Action::SwitchPage(page)])
            .unwrap_or_default()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        if area.height == 0 {
            return;
        }
        let mut tabs = vec![
            Span::styled(
                BRAND,
                Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
        ];
        for (i, &page) in Page::ALL.iter().enumerate() {
            let style = if page == state.page {
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(C_NUMBER_HINT)
            };
            tabs.push(Span::styled(Self::tab_label(i, page), style));
            tabs.push(Span::raw(" "));
        }

        let row1 = Rect { height: 1, ..area };
        frame.render_widget(Paragraph::new(Line::from(tabs)), row1);
        if area.height > 1 {
            let row2 = Rect {
                y: area.y + 1,
                height: 1,
                ..area
            };
            frame.render_widget(Paragraph::new(Self::status_line(state)), row2);
        }
    }
}
