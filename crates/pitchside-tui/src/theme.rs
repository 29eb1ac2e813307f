//! Color palette and style constants for the pitchside TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(14, 18, 16);
pub const C_ACCENT: Color = Color::Rgb(80, 200, 120);
pub const C_LIVE: Color = Color::Rgb(255, 80, 80);
pub const C_ERROR: Color = Color::Rgb(255, 80, 80);
pub const C_MUTED: Color = Color::Rgb(72, 80, 88);
pub const C_SKELETON: Color = Color::Rgb(38, 44, 46);
pub const C_SECONDARY: Color = Color::Rgb(115, 128, 138);
pub const C_PRIMARY: Color = Color::Rgb(215, 222, 225);
pub const C_SELECTION_BG: Color = Color::Rgb(26, 34, 32);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 50, 52);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(80, 200, 120);
pub const C_NUMBER_HINT: Color = Color::Rgb(90, 105, 115);
pub const C_FILTER_BG: Color = Color::Rgb(20, 26, 30);
pub const C_FILTER_FG: Color = Color::Rgb(255, 200, 80);
pub const C_WATCH: Color = Color::Rgb(110, 170, 255);
pub const C_MODAL_BG: Color = Color::Rgb(16, 20, 26);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_WARNING: Color = Color::Rgb(255, 184, 80);
pub const C_TOAST_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_BADGE_ERR: Color = Color::Rgb(255, 95, 95);
pub const C_BADGE_PENDING: Color = Color::Rgb(255, 184, 80);
pub const C_MODE_NORMAL: Color = Color::Rgb(115, 128, 138);
pub const C_MODE_FILTER: Color = Color::Rgb(255, 200, 80);
pub const C_MODE_VIEWER: Color = Color::Rgb(110, 170, 255);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_selected() -> Style {
    Style::default().bg(C_SELECTION_BG).fg(C_PRIMARY)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

pub fn style_live_badge() -> Style {
    Style::default()
        .fg(C_BG)
        .bg(C_LIVE)
        .add_modifier(Modifier::BOLD)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}
