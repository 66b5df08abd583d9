//! Theme and styling for the dashboard.
//!
//! A dark theme with a bitcoin-orange accent. Series colors are used in
//! order for chart datasets.

use ratatui::style::{Color, Modifier, Style};

/// Accent color for highlights and focus indicators.
pub const ACCENT: Color = Color::Rgb(247, 147, 26);

/// Primary foreground color for normal text.
pub const FG: Color = Color::Rgb(224, 224, 230);

/// Muted foreground color for hints and labels.
pub const FG_MUTED: Color = Color::Rgb(168, 168, 175);

/// Default border color for unfocused panels.
pub const BORDER: Color = Color::Rgb(72, 72, 80);

pub const BORDER_FOCUS: Color = ACCENT;

/// Background color for selected list items.
pub const BG_SELECT: Color = Color::Rgb(44, 32, 18);

/// Color for error states.
pub const WARN: Color = Color::Rgb(220, 96, 110);

/// Color for completed fetches.
pub const OK: Color = Color::Rgb(120, 200, 140);

/// Chart dataset colors, cycled by column position.
pub const SERIES: [Color; 6] = [
    ACCENT,
    Color::Rgb(8, 171, 237),
    Color::Rgb(170, 120, 240),
    Color::Rgb(120, 200, 140),
    Color::Rgb(240, 200, 80),
    Color::Rgb(220, 96, 110),
];

pub fn series_color(position: usize) -> Color {
    SERIES[position % SERIES.len()]
}

/// Border style for a panel, accented when focused.
pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(BORDER_FOCUS)
    } else {
        Style::default().fg(BORDER)
    }
}

/// Style for titles, headers and prominent labels.
pub fn title_style() -> Style {
    Style::default().fg(FG_MUTED).add_modifier(Modifier::BOLD)
}

pub fn heading_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn text_style() -> Style {
    Style::default().fg(FG)
}

pub fn text_muted() -> Style {
    Style::default().fg(FG_MUTED)
}

/// Highlight for the selected row of a list.
pub fn list_highlight_style() -> Style {
    Style::default().bg(BG_SELECT).fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn error_style() -> Style {
    Style::default().fg(WARN).add_modifier(Modifier::BOLD)
}

pub fn ok_style() -> Style {
    Style::default().fg(OK)
}
