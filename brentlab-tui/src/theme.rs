//! Parrot/neon theme tokens for the BrentLab dashboard.
//!
//! # Color Palette
//! - **Background**: deep charcoal
//! - **Accent**: electric cyan (price line, focus)
//! - **Highlight**: hot pink (change-point markers)
//! - **Warning**: neon orange (cursor, warnings)
//! - **Neutral**: cool purple (event dates)
//! - **Muted**: steel blue (axes, secondary text)

use ratatui::style::{Color, Modifier, Style};

pub const BACKGROUND: Color = Color::Rgb(18, 18, 20);
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const HIGHLIGHT: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Rgb(170, 170, 170);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn highlight() -> Style {
    Style::default().fg(HIGHLIGHT)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(TEXT_SECONDARY)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Row style for a list entry under the cursor.
pub fn selected_row(selected: bool) -> Style {
    if selected {
        Style::default().bg(Color::Rgb(40, 40, 48)).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}
