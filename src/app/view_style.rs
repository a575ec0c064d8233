use ratatui::style::Color;

use crate::constants::COLORS;

/// Header color for a board column, cycling through the palette.
pub(super) fn category_color(col: usize) -> Color {
    COLORS[col % COLORS.len()]
}

pub(super) fn text_color_for_bg(bg_color: Color) -> Color {
    if let Color::Rgb(r, g, b) = bg_color {
        let brightness = (299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000;
        if brightness > 128 {
            Color::Black
        } else {
            Color::White
        }
    } else {
        Color::White
    }
}

pub(super) fn score_color(score: i64) -> Color {
    if score < 0 {
        Color::Red
    } else if score > 0 {
        Color::Green
    } else {
        Color::Gray
    }
}

/// The classic gold of an unplayed point cell.
pub(super) const POINTS_COLOR: Color = Color::Rgb(255, 204, 0);
