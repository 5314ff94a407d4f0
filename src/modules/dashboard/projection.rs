//! Chart geometry and colors derived from the dashboard datasets

use ratatui::style::Color;

use crate::domain::Priority;

/// Length units per pending task.
pub const BAR_UNITS_PER_TASK: u32 = 3;

/// Horizontal run used for the performance segment angle.
pub const SEGMENT_RUN: f64 = 100.0;

/// Day counts above this render with light text on the heatmap.
pub const LIGHT_TEXT_THRESHOLD: u32 = 7;

pub fn bar_height(count: u32) -> u32 {
    count.saturating_mul(BAR_UNITS_PER_TASK)
}

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

/// Vertical position of a performance point, as a percent of chart height.
pub fn point_height_percent(score: u8) -> f64 {
    f64::from(score.min(100))
}

/// Angle in degrees of the segment drawn from `prev` to `cur`.
///
/// Matches a CSS rotation: negative means the line rises.
pub fn segment_angle_degrees(prev: u8, cur: u8) -> f64 {
    (f64::from(prev) - f64::from(cur)).atan2(SEGMENT_RUN).to_degrees()
}

pub fn trend_arrow(angle: f64) -> &'static str {
    if angle < 0.0 {
        "↗"
    } else if angle > 0.0 {
        "↘"
    } else {
        "→"
    }
}

/// Green channel for a heatmap cell: `255 - count * 20`, clamped to 0..=255.
pub fn workload_intensity(count: u32) -> u8 {
    let shade = 255i64 - i64::from(count) * 20;
    shade.clamp(0, 255) as u8
}

pub fn workload_text_is_light(count: u32) -> bool {
    count > LIGHT_TEXT_THRESHOLD
}

pub fn heat_cell_colors(count: u32) -> (Color, Color) {
    let bg = Color::Rgb(0, workload_intensity(count), 0);
    let fg = if workload_text_is_light(count) {
        Color::White
    } else {
        Color::Black
    };
    (bg, fg)
}

/// Widths of the success and failure bars within a row of `width` cells.
/// Each is a literal percentage of the row; the pair never overflows it.
pub fn split_widths(success: u8, failure: u8, width: u16) -> (u16, u16) {
    let width = u32::from(width);
    let success_w = (width * u32::from(success.min(100)) / 100).min(width);
    let failure_w = (width * u32::from(failure.min(100)) / 100).min(width - success_w);
    (success_w as u16, failure_w as u16)
}
