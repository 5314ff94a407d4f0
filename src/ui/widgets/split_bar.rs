//! Two-segment horizontal bar for success/failure percentages

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::modules::dashboard::projection::split_widths;

/// A single-line bar with a success segment followed by a failure segment.
///
/// Each segment is a literal percentage of the area width and carries its
/// percentage as text: right-aligned in the success part, left-aligned in
/// the failure part.
pub struct SplitBar {
    success: u8,
    failure: u8,
    success_style: Style,
    failure_style: Style,
}

impl SplitBar {
    pub fn new(success: u8, failure: u8) -> Self {
        Self {
            success,
            failure,
            success_style: Style::default().bg(Color::Blue).fg(Color::White),
            failure_style: Style::default().bg(Color::Red).fg(Color::White),
        }
    }

    pub fn success_style(mut self, style: Style) -> Self {
        self.success_style = style;
        self
    }

    pub fn failure_style(mut self, style: Style) -> Self {
        self.failure_style = style;
        self
    }
}

impl Widget for SplitBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let (success_w, failure_w) = split_widths(self.success, self.failure, area.width);
        let y = area.y;

        for dx in 0..success_w {
            buf.get_mut(area.x + dx, y).set_char(' ').set_style(self.success_style);
        }
        for dx in 0..failure_w {
            buf.get_mut(area.x + success_w + dx, y)
                .set_char(' ')
                .set_style(self.failure_style);
        }

        // Labels only where they fit inside their own segment
        let success_label = format!("{}% ", self.success);
        let label_w = success_label.chars().count() as u16;
        if label_w <= success_w {
            let start = area.x + success_w - label_w;
            buf.set_string(start, y, &success_label, self.success_style);
        }

        let failure_label = format!(" {}%", self.failure);
        let label_w = failure_label.chars().count() as u16;
        if label_w <= failure_w {
            buf.set_string(area.x + success_w, y, &failure_label, self.failure_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, width: u16) -> String {
        (0..width).map(|x| buf.get(x, 0).symbol().to_string()).collect()
    }

    #[test]
    fn test_render_labels() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        SplitBar::new(85, 15).render(area, &mut buf);
        let text = row(&buf, 40);
        assert!(text.contains("85%"));
        assert!(text.contains("15%"));
        assert_eq!(buf.get(0, 0).bg, Color::Blue);
        assert_eq!(buf.get(39, 0).bg, Color::Red);
    }

    #[test]
    fn test_render_narrow_skips_labels() {
        let area = Rect::new(0, 0, 3, 1);
        let mut buf = Buffer::empty(area);
        SplitBar::new(92, 8).render(area, &mut buf);
        assert!(!row(&buf, 3).contains('%'));
    }
}
