use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub size: Rect,
    pub header: Rect,
    pub tabs: Rect,
    pub body: Rect,
    pub status_line: Rect,
    pub command_line: Rect,
}

pub fn areas(size: Rect) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    let footer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(vertical[3]);

    UiAreas {
        size,
        header: vertical[0],
        tabs: vertical[1],
        body: vertical[2],
        status_line: footer_chunks[0],
        command_line: footer_chunks[1],
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChatAreas {
    pub filter: Rect,
    pub rooms: Rect,
    pub header: Rect,
    pub messages: Rect,
    pub draft: Rect,
}

pub fn chat_areas(body: Rect) -> ChatAreas {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(body);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(columns[0]);

    let conversation = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(columns[1]);

    ChatAreas {
        filter: sidebar[0],
        rooms: sidebar[1],
        header: conversation[0],
        messages: conversation[1],
        draft: conversation[2],
    }
}

/// Tab index under column `col` of the tab bar, given the rendered titles.
pub fn tab_at(titles: &[String], divider_width: u16, col: u16, tabs: Rect) -> Option<usize> {
    if col < tabs.x {
        return None;
    }
    // ratatui's Tabs pads each title with one space on both sides
    let mut x = tabs.x;
    for (idx, title) in titles.iter().enumerate() {
        let width = title.chars().count() as u16 + 2;
        if col >= x && col < x + width {
            return Some(idx);
        }
        x += width + divider_width;
    }
    None
}

/// Scroll offset ratatui's `List` settles on when it starts at the top and
/// keeps `selected` visible in `rows` rows of one-line items.
pub fn list_offset(selected: Option<usize>, rows: u16) -> usize {
    match selected {
        Some(idx) if rows > 0 => idx.saturating_sub(usize::from(rows) - 1),
        _ => 0,
    }
}

pub fn rect_contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

pub fn rect_inner(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_areas_fill_screen() {
        let ui = areas(Rect::new(0, 0, 120, 40));
        assert_eq!(ui.header.height, 3);
        assert_eq!(ui.tabs.y, 3);
        assert_eq!(ui.body.height, 40 - 3 - 1 - 2);
        assert_eq!(ui.command_line.y, 39);
    }

    #[test]
    fn test_tab_at() {
        let titles = vec!["1:Dashboards".to_string(), "2:Chat".to_string()];
        let bar = Rect::new(0, 3, 80, 1);
        assert_eq!(tab_at(&titles, 3, 0, bar), Some(0));
        assert_eq!(tab_at(&titles, 3, 13, bar), Some(0));
        assert_eq!(tab_at(&titles, 3, 15, bar), None);
        assert_eq!(tab_at(&titles, 3, 17, bar), Some(1));
        assert_eq!(tab_at(&titles, 3, 60, bar), None);
    }

    #[test]
    fn test_list_offset() {
        assert_eq!(list_offset(None, 3), 0);
        assert_eq!(list_offset(Some(2), 3), 0);
        assert_eq!(list_offset(Some(4), 3), 2);
        assert_eq!(list_offset(Some(4), 0), 0);
    }

    #[test]
    fn test_rect_inner() {
        let inner = rect_inner(Rect::new(2, 2, 10, 5));
        assert_eq!(inner, Rect::new(3, 3, 8, 3));
        assert!(rect_contains(inner, 3, 3));
        assert!(!rect_contains(inner, 11, 3));
    }
}
