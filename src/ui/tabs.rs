//! Tab bar rendering

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Tabs as RataTabs;
use ratatui::Frame;

use crate::state::{Tab, ViewState};

const DIVIDER: &str = " │ ";

/// Width of the divider between tab titles
pub const DIVIDER_WIDTH: u16 = 3;

/// Plain titles as they appear on screen, e.g. "1:Dashboards"
pub fn tab_titles() -> Vec<String> {
    Tab::ALL
        .iter()
        .map(|tab| format!("{}:{}", tab.shortcut(), tab.title()))
        .collect()
}

/// Draw the tab bar at the top
pub fn draw_tab_bar(f: &mut Frame, area: Rect, state: &ViewState) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| {
            Line::from(vec![
                Span::styled(
                    format!("{}:", tab.shortcut()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(tab.title()),
            ])
        })
        .collect();

    let selected = Tab::ALL
        .iter()
        .position(|t| *t == state.active_tab)
        .unwrap_or(0);

    let tabs = RataTabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .bg(Color::Rgb(20, 40, 80))
                .add_modifier(Modifier::BOLD),
        )
        .divider(DIVIDER);

    f.render_widget(tabs, area);
}
