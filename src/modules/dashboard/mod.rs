//! Dashboard module - four static chart cards in a 2x2 grid

pub mod projection;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
};
use ratatui::Frame;

use crate::core::{Action, Module};
use crate::domain::{PENDING_TASKS, PERFORMANCE, PROJECT_OUTCOMES, WEEKDAYS, WORKLOAD};
use crate::state::ViewState;
use crate::ui::widgets::SplitBar;

use projection::{
    bar_height, heat_cell_colors, point_height_percent, priority_color, segment_angle_degrees,
    trend_arrow,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardCard {
    PendingWork,
    Performance,
    Workload,
    Projects,
}

impl DashboardCard {
    pub fn title(&self) -> &'static str {
        match self {
            DashboardCard::PendingWork => "Pending Work Tracker",
            DashboardCard::Performance => "Performance Improvement",
            DashboardCard::Workload => "Workload Distribution Analysis",
            DashboardCard::Projects => "Project Success and Failure Analytics",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    active_card: DashboardCard,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            active_card: DashboardCard::PendingWork,
        }
    }

    pub fn active_card(&self) -> DashboardCard {
        self.active_card
    }

    pub fn next_card(&mut self) {
        self.active_card = match self.active_card {
            DashboardCard::PendingWork => DashboardCard::Performance,
            DashboardCard::Performance => DashboardCard::Workload,
            DashboardCard::Workload => DashboardCard::Projects,
            DashboardCard::Projects => DashboardCard::PendingWork,
        };
    }

    pub fn prev_card(&mut self) {
        self.active_card = match self.active_card {
            DashboardCard::PendingWork => DashboardCard::Projects,
            DashboardCard::Performance => DashboardCard::PendingWork,
            DashboardCard::Workload => DashboardCard::Performance,
            DashboardCard::Projects => DashboardCard::Workload,
        };
    }

    fn card_block(&self, card: DashboardCard) -> Block<'static> {
        let border_style = if self.active_card == card {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                card.title(),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .border_style(border_style)
    }
}

impl Module for Dashboard {
    fn id(&self) -> &'static str {
        "dashboard"
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &ViewState) -> Action {
        match key.code {
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                self.next_card();
                Action::None
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.prev_card();
                Action::None
            }
            _ => Action::None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, _state: &ViewState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let top_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[0]);

        let bottom_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        self.render_pending_work(frame, top_chunks[0]);
        self.render_performance(frame, top_chunks[1]);
        self.render_workload(frame, bottom_chunks[0]);
        self.render_projects(frame, bottom_chunks[1]);
    }
}

impl Dashboard {
    fn render_pending_work(&self, frame: &mut Frame, area: Rect) {
        let block = self.card_block(DashboardCard::PendingWork);

        let bars: Vec<Bar> = PENDING_TASKS
            .iter()
            .map(|bucket| {
                let color = priority_color(bucket.priority);
                Bar::default()
                    .value(u64::from(bar_height(bucket.count)))
                    .text_value(bucket.count.to_string())
                    .label(Line::from(bucket.priority.title()))
                    .style(Style::default().fg(color))
                    .value_style(
                        Style::default()
                            .fg(Color::Black)
                            .bg(color)
                            .add_modifier(Modifier::BOLD),
                    )
            })
            .collect();

        let tallest = PENDING_TASKS
            .iter()
            .map(|bucket| bar_height(bucket.count))
            .max()
            .unwrap_or(0);

        let inner = block.inner(area);
        let bar_width = (inner.width / 3).saturating_sub(2).clamp(1, 12);

        let chart = BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(2)
            .max(u64::from(tallest));

        frame.render_widget(chart, area);
    }

    fn render_performance(&self, frame: &mut Frame, area: Rect) {
        let block = self.card_block(DashboardCard::Performance);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(inner);

        let points: Vec<(f64, f64)> = PERFORMANCE
            .iter()
            .enumerate()
            .map(|(idx, sample)| (idx as f64, point_height_percent(sample.score)))
            .collect();

        let datasets = vec![Dataset::default()
            .name("score")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Magenta))
            .data(&points)];

        let month_labels: Vec<Span> = PERFORMANCE
            .iter()
            .map(|sample| Span::raw(sample.month))
            .collect();

        let chart = Chart::new(datasets)
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([0.0, (PERFORMANCE.len().saturating_sub(1)) as f64])
                    .labels(month_labels),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([0.0, 100.0])
                    .labels(vec![Span::raw("0"), Span::raw("50"), Span::raw("100")]),
            );
        frame.render_widget(chart, chunks[0]);

        let mut trend = Vec::new();
        for pair in PERFORMANCE.windows(2) {
            let angle = segment_angle_degrees(pair[0].score, pair[1].score);
            trend.push(Span::styled(
                format!("{} {} ", pair[1].month, trend_arrow(angle)),
                Style::default().fg(Color::Magenta),
            ));
        }
        frame.render_widget(
            Paragraph::new(Line::from(trend)).alignment(Alignment::Center),
            chunks[1],
        );
    }

    fn render_workload(&self, frame: &mut Frame, area: Rect) {
        let block = self.card_block(DashboardCard::Workload);

        let mut header = vec![Span::raw(format!("{:<12}", ""))];
        for day in WEEKDAYS {
            header.push(Span::styled(
                format!("{:^5}", day),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            header.push(Span::raw(" "));
        }

        let mut lines = vec![Line::from(header)];
        for row in WORKLOAD {
            let mut spans = vec![Span::raw(format!("{:<12}", row.team))];
            for count in row.days {
                let (bg, fg) = heat_cell_colors(count);
                spans.push(Span::styled(
                    format!("{:^5}", count),
                    Style::default().bg(bg).fg(fg).add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }

        let (high_bg, _) = heat_cell_colors(10);
        let (low_bg, _) = heat_cell_colors(3);
        lines.push(Line::from(""));
        lines.push(
            Line::from(vec![
                Span::styled("  ", Style::default().bg(high_bg)),
                Span::raw(" High  →  "),
                Span::styled("  ", Style::default().bg(low_bg)),
                Span::raw(" Low"),
            ])
            .alignment(Alignment::Center),
        );

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_projects(&self, frame: &mut Frame, area: Rect) {
        let block = self.card_block(DashboardCard::Projects);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut constraints: Vec<Constraint> = PROJECT_OUTCOMES
            .iter()
            .flat_map(|_| [Constraint::Length(1), Constraint::Length(1)])
            .collect();
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (idx, project) in PROJECT_OUTCOMES.iter().enumerate() {
            let label_area = rows[idx * 2];
            let bar_area = rows[idx * 2 + 1];
            frame.render_widget(
                Paragraph::new(Span::styled(
                    project.name,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                label_area,
            );
            frame.render_widget(
                SplitBar::new(project.success, project.failure)
                    .success_style(Style::default().bg(Color::Blue).fg(Color::White))
                    .failure_style(Style::default().bg(Color::Red).fg(Color::White)),
                bar_area,
            );
        }

        let legend = Line::from(vec![
            Span::styled("■", Style::default().fg(Color::Blue)),
            Span::raw(" Success Rate   "),
            Span::styled("■", Style::default().fg(Color::Red)),
            Span::raw(" Failure Rate"),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(Paragraph::new(legend), rows[PROJECT_OUTCOMES.len() * 2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_card_cycle() {
        let mut dashboard = Dashboard::new();
        let state = ViewState::default();
        for _ in 0..4 {
            dashboard.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE), &state);
        }
        assert_eq!(dashboard.active_card(), DashboardCard::PendingWork);

        dashboard.handle_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT), &state);
        assert_eq!(dashboard.active_card(), DashboardCard::Projects);
    }

    #[test]
    fn test_keys_never_change_state() {
        let mut dashboard = Dashboard::new();
        let state = ViewState::default();
        let action =
            dashboard.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE), &state);
        assert_eq!(action, Action::None);
    }
}
