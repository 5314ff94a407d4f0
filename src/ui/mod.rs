use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

pub mod layout;
pub mod tabs;
pub mod widgets;

use crate::app::{App, InputMode};
use crate::core::command::command_hint;
use crate::core::NotifyLevel;
use crate::domain::NOTIFICATION_COUNT;
use crate::modules::chat::ChatFocus;
use crate::state::Tab;

pub fn draw(f: &mut Frame, app: &App) {
    let areas = layout::areas(f.size());

    draw_header(f, areas.header, app);
    tabs::draw_tab_bar(f, areas.tabs, &app.state);
    app.active_module().render(f, areas.body, &app.state);
    draw_status_line(f, areas.status_line, app);
    draw_command_line(f, areas.command_line, app);

    if app.help_open {
        draw_help_popup(f, areas.size);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let user = &app.state.profile.user_name;
    let title = Line::from(vec![
        Span::styled(
            " ProcessPro ",
            Style::default()
                .fg(Color::White)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Welcome, {}!", user),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);

    let left = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    let initial = user
        .chars()
        .next()
        .map(|ch| ch.to_uppercase().collect::<String>())
        .unwrap_or_default();
    let right_line = Line::from(vec![
        Span::styled("Notifications ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!(" {} ", NOTIFICATION_COUNT),
            Style::default()
                .bg(Color::Red)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" {} ", initial),
            Style::default()
                .bg(Color::Magenta)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    let right = Paragraph::new(right_line)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Right);

    f.render_widget(left, chunks[0]);
    f.render_widget(right, chunks[1]);
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let mut spans = vec![
        Span::styled("Tab ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", state.active_tab.title())),
        Span::styled("Room ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", state.room_title())),
        Span::styled("Messages ", Style::default().fg(Color::DarkGray)),
        Span::raw(state.log.len().to_string()),
    ];
    if !state.room_filter.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("Filter ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::raw(state.room_filter.clone()));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let content = match app.input_mode {
        InputMode::Command => {
            let hint = command_hint(&app.command.input);
            let hint_text = hint.unwrap_or("dashboard | chat | room <id|name> | export [dir]");
            Line::from(vec![
                Span::styled(": ", Style::default().fg(Color::Yellow)),
                Span::raw(app.command.input.as_str()),
                Span::styled(
                    format!("  {}", hint_text),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        }
        InputMode::Normal => {
            if let Some((text, level)) = app.status_text() {
                let color = match level {
                    NotifyLevel::Info => Color::LightGreen,
                    NotifyLevel::Warn => Color::LightYellow,
                    NotifyLevel::Error => Color::LightRed,
                };
                Line::from(vec![
                    Span::styled("msg: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(text, Style::default().fg(color)),
                ])
            } else {
                action_hints(app)
            }
        }
    };

    let paragraph = Paragraph::new(content).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}

fn action_hints(app: &App) -> Line<'static> {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::LightCyan));

    let mut spans = vec![key("1/2"), Span::raw(" Tabs  ")];
    match app.state.active_tab {
        Tab::Dashboard => spans.extend([key("Tab"), Span::raw(" Card  ")]),
        Tab::Chat => match app.chat.focus() {
            ChatFocus::Rooms => spans.extend([
                key("j/k"),
                Span::raw(" Room  "),
                key("Enter"),
                Span::raw(" Open  "),
                key("i"),
                Span::raw(" Type  "),
                key("/"),
                Span::raw(" Search  "),
            ]),
            ChatFocus::Draft => {
                return Line::from(vec![
                    key("Enter"),
                    Span::raw(" Send  "),
                    key("Esc"),
                    Span::raw(" Rooms"),
                ])
            }
            ChatFocus::Filter => {
                return Line::from(vec![
                    key("Enter"),
                    Span::raw(" Keep  "),
                    key("Esc"),
                    Span::raw(" Clear"),
                ])
            }
        },
    }
    spans.extend([
        key(":"),
        Span::raw(" Command  "),
        key("e"),
        Span::raw(" Export  "),
        key("?"),
        Span::raw(" Help  "),
        key("q"),
        Span::raw(" Quit"),
    ]);
    Line::from(spans)
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from("Navigation"),
        Line::from("  1 / 2      Dashboards / Chat"),
        Line::from("  Mouse      Click tabs, rooms, inputs"),
        Line::from(""),
        Line::from("Dashboards"),
        Line::from("  Tab / h l  Highlight next / previous card"),
        Line::from(""),
        Line::from("Chat"),
        Line::from("  j / k      Move room cursor"),
        Line::from("  Enter      Open room / send message"),
        Line::from("  i / Tab    Type a message"),
        Line::from("  /          Search rooms"),
        Line::from("  Esc        Leave input"),
        Line::from(""),
        Line::from("Other"),
        Line::from("  :          Command line"),
        Line::from("  e          Export messages and dashboard data"),
        Line::from("  ?          Toggle help"),
        Line::from("  q          Quit"),
    ];

    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Help")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(popup, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
