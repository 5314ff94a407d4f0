//! Chat module - room list, shared message log and draft input

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::block::Title;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::core::{Action, Module};
use crate::domain::{ChatMessage, ChatRoom};
use crate::state::ViewState;
use crate::ui::layout;

/// Which part of the chat pane receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatFocus {
    Rooms,
    Draft,
    Filter,
}

#[derive(Debug, Clone)]
pub struct Chat {
    focus: ChatFocus,
    /// Index into the filtered room list
    cursor: usize,
}

impl Default for Chat {
    fn default() -> Self {
        Self::new()
    }
}

impl Chat {
    pub fn new() -> Self {
        Self {
            focus: ChatFocus::Rooms,
            cursor: 0,
        }
    }

    pub fn focus(&self) -> ChatFocus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: ChatFocus) {
        self.focus = focus;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Point the cursor at `index` of the visible rooms, clamped.
    pub fn set_cursor(&mut self, index: usize, visible: usize) {
        self.cursor = index.min(visible.saturating_sub(1));
    }

    /// First visible row of the room list in a pane `rows` tall.
    pub fn list_offset(&self, visible: usize, rows: u16) -> usize {
        let selected = (self.focus == ChatFocus::Rooms && visible > 0)
            .then(|| self.cursor.min(visible - 1));
        layout::list_offset(selected, rows)
    }

    /// Put the cursor on the selected room if it is visible.
    pub fn sync_cursor(&mut self, state: &ViewState) {
        let rooms = state.visible_rooms();
        if let Some(idx) = rooms.iter().position(|room| room.id == state.selected_room) {
            self.cursor = idx;
        } else {
            self.cursor = self.cursor.min(rooms.len().saturating_sub(1));
        }
    }

    fn handle_rooms_key(&mut self, key: KeyEvent, state: &ViewState) -> Action {
        let rooms = state.visible_rooms();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.set_cursor(self.cursor + 1, rooms.len());
                Action::None
            }
            KeyCode::Enter => match rooms.get(self.cursor) {
                Some(room) => {
                    self.focus = ChatFocus::Draft;
                    Action::SelectRoom(room.id)
                }
                None => Action::None,
            },
            KeyCode::Tab | KeyCode::Char('i') => {
                self.focus = ChatFocus::Draft;
                Action::None
            }
            KeyCode::Char('/') => {
                self.focus = ChatFocus::Filter;
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_draft_key(&mut self, key: KeyEvent, state: &ViewState) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Tab => {
                self.focus = ChatFocus::Rooms;
                Action::None
            }
            KeyCode::Enter => Action::Send,
            KeyCode::Backspace => {
                let mut draft = state.draft.clone();
                draft.pop();
                Action::EditDraft(draft)
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut draft = state.draft.clone();
                draft.push(ch);
                Action::EditDraft(draft)
            }
            _ => Action::None,
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent, state: &ViewState) -> Action {
        match key.code {
            KeyCode::Esc => {
                self.focus = ChatFocus::Rooms;
                self.cursor = 0;
                Action::EditFilter(String::new())
            }
            KeyCode::Enter | KeyCode::Tab => {
                self.focus = ChatFocus::Rooms;
                Action::None
            }
            KeyCode::Backspace => {
                let mut filter = state.room_filter.clone();
                filter.pop();
                self.cursor = 0;
                Action::EditFilter(filter)
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut filter = state.room_filter.clone();
                filter.push(ch);
                self.cursor = 0;
                Action::EditFilter(filter)
            }
            _ => Action::None,
        }
    }
}

impl Module for Chat {
    fn id(&self) -> &'static str {
        "chat"
    }

    fn handle_key(&mut self, key: KeyEvent, state: &ViewState) -> Action {
        match self.focus {
            ChatFocus::Rooms => self.handle_rooms_key(key, state),
            ChatFocus::Draft => self.handle_draft_key(key, state),
            ChatFocus::Filter => self.handle_filter_key(key, state),
        }
    }

    fn captures_text(&self) -> bool {
        matches!(self.focus, ChatFocus::Draft | ChatFocus::Filter)
    }

    fn render(&self, frame: &mut Frame, area: Rect, state: &ViewState) {
        let areas = layout::chat_areas(area);
        self.render_filter(frame, areas.filter, state);
        self.render_rooms(frame, areas.rooms, state);
        render_room_header(frame, areas.header, state);
        render_messages(frame, areas.messages, state);
        self.render_draft(frame, areas.draft, state);
    }
}

impl Chat {
    fn border_style(&self, focus: ChatFocus) -> Style {
        if self.focus == focus {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    fn render_filter(&self, frame: &mut Frame, area: Rect, state: &ViewState) {
        let content = if state.room_filter.is_empty() && self.focus != ChatFocus::Filter {
            Line::from(Span::styled(
                "Search chats...",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(vec![
                Span::styled("/ ", Style::default().fg(Color::Yellow)),
                Span::raw(state.room_filter.as_str()),
            ])
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.border_style(ChatFocus::Filter));
        frame.render_widget(Paragraph::new(content).block(block), area);
    }

    fn render_rooms(&self, frame: &mut Frame, area: Rect, state: &ViewState) {
        let rooms = state.visible_rooms();
        let items: Vec<ListItem> = rooms
            .iter()
            .map(|room| room_item(room, room.id == state.selected_room))
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .title("ROOMS")
            .border_style(self.border_style(ChatFocus::Rooms));

        let list = List::new(items)
            .block(block)
            .highlight_symbol("▸ ")
            .highlight_style(Style::default().add_modifier(Modifier::BOLD));

        let rows = layout::rect_inner(area).height;
        let mut list_state =
            ListState::default().with_offset(self.list_offset(rooms.len(), rows));
        if self.focus == ChatFocus::Rooms && !rooms.is_empty() {
            list_state.select(Some(self.cursor.min(rooms.len() - 1)));
        }
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_draft(&self, frame: &mut Frame, area: Rect, state: &ViewState) {
        let content = if state.draft.is_empty() {
            Line::from(Span::styled(
                "Type a message...",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(state.draft.as_str())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title("MESSAGE")
            .title(Title::from("Enter send").alignment(Alignment::Right))
            .border_style(self.border_style(ChatFocus::Draft));
        // Keep the end of the draft and the cursor in view
        let typed = u16::try_from(state.draft.chars().count()).unwrap_or(u16::MAX);
        let offset = typed.saturating_sub(area.width.saturating_sub(3));
        frame.render_widget(
            Paragraph::new(content).block(block).scroll((0, offset)),
            area,
        );

        if self.focus == ChatFocus::Draft && area.width > 2 && area.height > 2 {
            let x = area.x + 1 + (typed - offset).min(area.width - 3);
            frame.set_cursor(x, area.y + 1);
        }
    }
}

fn room_item(room: &ChatRoom, selected: bool) -> ListItem<'static> {
    let marker = if room.is_direct {
        Span::styled("@ ", Style::default().fg(Color::Blue))
    } else {
        Span::styled("# ", Style::default().fg(Color::Magenta))
    };
    let mut spans = vec![marker, Span::raw(room.name)];
    if room.unread > 0 {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!(" {} ", room.unread),
            Style::default()
                .bg(Color::Red)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
    }
    let style = if selected {
        Style::default().bg(Color::LightBlue).fg(Color::Black)
    } else {
        Style::default()
    };
    ListItem::new(Line::from(spans)).style(style)
}

fn render_room_header(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![Span::styled(
        state.room_title(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(room) = state.selected_room() {
        let kind = if room.is_direct { "  direct" } else { "  group" };
        spans.push(Span::styled(kind, Style::default().fg(Color::DarkGray)));
    }
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Header, the text wrapped to `width` columns, then a blank spacer.
pub fn message_lines(message: &ChatMessage, width: u16) -> Vec<Line<'_>> {
    let alignment = if message.is_from_current_user {
        Alignment::Right
    } else {
        Alignment::Left
    };
    let body_style = if message.is_from_current_user {
        Style::default().fg(Color::White).bg(Color::Blue)
    } else {
        Style::default()
    };
    let marker = || Span::styled("▌", Style::default().fg(Color::Yellow));

    let mut header = Vec::new();
    if message.mention {
        header.push(marker());
    }
    header.push(Span::styled(
        message.sender.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    header.push(Span::raw("  "));
    header.push(Span::styled(
        message.timestamp.as_str(),
        Style::default().fg(Color::DarkGray),
    ));

    let text_style = if message.mention {
        body_style.fg(Color::Yellow)
    } else {
        body_style
    };
    let text_width = if message.mention {
        width.saturating_sub(1)
    } else {
        width
    };

    let mut lines = vec![Line::from(header).alignment(alignment)];
    for row in wrap_text(&message.text, usize::from(text_width)) {
        let mut body = Vec::new();
        if message.mention {
            body.push(marker());
        }
        body.push(Span::styled(row, text_style));
        lines.push(Line::from(body).alignment(alignment));
    }
    lines.push(Line::from(""));
    lines
}

/// Greedy word wrap by character count. Words longer than `width` are split.
/// Text that already fits comes back unchanged.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 || text.chars().count() <= width {
        return vec![text.to_string()];
    }

    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                rows.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            rows.push(word.into_iter().collect());
            word = rest;
        }
        if word.is_empty() {
            continue;
        }
        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > width {
            rows.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }
    if current_len > 0 || rows.is_empty() {
        rows.push(current);
    }
    rows
}

/// Every message in the log is shown whatever room is selected.
fn render_messages(frame: &mut Frame, area: Rect, state: &ViewState) {
    let lines: Vec<Line> = state
        .log
        .messages()
        .iter()
        .flat_map(|message| message_lines(message, area.width))
        .collect();

    // Keep the newest messages in view
    let overflow = lines.len().saturating_sub(area.height as usize);
    let offset = u16::try_from(overflow).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomId;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_room_navigation_selects() {
        let mut chat = Chat::new();
        let state = ViewState::default();
        chat.handle_key(press(KeyCode::Down), &state);
        chat.handle_key(press(KeyCode::Char('j')), &state);
        let action = chat.handle_key(press(KeyCode::Enter), &state);
        assert_eq!(action, Action::SelectRoom(RoomId(3)));
        assert_eq!(chat.focus(), ChatFocus::Draft);
        assert!(chat.captures_text());
    }

    #[test]
    fn test_cursor_clamps() {
        let mut chat = Chat::new();
        let state = ViewState::default();
        for _ in 0..10 {
            chat.handle_key(press(KeyCode::Down), &state);
        }
        assert_eq!(chat.cursor(), 4);
        for _ in 0..10 {
            chat.handle_key(press(KeyCode::Up), &state);
        }
        assert_eq!(chat.cursor(), 0);
    }

    #[test]
    fn test_draft_editing() {
        let mut chat = Chat::new();
        chat.set_focus(ChatFocus::Draft);
        let state = ViewState::default().set_draft_text("hi".to_string());
        assert_eq!(
            chat.handle_key(press(KeyCode::Char('!')), &state),
            Action::EditDraft("hi!".to_string())
        );
        assert_eq!(
            chat.handle_key(press(KeyCode::Backspace), &state),
            Action::EditDraft("h".to_string())
        );
        assert_eq!(chat.handle_key(press(KeyCode::Enter), &state), Action::Send);
        assert_eq!(
            chat.handle_key(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                &state
            ),
            Action::None
        );
    }

    #[test]
    fn test_filter_editing() {
        let mut chat = Chat::new();
        let state = ViewState::default();
        chat.handle_key(press(KeyCode::Char('/')), &state);
        assert_eq!(chat.focus(), ChatFocus::Filter);
        assert_eq!(
            chat.handle_key(press(KeyCode::Char('e')), &state),
            Action::EditFilter("e".to_string())
        );
        assert_eq!(
            chat.handle_key(press(KeyCode::Esc), &state),
            Action::EditFilter(String::new())
        );
        assert_eq!(chat.focus(), ChatFocus::Rooms);
    }

    #[test]
    fn test_sync_cursor_follows_selection() {
        let mut chat = Chat::new();
        let state = ViewState::default().select_room(RoomId(4));
        chat.sync_cursor(&state);
        assert_eq!(chat.cursor(), 3);

        let state = state.select_room(RoomId(999));
        chat.sync_cursor(&state);
        assert_eq!(chat.cursor(), 3);
    }

    #[test]
    fn test_mention_lines_marked() {
        let state = ViewState::default();
        let mention = &state.log.messages()[3];
        let lines = message_lines(mention, 120);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].spans[0].content, "▌");
    }

    #[test]
    fn test_long_messages_wrap() {
        let state = ViewState::default();
        let last = &state.log.messages()[4];
        let lines = message_lines(last, 40);
        assert_eq!(lines.len(), 1 + 3 + 1);
        let body: Vec<String> = lines[1..4]
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect();
        assert!(body.iter().all(|row| row.chars().count() <= 40));
        assert_eq!(body.join(" "), last.text);
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("  as typed  ", 20), vec!["  as typed  "]);
        assert_eq!(wrap_text("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("ab abcdefgh", 4), vec!["ab", "abcd", "efgh"]);
        assert_eq!(wrap_text("", 4), vec![""]);
    }

    #[test]
    fn test_list_offset_follows_cursor() {
        let mut chat = Chat::new();
        chat.set_cursor(4, 5);
        assert_eq!(chat.list_offset(5, 3), 2);
        assert_eq!(chat.list_offset(5, 10), 0);
        chat.set_focus(ChatFocus::Draft);
        assert_eq!(chat.list_offset(5, 3), 0);
    }
}
