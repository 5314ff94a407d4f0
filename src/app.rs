use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveTime};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::core::{parse_command, Action, Module, NotifyLevel};
use crate::modules::chat::{Chat, ChatFocus};
use crate::modules::dashboard::Dashboard;
use crate::modules::export;
use crate::state::{Tab, Update, ViewState};
use crate::ui::{layout, tabs};

/// Source of the wall-clock time stamped on sent messages
pub type Clock = fn() -> NaiveTime;

fn local_time() -> NaiveTime {
    Local::now().time()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
}

#[derive(Debug, Default, Clone)]
pub struct CommandBar {
    pub input: String,
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    level: NotifyLevel,
    since: Instant,
}

const STATUS_TTL: Duration = Duration::from_secs(3);

pub struct App {
    pub state: ViewState,
    pub dashboard: Dashboard,
    pub chat: Chat,
    pub input_mode: InputMode,
    pub command: CommandBar,
    pub export_dir: PathBuf,
    pub help_open: bool,
    pub should_quit: bool,
    status: Option<StatusMessage>,
    clock: Clock,
}

impl App {
    pub fn new(state: ViewState, export_dir: PathBuf) -> Self {
        let mut app = Self {
            state,
            dashboard: Dashboard::new(),
            chat: Chat::new(),
            input_mode: InputMode::Normal,
            command: CommandBar::default(),
            export_dir,
            help_open: false,
            should_quit: false,
            status: None,
            clock: local_time,
        };
        app.chat.sync_cursor(&app.state);
        app
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: NotifyLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, NotifyLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
    }

    pub fn active_module(&self) -> &dyn Module {
        match self.state.active_tab {
            Tab::Dashboard => &self.dashboard,
            Tab::Chat => &self.chat,
        }
    }

    fn dispatch(&mut self, update: Update) {
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(update);
    }

    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(tab) => {
                self.dispatch(Update::SelectTab(tab));
                tracing::debug!(%tab, module = self.active_module().id(), "select tab");
                if tab == Tab::Chat {
                    self.chat.sync_cursor(&self.state);
                }
            }
            Action::SelectRoom(id) => {
                tracing::debug!(room = %id, found = crate::domain::find_room(id).is_some(), "select room");
                self.dispatch(Update::SelectRoom(id));
                self.chat.sync_cursor(&self.state);
            }
            Action::EditDraft(text) => self.dispatch(Update::SetDraftText(text)),
            Action::EditFilter(text) => {
                self.dispatch(Update::SetRoomFilter(text));
                let visible = self.state.visible_rooms().len();
                let cursor = self.chat.cursor();
                self.chat.set_cursor(cursor, visible);
            }
            Action::Send => self.send(),
            Action::Export(dir) => {
                let dir = dir.unwrap_or_else(|| self.export_dir.clone());
                let action = export::export_action(&dir, &self.state);
                self.apply_action(action);
            }
            Action::Notify(text, level) => self.set_status(text, level),
            Action::Help => self.help_open = !self.help_open,
            Action::Quit => self.should_quit = true,
        }
    }

    fn send(&mut self) {
        let before = self.state.log.len();
        let sent_at = (self.clock)();
        self.dispatch(Update::SendMessage { sent_at });
        match self.state.log.last() {
            Some(message) if self.state.log.len() > before => {
                tracing::info!(
                    id = message.id,
                    room = %self.state.selected_room,
                    chars = message.text.chars().count(),
                    "message sent"
                );
            }
            _ => tracing::debug!("ignored blank draft"),
        }
    }

    pub fn enter_command(&mut self) {
        self.input_mode = InputMode::Command;
        self.command.input.clear();
    }

    pub fn exit_command(&mut self) {
        self.input_mode = InputMode::Normal;
        self.command.input.clear();
    }

    pub fn apply_command(&mut self) {
        let input = std::mem::take(&mut self.command.input);
        self.input_mode = InputMode::Normal;
        let action = parse_command(&input).into_action();
        self.apply_action(action);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.help_open {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
                self.help_open = false;
            }
            return;
        }

        if self.input_mode == InputMode::Command {
            self.handle_command_key(key);
            return;
        }

        if !self.active_module().captures_text() {
            let global = match key.code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::Help),
                KeyCode::Char('1') => Some(Action::Navigate(Tab::Dashboard)),
                KeyCode::Char('2') => Some(Action::Navigate(Tab::Chat)),
                KeyCode::Char('e') => Some(Action::Export(None)),
                KeyCode::Char(':') => {
                    self.enter_command();
                    return;
                }
                _ => None,
            };
            if let Some(action) = global {
                self.apply_action(action);
                return;
            }
        }

        let action = match self.state.active_tab {
            Tab::Dashboard => self.dashboard.handle_key(key, &self.state),
            Tab::Chat => self.chat.handle_key(key, &self.state),
        };
        self.apply_action(action);
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.exit_command(),
            KeyCode::Enter => self.apply_command(),
            KeyCode::Backspace => {
                self.command.input.pop();
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return;
                }
                self.command.input.push(ch);
            }
            _ => {}
        }
    }

    /// Mouse input, hit-tested against the layout of a `size` screen.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, size: Rect) {
        if self.help_open || self.input_mode == InputMode::Command {
            return;
        }
        let areas = layout::areas(size);
        let (col, row) = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if layout::rect_contains(areas.tabs, col, row) {
                    let titles = tabs::tab_titles();
                    if let Some(idx) =
                        layout::tab_at(&titles, tabs::DIVIDER_WIDTH, col, areas.tabs)
                    {
                        self.apply_action(Action::Navigate(Tab::ALL[idx]));
                    }
                    return;
                }
                if self.state.active_tab == Tab::Chat {
                    self.handle_chat_click(areas.body, col, row);
                }
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
                if self.state.active_tab == Tab::Chat =>
            {
                let chat = layout::chat_areas(areas.body);
                if layout::rect_contains(chat.rooms, col, row) {
                    let visible = self.state.visible_rooms().len();
                    let cursor = self.chat.cursor();
                    let next = if mouse.kind == MouseEventKind::ScrollUp {
                        cursor.saturating_sub(1)
                    } else {
                        cursor + 1
                    };
                    self.chat.set_focus(ChatFocus::Rooms);
                    self.chat.set_cursor(next, visible);
                }
            }
            _ => {}
        }
    }

    fn handle_chat_click(&mut self, body: Rect, col: u16, row: u16) {
        let chat = layout::chat_areas(body);
        if layout::rect_contains(chat.filter, col, row) {
            self.chat.set_focus(ChatFocus::Filter);
            return;
        }
        if layout::rect_contains(chat.draft, col, row) {
            self.chat.set_focus(ChatFocus::Draft);
            return;
        }
        let inner = layout::rect_inner(chat.rooms);
        if layout::rect_contains(inner, col, row) {
            let rooms = self.state.visible_rooms();
            let offset = self.chat.list_offset(rooms.len(), inner.height);
            let idx = offset + usize::from(row - inner.y);
            if let Some(room) = rooms.get(idx) {
                let id = room.id;
                self.chat.set_focus(ChatFocus::Rooms);
                self.chat.set_cursor(idx, rooms.len());
                self.apply_action(Action::SelectRoom(id));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomId;

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 30, 0).unwrap()
    }

    fn app() -> App {
        App::new(ViewState::default(), std::env::temp_dir()).with_clock(noon)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_number_keys_switch_tabs() {
        let mut app = app();
        app.handle_key(press(KeyCode::Char('2')));
        assert_eq!(app.state.active_tab, Tab::Chat);
        app.handle_key(press(KeyCode::Char('1')));
        assert_eq!(app.state.active_tab, Tab::Dashboard);
    }

    #[test]
    fn test_typing_q_in_draft_does_not_quit() {
        let mut app = app();
        app.handle_key(press(KeyCode::Char('2')));
        app.handle_key(press(KeyCode::Char('i')));
        app.handle_key(press(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert_eq!(app.state.draft, "q");

        app.handle_key(press(KeyCode::Esc));
        app.handle_key(press(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_send_stamps_clock() {
        let mut app = app();
        app.apply_action(Action::EditDraft("lunch?".to_string()));
        app.apply_action(Action::Send);
        let last = app.state.log.last().unwrap();
        assert_eq!(last.timestamp, "12:30 PM");
        assert_eq!(last.id, 6);
    }

    #[test]
    fn test_command_line_selects_room() {
        let mut app = app();
        app.handle_key(press(KeyCode::Char(':')));
        assert_eq!(app.input_mode, InputMode::Command);
        for ch in "room engineering".chars() {
            app.handle_key(press(KeyCode::Char(ch)));
        }
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.state.selected_room, RoomId(3));
        assert_eq!(app.chat.cursor(), 2);
    }

    #[test]
    fn test_unknown_command_warns() {
        let mut app = app();
        app.enter_command();
        app.command.input = "frobnicate".to_string();
        app.apply_command();
        let (text, level) = app.status_text().unwrap();
        assert!(text.contains("frobnicate"));
        assert_eq!(level, NotifyLevel::Warn);
    }

    #[test]
    fn test_help_swallows_keys() {
        let mut app = app();
        app.handle_key(press(KeyCode::Char('?')));
        assert!(app.help_open);
        app.handle_key(press(KeyCode::Char('2')));
        assert_eq!(app.state.active_tab, Tab::Dashboard);
        app.handle_key(press(KeyCode::Esc));
        assert!(!app.help_open);
    }

    #[test]
    fn test_click_tab_and_room() {
        let mut app = app();
        let size = Rect::new(0, 0, 120, 40);
        let areas = layout::areas(size);
        let click = |column, row| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };

        // "2:Chat" starts after " 1:Dashboards " and the divider
        app.handle_mouse(click(18, areas.tabs.y), size);
        assert_eq!(app.state.active_tab, Tab::Chat);

        let rooms = layout::rect_inner(layout::chat_areas(areas.body).rooms);
        app.handle_mouse(click(rooms.x + 1, rooms.y + 4), size);
        assert_eq!(app.state.selected_room, RoomId(5));
    }

    #[test]
    fn test_click_on_scrolled_room_list() {
        // Rooms pane with three visible rows
        let size = Rect::new(0, 0, 80, 14);
        let mut app = app();
        app.apply_action(Action::Navigate(Tab::Chat));
        app.apply_action(Action::SelectRoom(RoomId(5)));
        let areas = layout::areas(size);
        let rooms = layout::rect_inner(layout::chat_areas(areas.body).rooms);
        assert_eq!(rooms.height, 3);

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: rooms.x + 1,
            row: rooms.y,
            modifiers: KeyModifiers::NONE,
        };
        app.handle_mouse(click, size);
        assert_eq!(app.state.selected_room, RoomId(3));
    }
}
