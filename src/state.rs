//! View state container and its transitions
//!
//! Every change to what the user sees goes through [`ViewState::reduce`],
//! which consumes the old state and returns the new one. The shell owns the
//! only live instance and never mutates its fields directly.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::Deserialize;

use crate::domain::{self, ChatRoom, MessageLog, RoomId, CHAT_ROOMS, DEFAULT_TIME_FORMAT};

/// Top-level tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Dashboard,
    Chat,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Dashboard, Tab::Chat];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboards",
            Tab::Chat => "Chat",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Tab::Dashboard => '1',
            Tab::Chat => '2',
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::Dashboard => f.write_str("dashboard"),
            Tab::Chat => f.write_str("chat"),
        }
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dashboard" | "dashboards" | "dash" => Ok(Tab::Dashboard),
            "chat" => Ok(Tab::Chat),
            other => Err(format!("unknown tab '{other}' (expected dashboard or chat)")),
        }
    }
}

/// Who is typing and how their send times are shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user_name: String,
    pub time_format: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            user_name: domain::DEFAULT_USER_NAME.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

/// State transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    SelectTab(Tab),
    SelectRoom(RoomId),
    SetDraftText(String),
    SetRoomFilter(String),
    /// `sent_at` is read from the clock by the caller
    SendMessage { sent_at: NaiveTime },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub active_tab: Tab,
    pub selected_room: RoomId,
    pub draft: String,
    pub room_filter: String,
    pub log: MessageLog,
    pub profile: Profile,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(Profile::default())
    }
}

impl ViewState {
    pub fn new(profile: Profile) -> Self {
        Self {
            active_tab: Tab::Dashboard,
            selected_room: RoomId(1),
            draft: String::new(),
            room_filter: String::new(),
            log: MessageLog::seeded(&profile.user_name),
            profile,
        }
    }

    pub fn reduce(self, update: Update) -> Self {
        match update {
            Update::SelectTab(tab) => self.select_tab(tab),
            Update::SelectRoom(id) => self.select_room(id),
            Update::SetDraftText(text) => self.set_draft_text(text),
            Update::SetRoomFilter(text) => self.set_room_filter(text),
            Update::SendMessage { sent_at } => self.send_message(sent_at),
        }
    }

    pub fn select_tab(self, tab: Tab) -> Self {
        Self {
            active_tab: tab,
            ..self
        }
    }

    /// Any id is accepted, including ones not in the room list.
    pub fn select_room(self, id: RoomId) -> Self {
        Self {
            selected_room: id,
            ..self
        }
    }

    pub fn set_draft_text(self, text: String) -> Self {
        Self {
            draft: text,
            ..self
        }
    }

    pub fn set_room_filter(self, text: String) -> Self {
        Self {
            room_filter: text,
            ..self
        }
    }

    /// Append the draft to the log and clear it. A blank draft leaves the
    /// state untouched, draft included.
    pub fn send_message(mut self, sent_at: NaiveTime) -> Self {
        if self.draft.trim().is_empty() {
            return self;
        }
        let text = std::mem::take(&mut self.draft);
        let timestamp = domain::format_timestamp(sent_at, &self.profile.time_format);
        self.log.append_own(&self.profile.user_name, text, timestamp);
        self
    }

    pub fn selected_room(&self) -> Option<&'static ChatRoom> {
        domain::find_room(self.selected_room)
    }

    /// Header text for the chat pane; blank for an unknown room.
    pub fn room_title(&self) -> &'static str {
        self.selected_room().map(|room| room.name).unwrap_or("")
    }

    /// Rooms whose name contains the filter, case-insensitively.
    pub fn visible_rooms(&self) -> Vec<&'static ChatRoom> {
        let needle = self.room_filter.trim().to_lowercase();
        CHAT_ROOMS
            .iter()
            .filter(|room| needle.is_empty() || room.name.to_lowercase().contains(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = ViewState::default();
        assert_eq!(state.active_tab, Tab::Dashboard);
        assert_eq!(state.selected_room, RoomId(1));
        assert!(state.draft.is_empty());
        assert_eq!(state.log.len(), 5);
    }

    #[test]
    fn test_tab_parse() {
        assert_eq!("chat".parse::<Tab>(), Ok(Tab::Chat));
        assert_eq!("Dashboard".parse::<Tab>(), Ok(Tab::Dashboard));
        assert!("settings".parse::<Tab>().is_err());
    }

    #[test]
    fn test_send_uses_profile() {
        let profile = Profile {
            user_name: "Morgan".to_string(),
            time_format: "%H:%M".to_string(),
        };
        let state = ViewState::new(profile)
            .set_draft_text("ship it".to_string())
            .send_message(at(14, 5));
        let last = state.log.last().unwrap();
        assert_eq!(last.sender, "Morgan");
        assert_eq!(last.timestamp, "14:05");
        assert!(!last.mention);
    }

    #[test]
    fn test_send_keeps_surrounding_whitespace() {
        let state = ViewState::default()
            .set_draft_text("  padded  ".to_string())
            .send_message(at(9, 0));
        assert_eq!(state.log.last().unwrap().text, "  padded  ");
        assert!(state.draft.is_empty());
    }

    #[test]
    fn test_filter_does_not_change_selection() {
        let state = ViewState::default()
            .select_room(RoomId(3))
            .set_room_filter("kim".to_string());
        let names: Vec<&str> = state.visible_rooms().iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Alex Kim"]);
        assert_eq!(state.selected_room, RoomId(3));
    }

    #[test]
    fn test_unknown_room_title_is_blank() {
        let state = ViewState::default().select_room(RoomId(999));
        assert!(state.selected_room().is_none());
        assert_eq!(state.room_title(), "");
    }
}
