//! Chat rooms and the append-only message log

use std::fmt::{self, Write as _};

use chrono::NaiveTime;
use serde::Serialize;

/// Fallback used when a configured time format cannot be rendered
pub const DEFAULT_TIME_FORMAT: &str = "%I:%M %p";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RoomId(pub u32);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChatRoom {
    pub id: RoomId,
    pub name: &'static str,
    pub unread: u32,
    pub is_direct: bool,
}

pub const CHAT_ROOMS: [ChatRoom; 5] = [
    ChatRoom {
        id: RoomId(1),
        name: "Project Alpha",
        unread: 3,
        is_direct: false,
    },
    ChatRoom {
        id: RoomId(2),
        name: "Design Team",
        unread: 0,
        is_direct: false,
    },
    ChatRoom {
        id: RoomId(3),
        name: "Engineering",
        unread: 7,
        is_direct: false,
    },
    ChatRoom {
        id: RoomId(4),
        name: "Alex Kim",
        unread: 0,
        is_direct: true,
    },
    ChatRoom {
        id: RoomId(5),
        name: "Raj Patel",
        unread: 2,
        is_direct: true,
    },
];

/// Look up a room by id. Unknown ids are not an error.
pub fn find_room(id: RoomId) -> Option<&'static ChatRoom> {
    CHAT_ROOMS.iter().find(|room| room.id == id)
}

/// Resolve user input to a room: numeric id first, then case-insensitive name.
pub fn resolve_room(query: &str) -> Option<&'static ChatRoom> {
    let query = query.trim();
    if let Ok(id) = query.parse::<u32>() {
        return find_room(RoomId(id));
    }
    CHAT_ROOMS
        .iter()
        .find(|room| room.name.eq_ignore_ascii_case(query))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: u64,
    pub sender: String,
    pub text: String,
    /// Display string, e.g. "09:45 AM"
    pub timestamp: String,
    pub is_from_current_user: bool,
    pub mention: bool,
}

impl ChatMessage {
    fn seed(id: u64, sender: &str, text: &str, timestamp: &str, mine: bool, mention: bool) -> Self {
        Self {
            id,
            sender: sender.to_string(),
            text: text.to_string(),
            timestamp: timestamp.to_string(),
            is_from_current_user: mine,
            mention,
        }
    }
}

/// Insertion-ordered log shared by every room.
///
/// Ids come from a counter that only moves forward, so they stay unique
/// even if the log is ever rebuilt from a subset of messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLog {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl MessageLog {
    pub fn from_messages(messages: Vec<ChatMessage>) -> Self {
        let next_id = messages.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        Self { messages, next_id }
    }

    /// The five messages the chat starts with.
    pub fn seeded(user_name: &str) -> Self {
        Self::from_messages(vec![
            ChatMessage::seed(
                1,
                "Alex Kim",
                "Has everyone reviewed the product requirements?",
                "9:30 AM",
                false,
                false,
            ),
            ChatMessage::seed(
                2,
                user_name,
                "Yes, I've gone through them. I have a few questions about the timeline.",
                "9:32 AM",
                true,
                false,
            ),
            ChatMessage::seed(
                3,
                "Raj Patel",
                "I think we should schedule a meeting to discuss the implementation details.",
                "9:35 AM",
                false,
                false,
            ),
            ChatMessage::seed(
                4,
                "Alex Kim",
                &format!("@{user_name} can you share your concerns about the timeline?"),
                "9:40 AM",
                false,
                true,
            ),
            ChatMessage::seed(
                5,
                user_name,
                "I'm concerned about the deadline for Phase 2. It seems too tight given the complexity.",
                "9:43 AM",
                true,
                false,
            ),
        ])
    }

    /// Append a message from the current user and return it.
    pub fn append_own(&mut self, sender: &str, text: String, timestamp: String) -> &ChatMessage {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            sender: sender.to_string(),
            text,
            timestamp,
            is_from_current_user: true,
            mention: false,
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }
}

/// Format a send time for display. A format string chrono cannot render
/// falls back to [`DEFAULT_TIME_FORMAT`].
pub fn format_timestamp(time: NaiveTime, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", time.format(format)).is_err() {
        return time.format(DEFAULT_TIME_FORMAT).to_string();
    }
    out
}
