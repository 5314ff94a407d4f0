//! Actions that modules can return to communicate with the app

use std::path::PathBuf;

use crate::domain::RoomId;
use crate::state::Tab;

/// Actions returned by modules and the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action needed
    None,

    /// Switch the top-level tab
    Navigate(Tab),

    /// Select a chat room
    SelectRoom(RoomId),

    /// Replace the draft text
    EditDraft(String),

    /// Replace the room search text
    EditFilter(String),

    /// Send the current draft
    Send,

    /// Export datasets and the message log, optionally to a given directory
    Export(Option<PathBuf>),

    /// Show notification in status bar
    Notify(String, NotifyLevel),

    /// Toggle the help popup
    Help,

    /// Request quit
    Quit,
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}
