//! Command parser for the : command system

use std::path::PathBuf;

use super::{Action, NotifyLevel};
use crate::domain::resolve_room;
use crate::state::Tab;

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Navigation
    Dashboard,
    Chat,
    Room(String),

    // Output
    Export(Option<PathBuf>),

    Help,
    Quit,

    Unknown(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match cmd.to_lowercase().as_str() {
        "dashboard" | "dash" | "d" => Command::Dashboard,
        "chat" | "c" => Command::Chat,
        "room" | "r" => {
            if let Some(room) = args {
                Command::Room(room)
            } else {
                Command::Unknown(input.to_string())
            }
        }
        "export" | "e" => Command::Export(args.map(PathBuf::from)),
        "help" | "h" => Command::Help,
        "quit" | "q" => Command::Quit,
        _ => Command::Unknown(input.to_string()),
    }
}

impl Command {
    /// Translate into the action the app applies.
    pub fn into_action(self) -> Action {
        match self {
            Command::Dashboard => Action::Navigate(Tab::Dashboard),
            Command::Chat => Action::Navigate(Tab::Chat),
            Command::Room(query) => match resolve_room(&query) {
                Some(room) => Action::SelectRoom(room.id),
                None => Action::Notify(format!("No room matches '{query}'"), NotifyLevel::Warn),
            },
            Command::Export(dir) => Action::Export(dir),
            Command::Help => Action::Help,
            Command::Quit => Action::Quit,
            Command::Unknown(input) if input.is_empty() => Action::None,
            Command::Unknown(input) => {
                Action::Notify(format!("Unknown command: {input}"), NotifyLevel::Warn)
            }
        }
    }
}

/// One-line description for command-line completion hints
pub fn command_hint(input: &str) -> Option<&'static str> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let commands = [
        ("dashboard", "Show dashboards"),
        ("chat", "Show chat"),
        ("room", "Select room by id or name"),
        ("export", "Export datasets and messages"),
        ("help", "Show key bindings"),
        ("quit", "Quit"),
    ];

    for (cmd, desc) in commands {
        if cmd.starts_with(&input) {
            return Some(desc);
        }
    }
    None
}
