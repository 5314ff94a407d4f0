//! CSV Export
//!
//! Writes the chat message log to a CSV file.

use std::path::Path;

use super::ExportError;
use crate::domain::ChatMessage;

/// Write messages to CSV file
pub fn write_messages(path: &Path, messages: &[ChatMessage]) -> Result<usize, ExportError> {
    let mut wtr = csv::Writer::from_path(path)?;

    // Write header
    wtr.write_record(["id", "sender", "timestamp", "from_current_user", "mention", "text"])?;

    // Write data rows
    for message in messages {
        wtr.write_record([
            message.id.to_string(),
            message.sender.clone(),
            message.timestamp.clone(),
            message.is_from_current_user.to_string(),
            message.mention.to_string(),
            message.text.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(messages.len())
}
