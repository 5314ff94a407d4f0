//! Export Module
//!
//! Writes the chat log and the dashboard datasets to files.
//!
//! - 'e' key or `:export [dir]` in the app, `--export <dir>` on the CLI
//! - Message log → CSV
//! - Dashboard datasets with their derived chart values → JSON

mod csv_export;
mod json_export;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::core::{Action, NotifyLevel};
use crate::state::ViewState;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create export directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub messages_path: PathBuf,
    pub message_count: usize,
    pub dashboard_path: PathBuf,
}

/// Generate a timestamped filename, to the millisecond
fn generate_filename(prefix: &str, extension: &str, now: DateTime<Local>) -> String {
    let timestamp = now.format("%Y-%m-%d-%H%M%S-%3f");
    format!("{}-{}.{}", prefix, timestamp, extension)
}

/// A path in `dir` that no earlier export has taken. Collisions get a
/// numeric suffix.
fn unique_path(dir: &Path, prefix: &str, extension: &str, now: DateTime<Local>) -> PathBuf {
    let path = dir.join(generate_filename(prefix, extension, now));
    if !path.exists() {
        return path;
    }
    let stem = generate_filename(prefix, "", now);
    let stem = stem.trim_end_matches('.');
    (1u32..)
        .map(|n| dir.join(format!("{}-{}.{}", stem, n, extension)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(path)
}

/// Write both exports into `dir`, creating it if needed.
pub fn export_all(
    dir: &Path,
    state: &ViewState,
    now: DateTime<Local>,
) -> Result<ExportSummary, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let messages_path = unique_path(dir, "messages", "csv", now);
    let message_count = csv_export::write_messages(&messages_path, state.log.messages())?;

    let dashboard_path = unique_path(dir, "dashboard", "json", now);
    json_export::write_dashboard(&dashboard_path)?;

    Ok(ExportSummary {
        messages_path,
        message_count,
        dashboard_path,
    })
}

/// Run an export and describe the outcome for the status line.
pub fn export_action(dir: &Path, state: &ViewState) -> Action {
    match export_all(dir, state, Local::now()) {
        Ok(summary) => {
            tracing::info!(
                dir = %dir.display(),
                messages = summary.message_count,
                "export written"
            );
            Action::Notify(
                format!(
                    "Exported {} messages and dashboard data to {}",
                    summary.message_count,
                    dir.display()
                ),
                NotifyLevel::Info,
            )
        }
        Err(err) => {
            tracing::warn!(error = %err, dir = %dir.display(), "export failed");
            Action::Notify(format!("Export failed: {}", err), NotifyLevel::Error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generate_filename() {
        let now = Local.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap()
            + chrono::Duration::milliseconds(42);
        assert_eq!(
            generate_filename("messages", "csv", now),
            "messages-2026-03-04-050607-042.csv"
        );
    }

    #[test]
    fn test_repeated_exports_keep_earlier_files() {
        let dir = tempfile::tempdir().unwrap();
        let now = Local::now();
        let first = export_all(dir.path(), &ViewState::default(), now).unwrap();
        let second = export_all(dir.path(), &ViewState::default(), now).unwrap();
        assert_ne!(first.messages_path, second.messages_path);
        assert_ne!(first.dashboard_path, second.dashboard_path);
        assert!(second.messages_path.to_string_lossy().ends_with("-1.csv"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 4);
    }

    #[test]
    fn test_export_all_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested");
        let summary = export_all(&target, &ViewState::default(), Local::now()).unwrap();
        assert_eq!(summary.message_count, 5);
        assert!(summary.messages_path.exists());
        assert!(summary.dashboard_path.exists());
    }

    #[test]
    fn test_export_action_reports_failure() {
        let file = tempfile::NamedTempFile::new().unwrap();
        // A regular file cannot be used as a directory
        let action = export_action(&file.path().join("sub"), &ViewState::default());
        assert!(matches!(action, Action::Notify(_, NotifyLevel::Error)));
    }
}
