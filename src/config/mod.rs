use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{RoomId, DEFAULT_TIME_FORMAT, DEFAULT_USER_NAME};
use crate::state::{Profile, Tab};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid time_format '{0}'")]
    InvalidTimeFormat(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub user_name: String,
    pub default_tab: Tab,
    pub default_room: u32,
    pub time_format: String,
    pub export_dir: Option<String>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_name: DEFAULT_USER_NAME.to_string(),
            default_tab: Tab::Dashboard,
            default_room: 1,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            export_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn profile(&self) -> Profile {
        let user_name = if self.user_name.trim().is_empty() {
            DEFAULT_USER_NAME.to_string()
        } else {
            self.user_name.trim().to_string()
        };
        Profile {
            user_name,
            time_format: self.time_format.clone(),
        }
    }

    pub fn default_room(&self) -> RoomId {
        RoomId(self.default_room)
    }

    /// Where exports go when no directory is given explicitly.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .as_deref()
            .and_then(expand_path)
            .or_else(|| data_dir().map(|dir| dir.join("exports")))
            .unwrap_or_else(|| PathBuf::from(".processpro").join("exports"))
    }
}

/// Load the config from `explicit`, or from the default location. A missing
/// default file is not an error; a missing explicit file is.
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return load_from(path);
    }
    let Some(path) = config_path() else {
        return Ok(Config::default());
    };
    if !path.exists() {
        return Ok(Config::default());
    }
    load_from(&path)
}

pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content).map_err(|err| match err {
        ParseFailure::Toml(source) => ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        },
        ParseFailure::Invalid(err) => err,
    })
}

enum ParseFailure {
    Toml(toml::de::Error),
    Invalid(ConfigError),
}

fn parse(content: &str) -> Result<Config, ParseFailure> {
    let config = toml::from_str::<Config>(content).map_err(ParseFailure::Toml)?;
    validate_time_format(&config.time_format).map_err(ParseFailure::Invalid)?;
    Ok(config)
}

/// Reject strftime strings chrono would fail to render.
pub fn validate_time_format(format: &str) -> Result<(), ConfigError> {
    if format.trim().is_empty() || StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::InvalidTimeFormat(format.to_string()));
    }
    Ok(())
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("PROCESSPRO_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("processpro").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("processpro").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "processpro", "processpro")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("processpro"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("processpro"));
    }
    directories::ProjectDirs::from("io", "processpro", "processpro")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn log_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("processpro.log"))
}

pub fn expand_path(path: &str) -> Option<PathBuf> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    if path == "~" {
        return std::env::var_os("HOME").map(PathBuf::from);
    }
    if let Some(rest) = path.strip_prefix("~/") {
        return std::env::var_os("HOME").map(|home| PathBuf::from(home).join(rest));
    }
    Some(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse("").ok().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.profile().user_name, "Swaathi");
    }

    #[test]
    fn test_partial_config() {
        let config = parse(
            r#"
user_name = "Morgan"
default_tab = "chat"
default_room = 3
"#,
        )
        .ok()
        .unwrap();
        assert_eq!(config.user_name, "Morgan");
        assert_eq!(config.default_tab, Tab::Chat);
        assert_eq!(config.default_room(), RoomId(3));
        assert_eq!(config.time_format, DEFAULT_TIME_FORMAT);
    }

    #[test]
    fn test_blank_user_falls_back() {
        let config = Config {
            user_name: "   ".to_string(),
            ..Config::default()
        };
        assert_eq!(config.profile().user_name, DEFAULT_USER_NAME);
    }

    #[test]
    fn test_time_format_validation() {
        assert!(validate_time_format("%I:%M %p").is_ok());
        assert!(validate_time_format("%H:%M").is_ok());
        assert!(validate_time_format("%Q").is_err());
        assert!(validate_time_format("").is_err());
    }

    #[test]
    fn test_load_from_reports_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_tab = \"settings\"").unwrap();
        let err = load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "time_format = \"%Q\"").unwrap();
        let err = load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeFormat(_)));

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            load(Some(&missing)).unwrap_err(),
            ConfigError::Read { .. }
        ));
    }

    #[test]
    fn test_expand_path() {
        assert_eq!(expand_path(""), None);
        assert_eq!(expand_path("/tmp/x"), Some(PathBuf::from("/tmp/x")));
    }
}
