use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::CatalogConfig;

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Default config file path, respecting XDG_CONFIG_HOME
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"));
    config_dir.join("catalog").join("config.toml")
}

/// Directory for log files, respecting XDG_STATE_HOME
pub fn state_dir() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local").join("state"))
        .join("catalog")
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Read config from `path`. A missing file yields the defaults; a file that
/// exists but does not parse is an error.
pub fn read_config_from(path: &Path) -> Result<CatalogConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(CatalogConfig::default());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read config from an explicit path, or the default location.
pub fn read_config(explicit: Option<&Path>) -> Result<CatalogConfig, ConfigError> {
    match explicit {
        Some(p) => read_config_from(p),
        None => read_config_from(&config_path()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = read_config_from(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config.notification.duration_ms, 5000);
        assert_eq!(config.freshness.new_days, 5);
        assert_eq!(config.source.url, "http://localhost:3001");
        assert!(config.source.file.is_none());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r##"[source]
file = "projects.json"
web_url = "https://catalog.internal"

[ui.colors]
background = "#101010"
"##,
        )
        .unwrap();
        let config = read_config_from(&path).unwrap();
        assert_eq!(config.source.file, Some(PathBuf::from("projects.json")));
        assert_eq!(config.source.url, "http://localhost:3001");
        assert_eq!(config.source.timeout_secs, 10);
        assert_eq!(config.notification.duration_ms, 5000);
        assert_eq!(
            config.ui.colors.get("background").map(String::as_str),
            Some("#101010")
        );
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[notification]\nduration_ms = \"soon\"\n").unwrap();
        let err = read_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn huge_new_days_is_usable() {
        use crate::model::ProjectRecord;
        use crate::ops::freshness::is_new;
        use chrono::{Duration, Utc};

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[freshness]\nnew_days = 200000000000\n").unwrap();
        let config = read_config_from(&path).unwrap();
        let now = Utc::now();
        let record = ProjectRecord::new("atlas", "", "", now - Duration::days(30));
        assert!(is_new(&record, now, config.freshness.new_days));
    }
}
