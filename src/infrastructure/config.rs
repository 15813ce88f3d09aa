//! Configuration management

use crate::error::{MindmateError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Directory holding mindmate's own files inside a journal root
pub const MINDMATE_DIR: &str = ".mindmate";

/// Longest window the analyzer accepts, in days
pub const MAX_WINDOW_DAYS: u32 = 366;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Days in the current analysis window (ending today)
    pub window_days: u32,
    /// Days in the comparison window before it
    pub compare_days: u32,
    /// Interpreter calls admitted per minute
    pub rate_per_min: u32,
    /// User recorded on new entries unless overridden
    pub user_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            window_days: 7,
            compare_days: 7,
            rate_per_min: 30,
            user_id: Self::detect_default_user(),
        }
    }
}

impl Config {
    /// Load config from .mindmate/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(MINDMATE_DIR).join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MindmateError::NotMindmateDirectory(path.to_path_buf())
            } else {
                MindmateError::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| MindmateError::Config(format!("Failed to parse config.toml: {}", e)))?;
        validate_window(config.window_days)?;
        validate_window(config.compare_days)?;
        Ok(config)
    }

    /// Save config to .mindmate/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let dir = path.join(MINDMATE_DIR);
        let config_path = dir.join("config.toml");

        if !dir.exists() {
            fs::create_dir(&dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| MindmateError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Rate limit, honoring MINDMATE_RATE_PER_MIN when it holds a number
    pub fn effective_rate_per_min(&self) -> u32 {
        match std::env::var("MINDMATE_RATE_PER_MIN") {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "ignoring non-numeric MINDMATE_RATE_PER_MIN");
                self.rate_per_min
            }),
            Err(_) => self.rate_per_min,
        }
    }

    fn detect_default_user() -> String {
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "local".to_string())
    }
}

/// Check a window length in days
pub fn validate_window(days: u32) -> Result<u32> {
    if (1..=MAX_WINDOW_DAYS).contains(&days) {
        Ok(days)
    } else {
        Err(MindmateError::InvalidWindow(format!(
            "{} days is outside 1..={}",
            days, MAX_WINDOW_DAYS
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.window_days, 7);
        assert_eq!(config.compare_days, 7);
        assert_eq!(config.rate_per_min, 30);
        assert!(!config.user_id.is_empty());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            window_days: 14,
            ..Config::default()
        };

        config.save_to_dir(temp.path()).unwrap();
        assert!(temp.path().join(".mindmate/config.toml").exists());

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".mindmate")).unwrap();
        fs::write(
            temp.path().join(".mindmate/config.toml"),
            "compare_days = 3\n",
        )
        .unwrap();

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.compare_days, 3);
        assert_eq!(loaded.window_days, 7);
    }

    #[test]
    fn test_load_rejects_zero_window() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".mindmate")).unwrap();
        fs::write(temp.path().join(".mindmate/config.toml"), "window_days = 0\n").unwrap();

        match Config::load_from_dir(temp.path()).unwrap_err() {
            MindmateError::InvalidWindow(_) => {}
            other => panic!("Expected InvalidWindow, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();

        match Config::load_from_dir(temp.path()).unwrap_err() {
            MindmateError::NotMindmateDirectory(_) => {}
            _ => panic!("Expected NotMindmateDirectory error"),
        }
    }

    #[test]
    fn test_validate_window() {
        assert!(validate_window(0).is_err());
        assert_eq!(validate_window(1).unwrap(), 1);
        assert_eq!(validate_window(366).unwrap(), 366);
        assert!(validate_window(367).is_err());
    }
}
