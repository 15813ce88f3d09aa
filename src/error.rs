//! Error types for mindmate

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for mindmate
#[derive(Debug, Error)]
pub enum MindmateError {
    #[error("Not a mindmate directory: {0}")]
    NotMindmateDirectory(PathBuf),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    #[error("Rate limit exceeded: at most {per_min} interpretations per minute")]
    RateLimited { per_min: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MindmateError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            MindmateError::NotMindmateDirectory(_) => 2,
            MindmateError::InvalidTimestamp(_) | MindmateError::InvalidWindow(_) => 3,
            MindmateError::RateLimited { .. } => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            MindmateError::NotMindmateDirectory(path) => {
                format!(
                    "Not a mindmate directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'mindmate init' in this directory to start a mood journal\n\
                    • Navigate to an existing mindmate directory\n\
                    • Set MINDMATE_ROOT environment variable to your journal path",
                    path.display()
                )
            }
            MindmateError::InvalidTimestamp(raw) => {
                format!(
                    "Invalid timestamp: '{}'\n\n\
                    Accepted formats:\n\
                    • RFC 3339: 2025-01-17T08:30:00Z, 2025-01-17T08:30:00+02:00\n\
                    • Without offset (read as UTC): 2025-01-17T08:30:00\n\
                    • Date only (midnight UTC): 2025-01-17\n\n\
                    Example:\n\
                    mindmate log \"slept badly\" --tag tired --at 2025-01-17T07:00:00Z",
                    raw
                )
            }
            MindmateError::InvalidWindow(msg) => {
                format!(
                    "Invalid window: {}\n\n\
                    Windows are whole days between 1 and 366.\n\
                    Example: mindmate trends --window 14 --compare 14",
                    msg
                )
            }
            MindmateError::RateLimited { per_min } => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Wait a minute and try again\n\
                    • Raise the limit: mindmate config rate_per_min {}\n\
                    • Or set MINDMATE_RATE_PER_MIN for a single run",
                    self,
                    per_min.saturating_mul(2)
                )
            }
            MindmateError::Config(msg) => {
                if msg.contains("Unknown config key") {
                    format!(
                        "{}\n\n\
                        Example: mindmate config window_days 14",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using MindmateError
pub type Result<T> = std::result::Result<T, MindmateError>;
