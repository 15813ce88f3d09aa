//! Config management use case

use crate::error::{MindmateError, Result};
use crate::infrastructure::config::validate_window;
use crate::infrastructure::{Config, FileStore};

const VALID_KEYS: &str = "window_days, compare_days, rate_per_min, user_id";

/// Service for managing journal configuration
pub struct ConfigService {
    store: FileStore,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(store: FileStore) -> Self {
        ConfigService { store }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.store.load_config()?;

        match key {
            "window_days" => Ok(config.window_days.to_string()),
            "compare_days" => Ok(config.compare_days.to_string()),
            "rate_per_min" => Ok(config.rate_per_min.to_string()),
            "user_id" => Ok(config.user_id),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.store.load_config()?;

        match key {
            "window_days" => config.window_days = validate_window(parse_number(key, value)?)?,
            "compare_days" => config.compare_days = validate_window(parse_number(key, value)?)?,
            "rate_per_min" => config.rate_per_min = parse_number(key, value)?,
            "user_id" => {
                let user = value.trim();
                if user.is_empty() {
                    return Err(MindmateError::Config(
                        "user_id cannot be empty".to_string(),
                    ));
                }
                config.user_id = user.to_string();
            }
            _ => return Err(unknown_key(key)),
        }

        self.store.save_config(&config)
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.store.load_config()
    }
}

fn unknown_key(key: &str) -> MindmateError {
    MindmateError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key, VALID_KEYS
    ))
}

fn parse_number(key: &str, value: &str) -> Result<u32> {
    value.trim().parse().map_err(|_| {
        MindmateError::Config(format!(
            "Invalid value for {}: '{}' (expected a whole number)",
            key, value
        ))
    })
}
