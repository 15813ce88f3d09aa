//! Application layer - Use cases and orchestration

pub mod analyze;
pub mod init;
pub mod list_emotions;
pub mod log_mood;
pub mod manage_config;

pub use analyze::{AnalysisDiagnostics, TrendAnalyzer, TrendReport};
pub use list_emotions::list_emotions;
pub use log_mood::{LogMoodService, LogOutcome, MoodEntry};
pub use manage_config::ConfigService;
