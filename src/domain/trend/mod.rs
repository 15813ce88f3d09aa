//! Trend analysis building blocks: windows, counting, slope and classification

pub mod classify;
pub mod counts;
pub mod slope;
pub mod window;

pub use classify::{classify, normalize, EmotionStats, Trend};
pub use counts::{counts_by_emotion, DayCounts, ScanReport, SkipReason};
pub use slope::slope;
pub use window::{AnalysisWindows, TimeWindow};
