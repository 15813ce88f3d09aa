//! Trend analysis use case
//!
//! Counts mood tags over the current and comparison windows, classifies each
//! emotion's trend and writes the result back onto the stored categories.

use crate::domain::records::Record;
use crate::domain::trend::{
    counts_by_emotion, AnalysisWindows, DayCounts, EmotionStats, ScanReport, SkipReason,
};
use crate::error::Result;
use crate::infrastructure::store::EntryStore;
use crate::infrastructure::config::validate_window;
use crate::infrastructure::Config;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Scan diagnostics for one analysis run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisDiagnostics {
    pub current: ScanReport,
    pub prev: ScanReport,
    /// Emotion categories whose trend fields changed
    pub updated_categories: usize,
}

/// Output of an analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendReport {
    /// Per-day counts for the current window
    pub current: DayCounts,
    /// Per-day counts for the comparison window
    pub prev: DayCounts,
    pub stats: BTreeMap<String, EmotionStats>,
    #[serde(skip)]
    pub diagnostics: AnalysisDiagnostics,
}

impl TrendReport {
    /// Total count in the current window minus the comparison window
    pub fn delta(&self, emotion: &str) -> i64 {
        let total = |counts: &DayCounts| -> i64 {
            counts
                .get(emotion)
                .map(|days| days.iter().map(|&c| i64::from(c)).sum())
                .unwrap_or(0)
        };
        total(&self.current) - total(&self.prev)
    }
}

/// Computes emotion trends over a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendAnalyzer {
    window_days: u32,
    compare_days: u32,
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        TrendAnalyzer::new(7, 7)
    }
}

impl TrendAnalyzer {
    pub fn new(window_days: u32, compare_days: u32) -> Self {
        TrendAnalyzer {
            window_days,
            compare_days,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        TrendAnalyzer::new(config.window_days, config.compare_days)
    }

    /// Analyze as of the current time
    pub fn analyze<S: EntryStore + ?Sized>(&self, store: Option<&mut S>) -> Result<TrendReport> {
        self.analyze_at(store, Utc::now())
    }

    /// Analyze as of `now`
    ///
    /// Without a store the report is empty. Only existing categories receive
    /// trend updates; none are created here. Window lengths outside 1..=366 days
    /// are rejected with `InvalidWindow`.
    pub fn analyze_at<S: EntryStore + ?Sized>(
        &self,
        store: Option<&mut S>,
        now: DateTime<Utc>,
    ) -> Result<TrendReport> {
        validate_window(self.window_days)?;
        validate_window(self.compare_days)?;

        let Some(store) = store else {
            tracing::debug!("no store attached, returning an empty trend report");
            return Ok(TrendReport::default());
        };

        let windows = AnalysisWindows::at(now, self.window_days, self.compare_days)?;
        let emotions = store.emotions();
        let entries = store.entries();
        let known = || emotions.iter().map(|e| e.name.as_str());

        let (current, mut current_scan) = counts_by_emotion(known(), &entries, &windows.current);
        let (prev, mut prev_scan) = counts_by_emotion(known(), &entries, &windows.prev);

        let malformed = store.malformed_count();
        current_scan.malformed_records = malformed;
        prev_scan.malformed_records = malformed;
        if current_scan.faults() > 0 {
            tracing::warn!(
                missing_timestamp = current_scan.skipped(SkipReason::MissingTimestamp),
                unparseable_timestamp = current_scan.skipped(SkipReason::UnparseableTimestamp),
                malformed_records = malformed,
                "some stored records could not be analyzed"
            );
        }

        let stats: BTreeMap<String, EmotionStats> = current
            .iter()
            .map(|(name, counts)| (name.clone(), EmotionStats::from_counts(counts)))
            .collect();

        let updates: Vec<Record> = emotions
            .into_iter()
            .filter_map(|mut emotion| {
                let s = stats.get(&emotion.name)?;
                if emotion.trend == Some(s.trend) && emotion.trend_score == s.norm_slope {
                    return None;
                }
                emotion.trend = Some(s.trend);
                emotion.trend_score = s.norm_slope;
                Some(Record::Emotion(emotion))
            })
            .collect();
        let updated_categories = updates.len();
        store.set_all(updates)?;

        tracing::info!(
            window_days = self.window_days,
            compare_days = self.compare_days,
            emotions = stats.len(),
            counted = current_scan.counted,
            updated = updated_categories,
            "trend analysis complete"
        );

        Ok(TrendReport {
            current,
            prev,
            stats,
            diagnostics: AnalysisDiagnostics {
                current: current_scan,
                prev: prev_scan,
                updated_categories,
            },
        })
    }
}
