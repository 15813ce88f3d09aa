//! Per-day mood tag counting over a time window

use crate::domain::day_bucket::{bucket_index, parse_timestamp};
use crate::domain::records::JournalEntry;
use crate::domain::trend::window::TimeWindow;
use std::collections::BTreeMap;

/// Emotion name -> one count per day of the window
pub type DayCounts = BTreeMap<String, Vec<u32>>;

/// Why an entry contributed nothing to a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkipReason {
    MissingTimestamp,
    UnparseableTimestamp,
    OutsideWindow,
}

/// What a scan saw, for diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Journal entries examined
    pub scanned: usize,
    /// Entries that landed in a bucket
    pub counted: usize,
    pub skipped: BTreeMap<SkipReason, usize>,
    /// Stored records the store could not decode
    pub malformed_records: usize,
}

impl ScanReport {
    pub fn skipped(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    /// Data-quality problems, as opposed to entries that are simply out of range
    pub fn faults(&self) -> usize {
        self.skipped(SkipReason::MissingTimestamp)
            + self.skipped(SkipReason::UnparseableTimestamp)
            + self.malformed_records
    }

    fn skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_insert(0) += 1;
    }
}

/// Count mood tags per emotion per day of `window`
///
/// Every name in `known` is pre-seeded with zeros so quiet categories still show
/// up. Entries with a missing or unparseable timestamp are skipped whole.
pub fn counts_by_emotion<'a, K, E>(known: K, entries: E, window: &TimeWindow) -> (DayCounts, ScanReport)
where
    K: IntoIterator<Item = &'a str>,
    E: IntoIterator<Item = &'a JournalEntry>,
{
    let mut counts = DayCounts::new();
    let mut report = ScanReport::default();

    for name in known {
        counts
            .entry(name.to_string())
            .or_insert_with(|| vec![0; window.days]);
    }

    for entry in entries {
        report.scanned += 1;

        let Some(raw) = entry.timestamp.as_deref().filter(|s| !s.trim().is_empty()) else {
            tracing::debug!(entry = %entry.id, "skipping entry without timestamp");
            report.skip(SkipReason::MissingTimestamp);
            continue;
        };
        let Some(t) = parse_timestamp(raw) else {
            tracing::debug!(entry = %entry.id, timestamp = raw, "skipping entry with unparseable timestamp");
            report.skip(SkipReason::UnparseableTimestamp);
            continue;
        };
        if !window.contains(t) {
            report.skip(SkipReason::OutsideWindow);
            continue;
        }
        let Some(day) = bucket_index(window.start, t, window.days) else {
            report.skip(SkipReason::OutsideWindow);
            continue;
        };

        for tag in &entry.moods_detected {
            counts
                .entry(tag.clone())
                .or_insert_with(|| vec![0; window.days])[day] += 1;
        }
        report.counted += 1;
    }

    (counts, report)
}
