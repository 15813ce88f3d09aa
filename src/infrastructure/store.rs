//! Entry store abstraction and the in-memory implementation

use crate::domain::records::{emotion_key, EmotionCategory, JournalEntry, Record};
use crate::error::Result;
use std::collections::BTreeMap;

/// Keyed record storage queried by predicate
///
/// Records are keyed by [`Record::key`]; `set` replaces any record with the same key.
pub trait EntryStore {
    /// All records matching `predicate`, in key order
    fn query(&self, predicate: &dyn Fn(&Record) -> bool) -> Vec<Record>;

    /// Insert or replace a record
    fn set(&mut self, record: Record) -> Result<()>;

    /// Insert or replace several records as one batch
    fn set_all(&mut self, records: Vec<Record>) -> Result<()> {
        for record in records {
            self.set(record)?;
        }
        Ok(())
    }

    /// Number of stored records that could not be decoded
    fn malformed_count(&self) -> usize {
        0
    }

    fn contains_key(&self, key: &str) -> bool {
        !self.query(&|r: &Record| r.key() == key).is_empty()
    }

    fn entries(&self) -> Vec<JournalEntry> {
        self.query(&Record::is_entry)
            .into_iter()
            .filter_map(|r| match r {
                Record::JournalEntry(entry) => Some(entry),
                _ => None,
            })
            .collect()
    }

    fn emotions(&self) -> Vec<EmotionCategory> {
        self.query(&Record::is_emotion)
            .into_iter()
            .filter_map(|r| match r {
                Record::Emotion(emotion) => Some(emotion),
                _ => None,
            })
            .collect()
    }

    fn find_emotion(&self, name: &str) -> Option<EmotionCategory> {
        let key = emotion_key(name);
        self.query(&|r: &Record| r.key() == key)
            .into_iter()
            .find_map(|r| match r {
                Record::Emotion(emotion) => Some(emotion),
                _ => None,
            })
    }
}

/// Ordered in-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, Record>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl EntryStore for MemoryStore {
    fn query(&self, predicate: &dyn Fn(&Record) -> bool) -> Vec<Record> {
        self.records
            .values()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    fn set(&mut self, record: Record) -> Result<()> {
        self.records.insert(record.key(), record);
        Ok(())
    }

    fn contains_key(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::Trigger;

    fn entry(id: &str) -> Record {
        Record::JournalEntry(JournalEntry {
            id: id.to_string(),
            timestamp: Some("2025-01-17T08:00:00Z".to_string()),
            text: String::new(),
            moods_detected: vec!["joy".to_string()],
            score: Some(0.4),
            user_id: "u1".to_string(),
        })
    }

    #[test]
    fn test_set_replaces_same_key() {
        let mut store = MemoryStore::new();
        store
            .set(Record::Emotion(EmotionCategory::first_seen("joy", None)))
            .unwrap();
        store
            .set(Record::Emotion(EmotionCategory::first_seen(
                "joy",
                Some("2025-01-17"),
            )))
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.find_emotion("joy").unwrap().last_seen.as_deref(),
            Some("2025-01-17")
        );
    }

    #[test]
    fn test_query_by_kind() {
        let mut store = MemoryStore::new();
        store
            .set_all(vec![
                entry("je:2"),
                entry("je:1"),
                Record::Emotion(EmotionCategory::first_seen("joy", None)),
                Record::Trigger(Trigger {
                    id: "trg:je:1:0".to_string(),
                    name: "deadline".to_string(),
                    entry_id: "je:1".to_string(),
                }),
            ])
            .unwrap();

        let ids: Vec<String> = store.entries().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["je:1", "je:2"]);
        assert_eq!(store.emotions().len(), 1);
        assert!(store.contains_key("trg:je:1:0"));
        assert!(store.find_emotion("anger").is_none());
        assert_eq!(store.malformed_count(), 0);
    }
}
