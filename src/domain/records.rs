//! Stored record types: journal entries, emotion categories and triggers

use crate::domain::trend::Trend;
use serde::{Deserialize, Serialize};

/// A single submitted journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,

    /// Raw ISO-8601 timestamp as submitted. Normalized to UTC only when read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(default)]
    pub text: String,

    /// Mood tags in submission order (may repeat)
    #[serde(default)]
    pub moods_detected: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    #[serde(default)]
    pub user_id: String,
}

/// An emotion category, keyed by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionCategory {
    pub name: String,

    #[serde(default)]
    pub valence: f64,

    #[serde(default)]
    pub intensity: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<String>,

    /// Last classified trend; `None` until the analyzer has run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,

    #[serde(default)]
    pub trend_score: f64,
}

impl EmotionCategory {
    /// Create a category the first time its tag is observed
    pub fn first_seen(name: &str, timestamp: Option<&str>) -> Self {
        EmotionCategory {
            name: name.to_string(),
            valence: 0.0,
            intensity: 0.0,
            last_seen: timestamp.map(str::to_string),
            trend: None,
            trend_score: 0.0,
        }
    }
}

/// A situational trigger reported by the interpreter for an entry's text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub entry_id: String,
}

/// Anything the entry store holds, discriminated by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Record {
    JournalEntry(JournalEntry),
    Emotion(EmotionCategory),
    Trigger(Trigger),
}

impl Record {
    /// Unique key of this record within a store
    ///
    /// Emotion categories are keyed by name so that at most one record exists per name.
    pub fn key(&self) -> String {
        match self {
            Record::JournalEntry(entry) => entry.id.clone(),
            Record::Emotion(emotion) => emotion_key(&emotion.name),
            Record::Trigger(trigger) => trigger.id.clone(),
        }
    }

    pub fn is_entry(&self) -> bool {
        matches!(self, Record::JournalEntry(_))
    }

    pub fn is_emotion(&self) -> bool {
        matches!(self, Record::Emotion(_))
    }
}

/// Store key for the emotion category called `name`
pub fn emotion_key(name: &str) -> String {
    format!("emo:{}", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keys() {
        let emotion = Record::Emotion(EmotionCategory::first_seen("joy", None));
        assert_eq!(emotion.key(), "emo:joy");

        let trigger = Record::Trigger(Trigger {
            id: "trg:je:1:0".to_string(),
            name: "deadline".to_string(),
            entry_id: "je:1".to_string(),
        });
        assert_eq!(trigger.key(), "trg:je:1:0");
    }

    #[test]
    fn test_first_seen_is_unset() {
        let emotion = EmotionCategory::first_seen("anxiety", Some("2025-01-17T08:00:00Z"));
        assert_eq!(emotion.trend, None);
        assert_eq!(emotion.trend_score, 0.0);
        assert_eq!(emotion.last_seen.as_deref(), Some("2025-01-17T08:00:00Z"));
    }

    #[test]
    fn test_record_serializes_type_discriminator() {
        let record = Record::JournalEntry(JournalEntry {
            id: "je:1".to_string(),
            timestamp: Some("2025-01-17T08:00:00Z".to_string()),
            text: String::new(),
            moods_detected: vec!["joy".to_string()],
            score: None,
            user_id: "u1".to_string(),
        });

        let text = toml::to_string(&record).unwrap();
        assert!(text.contains("type = \"journal_entry\""));
        assert!(!text.contains("score"));

        let back: Record = toml::from_str(&text).unwrap();
        assert_eq!(back, record);
    }
}
