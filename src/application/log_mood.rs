//! Log mood use case

use crate::domain::interpret::{Interpretation, Interpreter};
use crate::domain::records::{EmotionCategory, JournalEntry, Record, Trigger};
use crate::domain::response::ResponseContext;
use crate::error::Result;
use crate::infrastructure::store::EntryStore;
use serde::Serialize;
use std::collections::BTreeMap;

/// A mood entry as submitted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoodEntry {
    /// Explicit id; derived from the timestamp when absent
    pub id: Option<String>,
    pub user_id: String,
    pub timestamp: String,
    pub score: Option<f64>,
    pub tags: Vec<String>,
    pub text: String,
}

/// What logging an entry produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogOutcome {
    pub journal_id: String,
    /// Categories created by this entry, each once, in tag order
    pub created_emotions: Vec<String>,
    /// Present when the entry had text to interpret
    pub interpretation: Option<Interpretation>,
}

impl LogOutcome {
    /// Context for crafting a reply; untexted entries fall back to their tags
    pub fn response_context(&self, tags: &[String]) -> ResponseContext {
        match &self.interpretation {
            Some(interp) => ResponseContext {
                emotions: interp.primary_emotions.clone(),
                safety_flags: interp.safety_flags,
            },
            None => ResponseContext {
                emotions: tags.to_vec(),
                ..ResponseContext::default()
            },
        }
    }
}

/// Service for logging mood entries
pub struct LogMoodService<'a, S: ?Sized, I: ?Sized> {
    store: &'a mut S,
    interpreter: &'a I,
}

impl<'a, S, I> LogMoodService<'a, S, I>
where
    S: EntryStore + ?Sized,
    I: Interpreter + ?Sized,
{
    pub fn new(store: &'a mut S, interpreter: &'a I) -> Self {
        LogMoodService { store, interpreter }
    }

    /// Persist an entry, its emotion categories and any triggers
    ///
    /// Text is interpreted before anything is written, so an interpreter failure
    /// leaves the store untouched. All records go out as a single batch.
    pub fn execute(&mut self, entry: MoodEntry) -> Result<LogOutcome> {
        let interpretation = if entry.text.trim().is_empty() {
            None
        } else {
            Some(self.interpreter.interpret(&entry.text)?)
        };

        let journal_id = self.unique_id(
            entry
                .id
                .clone()
                .unwrap_or_else(|| format!("je:{}", entry.timestamp)),
        );

        let tags = entry.tags.clone();

        let mut pending: BTreeMap<String, EmotionCategory> = BTreeMap::new();
        let mut created_emotions = Vec::new();
        for tag in &tags {
            if let Some(emotion) = pending.get_mut(tag) {
                emotion.last_seen = Some(entry.timestamp.clone());
                continue;
            }
            let emotion = match self.store.find_emotion(tag) {
                Some(mut existing) => {
                    existing.last_seen = Some(entry.timestamp.clone());
                    existing
                }
                None => {
                    created_emotions.push(tag.clone());
                    EmotionCategory::first_seen(tag, Some(&entry.timestamp))
                }
            };
            pending.insert(tag.clone(), emotion);
        }

        let mut records = vec![Record::JournalEntry(JournalEntry {
            id: journal_id.clone(),
            timestamp: Some(entry.timestamp.clone()),
            text: entry.text.clone(),
            moods_detected: tags,
            score: entry.score,
            user_id: entry.user_id.clone(),
        })];
        records.extend(pending.into_values().map(Record::Emotion));

        if let Some(interp) = &interpretation {
            records.extend(interp.triggers.iter().enumerate().map(|(n, name)| {
                Record::Trigger(Trigger {
                    id: format!("trg:{}:{}", journal_id, n),
                    name: name.clone(),
                    entry_id: journal_id.clone(),
                })
            }));
        }

        self.store.set_all(records)?;

        tracing::info!(
            journal_id = %journal_id,
            created = created_emotions.len(),
            interpreted = interpretation.is_some(),
            "logged mood entry"
        );

        Ok(LogOutcome {
            journal_id,
            created_emotions,
            interpretation,
        })
    }

    /// `base`, or `base-2`, `base-3`, ... if already taken
    fn unique_id(&self, base: String) -> String {
        if !self.store.contains_key(&base) {
            return base;
        }
        (2..)
            .map(|n| format!("{}-{}", base, n))
            .find(|candidate| !self.store.contains_key(candidate))
            .unwrap_or(base)
    }
}
