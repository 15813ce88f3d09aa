//! List emotions use case

use crate::domain::EmotionCategory;
use crate::infrastructure::EntryStore;

/// All emotion categories, ordered by name.
pub fn list_emotions<S: EntryStore + ?Sized>(store: &S) -> Vec<EmotionCategory> {
    let mut emotions = store.emotions();
    emotions.sort_by(|a, b| a.name.cmp(&b.name));
    emotions
}
