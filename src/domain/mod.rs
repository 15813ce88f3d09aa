//! Domain layer - Mood records, trend math and response templates

pub mod day_bucket;
pub mod interpret;
pub mod records;
pub mod response;
pub mod trend;

pub use interpret::{Interpretation, Interpreter, KeywordInterpreter, SafetyFlags};
pub use records::{EmotionCategory, JournalEntry, Record, Trigger};
pub use response::{craft_response, CraftedResponse, ResponseContext, Suggestion};
pub use trend::{EmotionStats, Trend};
