//! Templated empathetic responses with safety escalation

use crate::domain::interpret::SafetyFlags;
use serde::Serialize;

const ANXIETY_MESSAGE: &str = "I hear you. It sounds like anxiety has been coming up. \
     Would you like a short grounding exercise or a journaling prompt?";
const JOY_MESSAGE: &str =
    "That's lovely to hear. Care to note what helped so we can keep it up?";
const NEUTRAL_MESSAGE: &str = "Thanks for sharing. If you'd like, I can suggest a short \
     calming practice or a journaling question.";
const CRISIS_MESSAGE: &str = "I'm concerned by what you shared. If you're in danger or \
     thinking about harming yourself, please contact emergency services or a crisis line \
     immediately. Would you like resources?";

/// A follow-up offered with a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Suggestion {
    Breathing { id: String },
    Journaling { prompt: String },
    Resource { id: String },
}

/// Inputs for crafting a response
#[derive(Debug, Clone, Default)]
pub struct ResponseContext {
    pub emotions: Vec<String>,
    pub safety_flags: SafetyFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CraftedResponse {
    pub message: String,
    pub suggestions: Vec<Suggestion>,
}

/// Pick a templated message for the detected emotions
///
/// A self-harm flag always replaces the message with crisis guidance.
pub fn craft_response(context: &ResponseContext) -> CraftedResponse {
    if context.safety_flags.self_harm_risk {
        return CraftedResponse {
            message: CRISIS_MESSAGE.to_string(),
            suggestions: vec![Suggestion::Resource {
                id: "crisis_hotline".to_string(),
            }],
        };
    }

    let has = |name: &str| context.emotions.iter().any(|e| e == name);

    if has("anxiety") {
        CraftedResponse {
            message: ANXIETY_MESSAGE.to_string(),
            suggestions: vec![
                Suggestion::Breathing {
                    id: "s:breath_4_4".to_string(),
                },
                Suggestion::Journaling {
                    prompt: "What's one small thing that felt manageable today?".to_string(),
                },
            ],
        }
    } else if has("joy") {
        CraftedResponse {
            message: JOY_MESSAGE.to_string(),
            suggestions: vec![Suggestion::Journaling {
                prompt: "What made today good?".to_string(),
            }],
        }
    } else {
        CraftedResponse {
            message: NEUTRAL_MESSAGE.to_string(),
            suggestions: Vec::new(),
        }
    }
}
