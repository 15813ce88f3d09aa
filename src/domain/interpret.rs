//! Keyword interpretation of free-text entries

use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Flags that escalate a response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyFlags {
    pub self_harm_risk: bool,
}

/// What an interpreter extracted from an entry's text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    pub primary_emotions: Vec<String>,
    pub triggers: Vec<String>,
    pub intensity: f64,
    pub safety_flags: SafetyFlags,
}

/// Turns free text into emotions, triggers and safety flags
pub trait Interpreter {
    fn interpret(&self, text: &str) -> Result<Interpretation>;
}

struct KeywordRule {
    label: &'static str,
    pattern: Regex,
}

fn rule(label: &'static str, pattern: &str) -> KeywordRule {
    KeywordRule {
        label,
        pattern: Regex::new(pattern).unwrap(),
    }
}

fn emotion_rules() -> &'static [KeywordRule] {
    static RULES: OnceLock<Vec<KeywordRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            rule("anxiety", r"(?i)stressed|anx|worried"),
            rule("joy", r"(?i)happy|great|joy"),
        ]
    })
}

fn trigger_rules() -> &'static [KeywordRule] {
    static RULES: OnceLock<Vec<KeywordRule>> = OnceLock::new();
    RULES.get_or_init(|| vec![rule("deadline", r"(?i)deadline|\bdue\b")])
}

fn danger_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?i)suicide|kill myself|want to die|end my life|hurt myself|self[- ]harm")
            .unwrap()
    })
}

fn matching_labels(rules: &[KeywordRule], text: &str) -> Vec<String> {
    rules
        .iter()
        .filter(|r| r.pattern.is_match(text))
        .map(|r| r.label.to_string())
        .collect()
}

/// Deterministic keyword heuristics; no model involved
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordInterpreter;

impl KeywordInterpreter {
    pub const DEFAULT_INTENSITY: f64 = 0.5;

    pub fn analyze(&self, text: &str) -> Interpretation {
        let mut primary_emotions = matching_labels(emotion_rules(), text);
        if primary_emotions.is_empty() {
            primary_emotions.push("neutral".to_string());
        }

        Interpretation {
            primary_emotions,
            triggers: matching_labels(trigger_rules(), text),
            intensity: Self::DEFAULT_INTENSITY,
            safety_flags: SafetyFlags {
                self_harm_risk: danger_regex().is_match(text),
            },
        }
    }
}

impl Interpreter for KeywordInterpreter {
    fn interpret(&self, text: &str) -> Result<Interpretation> {
        Ok(self.analyze(text))
    }
}

/// Inline `#hashtags` in entry text, lowercased, in order of appearance
pub fn inline_tags(text: &str) -> Vec<String> {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = REGEX.get_or_init(|| Regex::new(r"#([a-zA-Z0-9_-]+)").unwrap());
    regex
        .captures_iter(text)
        .map(|cap| cap[1].to_lowercase())
        .collect()
}
