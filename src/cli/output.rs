//! Output formatting utilities

use crate::application::{LogOutcome, TrendReport};
use crate::domain::{CraftedResponse, EmotionCategory, Suggestion};

/// Format a trend report as an aligned table
pub fn format_trend_table(report: &TrendReport) -> String {
    if report.stats.is_empty() {
        return "No emotions tracked yet".to_string();
    }

    let mut output = format!(
        "{:<16} {:<8} {:>7} {:>8} {:>5}  {}\n",
        "EMOTION", "TREND", "NORM", "CURRENT", "PREV", "DAYS"
    );
    for (name, stats) in &report.stats {
        let days = report.current.get(name).map(Vec::as_slice).unwrap_or(&[]);
        let current: u32 = days.iter().sum();
        let prev: u32 = report
            .prev
            .get(name)
            .map(|d| d.iter().sum())
            .unwrap_or(0);
        let days = days
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");

        output.push_str(&format!(
            "{:<16} {:<8} {:>+7.2} {:>8} {:>5}  {}\n",
            name,
            stats.trend,
            stats.norm_slope,
            current,
            prev,
            days
        ));
    }
    output
}

/// Format emotion categories for display
pub fn format_emotion_list(emotions: &[EmotionCategory]) -> String {
    if emotions.is_empty() {
        return "No emotions tracked yet".to_string();
    }

    let mut output = String::new();
    for emotion in emotions {
        let trend = emotion.trend.map(|t| t.as_str()).unwrap_or("unset");
        output.push_str(&format!(
            "{:<16} {:<8} {:>+7.2}  last seen {}\n",
            emotion.name,
            trend,
            emotion.trend_score,
            emotion.last_seen.as_deref().unwrap_or("never")
        ));
    }
    output
}

/// Format the reply to a logged entry
pub fn format_response(outcome: &LogOutcome, response: &CraftedResponse) -> String {
    let mut output = format!("{}\n", response.message);

    for suggestion in &response.suggestions {
        let line = match suggestion {
            Suggestion::Breathing { id } => format!("  • Breathing exercise ({})", id),
            Suggestion::Journaling { prompt } => format!("  • Journal: {}", prompt),
            Suggestion::Resource { id } => format!("  • Resource: {}", id),
        };
        output.push_str(&line);
        output.push('\n');
    }

    if !outcome.created_emotions.is_empty() {
        output.push_str(&format!(
            "\nNow tracking: {}\n",
            outcome.created_emotions.join(", ")
        ));
    }
    output.push_str(&format!("Logged {}\n", outcome.journal_id));
    output
}
