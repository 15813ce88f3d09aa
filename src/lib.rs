//! mindmate - Mood journal with emotion trend tracking
//!
//! Logs short mood entries, buckets their tags into per-day counts, and
//! classifies each emotion as rising, falling or stable by comparing a
//! least-squares slope against its mean activity.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::MindmateError;
