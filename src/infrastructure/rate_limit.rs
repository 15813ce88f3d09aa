//! Sliding-window rate limiting for interpreter calls

use crate::domain::day_bucket::parse_timestamp;
use crate::domain::interpret::{Interpretation, Interpreter};
use crate::error::{MindmateError, Result};
use crate::infrastructure::lock::with_exclusive_lock;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const WINDOW_SECS: i64 = 60;
const HISTORY_FILE: &str = "rate_limit.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct CallHistory {
    #[serde(default)]
    calls: Vec<String>,
}

#[derive(Debug)]
enum CallLog {
    Memory(Mutex<VecDeque<DateTime<Utc>>>),
    /// `rate_limit.toml` in a `.mindmate/` directory, shared by every process
    File(PathBuf),
}

/// Admits at most `per_min` calls in any sliding one-minute window
#[derive(Debug)]
pub struct RateLimiter {
    per_min: u32,
    log: CallLog,
}

impl RateLimiter {
    /// A limiter whose history lives only as long as it does
    pub fn new(per_min: u32) -> Self {
        RateLimiter {
            per_min,
            log: CallLog::Memory(Mutex::new(VecDeque::new())),
        }
    }

    /// A limiter whose history is kept in `state_dir` across invocations
    pub fn persistent(per_min: u32, state_dir: impl Into<PathBuf>) -> Self {
        RateLimiter {
            per_min,
            log: CallLog::File(state_dir.into()),
        }
    }

    pub fn per_min(&self) -> u32 {
        self.per_min
    }

    /// Record a call if the window has room
    pub fn allow(&self) -> Result<bool> {
        self.allow_at(Utc::now())
    }

    pub fn allow_at(&self, now: DateTime<Utc>) -> Result<bool> {
        match &self.log {
            CallLog::Memory(calls) => {
                let mut calls = calls
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                Ok(admit(&mut calls, now, self.per_min))
            }
            CallLog::File(dir) => with_exclusive_lock(dir, || {
                let path = dir.join(HISTORY_FILE);
                let mut calls = read_history(&path)?;
                let allowed = admit(&mut calls, now, self.per_min);
                write_history(&path, &calls)?;
                Ok(allowed)
            }),
        }
    }
}

fn admit(calls: &mut VecDeque<DateTime<Utc>>, now: DateTime<Utc>, per_min: u32) -> bool {
    let window = Duration::seconds(WINDOW_SECS);
    while let Some(&oldest) = calls.front() {
        if now - oldest > window {
            calls.pop_front();
        } else {
            break;
        }
    }

    if calls.len() < per_min as usize {
        calls.push_back(now);
        true
    } else {
        false
    }
}

fn read_history(path: &Path) -> Result<VecDeque<DateTime<Utc>>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(VecDeque::new()),
        Err(e) => return Err(MindmateError::Io(e)),
    };

    let history: CallHistory = toml::from_str(&contents).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "discarding unreadable rate limit history");
        CallHistory::default()
    });

    let mut calls: Vec<DateTime<Utc>> = history
        .calls
        .iter()
        .filter_map(|raw| parse_timestamp(raw))
        .collect();
    calls.sort();
    Ok(calls.into())
}

fn write_history(path: &Path, calls: &VecDeque<DateTime<Utc>>) -> Result<()> {
    let history = CallHistory {
        calls: calls.iter().map(|t| t.to_rfc3339()).collect(),
    };
    fs::write(path, toml::to_string(&history)?)?;
    Ok(())
}

/// Wraps an interpreter with a [`RateLimiter`]
#[derive(Debug)]
pub struct RateLimitedInterpreter<I> {
    inner: I,
    limiter: RateLimiter,
}

impl<I: Interpreter> RateLimitedInterpreter<I> {
    pub fn new(inner: I, per_min: u32) -> Self {
        Self::with_limiter(inner, RateLimiter::new(per_min))
    }

    pub fn with_limiter(inner: I, limiter: RateLimiter) -> Self {
        RateLimitedInterpreter { inner, limiter }
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }
}

impl<I: Interpreter> Interpreter for RateLimitedInterpreter<I> {
    fn interpret(&self, text: &str) -> Result<Interpretation> {
        if !self.limiter.allow()? {
            tracing::warn!(per_min = self.limiter.per_min, "interpreter rate limit hit");
            return Err(MindmateError::RateLimited {
                per_min: self.limiter.per_min,
            });
        }
        self.inner.interpret(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::KeywordInterpreter;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 17, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_admits_up_to_limit() {
        let limiter = RateLimiter::new(3);
        assert!(limiter.allow_at(t0()).unwrap());
        assert!(limiter.allow_at(t0()).unwrap());
        assert!(limiter.allow_at(t0()).unwrap());
        assert!(!limiter.allow_at(t0() + Duration::seconds(59)).unwrap());
    }

    #[test]
    fn test_window_slides() {
        let limiter = RateLimiter::new(2);
        assert!(limiter.allow_at(t0()).unwrap());
        assert!(limiter.allow_at(t0() + Duration::seconds(30)).unwrap());
        assert!(!limiter.allow_at(t0() + Duration::seconds(45)).unwrap());
        // the first call has aged out, the second has not
        assert!(limiter.allow_at(t0() + Duration::seconds(61)).unwrap());
        assert!(!limiter.allow_at(t0() + Duration::seconds(62)).unwrap());
    }

    #[test]
    fn test_zero_limit_rejects_everything() {
        let limiter = RateLimiter::new(0);
        assert!(!limiter.allow().unwrap());
    }

    #[test]
    fn test_persistent_history_is_shared() {
        let temp = TempDir::new().unwrap();

        let first = RateLimiter::persistent(2, temp.path());
        assert!(first.allow_at(t0()).unwrap());
        assert!(first.allow_at(t0() + Duration::seconds(10)).unwrap());

        let second = RateLimiter::persistent(2, temp.path());
        assert!(!second.allow_at(t0() + Duration::seconds(20)).unwrap());
        assert!(second.allow_at(t0() + Duration::seconds(61)).unwrap());

        let contents = fs::read_to_string(temp.path().join(HISTORY_FILE)).unwrap();
        assert!(!contents.contains("08:00:00+00:00"));
        assert!(contents.contains("08:00:10+00:00"));
        assert!(contents.contains("08:01:01+00:00"));
    }

    #[test]
    fn test_unreadable_history_starts_fresh() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(HISTORY_FILE), "calls = [not toml").unwrap();

        let limiter = RateLimiter::persistent(1, temp.path());
        assert!(limiter.allow_at(t0()).unwrap());
        assert!(!limiter.allow_at(t0()).unwrap());
    }

    #[test]
    fn test_wrapped_interpreter_reports_rate_limit() {
        let interpreter = RateLimitedInterpreter::new(KeywordInterpreter, 1);
        assert_eq!(interpreter.limiter().per_min(), 1);

        let first = interpreter.interpret("happy").unwrap();
        assert_eq!(first.primary_emotions, vec!["joy"]);

        match interpreter.interpret("happy").unwrap_err() {
            MindmateError::RateLimited { per_min } => assert_eq!(per_min, 1),
            other => panic!("Expected RateLimited, got {:?}", other),
        }
    }
}
