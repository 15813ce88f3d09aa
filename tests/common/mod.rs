use assert_cmd::Command;
use chrono::{NaiveDate, Utc};

pub fn mindmate_cmd() -> Command {
    let mut cmd = Command::cargo_bin("mindmate").unwrap();
    cmd.env_remove("MINDMATE_ROOT");
    cmd.env_remove("MINDMATE_RATE_PER_MIN");
    cmd.env_remove("MINDMATE_LOG");
    cmd
}

/// Today's UTC date
///
/// Tests that check day buckets through the real clock compare this before and
/// after running commands, and skip their exact assertions if midnight passed.
#[allow(dead_code)]
pub fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}
