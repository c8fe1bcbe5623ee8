//! Run timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How much of the clock a run timestamp shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    #[default]
    Minute,
    Second,
}

impl Precision {
    fn pattern(self) -> &'static str {
        match self {
            Precision::Minute => "%Y-%m-%dT%H:%MZ",
            Precision::Second => "%Y-%m-%dT%H:%M:%SZ",
        }
    }
}

/// Format `now` as an ISO-8601 UTC timestamp.
pub fn format_timestamp(now: DateTime<Utc>, precision: Precision) -> String {
    now.format(precision.pattern()).to_string()
}
