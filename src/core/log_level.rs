//! Log level table
//!
//! The table is the single source of truth for level names, their ranks and
//! the point at which output switches from the standard sink to the error sink.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Critical = 5,
}

/// Every recognized level, ordered by rank.
pub const LEVELS: [LogLevel; 6] = [
    LogLevel::Trace,
    LogLevel::Debug,
    LogLevel::Info,
    LogLevel::Warn,
    LogLevel::Error,
    LogLevel::Critical,
];

/// Ranks strictly above this value are written to the error sink.
pub const STDERR_SPLIT: u8 = (LEVELS.len() / 2) as u8;

impl LogLevel {
    /// Lowercase name, also used as the event name and the record `level` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Critical => "critical",
        }
    }

    #[inline]
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Look up a level by its exact table name.
    pub fn from_name(name: &str) -> Option<Self> {
        LEVELS.iter().copied().find(|level| level.as_str() == name)
    }

    /// Whether output at this level goes to the error sink.
    #[inline]
    pub fn routes_to_stderr(&self) -> bool {
        self.rank() > STDERR_SPLIT
    }
}

/// Rank of a level name, `None` for names outside the table.
pub fn rank_of(name: &str) -> Option<u8> {
    LogLevel::from_name(name).map(|level| level.rank())
}

/// Derive a threshold from a free-form string such as an environment variable.
///
/// Every level name appearing as a whole word (case-insensitive) is a
/// candidate and the least severe candidate wins. Returns `None` when nothing
/// matches; callers decide the fallback.
pub fn parse_threshold(input: &str) -> Option<LogLevel> {
    input
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty())
        .filter_map(|word| LogLevel::from_name(&word.to_lowercase()))
        .min()
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::from_name(&s.to_lowercase()).ok_or_else(|| format!("Invalid log level: '{}'", s))
    }
}
