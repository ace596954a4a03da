use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::fields::Fields;
use super::kind::EventKind;
use crate::log_type::LogType;

/// Severity as written in the log line
///
/// Matching is literal: only `Error` counts as an error and only
/// `Warn`/`Warning` count as warnings. Everything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Level {
    Error,
    Warn,
    Warning,
    Info,
    Debug,
    Trace,
    Other(String),
}

impl Level {
    pub fn as_str(&self) -> &str {
        match self {
            Level::Error => "Error",
            Level::Warn => "Warn",
            Level::Warning => "Warning",
            Level::Info => "Info",
            Level::Debug => "Debug",
            Level::Trace => "Trace",
            Level::Other(raw) => raw,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Level::Error)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Level::Warn | Level::Warning)
    }
}

impl From<&str> for Level {
    fn from(value: &str) -> Self {
        match value {
            "Error" => Level::Error,
            "Warn" => Level::Warn,
            "Warning" => Level::Warning,
            "Info" => Level::Info,
            "Debug" => Level::Debug,
            "Trace" => Level::Trace,
            other => Level::Other(other.to_string()),
        }
    }
}

impl From<String> for Level {
    fn from(value: String) -> Self {
        Level::from(value.as_str())
    }
}

impl From<Level> for String {
    fn from(value: Level) -> Self {
        match value {
            Level::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured record parsed from a log entry
///
/// Immutable once produced by a parser; the engine only ever reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Entry timestamp (UTC)
    pub timestamp: DateTime<Utc>,

    pub level: Level,

    /// Free-text message, continuation lines joined with `\n`
    pub message: String,

    /// Log family of the file this event came from
    pub log_type: LogType,

    /// Sub-classifier within the log type (e.g. "request", "response")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    /// Log-type specific attributes
    #[serde(default, skip_serializing_if = "Fields::is_empty")]
    pub fields: Fields,
}

impl LogEvent {
    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }

    /// Typed view of the (log type, family) pair
    pub fn kind(&self) -> EventKind {
        EventKind::classify(&self.log_type, self.family())
    }
}
