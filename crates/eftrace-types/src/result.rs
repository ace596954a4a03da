use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::LogEvent;
use crate::log_type::LogType;

/// File-level metadata extracted by the parser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earliest: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest: Option<DateTime<Utc>>,

    /// Client build the file was written by (e.g. "0.14.1.2.29197")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_version: Option<String>,

    /// Shared file-name prefix identifying one client run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_prefix: Option<String>,
}

/// One parsed log file
///
/// Produced once by a parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedLogResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,

    pub log_type: LogType,

    /// Events in original in-file order
    pub events: Vec<LogEvent>,

    #[serde(default)]
    pub meta: LogMeta,
}

impl ParsedLogResult {
    pub fn error_count(&self) -> usize {
        self.events.iter().filter(|e| e.level.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.events.iter().filter(|e| e.level.is_warning()).count()
    }

    /// Earliest timestamp: meta first, then the events themselves
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.meta
            .earliest
            .or_else(|| self.events.iter().map(|e| e.timestamp).min())
    }

    /// Latest timestamp: meta first, then the events themselves
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.meta
            .latest
            .or_else(|| self.events.iter().map(|e| e.timestamp).max())
    }
}
