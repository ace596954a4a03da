use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

// 2024-03-12 14:23:11.123 +01:00|0.14.1.2.29197|Info|backend|message
static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3})(?: ([+-]\d{2}:\d{2}))?\|([^|]*)\|([^|]*)\|([^|]*)\|(.*)$",
    )
    .unwrap()
});

/// One log entry before field extraction
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawEntry {
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub level: String,
    pub logger: String,
    pub message: String,
}

/// Split content into entries. Lines without a header continue the previous entry;
/// anything before the first header is dropped.
pub(crate) fn split_entries(content: &str) -> Vec<RawEntry> {
    let mut entries: Vec<RawEntry> = Vec::new();

    for line in content.lines() {
        if let Some(entry) = parse_header(line) {
            entries.push(entry);
            continue;
        }

        if line.trim().is_empty() {
            continue;
        }

        if let Some(last) = entries.last_mut() {
            last.message.push('\n');
            last.message.push_str(line.trim_end());
        }
    }

    entries
}

fn parse_header(line: &str) -> Option<RawEntry> {
    let caps = HEADER_PATTERN.captures(line)?;
    let timestamp = parse_timestamp(&caps[1], caps.get(2).map(|m| m.as_str()))?;

    Some(RawEntry {
        timestamp,
        version: caps[3].trim().to_string(),
        level: caps[4].trim().to_string(),
        logger: caps[5].trim().to_string(),
        message: caps[6].trim_end().to_string(),
    })
}

/// Local timestamps carry an optional UTC offset; without one they are taken as UTC
fn parse_timestamp(stamp: &str, offset: Option<&str>) -> Option<DateTime<Utc>> {
    match offset {
        Some(offset) => DateTime::parse_from_str(
            &format!("{} {}", stamp, offset),
            "%Y-%m-%d %H:%M:%S%.3f %:z",
        )
        .ok()
        .map(|dt| dt.with_timezone(&Utc)),
        None => NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S%.3f")
            .ok()
            .map(|naive| naive.and_utc()),
    }
}
