//! Default parser for plain-text client logs.
//!
//! Layout of one entry:
//!
//! ```text
//! 2024-03-12 14:23:11.123 +01:00|0.14.1.2.29197|Info|backend|---> Request HTTPS, id [12]: URL: https://host/client/game/start
//! ```
//!
//! The log type comes from the file name (`<session prefix> <logType>_<NNN>.log`),
//! the family from keyword rules over the message, and fields from an embedded
//! JSON object plus any `Key: value` pairs.

mod family;
mod fields;
mod line;

use eftrace_types::{Level, LogEvent, LogMeta, LogType, ParsedLogResult, session_prefix_from_path};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::traits::LogParser;
use crate::{Error, Result};

static FILE_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<prefix>\S+)\s+)?(?P<log_type>[A-Za-z][A-Za-z-]*?)(?:_\d+)?\.(?:log|txt)$")
        .unwrap()
});

#[derive(Debug, Default, Clone, Copy)]
pub struct TextLogParser;

impl TextLogParser {
    pub fn new() -> Self {
        Self
    }
}

impl LogParser for TextLogParser {
    fn id(&self) -> &'static str {
        "text"
    }

    fn parse_text(&self, file_name: &str, content: &str) -> Result<ParsedLogResult> {
        let (log_type, session_prefix) = identify_file(file_name)?;

        let entries = line::split_entries(content);
        if entries.is_empty() {
            return Err(Error::parse(file_name, "no log entries found"));
        }

        let build_version = entries
            .iter()
            .map(|entry| entry.version.as_str())
            .find(|version| !version.is_empty())
            .map(str::to_string);

        let events: Vec<LogEvent> = entries
            .into_iter()
            .map(|entry| {
                let level = Level::from(entry.level);
                let (mut fields, message) = fields::extract_fields(&entry.message);
                family::infer_fields(&log_type, &message, &mut fields);
                let family = family::classify(&log_type, &level, &message);

                LogEvent {
                    timestamp: entry.timestamp,
                    level,
                    message,
                    log_type: log_type.clone(),
                    family,
                    fields,
                }
            })
            .collect();

        let meta = LogMeta {
            earliest: events.iter().map(|e| e.timestamp).min(),
            latest: events.iter().map(|e| e.timestamp).max(),
            build_version,
            session_prefix,
        };

        tracing::debug!(
            file = file_name,
            log_type = %log_type,
            events = events.len(),
            "parsed log file"
        );

        Ok(ParsedLogResult {
            file_path: Some(file_name.to_string()),
            log_type,
            events,
            meta,
        })
    }
}

/// Log type and session prefix from a file name (directories are ignored)
fn identify_file(file_name: &str) -> Result<(LogType, Option<String>)> {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file_name);

    let caps = FILE_NAME_PATTERN
        .captures(base)
        .ok_or_else(|| Error::UnrecognizedLogType(file_name.to_string()))?;

    let log_type = LogType::from(&caps["log_type"]);
    let session_prefix = caps
        .name("prefix")
        .and_then(|prefix| session_prefix_from_path(prefix.as_str()))
        .or_else(|| session_prefix_from_path(file_name));

    Ok((log_type, session_prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKEND_LOG: &str = "\
2024-03-12 14:23:11.000 +00:00|0.14.1.2.29197|Info|backend|---> Request HTTPS, id [1]: URL: https://prod.example.com/client/game/start, crc: .
2024-03-12 14:23:11.500 +00:00|0.14.1.2.29197|Info|backend|<--- Response HTTPS, id [1]: URL: https://prod.example.com/client/game/start, crc: , responseCode: 200
2024-03-12 14:23:12.000 +00:00|0.14.1.2.29197|Error|backend|TransportError on URL: /client/items, responseCode: 502";

    #[test]
    fn test_identify_file() {
        let (log_type, prefix) =
            identify_file("2024.03.12_14-22-58_0.14.1.2.29197 network-connection_000.log").unwrap();
        assert_eq!(log_type, LogType::NetworkConnection);
        assert_eq!(prefix.as_deref(), Some("2024.03.12_14-22-58_0.14.1.2.29197"));

        let (log_type, prefix) = identify_file("backendCache.log").unwrap();
        assert_eq!(log_type, LogType::BackendCache);
        assert_eq!(prefix, None);

        assert!(matches!(
            identify_file("notes.md"),
            Err(Error::UnrecognizedLogType(_))
        ));
    }

    #[test]
    fn test_session_prefix_from_parent_directory() {
        let (_, prefix) =
            identify_file("Logs/log_2024.03.12_14-22-58_0.14.1.2.29197/backend_000.log").unwrap();
        assert_eq!(prefix.as_deref(), Some("2024.03.12_14-22-58_0.14.1.2.29197"));
    }

    #[test]
    fn test_parse_backend_log() {
        let result = TextLogParser::new()
            .parse_text("2024.03.12_14-22-58_0.14.1.2.29197 backend_000.log", BACKEND_LOG)
            .unwrap();

        assert_eq!(result.log_type, LogType::Backend);
        assert_eq!(result.events.len(), 3);
        assert_eq!(result.events[0].family(), Some("request"));
        assert_eq!(result.events[0].fields.str("url"), Some("/client/game/start"));
        assert_eq!(result.events[1].family(), Some("response"));
        assert_eq!(result.events[1].fields.u64("responseCode"), Some(200));
        assert_eq!(result.events[2].family(), Some("transport_error"));
        assert!(result.events[2].level.is_error());

        assert_eq!(result.meta.build_version.as_deref(), Some("0.14.1.2.29197"));
        assert_eq!(result.meta.earliest, Some(result.events[0].timestamp));
        assert_eq!(result.meta.latest, Some(result.events[2].timestamp));
    }

    #[test]
    fn test_empty_content_is_a_parse_error() {
        let err = TextLogParser::new()
            .parse_text("backend_000.log", "no headers here\n")
            .unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }
}
