use chrono::{DateTime, Duration, TimeZone, Utc};
use eftrace_types::{Fields, Level, LogEvent, LogMeta, LogType, ParsedLogResult};
use serde_json::Value;

/// Fixed reference time so snapshots stay stable
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 12, 13, 0, 0).unwrap()
}

/// Shorthand for `EventBuilder::new(log_type)`
pub fn event(log_type: LogType) -> EventBuilder {
    EventBuilder::new(log_type)
}

pub struct EventBuilder {
    event: LogEvent,
}

impl EventBuilder {
    pub fn new(log_type: LogType) -> Self {
        Self {
            event: LogEvent {
                timestamp: base_time(),
                level: Level::Info,
                message: String::new(),
                log_type,
                family: None,
                fields: Fields::new(),
            },
        }
    }

    pub fn family(mut self, family: &str) -> Self {
        self.event.family = Some(family.to_string());
        self
    }

    pub fn level(mut self, level: &str) -> Self {
        self.event.level = Level::from(level);
        self
    }

    pub fn message(mut self, message: &str) -> Self {
        self.event.message = message.to_string();
        self
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.event.fields.insert(key, value);
        self
    }

    /// Offset from [`base_time`] in seconds
    pub fn at(mut self, seconds: i64) -> Self {
        self.event.timestamp = base_time() + Duration::seconds(seconds);
        self
    }

    pub fn build(self) -> LogEvent {
        self.event
    }
}

pub struct ResultBuilder {
    result: ParsedLogResult,
}

impl ResultBuilder {
    pub fn new(log_type: LogType) -> Self {
        Self {
            result: ParsedLogResult {
                file_path: None,
                log_type,
                events: Vec::new(),
                meta: LogMeta::default(),
            },
        }
    }

    pub fn path(mut self, path: &str) -> Self {
        self.result.file_path = Some(path.to_string());
        self
    }

    pub fn session(mut self, prefix: &str) -> Self {
        self.result.meta.session_prefix = Some(prefix.to_string());
        self
    }

    /// Append an event; its log type is forced to the result's
    pub fn event(mut self, builder: EventBuilder) -> Self {
        let mut event = builder.build();
        event.log_type = self.result.log_type.clone();
        self.result.events.push(event);
        self
    }

    pub fn events(mut self, builders: impl IntoIterator<Item = EventBuilder>) -> Self {
        for builder in builders {
            self = self.event(builder);
        }
        self
    }

    /// Finish, filling `meta.earliest/latest` from the events
    pub fn build(mut self) -> ParsedLogResult {
        self.result.meta.earliest = self.result.events.iter().map(|e| e.timestamp).min();
        self.result.meta.latest = self.result.events.iter().map(|e| e.timestamp).max();
        self.result
    }
}
