use chrono::{DateTime, Utc};
use eftrace_types::{LogType, ParsedLogResult, session_id_for};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    /// Distinct log types, first-seen order
    pub log_types: Vec<LogType>,
    pub file_count: u64,
    pub event_count: u64,
    pub error_count: u64,
    pub warning_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_version: Option<String>,
}

impl SessionSummary {
    pub fn duration_seconds(&self) -> Option<i64> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((end - start).num_seconds()),
            _ => None,
        }
    }
}

#[derive(Default)]
pub(crate) struct SessionBuilder {
    sessions: Vec<SessionSummary>,
    index: HashMap<String, usize>,
}

impl SessionBuilder {
    pub(crate) fn add_result(&mut self, result: &ParsedLogResult) {
        let id = session_id_for(result);
        let event_count = result.events.len() as u64;
        let error_count = result.error_count() as u64;
        let warning_count = result.warning_count() as u64;
        let start = result.start_time();
        let end = result.end_time();

        if let Some(&idx) = self.index.get(&id) {
            let session = &mut self.sessions[idx];
            session.file_count += 1;
            session.event_count += event_count;
            session.error_count += error_count;
            session.warning_count += warning_count;
            if !session.log_types.contains(&result.log_type) {
                session.log_types.push(result.log_type.clone());
            }
            session.start = widen(session.start, start, std::cmp::min);
            session.end = widen(session.end, end, std::cmp::max);
            if session.build_version.is_none() {
                session.build_version = result.meta.build_version.clone();
            }
            return;
        }

        self.index.insert(id.clone(), self.sessions.len());
        self.sessions.push(SessionSummary {
            id,
            log_types: vec![result.log_type.clone()],
            file_count: 1,
            event_count,
            error_count,
            warning_count,
            start,
            end,
            build_version: result.meta.build_version.clone(),
        });
    }

    pub(crate) fn finish(self) -> Vec<SessionSummary> {
        self.sessions
    }
}

fn widen<T: Copy>(current: Option<T>, candidate: Option<T>, pick: fn(T, T) -> T) -> Option<T> {
    match (current, candidate) {
        (Some(a), Some(b)) => Some(pick(a, b)),
        (a, b) => a.or(b),
    }
}
