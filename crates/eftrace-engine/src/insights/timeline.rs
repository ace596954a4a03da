use chrono::{DateTime, TimeDelta, Utc};
use eftrace_types::{LogType, ParsedLogResult, session_id_for};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::selectors::{TimeBucket, time_buckets};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionTimeline {
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<i64>,
    pub log_types: Vec<LogType>,
    pub file_count: u64,
    pub event_count: u64,
    pub error_count: u64,
    pub warning_count: u64,
    /// Events per minute; `sum` counts error-level events in that minute
    pub activity: Vec<TimeBucket>,
}

pub(super) fn build(results: &[ParsedLogResult]) -> Vec<SessionTimeline> {
    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, Vec<&ParsedLogResult>> = HashMap::new();

    for result in results {
        let id = session_id_for(result);
        grouped
            .entry(id.clone())
            .or_insert_with(|| {
                order.push(id);
                Vec::new()
            })
            .push(result);
    }

    order
        .into_iter()
        .filter_map(|id| {
            let members = grouped.remove(&id)?;
            Some(timeline_for(id, &members))
        })
        .collect()
}

fn timeline_for(session_id: String, members: &[&ParsedLogResult]) -> SessionTimeline {
    let mut log_types: Vec<LogType> = Vec::new();
    for result in members {
        if !log_types.contains(&result.log_type) {
            log_types.push(result.log_type.clone());
        }
    }

    let start = members.iter().filter_map(|r| r.start_time()).min();
    let end = members.iter().filter_map(|r| r.end_time()).max();
    let duration_seconds = start.zip(end).map(|(s, e)| (e - s).num_seconds());

    let events = members.iter().flat_map(|r| r.events.iter());
    let activity = time_buckets(
        events.map(|e| (e.timestamp, Some(if e.level.is_error() { 1.0 } else { 0.0 }))),
        TimeDelta::minutes(1),
    );

    SessionTimeline {
        session_id,
        start,
        end,
        duration_seconds,
        log_types,
        file_count: members.len() as u64,
        event_count: members.iter().map(|r| r.events.len() as u64).sum(),
        error_count: members.iter().map(|r| r.error_count() as u64).sum(),
        warning_count: members.iter().map(|r| r.warning_count() as u64).sum(),
        activity,
    }
}
