use chrono::{DateTime, Utc};
use eftrace_types::{LogType, ParsedLogResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorInsight {
    pub family: String,
    pub count: u64,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

// Only the errors log; application-level Error lines are not error reports.
pub(super) fn build(results: &[ParsedLogResult]) -> Vec<ErrorInsight> {
    let mut by_family: BTreeMap<&str, ErrorInsight> = BTreeMap::new();

    let events = results
        .iter()
        .filter(|r| r.log_type == LogType::Errors)
        .flat_map(|r| r.events.iter())
        .filter(|e| e.log_type == LogType::Errors);

    for event in events {
        let family = event.family().unwrap_or("unknown");
        let ts = event.timestamp;
        by_family
            .entry(family)
            .and_modify(|insight| {
                insight.count += 1;
                insight.first_seen = insight.first_seen.min(ts);
                insight.last_seen = insight.last_seen.max(ts);
            })
            .or_insert_with(|| ErrorInsight {
                family: family.to_string(),
                count: 1,
                first_seen: ts,
                last_seen: ts,
            });
    }

    let mut insights: Vec<ErrorInsight> = by_family.into_values().collect();
    insights.sort_by(|a, b| b.count.cmp(&a.count));
    insights
}
