use chrono::{DateTime, Utc};
use eftrace_types::{EventKind, ParsedLogResult, session_id_for};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingInsight {
    pub session_id: String,
    pub events: u64,
    pub first: DateTime<Utc>,
    pub last: DateTime<Utc>,
    pub duration_seconds: i64,
    /// Deduplicated, first-seen order
    pub group_ids: Vec<String>,
}

pub(super) fn build(results: &[ParsedLogResult]) -> Vec<MatchingInsight> {
    let mut insights: Vec<MatchingInsight> = Vec::new();

    for result in results {
        let session_id = session_id_for(result);
        for event in &result.events {
            if event.kind() != EventKind::Matchmaking {
                continue;
            }
            let ts = event.timestamp;

            let idx = match insights.iter().position(|m| m.session_id == session_id) {
                Some(idx) => idx,
                None => {
                    insights.push(MatchingInsight {
                        session_id: session_id.clone(),
                        events: 0,
                        first: ts,
                        last: ts,
                        duration_seconds: 0,
                        group_ids: Vec::new(),
                    });
                    insights.len() - 1
                }
            };
            let insight = &mut insights[idx];
            insight.events += 1;
            insight.first = insight.first.min(ts);
            insight.last = insight.last.max(ts);
            insight.duration_seconds = (insight.last - insight.first).num_seconds();
            if let Some(group) = event.fields.key_string("groupId")
                && !insight.group_ids.contains(&group)
            {
                insight.group_ids.push(group);
            }
        }
    }

    insights
}
