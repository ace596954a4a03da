use eftrace_types::{EventKind, LogEvent};
use serde::{Deserialize, Serialize};

use super::{CountMap, bump};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushStats {
    pub connections: u64,
    pub drops: u64,
    pub notifications: u64,
}

impl PushStats {
    pub(crate) fn record(&mut self, event: &LogEvent) {
        match event.kind() {
            EventKind::PushConnectionParams => self.connections += 1,
            EventKind::PushDropped => self.drops += 1,
            EventKind::PushNotification => self.notifications += 1,
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioStats {
    pub init_successes: u64,
    pub occlusion_errors: u64,
}

impl AudioStats {
    pub(crate) fn record(&mut self, event: &LogEvent) {
        match event.kind() {
            EventKind::AudioInitSuccess => self.init_successes += 1,
            EventKind::AudioOcclusionError => self.occlusion_errors += 1,
            _ => {}
        }
    }
}

/// Counts from the errors log only. `Error`-level lines elsewhere are not
/// counted here; they already show up in their own category and in sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorStats {
    pub totals: u64,
    pub by_family: CountMap,
}

impl ErrorStats {
    pub(crate) fn record(&mut self, event: &LogEvent) {
        if event.kind() != EventKind::ErrorReport {
            return;
        }
        self.totals += 1;
        bump(&mut self.by_family, event.family().unwrap_or("unknown"));
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchmakingStats {
    /// Raw matchmaking events in iteration order
    pub events: Vec<LogEvent>,
    /// Distinct group ids, first-seen order
    pub group_ids: Vec<String>,
}

impl MatchmakingStats {
    pub(crate) fn record(&mut self, event: &LogEvent) {
        if event.kind() != EventKind::Matchmaking {
            return;
        }
        self.events.push(event.clone());
        if let Some(group) = event.fields.key_string("groupId")
            && !self.group_ids.contains(&group)
        {
            self.group_ids.push(group);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AntiCheatStats {
    pub init_lines: u64,
    /// Message of the last anticheat line in iteration order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_status: Option<String>,
    pub errors: u64,
}

impl AntiCheatStats {
    pub(crate) fn record(&mut self, event: &LogEvent) {
        match event.kind() {
            EventKind::AntiCheat => {
                self.init_lines += 1;
                self.last_status = Some(event.message.clone());
            }
            EventKind::ApplicationError if event.message.to_lowercase().contains("battleye") => {
                self.errors += 1;
            }
            _ => {}
        }
    }
}
