//! Statistics derivation.
//!
//! One pass over every event of every result, in the order the events
//! appear. Each category looks only at its own log type; sessions and
//! quests look at everything. Counters only ever go up.

mod backend;
mod entities;
mod network;
mod quests;
mod sessions;
mod signals;

pub use backend::{BackendStats, CacheStats, InventoryStats};
pub use network::{AddressStats, NetworkStats, RunningAverage};
pub use quests::{QuestStat, QuestStatus};
pub use sessions::SessionSummary;
pub use signals::{AntiCheatStats, AudioStats, ErrorStats, MatchmakingStats, PushStats};

use eftrace_types::{LogEvent, LogType, ParsedLogResult, ResolvedEntity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use entities::EntityRegistry;
use quests::QuestBuilder;
use sessions::SessionBuilder;

/// Category key -> count. Ordered so serialized output is byte-identical across runs.
pub type CountMap = BTreeMap<String, u64>;

pub(crate) fn bump(map: &mut CountMap, key: impl Into<String>) {
    *map.entry(key.into()).or_insert(0) += 1;
}

/// Aggregate of all events from one import
///
/// Rebuilt from scratch on every derivation; never patched incrementally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// One entry per session id, in first-seen order
    pub sessions: Vec<SessionSummary>,
    pub backend: BackendStats,
    pub cache: CacheStats,
    pub inventory: InventoryStats,
    pub network: NetworkStats,
    pub push: PushStats,
    pub audio: AudioStats,
    pub errors: ErrorStats,
    pub matchmaking: MatchmakingStats,
    pub anticheat: AntiCheatStats,
    /// In first-seen order
    pub quests: Vec<QuestStat>,
    pub traders: Vec<ResolvedEntity>,
    pub items: Vec<ResolvedEntity>,
}

#[derive(Default)]
struct Accumulator {
    sessions: SessionBuilder,
    backend: BackendStats,
    cache: CacheStats,
    inventory: InventoryStats,
    network: NetworkStats,
    push: PushStats,
    audio: AudioStats,
    errors: ErrorStats,
    matchmaking: MatchmakingStats,
    anticheat: AntiCheatStats,
    quests: QuestBuilder,
    entities: EntityRegistry,
}

impl Accumulator {
    fn observe(&mut self, event: &LogEvent) {
        match event.log_type {
            LogType::Backend => self.backend.record(event),
            LogType::BackendCache => self.cache.record(event),
            LogType::Inventory => self.inventory.record(event, &mut self.entities),
            LogType::NetworkConnection | LogType::NetworkMessages => self.network.record(event),
            LogType::PushNotifications => self.push.record(event),
            LogType::SpatialAudio => self.audio.record(event),
            LogType::Errors => self.errors.record(event),
            LogType::Application => {
                self.matchmaking.record(event);
                self.anticheat.record(event);
            }
            LogType::Other(_) => {}
        }

        self.quests.observe(event, &mut self.entities);
    }

    fn finish(self) -> Statistics {
        let (traders, items) = self.entities.finish();
        Statistics {
            sessions: self.sessions.finish(),
            backend: self.backend,
            cache: self.cache,
            inventory: self.inventory,
            network: self.network,
            push: self.push,
            audio: self.audio,
            errors: self.errors,
            matchmaking: self.matchmaking,
            anticheat: self.anticheat,
            quests: self.quests.finish(),
            traders,
            items,
        }
    }
}

pub(crate) fn derive(results: &[ParsedLogResult]) -> Statistics {
    let mut acc = Accumulator::default();

    for result in results {
        acc.sessions.add_result(result);
        for event in &result.events {
            acc.observe(event);
        }
    }

    acc.finish()
}
