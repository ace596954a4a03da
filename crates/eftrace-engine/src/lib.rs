// Engine: pure, synchronous computations over parsed log results.
// Nothing in here does I/O or spawns work; the runtime crate owns that.

pub mod insights;
pub mod selectors;
pub mod stats;

pub use insights::{Insights, InsightsEngine, SessionTimeline};
pub use selectors::{DataPoint, RankedEntry, TimeBucket, downsample, percentage, time_buckets, top_n};
pub use stats::{
    AddressStats, AntiCheatStats, AudioStats, BackendStats, CacheStats, CountMap, ErrorStats,
    InventoryStats, MatchmakingStats, NetworkStats, PushStats, QuestStat, QuestStatus,
    RunningAverage, SessionSummary, Statistics,
};

use eftrace_types::ParsedLogResult;

// Façade API - stable entry points for the runtime and CLI layers

/// Fold every event of every result into a fresh `Statistics`
pub fn derive_statistics(results: &[ParsedLogResult]) -> Statistics {
    stats::derive(results)
}

/// Compute insights over the same snapshot the statistics were derived from
pub fn compute_insights(results: &[ParsedLogResult]) -> Insights {
    InsightsEngine::new(results).compute()
}
