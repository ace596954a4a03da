use crate::stats::{BackendStats, CacheStats, QuestStat, QuestStatus, SessionSummary, Statistics};

use super::ranking::{RankedEntry, percentage, top_n};

pub fn quests_by_status(stats: &Statistics, status: QuestStatus) -> Vec<&QuestStat> {
    stats.quests.iter().filter(|q| q.status == status).collect()
}

/// Earliest first; sessions without timestamps go last in their original order
pub fn sessions_by_start(stats: &Statistics) -> Vec<&SessionSummary> {
    let mut sessions: Vec<&SessionSummary> = stats.sessions.iter().collect();
    sessions.sort_by_key(|s| (s.start.is_none(), s.start));
    sessions
}

/// Transport errors and server exceptions per request, as a percentage
pub fn backend_error_rate(backend: &BackendStats) -> f64 {
    percentage(backend.total_errors, backend.total_requests)
}

pub fn cache_hit_rate(cache: &CacheStats) -> f64 {
    percentage(cache.hits, cache.hits + cache.misses)
}

pub fn top_endpoints(stats: &Statistics, n: usize) -> Vec<RankedEntry> {
    top_n(&stats.backend.by_endpoint, n)
}

pub fn top_error_families(stats: &Statistics, n: usize) -> Vec<RankedEntry> {
    top_n(&stats.errors.by_family, n)
}
