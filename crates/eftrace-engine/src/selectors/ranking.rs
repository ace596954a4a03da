use serde::{Deserialize, Serialize};

use crate::stats::CountMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub key: String,
    pub count: u64,
    /// Share of the map total, 0..=100
    pub percentage: f64,
}

/// `count / total` as a percentage; zero when `total` is zero
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

/// Highest counts first. Ties keep key order.
pub fn top_n(map: &CountMap, n: usize) -> Vec<RankedEntry> {
    let total: u64 = map.values().sum();

    let mut entries: Vec<RankedEntry> = map
        .iter()
        .map(|(key, &count)| RankedEntry {
            key: key.clone(),
            count,
            percentage: percentage(count, total),
        })
        .collect();

    // sort_by is stable, so equal counts stay in BTreeMap key order
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(n);
    entries
}
