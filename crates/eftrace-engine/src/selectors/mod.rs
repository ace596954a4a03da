//! Presentation-side aggregation over `Statistics` and `Insights`.
//!
//! Everything here is a pure function of its inputs, so callers may memoize
//! on the identity of the statistics snapshot.

mod buckets;
mod downsample;
mod queries;
mod ranking;

pub use buckets::{TimeBucket, time_buckets};
pub use downsample::{DataPoint, downsample};
pub use queries::{
    backend_error_rate, cache_hit_rate, quests_by_status, sessions_by_start, top_endpoints,
    top_error_families,
};
pub use ranking::{RankedEntry, percentage, top_n};
