//! Insights: per-session and per-signal views over the same results the
//! statistics are derived from.

mod connectivity;
mod errors;
mod matching;
mod timeline;

pub use connectivity::{AddressInsight, ConnectivityInsight};
pub use errors::ErrorInsight;
pub use matching::MatchingInsight;
pub use timeline::SessionTimeline;

use eftrace_types::ParsedLogResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    /// One per session id, in first-seen order
    pub timelines: Vec<SessionTimeline>,
    /// Most frequent error family first
    pub errors: Vec<ErrorInsight>,
    pub connectivity: ConnectivityInsight,
    /// Sessions that saw at least one matchmaking event
    pub matching: Vec<MatchingInsight>,
}

pub struct InsightsEngine<'a> {
    results: &'a [ParsedLogResult],
}

impl<'a> InsightsEngine<'a> {
    pub fn new(results: &'a [ParsedLogResult]) -> Self {
        Self { results }
    }

    pub fn compute(&self) -> Insights {
        Insights {
            timelines: timeline::build(self.results),
            errors: errors::build(self.results),
            connectivity: connectivity::build(self.results),
            matching: matching::build(self.results),
        }
    }
}
