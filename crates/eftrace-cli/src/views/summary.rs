use eftrace_engine::selectors::{
    RankedEntry, backend_error_rate, cache_hit_rate, quests_by_status, sessions_by_start,
    top_endpoints, top_error_families, top_n,
};
use eftrace_engine::{QuestStatus, SessionSummary, Statistics};
use eftrace_runtime::ImportReport;
use serde::Serialize;
use std::fmt;

use super::Palette;
use super::sessions::SessionTable;

#[derive(Debug, Serialize)]
pub struct FailureRow {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct QuestCounts {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
    pub started: usize,
    pub unknown: usize,
}

/// What `import` prints
#[derive(Debug, Serialize)]
pub struct SummaryView<'a> {
    pub files: usize,
    pub failures: Vec<FailureRow>,
    pub sessions: Vec<&'a SessionSummary>,
    pub backend_error_rate: f64,
    pub cache_hit_rate: f64,
    pub top_endpoints: Vec<RankedEntry>,
    pub top_error_families: Vec<RankedEntry>,
    pub top_status_codes: Vec<RankedEntry>,
    pub quests: QuestCounts,
    pub statistics: &'a Statistics,
    #[serde(skip)]
    palette: Palette,
}

impl<'a> SummaryView<'a> {
    pub fn new(report: &'a ImportReport, top: usize, palette: Palette) -> Self {
        let stats = &report.statistics;
        let count = |status| quests_by_status(stats, status).len();

        Self {
            files: report.results.len(),
            failures: report
                .failures
                .iter()
                .map(|f| FailureRow {
                    name: f.name.clone(),
                    reason: f.reason.clone(),
                })
                .collect(),
            sessions: sessions_by_start(stats),
            backend_error_rate: backend_error_rate(&stats.backend),
            cache_hit_rate: cache_hit_rate(&stats.cache),
            top_endpoints: top_endpoints(stats, top),
            top_error_families: top_error_families(stats, top),
            top_status_codes: top_n(&stats.backend.by_status_code, top),
            quests: QuestCounts {
                total: stats.quests.len(),
                completed: count(QuestStatus::Completed),
                failed: count(QuestStatus::Failed),
                started: count(QuestStatus::Started),
                unknown: count(QuestStatus::Unknown),
            },
            statistics: stats,
            palette,
        }
    }
}

impl fmt::Display for SummaryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let stats = self.statistics;
        let palette = &self.palette;

        writeln!(
            f,
            "Imported {} files ({} skipped)\n",
            self.files,
            self.failures.len()
        )?;

        writeln!(f, "{}", palette.heading("Sessions"))?;
        write!(f, "{}", SessionTable::new(&self.sessions, self.palette))?;

        let backend = &stats.backend;
        writeln!(f, "\n{}", palette.heading("Backend"))?;
        writeln!(
            f,
            "  requests {}  responses {}  errors {} ({:.1}%)  retries {}",
            backend.total_requests,
            backend.total_responses,
            backend.total_errors,
            self.backend_error_rate,
            backend.total_retries
        )?;
        write_ranking(f, "top endpoints", &self.top_endpoints)?;
        write_ranking(f, "status codes", &self.top_status_codes)?;

        writeln!(f, "\n{}", palette.heading("Cache"))?;
        writeln!(
            f,
            "  hits {}  misses {}  hit rate {:.1}%",
            stats.cache.hits, stats.cache.misses, self.cache_hit_rate
        )?;

        let network = &stats.network;
        writeln!(f, "\n{}", palette.heading("Network"))?;
        writeln!(
            f,
            "  connections {}  disconnects {}  timeouts {}",
            network.total_connections, network.total_disconnects, network.total_timeouts
        )?;
        if let Some(rtt) = network.rtt.value() {
            writeln!(f, "  rtt avg {:.1} ms over {} samples", rtt, network.rtt.samples)?;
        }
        if let Some(loss) = network.packet_loss_ratio() {
            writeln!(
                f,
                "  packets sent {}  lost {} ({:.2}%)",
                network.packets_sent,
                network.packets_lost,
                loss * 100.0
            )?;
        }

        writeln!(f, "\n{}", palette.heading("Errors"))?;
        writeln!(f, "  total {}", stats.errors.totals)?;
        write_ranking(f, "families", &self.top_error_families)?;

        let quests = &self.quests;
        writeln!(f, "\n{}", palette.heading("Quests"))?;
        writeln!(
            f,
            "  {} total: {} completed, {} failed, {} started, {} unknown",
            quests.total, quests.completed, quests.failed, quests.started, quests.unknown
        )?;

        if !self.failures.is_empty() {
            writeln!(f, "\n{}", palette.alert("Skipped files"))?;
            for failure in &self.failures {
                writeln!(f, "  {}: {}", failure.name, palette.dim(&failure.reason))?;
            }
        }

        Ok(())
    }
}

fn write_ranking(f: &mut fmt::Formatter, label: &str, entries: &[RankedEntry]) -> fmt::Result {
    if entries.is_empty() {
        return Ok(());
    }
    writeln!(f, "  {}:", label)?;
    let width = entries.iter().map(|e| e.key.len()).max().unwrap_or(0);
    for entry in entries {
        writeln!(
            f,
            "    {:<width$}  {:>5}  ({:.1}%)",
            entry.key, entry.count, entry.percentage
        )?;
    }
    Ok(())
}
