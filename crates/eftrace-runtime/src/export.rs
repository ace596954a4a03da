use chrono::{DateTime, Utc};
use eftrace_engine::{Insights, Statistics};
use eftrace_types::ParsedLogResult;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::Result;
use crate::import::ImportReport;

/// Bumped whenever the document layout changes incompatibly
pub const FORMAT_VERSION: u32 = 1;

/// Everything an import produced, as one JSON document
#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub format_version: u32,
    pub exported_at: DateTime<Utc>,
    pub results: &'a [ParsedLogResult],
    pub statistics: &'a Statistics,
    pub insights: &'a Insights,
}

impl<'a> ExportDocument<'a> {
    pub fn new(report: &'a ImportReport, exported_at: DateTime<Utc>) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            exported_at,
            results: &report.results,
            statistics: &report.statistics,
            insights: &report.insights,
        }
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

/// Write the report to `path`, creating parent directories as needed
pub fn export_to_path(report: &ImportReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    ExportDocument::new(report, Utc::now()).write_to(&mut writer)?;
    writer.flush()?;

    tracing::debug!(path = %path.display(), results = report.results.len(), "export written");
    Ok(())
}
