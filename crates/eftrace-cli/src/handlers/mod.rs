pub mod export;
pub mod import;
pub mod quests;
pub mod sessions;

use anyhow::{Context, Result};
use eftrace_runtime::{Config, ImportProgress, ImportReport, ImportSession, abort_pair};
use std::path::PathBuf;

use crate::types::OutputFormat;

pub struct HandlerContext {
    pub config: Config,
    pub format: OutputFormat,
}

/// Run one import; Ctrl-C aborts it
pub async fn load_report(ctx: &HandlerContext, paths: &[PathBuf]) -> Result<ImportReport> {
    let (abort, signal) = abort_pair();
    if let Err(err) = ctrlc::set_handler(move || abort.abort()) {
        tracing::warn!("could not install Ctrl-C handler: {}", err);
    }

    let mut session =
        ImportSession::new(ctx.config.clone()).context("failed to start import session")?;

    let report = session
        .import_with_progress(paths, signal, |progress| match progress {
            ImportProgress::Discovered { files } => tracing::info!(files, "discovered log files"),
            ImportProgress::Read { .. } => {}
            ImportProgress::Parsed {
                done,
                total,
                outcome,
            } => tracing::debug!(done, total, id = %outcome.id, success = outcome.success, "parsed"),
        })
        .await?;

    Ok(report)
}
