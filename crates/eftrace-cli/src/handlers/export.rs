use anyhow::{Context, Result};
use eftrace_runtime::export_to_path;
use serde_json::json;
use std::path::{Path, PathBuf};

use super::{HandlerContext, load_report};
use crate::types::OutputFormat;
use crate::views;

pub async fn handle(ctx: &HandlerContext, paths: &[PathBuf], output: &Path) -> Result<()> {
    let report = load_report(ctx, paths).await?;
    export_to_path(&report, output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    match ctx.format {
        OutputFormat::Json => views::print_json(&json!({
            "path": output.display().to_string(),
            "results": report.results.len(),
            "failures": report.failures.len(),
        })),
        OutputFormat::Plain => {
            println!(
                "Exported {} results ({} skipped) to {}",
                report.results.len(),
                report.failures.len(),
                output.display()
            );
            Ok(())
        }
    }
}
