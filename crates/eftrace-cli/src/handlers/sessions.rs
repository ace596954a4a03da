use anyhow::Result;
use eftrace_engine::selectors::sessions_by_start;
use std::path::PathBuf;

use super::{HandlerContext, load_report};
use crate::types::OutputFormat;
use crate::views::{self, sessions::SessionTable};

pub async fn handle(ctx: &HandlerContext, paths: &[PathBuf]) -> Result<()> {
    let report = load_report(ctx, paths).await?;
    let sessions = sessions_by_start(&report.statistics);

    match ctx.format {
        OutputFormat::Json => views::print_json(&sessions),
        OutputFormat::Plain => {
            print!("{}", SessionTable::new(&sessions, views::Palette::detect()));
            Ok(())
        }
    }
}
