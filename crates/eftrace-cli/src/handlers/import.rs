use anyhow::Result;
use std::path::PathBuf;

use super::{HandlerContext, load_report};
use crate::types::OutputFormat;
use crate::views::{self, summary::SummaryView};

pub async fn handle(ctx: &HandlerContext, paths: &[PathBuf], top: usize) -> Result<()> {
    let report = load_report(ctx, paths).await?;
    let view = SummaryView::new(&report, top, views::Palette::detect());

    match ctx.format {
        OutputFormat::Json => views::print_json(&view),
        OutputFormat::Plain => {
            print!("{}", view);
            Ok(())
        }
    }
}
