use anyhow::Result;
use eftrace_engine::QuestStatus;
use eftrace_engine::selectors::quests_by_status;
use std::path::PathBuf;

use super::{HandlerContext, load_report};
use crate::types::OutputFormat;
use crate::views::{self, quests::{QuestList, QuestRow}};

pub async fn handle(
    ctx: &HandlerContext,
    paths: &[PathBuf],
    status: Option<QuestStatus>,
) -> Result<()> {
    let report = load_report(ctx, paths).await?;
    let stats = &report.statistics;

    let quests = match status {
        Some(status) => quests_by_status(stats, status),
        None => stats.quests.iter().collect(),
    };
    let rows: Vec<QuestRow> = quests.into_iter().map(QuestRow::from).collect();

    match ctx.format {
        OutputFormat::Json => views::print_json(&rows),
        OutputFormat::Plain => {
            print!("{}", QuestList::new(&rows, views::Palette::detect()));
            Ok(())
        }
    }
}
