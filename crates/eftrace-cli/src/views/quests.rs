use eftrace_engine::{CountMap, QuestStat, QuestStatus};
use serde::Serialize;
use std::fmt;

use super::Palette;

/// A quest without its raw events
#[derive(Debug, Serialize)]
pub struct QuestRow {
    pub id: String,
    pub name: Option<String>,
    pub status: QuestStatus,
    pub trader_id: Option<String>,
    pub reward_rubles: Option<f64>,
    pub reward_items: CountMap,
    pub events: usize,
}

impl From<&QuestStat> for QuestRow {
    fn from(quest: &QuestStat) -> Self {
        Self {
            id: quest.id.clone(),
            name: quest.name.clone(),
            status: quest.status,
            trader_id: quest.trader_id.clone(),
            reward_rubles: quest.reward_rubles,
            reward_items: quest.reward_items.clone(),
            events: quest.related_events.len(),
        }
    }
}

/// Quests with their trader and rewards
pub struct QuestList<'a> {
    rows: &'a [QuestRow],
    palette: Palette,
}

impl<'a> QuestList<'a> {
    pub fn new(rows: &'a [QuestRow], palette: Palette) -> Self {
        Self { rows, palette }
    }
}

impl fmt::Display for QuestList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "No quests found");
        }

        for row in self.rows {
            let status = match row.status {
                QuestStatus::Failed => self.palette.alert(row.status.as_str()),
                _ => row.status.as_str().to_string(),
            };
            let title = row.name.as_deref().unwrap_or("(unnamed)");
            writeln!(f, "{}  {:<9}  {}", self.palette.heading(&row.id), status, title)?;

            if let Some(trader) = &row.trader_id {
                writeln!(f, "    trader   {}", trader)?;
            }
            if let Some(rubles) = row.reward_rubles {
                writeln!(f, "    roubles  {}", rubles)?;
            }
            for (template, count) in &row.reward_items {
                writeln!(f, "    item     {} x{}", template, count)?;
            }
            writeln!(f, "    {}", self.palette.dim(&format!("{} events", row.events)))?;
        }
        Ok(())
    }
}
