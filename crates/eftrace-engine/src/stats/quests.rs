use eftrace_types::{EntityKind, LogEvent};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;

use super::entities::EntityRegistry;
use super::CountMap;

/// 24 hex digits not flanked by more hex; `_` and other word characters may touch it
static QUEST_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^0-9a-f])([0-9a-f]{24})(?:$|[^0-9a-f])").unwrap()
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    #[default]
    Unknown,
    Started,
    Completed,
    Failed,
}

impl QuestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestStatus::Unknown => "unknown",
            QuestStatus::Started => "started",
            QuestStatus::Completed => "completed",
            QuestStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestStat {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub status: QuestStatus,
    /// First trader seen for this quest; never overwritten
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trader_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_rubles: Option<f64>,
    /// Template id -> count, summed over every contributing event
    pub reward_items: CountMap,
    pub related_events: Vec<LogEvent>,
}

impl QuestStat {
    fn new(id: String) -> Self {
        Self {
            id,
            name: None,
            status: QuestStatus::Unknown,
            trader_id: None,
            reward_rubles: None,
            reward_items: CountMap::new(),
            related_events: Vec::new(),
        }
    }

    /// `source` is already lower-cased
    fn apply_status(&mut self, source: &str) {
        if source.contains("completed") || source == "success" {
            self.status = QuestStatus::Completed;
        } else if source.contains("fail") {
            self.status = QuestStatus::Failed;
        } else if (source.contains("start") || source.contains("description"))
            && self.status == QuestStatus::Unknown
        {
            self.status = QuestStatus::Started;
        }
    }
}

#[derive(Default)]
pub(crate) struct QuestBuilder {
    quests: Vec<QuestStat>,
    index: HashMap<String, usize>,
}

impl QuestBuilder {
    /// Quests are detected on every event, whatever its log type
    pub(crate) fn observe(&mut self, event: &LogEvent, entities: &mut EntityRegistry) {
        let Some(id) = quest_id(event) else {
            return;
        };

        let idx = match self.index.get(&id) {
            Some(&idx) => idx,
            None => {
                self.index.insert(id.clone(), self.quests.len());
                self.quests.push(QuestStat::new(id));
                self.quests.len() - 1
            }
        };
        let quest = &mut self.quests[idx];
        let fields = &event.fields;

        quest.related_events.push(event.clone());

        let source = match fields.str("questStatus") {
            Some(status) => status.to_lowercase(),
            None => event.message.to_lowercase(),
        };
        quest.apply_status(&source);

        if let Some(rubles) = fields.f64("rewardRubles") {
            quest.reward_rubles = Some(quest.reward_rubles.unwrap_or(0.0) + rubles);
        }
        if let Some(items) = fields.get("rewardItems") {
            accumulate_reward_items(&mut quest.reward_items, items);
        }

        if quest.trader_id.is_none()
            && let Some(trader) = fields.key_string("traderId")
        {
            quest.trader_id = Some(trader.clone());
            entities.register(EntityKind::Trader, trader);
        }
    }

    pub(crate) fn finish(self) -> Vec<QuestStat> {
        self.quests
    }
}

/// 24-hex token in the message first, `questId` field second
fn quest_id(event: &LogEvent) -> Option<String> {
    if let Some(m) = QUEST_ID_PATTERN
        .captures(&event.message)
        .and_then(|caps| caps.get(1))
    {
        return Some(m.as_str().to_lowercase());
    }
    event
        .fields
        .str("questId")
        .filter(|id| !id.is_empty())
        .map(str::to_lowercase)
}

/// Accepts `{tpl: count}`, `[tpl, ...]` and `[{_tpl|tpl|templateId, count}, ...]`
fn accumulate_reward_items(target: &mut CountMap, items: &Value) {
    match items {
        Value::Object(map) => {
            for (template, count) in map {
                add_items(target, template, count_of(count).unwrap_or(1));
            }
        }
        Value::Array(list) => {
            for item in list {
                match item {
                    Value::String(template) => add_items(target, template, 1),
                    Value::Object(obj) => {
                        let template = ["_tpl", "tpl", "templateId"]
                            .iter()
                            .find_map(|key| obj.get(*key).and_then(Value::as_str));
                        if let Some(template) = template {
                            let count = ["count", "amount"]
                                .iter()
                                .find_map(|key| obj.get(*key).and_then(count_of))
                                .unwrap_or(1);
                            add_items(target, template, count);
                        }
                    }
                    _ => {}
                }
            }
        }
        _ => {}
    }
}

fn count_of(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.is_finite() && *n >= 0.0 && n.fract() == 0.0)
            .map(|n| n as u64)
    })
}

fn add_items(target: &mut CountMap, template: &str, count: u64) {
    *target.entry(template.to_string()).or_insert(0) += count;
}
