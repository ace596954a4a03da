use async_trait::async_trait;
use eftrace_types::EntityKind;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::{EnrichmentProvider, EntityInfo, ProviderError};

/// `{"quests": {id: name}, "traders": {...}, "items": {...}, "locations": {...}}`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NameTable {
    quests: HashMap<String, String>,
    traders: HashMap<String, String>,
    items: HashMap<String, String>,
    locations: HashMap<String, String>,
}

/// Provider backed by a JSON name table read once at construction
pub struct LocalTableProvider {
    name: String,
    table: NameTable,
}

impl LocalTableProvider {
    pub fn load(name: impl Into<String>, path: &Path) -> Result<Self, ProviderError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ProviderError::Unavailable(format!("{}: {}", path.display(), e)))?;
        Self::from_json(name, &content)
    }

    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self, ProviderError> {
        let table: NameTable = serde_json::from_str(json)?;
        Ok(Self {
            name: name.into(),
            table,
        })
    }

    fn find(&self, kind: EntityKind, id: &str) -> Result<Option<EntityInfo>, ProviderError> {
        let names = match kind {
            EntityKind::Quest => &self.table.quests,
            EntityKind::Trader => &self.table.traders,
            EntityKind::Item => &self.table.items,
            EntityKind::Location => &self.table.locations,
        };
        Ok(names.get(id).map(|name| EntityInfo {
            id: id.to_string(),
            kind,
            name: name.clone(),
        }))
    }
}

#[async_trait]
impl EnrichmentProvider for LocalTableProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_quest_by_id(&self, id: &str) -> Result<Option<EntityInfo>, ProviderError> {
        self.find(EntityKind::Quest, id)
    }

    async fn get_trader_by_id(&self, id: &str) -> Result<Option<EntityInfo>, ProviderError> {
        self.find(EntityKind::Trader, id)
    }

    async fn get_item_by_id(&self, id: &str) -> Result<Option<EntityInfo>, ProviderError> {
        self.find(EntityKind::Item, id)
    }

    async fn get_location_by_id(&self, id: &str) -> Result<Option<EntityInfo>, ProviderError> {
        self.find(EntityKind::Location, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_by_kind() {
        let provider = LocalTableProvider::from_json(
            "local",
            r#"{"traders": {"54cb50c76803fa8b248b4571": "Prapor"}, "locations": {"factory4_day": "Factory"}}"#,
        )
        .unwrap();

        let trader = provider.get_trader_by_id("54cb50c76803fa8b248b4571").await.unwrap();
        assert_eq!(trader.map(|t| t.name).as_deref(), Some("Prapor"));

        let location = provider.get_location_by_id("factory4_day").await.unwrap();
        assert_eq!(location.map(|l| l.kind), Some(EntityKind::Location));

        // same id, wrong table
        assert!(provider.get_item_by_id("54cb50c76803fa8b248b4571").await.unwrap().is_none());
    }

    #[test]
    fn test_malformed_table() {
        let err = LocalTableProvider::from_json("local", "[1, 2]").err().unwrap();
        assert!(matches!(err, ProviderError::InvalidData(_)));
    }
}
