use eftrace_types::EntityKind;
use std::collections::HashMap;

use super::EntityInfo;

/// Lookup results keyed by `(kind, id)`, including confirmed misses
#[derive(Debug, Default)]
pub struct EnrichmentCache {
    entries: HashMap<(EntityKind, String), Option<EntityInfo>>,
}

impl EnrichmentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outer `None`: never looked up. Inner `None`: looked up, nobody knew it.
    pub fn get(&self, kind: EntityKind, id: &str) -> Option<&Option<EntityInfo>> {
        self.entries.get(&(kind, id.to_string()))
    }

    pub fn insert(&mut self, kind: EntityKind, id: &str, info: Option<EntityInfo>) {
        self.entries.insert((kind, id.to_string()), info);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
