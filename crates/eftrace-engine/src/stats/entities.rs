use eftrace_types::{EntityKind, ResolvedEntity};
use std::collections::HashSet;

/// Shared table of ids seen during one pass, in first-seen order per kind
#[derive(Default)]
pub(crate) struct EntityRegistry {
    traders: Vec<ResolvedEntity>,
    items: Vec<ResolvedEntity>,
    seen: HashSet<(EntityKind, String)>,
}

impl EntityRegistry {
    pub(crate) fn register(&mut self, kind: EntityKind, id: String) {
        if !self.seen.insert((kind, id.clone())) {
            return;
        }
        let entity = ResolvedEntity::unresolved(kind, id);
        match kind {
            EntityKind::Trader => self.traders.push(entity),
            EntityKind::Item => self.items.push(entity),
            // Quests are tracked by the quest builder; locations are never registered here
            EntityKind::Quest | EntityKind::Location => {}
        }
    }

    pub(crate) fn finish(self) -> (Vec<ResolvedEntity>, Vec<ResolvedEntity>) {
        (self.traders, self.items)
    }
}
