use eftrace_engine::Statistics;
use eftrace_types::{EntityKind, ResolvedEntity};
use std::sync::Arc;

use super::{EnrichmentCache, EnrichmentProvider, EntityInfo};

/// Providers in priority order plus the cache they share
#[derive(Default)]
pub struct EnrichmentChain {
    providers: Vec<Arc<dyn EnrichmentProvider>>,
    cache: EnrichmentCache,
}

impl EnrichmentChain {
    pub fn new(providers: Vec<Arc<dyn EnrichmentProvider>>) -> Self {
        Self {
            providers,
            cache: EnrichmentCache::new(),
        }
    }

    /// Replace the provider list. Cached answers came from the old sources
    /// and are dropped.
    pub fn set_providers(&mut self, providers: Vec<Arc<dyn EnrichmentProvider>>) {
        self.providers = providers;
        self.cache.clear();
    }

    pub fn providers(&self) -> &[Arc<dyn EnrichmentProvider>] {
        &self.providers
    }

    pub fn cache(&self) -> &EnrichmentCache {
        &self.cache
    }

    /// First provider with an answer wins. Provider errors are logged and
    /// skipped; a miss is only cached when every provider answered cleanly.
    pub async fn resolve(&mut self, kind: EntityKind, id: &str) -> Option<EntityInfo> {
        if let Some(cached) = self.cache.get(kind, id) {
            return cached.clone();
        }

        let mut any_failed = false;
        for provider in &self.providers {
            match provider.lookup(kind, id).await {
                Ok(Some(info)) => {
                    self.cache.insert(kind, id, Some(info.clone()));
                    return Some(info);
                }
                Ok(None) => {}
                Err(err) => {
                    any_failed = true;
                    tracing::warn!(
                        provider = provider.name(),
                        kind = %kind,
                        id,
                        "enrichment lookup failed: {}",
                        err
                    );
                }
            }
        }

        if !any_failed {
            self.cache.insert(kind, id, None);
        }
        None
    }

    /// Fill in names for quests, traders and items. Ids nobody knows keep `name: None`.
    pub async fn enrich(&mut self, stats: &mut Statistics) {
        if self.providers.is_empty() {
            return;
        }

        for quest in &mut stats.quests {
            if quest.name.is_none() {
                quest.name = self.resolve(EntityKind::Quest, &quest.id).await.map(|i| i.name);
            }
        }
        for entity in stats.traders.iter_mut().chain(stats.items.iter_mut()) {
            self.fill(entity).await;
        }
    }

    async fn fill(&mut self, entity: &mut ResolvedEntity) {
        if entity.name.is_none() {
            entity.name = self.resolve(entity.kind, &entity.id).await.map(|i| i.name);
        }
    }
}
