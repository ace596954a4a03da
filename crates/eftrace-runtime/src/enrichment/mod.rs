//! Optional id-to-name resolution for quests, traders, items and locations.
//!
//! Providers are consulted in priority order through an [`EnrichmentChain`],
//! which owns an [`EnrichmentCache`] for the lifetime of an import session.

mod cache;
mod chain;
mod local;

pub use cache::EnrichmentCache;
pub use chain::EnrichmentChain;
pub use local::LocalTableProvider;

use async_trait::async_trait;
use eftrace_types::EntityKind;
use serde::{Deserialize, Serialize};

/// A resolved name for one id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityInfo {
    pub id: String,
    pub kind: EntityKind,
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Source could not be reached or read
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Source answered with something unusable
    #[error("invalid provider data: {0}")]
    InvalidData(String),
}

impl From<std::io::Error> for ProviderError {
    fn from(err: std::io::Error) -> Self {
        ProviderError::Unavailable(err.to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::InvalidData(err.to_string())
    }
}

/// Source of entity names. `Ok(None)` means "not known here"; an `Err` makes
/// the chain fall through to the next provider.
///
/// Implement the lookups the source can answer; the rest report nothing.
#[async_trait]
pub trait EnrichmentProvider: Send + Sync {
    /// Human-readable name (used for logging / diagnostics).
    fn name(&self) -> &str;

    async fn get_quest_by_id(&self, _id: &str) -> Result<Option<EntityInfo>, ProviderError> {
        Ok(None)
    }

    async fn get_trader_by_id(&self, _id: &str) -> Result<Option<EntityInfo>, ProviderError> {
        Ok(None)
    }

    async fn get_item_by_id(&self, _id: &str) -> Result<Option<EntityInfo>, ProviderError> {
        Ok(None)
    }

    async fn get_location_by_id(&self, _id: &str) -> Result<Option<EntityInfo>, ProviderError> {
        Ok(None)
    }

    /// Dispatch to the lookup for `kind`
    async fn lookup(&self, kind: EntityKind, id: &str) -> Result<Option<EntityInfo>, ProviderError> {
        match kind {
            EntityKind::Quest => self.get_quest_by_id(id).await,
            EntityKind::Trader => self.get_trader_by_id(id).await,
            EntityKind::Item => self.get_item_by_id(id).await,
            EntityKind::Location => self.get_location_by_id(id).await,
        }
    }
}
