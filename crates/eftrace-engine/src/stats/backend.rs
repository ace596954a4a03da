use eftrace_types::{EntityKind, EventKind, LogEvent};
use serde::{Deserialize, Serialize};

use super::entities::EntityRegistry;
use super::{CountMap, bump};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendStats {
    pub total_requests: u64,
    pub total_responses: u64,
    pub total_errors: u64,
    pub total_retries: u64,
    /// Keyed by the status code's string form ("200")
    pub by_status_code: CountMap,
    /// Requests and responses per URL path
    pub by_endpoint: CountMap,
}

impl BackendStats {
    pub(crate) fn record(&mut self, event: &LogEvent) {
        let fields = &event.fields;

        match event.kind() {
            EventKind::BackendRequest => {
                self.total_requests += 1;
                if let Some(url) = fields.str("url") {
                    bump(&mut self.by_endpoint, url);
                }
            }
            EventKind::BackendResponse => {
                self.total_responses += 1;
                if let Some(code) = fields.key_string("responseCode") {
                    bump(&mut self.by_status_code, code);
                }
                if let Some(url) = fields.str("url") {
                    bump(&mut self.by_endpoint, url);
                }
            }
            EventKind::BackendTransportError | EventKind::BackendServerException => {
                self.total_errors += 1;
                if let Some(code) = fields.key_string("responseCode") {
                    bump(&mut self.by_status_code, code);
                }
            }
            EventKind::BackendRetry => self.total_retries += 1,
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// Only an explicit `cacheHit: false` is a miss; a missing field counts as a hit
    pub(crate) fn record(&mut self, event: &LogEvent) {
        if event.kind() != EventKind::CacheLookup {
            return;
        }
        if event.fields.bool("cacheHit") == Some(false) {
            self.misses += 1;
        } else {
            self.hits += 1;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryStats {
    pub total_rejections: u64,
    pub by_operation: CountMap,
    pub by_code: CountMap,
    pub by_item: CountMap,
}

impl InventoryStats {
    pub(crate) fn record(&mut self, event: &LogEvent, entities: &mut EntityRegistry) {
        if event.kind() != EventKind::InventoryRejection {
            return;
        }
        let fields = &event.fields;

        self.total_rejections += 1;
        if let Some(operation) = fields.key_string("operationType") {
            bump(&mut self.by_operation, operation);
        }
        if let Some(code) = fields.key_string("code") {
            bump(&mut self.by_code, code);
        }
        if let Some(item) = fields.key_string("itemId") {
            bump(&mut self.by_item, item.clone());
            entities.register(EntityKind::Item, item);
        }
    }
}
