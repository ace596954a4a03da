// Runtime: everything that touches threads, files or the clock.
// Pure computation lives in eftrace-engine.

pub mod config;
pub mod enrichment;
pub mod error;
pub mod export;
pub mod import;
pub mod pool;

pub use config::{Config, resolve_config_path};
pub use enrichment::{
    EnrichmentCache, EnrichmentChain, EnrichmentProvider, EntityInfo, LocalTableProvider,
    ProviderError,
};
pub use error::{Error, Result};
pub use export::{ExportDocument, FORMAT_VERSION, export_to_path};
pub use import::{AbortHandle, AbortSignal, ImportProgress, ImportReport, ImportSession, abort_pair};
pub use pool::{ParseOutcome, ParseTask, PoolProgress, PoolStatus, WorkerPool};
