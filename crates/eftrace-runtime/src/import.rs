//! Import pipeline: discover, read, parse on the pool, then derive
//! statistics and insights over one shared snapshot.

use eftrace_engine::{Insights, Statistics, compute_insights, derive_statistics};
use eftrace_providers::{FileFailure, LogParser, TextLogParser, discover_log_files, read_log_files};
use eftrace_types::ParsedLogResult;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

use crate::config::{Config, EnrichmentConfig, expand_tilde};
use crate::enrichment::{EnrichmentChain, EnrichmentProvider, LocalTableProvider};
use crate::pool::{ParseOutcome, ParseTask, WorkerPool};
use crate::{Error, Result};

/// Create a linked abort handle and signal
pub fn abort_pair() -> (AbortHandle, AbortSignal) {
    let (tx, rx) = watch::channel(false);
    (AbortHandle { tx: Arc::new(tx) }, AbortSignal { rx })
}

/// Trigger side; cheap to clone and safe to call from a signal handler thread
#[derive(Clone)]
pub struct AbortHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl AbortHandle {
    pub fn abort(&self) {
        self.tx.send_replace(true);
    }
}

#[derive(Clone)]
pub struct AbortSignal {
    rx: watch::Receiver<bool>,
}

impl AbortSignal {
    /// A signal that never fires
    pub fn never() -> Self {
        abort_pair().1
    }

    pub fn is_aborted(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once aborted; pends forever if every handle is dropped first
    pub async fn aborted(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Stage updates for a running import
#[derive(Debug, Clone, Copy)]
pub enum ImportProgress<'a> {
    Discovered { files: usize },
    Read { done: usize, total: usize, name: &'a str },
    Parsed { done: usize, total: usize, outcome: &'a ParseOutcome },
}

#[derive(Debug)]
pub struct ImportReport {
    /// Successfully parsed files, in discovery order
    pub results: Arc<[ParsedLogResult]>,
    /// Files skipped while reading or parsing
    pub failures: Vec<FileFailure>,
    pub statistics: Statistics,
    pub insights: Insights,
}

/// Owns the worker pool and enrichment chain for one run of the tool
pub struct ImportSession {
    config: Config,
    pool: WorkerPool,
    enrichment: Option<EnrichmentChain>,
}

impl ImportSession {
    /// Must be called inside a tokio runtime (the pool spawns its dispatcher)
    pub fn new(config: Config) -> Result<Self> {
        Self::with_parser(config, Arc::new(TextLogParser::new()))
    }

    pub fn with_parser(config: Config, parser: Arc<dyn LogParser>) -> Result<Self> {
        let pool = WorkerPool::new(config.pool.effective_size(), parser)?;
        let enrichment = load_enrichment(&config.enrichment);
        Ok(Self {
            config,
            pool,
            enrichment,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    pub fn set_enrichment(&mut self, chain: Option<EnrichmentChain>) {
        self.enrichment = chain;
    }

    pub async fn import(&mut self, paths: &[PathBuf], abort: AbortSignal) -> Result<ImportReport> {
        self.import_with_progress(paths, abort, |_| {}).await
    }

    /// Aborting terminates the pool; the session cannot import again afterwards.
    pub async fn import_with_progress<F>(
        &mut self,
        paths: &[PathBuf],
        abort: AbortSignal,
        on_progress: F,
    ) -> Result<ImportReport>
    where
        F: FnMut(ImportProgress<'_>),
    {
        if self.pool.is_terminated() {
            return Err(Error::InvalidOperation(
                "worker pool was terminated; start a new import session".to_string(),
            ));
        }

        let finished = tokio::select! {
            biased;
            _ = abort.aborted() => None,
            report = self.run(paths, on_progress) => Some(report),
        };

        match finished {
            Some(report) => report,
            None => {
                self.pool.terminate();
                tracing::warn!("import cancelled");
                Err(Error::Cancelled)
            }
        }
    }

    async fn run<F>(&mut self, paths: &[PathBuf], mut on_progress: F) -> Result<ImportReport>
    where
        F: FnMut(ImportProgress<'_>),
    {
        let mut discovered = Vec::new();
        for path in paths {
            discovered.extend(discover_log_files(path, &self.config.import.extensions)?);
        }
        on_progress(ImportProgress::Discovered {
            files: discovered.len(),
        });

        // Read off the async threads, forwarding progress as it happens
        let (progress_tx, mut progress_rx) = mpsc::unbounded_channel();
        let max_size = self.config.import.max_file_size;
        let attempted = discovered.len();
        let reader = tokio::task::spawn_blocking(move || {
            read_log_files(&discovered, max_size, |p| {
                let _ = progress_tx.send((p.done, p.total, p.name.to_string()));
            })
        });
        while let Some((done, total, name)) = progress_rx.recv().await {
            on_progress(ImportProgress::Read {
                done,
                total,
                name: &name,
            });
        }
        let read = reader.await?;
        let mut failures = read.failures;

        let names: Vec<String> = read.files.iter().map(|f| f.name.clone()).collect();
        let tasks: Vec<ParseTask> = read
            .files
            .into_iter()
            .enumerate()
            .map(|(index, file)| ParseTask::new(index.to_string(), file.name, file.content))
            .collect();

        let outcomes = self
            .pool
            .submit_all(tasks, |p| {
                on_progress(ImportProgress::Parsed {
                    done: p.done,
                    total: p.total,
                    outcome: p.outcome,
                })
            })
            .await;

        let mut results = Vec::with_capacity(outcomes.len());
        for (name, outcome) in names.into_iter().zip(outcomes) {
            match outcome.result {
                Some(result) if outcome.success => results.push(result),
                _ => {
                    let reason = outcome.error.unwrap_or_else(|| "unknown parse failure".to_string());
                    tracing::warn!(file = %name, "skipping file: {}", reason);
                    failures.push(FileFailure { name, reason });
                }
            }
        }

        if results.is_empty() {
            return Err(Error::NoValidFiles { attempted });
        }

        let snapshot: Arc<[ParsedLogResult]> = results.into();
        let (mut statistics, insights) = tokio::try_join!(
            tokio::task::spawn_blocking({
                let snapshot = Arc::clone(&snapshot);
                move || derive_statistics(&snapshot)
            }),
            tokio::task::spawn_blocking({
                let snapshot = Arc::clone(&snapshot);
                move || compute_insights(&snapshot)
            }),
        )?;

        if let Some(chain) = self.enrichment.as_mut() {
            chain.enrich(&mut statistics).await;
        }

        tracing::info!(
            files = snapshot.len(),
            failures = failures.len(),
            sessions = statistics.sessions.len(),
            "import finished"
        );

        Ok(ImportReport {
            results: snapshot,
            failures,
            statistics,
            insights,
        })
    }
}

/// Providers that fail to load are skipped with a warning
fn load_enrichment(config: &EnrichmentConfig) -> Option<EnrichmentChain> {
    let providers: Vec<Arc<dyn EnrichmentProvider>> = config
        .providers
        .iter()
        .filter_map(|source| {
            let path = expand_tilde(&source.path.to_string_lossy());
            match LocalTableProvider::load(&source.name, &path) {
                Ok(provider) => Some(Arc::new(provider) as Arc<dyn EnrichmentProvider>),
                Err(err) => {
                    tracing::warn!(provider = %source.name, "skipping enrichment provider: {}", err);
                    None
                }
            }
        })
        .collect();

    (!providers.is_empty()).then(|| EnrichmentChain::new(providers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_abort_signal_fires() {
        let (handle, signal) = abort_pair();
        assert!(!signal.is_aborted());

        let waiter = signal.clone();
        let task = tokio::spawn(async move { waiter.aborted().await });
        handle.abort();
        task.await.unwrap();
        assert!(signal.is_aborted());
    }

    #[test]
    fn test_missing_provider_table_is_skipped() {
        let config = EnrichmentConfig {
            providers: vec![crate::config::ProviderSource {
                name: "missing".to_string(),
                path: PathBuf::from("/nonexistent/names.json"),
            }],
        };
        assert!(load_enrichment(&config).is_none());
    }
}
