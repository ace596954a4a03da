//! Parse worker pool.
//!
//! Parsing runs on dedicated OS threads that only ever see owned copies of
//! their input. One dispatcher task owns the idle list, the pending queue
//! and the in-flight table; callers reach it through a command channel and
//! get their outcome back on a oneshot. A failed or panicking parse resolves
//! that caller with `success: false` and leaves the worker in service.

mod dispatcher;
mod protocol;
mod worker;

pub use protocol::{WorkerRequest, WorkerResponse};

use eftrace_providers::LogParser;
use eftrace_types::ParsedLogResult;
use futures::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{mpsc, oneshot};

use crate::Result;
use dispatcher::{Command, Dispatcher};

pub const TERMINATED: &str = "worker pool terminated";
pub const DUPLICATE_ID: &str = "duplicate task id";
pub const NO_WORKERS: &str = "no parse workers left";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseTask {
    /// Correlates the worker reply with the caller; unique among queued and in-flight tasks
    pub id: String,
    pub file_name: String,
    pub content: String,
}

impl ParseTask {
    pub fn new(id: impl Into<String>, file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseOutcome {
    pub id: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ParsedLogResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ParseOutcome {
    pub(crate) fn parsed(id: String, result: ParsedLogResult) -> Self {
        Self {
            id,
            success: true,
            result: Some(result),
            error: None,
        }
    }

    pub(crate) fn failed(id: String, error: impl Into<String>) -> Self {
        Self {
            id,
            success: false,
            result: None,
            error: Some(error.into()),
        }
    }
}

/// Diagnostic snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolStatus {
    pub pool_size: usize,
    pub idle_workers: usize,
    pub pending_tasks: usize,
    pub in_flight: usize,
    pub terminated: bool,
}

/// Reported once per settled task, in completion order
#[derive(Debug, Clone, Copy)]
pub struct PoolProgress<'a> {
    pub done: usize,
    pub total: usize,
    pub outcome: &'a ParseOutcome,
}

pub struct WorkerPool {
    size: usize,
    commands: mpsc::UnboundedSender<Command>,
    terminated: AtomicBool,
}

impl WorkerPool {
    /// Spawn `size` workers (at least one). Must be called inside a tokio runtime.
    pub fn new(size: usize, parser: Arc<dyn LogParser>) -> Result<Self> {
        let size = size.max(1);
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();

        let mut workers = Vec::with_capacity(size);
        for index in 0..size {
            workers.push(worker::spawn(index, Arc::clone(&parser), reply_tx.clone())?);
        }
        drop(reply_tx);

        let (commands, command_rx) = mpsc::unbounded_channel();
        tokio::spawn(Dispatcher::new(workers).run(command_rx, reply_rx));

        tracing::debug!(size, parser = parser.id(), "worker pool started");
        Ok(Self {
            size,
            commands,
            terminated: AtomicBool::new(false),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::Acquire)
    }

    /// Queue a task. The task is enqueued when this is called, not when the
    /// returned future is first polled, so call order is dispatch order.
    /// Never fails: every problem comes back as `success: false`.
    pub fn submit(&self, task: ParseTask) -> impl Future<Output = ParseOutcome> + Send + 'static {
        let id = task.id.clone();
        let (reply, rx) = oneshot::channel();

        let queued = !self.is_terminated()
            && self.commands.send(Command::Submit { task, reply }).is_ok();

        async move {
            if !queued {
                return ParseOutcome::failed(id, TERMINATED);
            }
            rx.await
                .unwrap_or_else(|_| ParseOutcome::failed(id, TERMINATED))
        }
    }

    /// Settle every task. Outcomes come back in input order; `on_progress`
    /// sees them in completion order.
    pub async fn submit_all<F>(&self, tasks: Vec<ParseTask>, mut on_progress: F) -> Vec<ParseOutcome>
    where
        F: FnMut(PoolProgress<'_>),
    {
        let total = tasks.len();
        let mut pending: FuturesUnordered<_> = tasks
            .into_iter()
            .enumerate()
            .map(|(index, task)| {
                let outcome = self.submit(task);
                async move { (index, outcome.await) }
            })
            .collect();

        let mut outcomes: Vec<Option<ParseOutcome>> = (0..total).map(|_| None).collect();
        let mut done = 0;
        while let Some((index, outcome)) = pending.next().await {
            done += 1;
            on_progress(PoolProgress {
                done,
                total,
                outcome: &outcome,
            });
            outcomes[index] = Some(outcome);
        }

        outcomes.into_iter().flatten().collect()
    }

    pub async fn status(&self) -> PoolStatus {
        let (reply, rx) = oneshot::channel();
        let stopped = PoolStatus {
            pool_size: self.size,
            idle_workers: 0,
            pending_tasks: 0,
            in_flight: 0,
            terminated: true,
        };

        if self.commands.send(Command::Status { reply }).is_err() {
            return stopped;
        }
        rx.await.unwrap_or(stopped)
    }

    /// Stop accepting work and fail everything queued or in flight.
    /// Idempotent; the pool cannot be restarted.
    pub fn terminate(&self) {
        if self.terminated.swap(true, Ordering::AcqRel) {
            return;
        }
        let _ = self.commands.send(Command::Terminate);
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.terminate();
    }
}
