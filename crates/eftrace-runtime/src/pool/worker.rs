use eftrace_providers::LogParser;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread::JoinHandle;
use tokio::sync::mpsc::UnboundedSender;

use super::protocol::{WorkerRequest, WorkerResponse};

/// A response tagged with the worker that produced it
pub(super) struct WorkerReply {
    pub worker: usize,
    pub response: WorkerResponse,
}

pub(super) struct WorkerHandle {
    requests: mpsc::Sender<WorkerRequest>,
    _thread: JoinHandle<()>,
}

impl WorkerHandle {
    /// Hand a request to the worker; gives it back if the thread is gone
    pub(super) fn send(&self, request: WorkerRequest) -> Result<(), WorkerRequest> {
        self.requests.send(request).map_err(|err| err.0)
    }
}

/// Start `parse-worker-{index}`. The thread exits once its handle is dropped
/// and the current request is finished.
pub(super) fn spawn(
    index: usize,
    parser: Arc<dyn LogParser>,
    replies: UnboundedSender<WorkerReply>,
) -> std::io::Result<WorkerHandle> {
    let (requests, rx) = mpsc::channel::<WorkerRequest>();

    let thread = std::thread::Builder::new()
        .name(format!("parse-worker-{}", index))
        .spawn(move || {
            while let Ok(request) = rx.recv() {
                let response = handle_request(parser.as_ref(), request);
                let reply = WorkerReply {
                    worker: index,
                    response,
                };
                if replies.send(reply).is_err() {
                    break;
                }
            }
            tracing::trace!(worker = index, "parse worker exiting");
        })?;

    Ok(WorkerHandle {
        requests,
        _thread: thread,
    })
}

fn handle_request(parser: &dyn LogParser, request: WorkerRequest) -> WorkerResponse {
    match request {
        WorkerRequest::Parse {
            id,
            file_name,
            content,
        } => {
            let parsed =
                panic::catch_unwind(AssertUnwindSafe(|| parser.parse_text(&file_name, &content)));

            match parsed {
                Ok(Ok(result)) => WorkerResponse::Result { id, result },
                Ok(Err(err)) => WorkerResponse::Error {
                    id,
                    error: err.to_string(),
                },
                Err(panic_err) => {
                    let message = panic_message(panic_err.as_ref());
                    tracing::warn!(file = %file_name, "parser panicked: {}", message);
                    WorkerResponse::Error {
                        id,
                        error: format!("parser panicked: {}", message),
                    }
                }
            }
        }
    }
}

fn panic_message(panic_err: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_err.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_err.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
