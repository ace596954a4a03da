//! Messages exchanged between the dispatcher and parse workers.
//!
//! Workers run in-process today, but the shapes are serde-tagged so the same
//! contract holds if they move out of process:
//! `{"type":"parse","id","fileName","content"}` in,
//! `{"type":"result"|"error","id","result"|"error"}` out.

use eftrace_types::ParsedLogResult;
use serde::{Deserialize, Serialize};

use super::{ParseOutcome, ParseTask};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkerRequest {
    Parse {
        id: String,
        #[serde(rename = "fileName")]
        file_name: String,
        content: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkerResponse {
    Result { id: String, result: ParsedLogResult },
    Error { id: String, error: String },
}

impl WorkerResponse {
    pub fn id(&self) -> &str {
        match self {
            WorkerResponse::Result { id, .. } | WorkerResponse::Error { id, .. } => id,
        }
    }

    pub(crate) fn into_outcome(self) -> ParseOutcome {
        match self {
            WorkerResponse::Result { id, result } => ParseOutcome::parsed(id, result),
            WorkerResponse::Error { id, error } => ParseOutcome::failed(id, error),
        }
    }
}

impl From<ParseTask> for WorkerRequest {
    fn from(task: ParseTask) -> Self {
        WorkerRequest::Parse {
            id: task.id,
            file_name: task.file_name,
            content: task.content,
        }
    }
}

impl From<WorkerRequest> for ParseTask {
    fn from(request: WorkerRequest) -> Self {
        match request {
            WorkerRequest::Parse {
                id,
                file_name,
                content,
            } => ParseTask {
                id,
                file_name,
                content,
            },
        }
    }
}
