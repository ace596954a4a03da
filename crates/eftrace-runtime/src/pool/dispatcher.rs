use std::collections::{HashMap, HashSet, VecDeque};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::oneshot;

use super::protocol::WorkerRequest;
use super::worker::{WorkerHandle, WorkerReply};
use super::{DUPLICATE_ID, NO_WORKERS, ParseOutcome, ParseTask, PoolStatus, TERMINATED};

pub(super) enum Command {
    Submit {
        task: ParseTask,
        reply: oneshot::Sender<ParseOutcome>,
    },
    Status {
        reply: oneshot::Sender<PoolStatus>,
    },
    Terminate,
}

struct Pending {
    task: ParseTask,
    reply: oneshot::Sender<ParseOutcome>,
}

/// Sole owner of the pool bookkeeping. Runs as one task; nothing here is shared.
pub(super) struct Dispatcher {
    size: usize,
    /// `None` once a worker is released or found dead
    workers: Vec<Option<WorkerHandle>>,
    idle: VecDeque<usize>,
    queue: VecDeque<Pending>,
    queued_ids: HashSet<String>,
    in_flight: HashMap<String, oneshot::Sender<ParseOutcome>>,
    terminated: bool,
}

impl Dispatcher {
    pub(super) fn new(workers: Vec<WorkerHandle>) -> Self {
        let size = workers.len();
        Self {
            size,
            workers: workers.into_iter().map(Some).collect(),
            idle: (0..size).collect(),
            queue: VecDeque::new(),
            queued_ids: HashSet::new(),
            in_flight: HashMap::new(),
            terminated: false,
        }
    }

    pub(super) async fn run(
        mut self,
        mut commands: UnboundedReceiver<Command>,
        mut replies: UnboundedReceiver<WorkerReply>,
    ) {
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle(command),
                    // every pool handle is gone
                    None => break,
                },
                Some(reply) = replies.recv() => self.complete(reply),
            }
        }
        self.terminate();
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Submit { task, reply } => self.submit(task, reply),
            Command::Status { reply } => {
                let _ = reply.send(self.status());
            }
            Command::Terminate => self.terminate(),
        }
    }

    fn submit(&mut self, task: ParseTask, reply: oneshot::Sender<ParseOutcome>) {
        if self.terminated {
            let _ = reply.send(ParseOutcome::failed(task.id, TERMINATED));
            return;
        }
        if self.in_flight.contains_key(&task.id) || self.queued_ids.contains(&task.id) {
            tracing::warn!(id = %task.id, "rejecting task with duplicate id");
            let _ = reply.send(ParseOutcome::failed(task.id, DUPLICATE_ID));
            return;
        }

        self.queued_ids.insert(task.id.clone());
        self.queue.push_back(Pending { task, reply });
        self.pump();
    }

    /// Greedy: every idle worker takes the next queued task
    fn pump(&mut self) {
        while !self.queue.is_empty() {
            let Some(worker) = self.idle.pop_front() else {
                break;
            };
            let Some(pending) = self.queue.pop_front() else {
                break;
            };
            let Some(handle) = self.workers[worker].as_ref() else {
                self.queue.push_front(pending);
                continue;
            };

            let id = pending.task.id.clone();
            match handle.send(WorkerRequest::from(pending.task)) {
                Ok(()) => {
                    self.queued_ids.remove(&id);
                    self.in_flight.insert(id, pending.reply);
                }
                Err(request) => {
                    tracing::warn!(worker, "parse worker is gone; requeueing its task");
                    self.workers[worker] = None;
                    self.queue.push_front(Pending {
                        task: ParseTask::from(request),
                        reply: pending.reply,
                    });
                }
            }
        }

        if !self.queue.is_empty() && self.workers.iter().all(Option::is_none) {
            self.fail_queued(NO_WORKERS);
        }
    }

    fn complete(&mut self, reply: WorkerReply) {
        let WorkerReply { worker, response } = reply;

        match self.in_flight.remove(response.id()) {
            Some(caller) => {
                let _ = caller.send(response.into_outcome());
            }
            None => {
                tracing::debug!(id = response.id(), "dropping reply for a task nobody awaits");
            }
        }

        if !self.terminated && self.workers.get(worker).is_some_and(Option::is_some) {
            self.idle.push_back(worker);
            self.pump();
        }
    }

    fn fail_queued(&mut self, reason: &str) {
        for pending in self.queue.drain(..) {
            let _ = pending.reply.send(ParseOutcome::failed(pending.task.id, reason));
        }
        self.queued_ids.clear();
    }

    /// Resolve every waiting caller with a failure and release the workers
    fn terminate(&mut self) {
        if self.terminated {
            return;
        }
        self.terminated = true;

        let queued = self.queue.len();
        let in_flight = self.in_flight.len();
        self.fail_queued(TERMINATED);
        for (id, caller) in self.in_flight.drain() {
            let _ = caller.send(ParseOutcome::failed(id, TERMINATED));
        }

        self.idle.clear();
        // Dropping the senders ends each worker's receive loop
        for worker in &mut self.workers {
            *worker = None;
        }

        tracing::debug!(queued, in_flight, "worker pool terminated");
    }

    fn status(&self) -> PoolStatus {
        PoolStatus {
            pool_size: self.size,
            idle_workers: self.idle.len(),
            pending_tasks: self.queue.len(),
            in_flight: self.in_flight.len(),
            terminated: self.terminated,
        }
    }
}
