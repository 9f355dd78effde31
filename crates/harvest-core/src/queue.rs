//! In-process work queue with a lazily started, self-terminating worker.
//!
//! At most one worker is alive per queue. The worker starts on the first
//! enqueue, drains the queue one task at a time, lingers briefly when idle
//! and then exits; the next enqueue starts a fresh one. Queue state lives
//! behind a single mutex, so the enqueue/exit race always resolves to either
//! "enqueue spawns a fresh worker" or "worker sees the new task" — an
//! enqueued id is never dropped.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Notify;
use tracing::{debug, info, warn};

use crate::processor::TaskProcessor;
use crate::store::TaskStore;
use crate::types::{TaskOutcome, TaskState};

/// Tuning knobs for the worker loop.
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// How long an idle worker lingers for new work before exiting.
    pub idle_timeout: Duration,
    /// Pause after a processing fault before picking up the next task.
    pub error_backoff: Duration,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(1),
            error_backoff: Duration::from_secs(1),
        }
    }
}

struct QueueState {
    pending: VecDeque<String>,
    worker_active: bool,
}

struct Shared<S> {
    state: Mutex<QueueState>,
    wakeup: Notify,
    processor: TaskProcessor<S>,
    config: QueueConfig,
}

/// Accepts task ids for asynchronous processing.
pub struct TaskQueue<S> {
    shared: Arc<Shared<S>>,
}

impl<S> Clone for TaskQueue<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S> std::fmt::Debug for TaskQueue<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (depth, active) = {
            let state = self.shared.state.lock().expect("queue state lock poisoned");
            (state.pending.len(), state.worker_active)
        };
        write!(f, "TaskQueue(depth: {depth}, worker_active: {active})")
    }
}

impl<S: TaskStore> TaskQueue<S> {
    pub fn new(processor: TaskProcessor<S>, config: QueueConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(QueueState {
                    pending: VecDeque::new(),
                    worker_active: false,
                }),
                wakeup: Notify::new(),
                processor,
                config,
            }),
        }
    }

    /// Queue a task for background processing.
    ///
    /// Starts a worker if none is running, otherwise wakes the one that is.
    /// Never blocks on processing; must be called from within a tokio
    /// runtime.
    pub fn enqueue(&self, task_id: impl Into<String>) {
        let task_id = task_id.into();
        let start_worker = {
            let mut state = self.shared.state.lock().expect("queue state lock poisoned");
            state.pending.push_back(task_id);
            if state.worker_active {
                false
            } else {
                state.worker_active = true;
                true
            }
        };

        if start_worker {
            let shared = Arc::clone(&self.shared);
            tokio::spawn(async move {
                worker_loop(shared).await;
            });
        } else {
            self.shared.wakeup.notify_one();
        }
    }

    /// Number of ids waiting to be picked up (excludes the task currently
    /// being processed).
    pub fn depth(&self) -> usize {
        self.shared
            .state
            .lock()
            .expect("queue state lock poisoned")
            .pending
            .len()
    }

    /// Whether a worker is currently alive.
    pub fn worker_active(&self) -> bool {
        self.shared
            .state
            .lock()
            .expect("queue state lock poisoned")
            .worker_active
    }
}

async fn worker_loop<S: TaskStore>(shared: Arc<Shared<S>>) {
    debug!("queue worker started");
    loop {
        let next = {
            shared
                .state
                .lock()
                .expect("queue state lock poisoned")
                .pending
                .pop_front()
        };

        let Some(task_id) = next else {
            // Idle: linger briefly for new work, then exit. The flag flips
            // inside the same critical section that enqueue checks, so a
            // concurrent enqueue either sees it cleared and spawns a fresh
            // worker, or this loop sees the new id on its next pass.
            let wakeup = tokio::time::timeout(shared.config.idle_timeout, shared.wakeup.notified());
            if wakeup.await.is_ok() {
                continue;
            }
            let mut state = shared.state.lock().expect("queue state lock poisoned");
            if state.pending.is_empty() {
                state.worker_active = false;
                debug!("queue worker idle; stopping");
                return;
            }
            continue;
        };

        match shared.processor.process(&task_id).await {
            Ok(TaskOutcome::Completed { records }) => {
                match shared
                    .processor
                    .store()
                    .update_status(&task_id, TaskState::Completed)
                    .await
                {
                    Ok(()) => info!(task_id = %task_id, records, "task completed"),
                    Err(e) => {
                        warn!(task_id = %task_id, error = %e, "failed to persist completed status");
                    }
                }
            }
            Ok(TaskOutcome::Missing) => {
                warn!(task_id = %task_id, "task not found; skipping");
            }
            Err(e) => {
                warn!(task_id = %task_id, error = %e, "task processing failed");
                // Best-effort terminal write; the fault itself is already logged.
                if let Err(e) = shared
                    .processor
                    .store()
                    .update_status(&task_id, TaskState::Failed)
                    .await
                {
                    warn!(task_id = %task_id, error = %e, "failed to persist failed status");
                }
                tokio::time::sleep(shared.config.error_backoff).await;
            }
        }
    }
}
