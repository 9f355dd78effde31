//! Drives a single task through its state machine.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::sources::SourceGenerator;
use crate::store::TaskStore;
use crate::types::{DataRecord, FilterParams, ProcessError, TaskOutcome, TaskState};

/// Hold windows applied while a task sits in `pending` and `in_progress`,
/// in seconds as `(min, max)`.
///
/// The holds model upstream acceptance and processing latency so the state
/// machine stays observable by polling clients.
#[derive(Debug, Clone)]
pub struct DelayProfile {
    pub pending: (f64, f64),
    pub in_progress: (f64, f64),
}

impl Default for DelayProfile {
    fn default() -> Self {
        Self {
            pending: (3.0, 4.0),
            in_progress: (4.0, 6.0),
        }
    }
}

impl DelayProfile {
    /// Zero-length holds, for tests.
    pub fn none() -> Self {
        Self {
            pending: (0.0, 0.0),
            in_progress: (0.0, 0.0),
        }
    }
}

async fn hold((min, max): (f64, f64)) {
    let secs = if max > min {
        rand::thread_rng().gen_range(min..max)
    } else {
        min
    };
    if secs > 0.0 {
        tokio::time::sleep(Duration::from_secs_f64(secs)).await;
    }
}

/// Runs one task at a time: holds it in `pending`, moves it to `in_progress`,
/// invokes the active source generators and persists the matched records.
///
/// Per-task terminal status is decided by the caller from the returned
/// [`TaskOutcome`] (or error); see [`crate::queue`].
#[derive(Clone)]
pub struct TaskProcessor<S> {
    store: S,
    sources: Arc<Vec<Box<dyn SourceGenerator>>>,
    delays: DelayProfile,
}

impl<S: TaskStore> TaskProcessor<S> {
    pub fn new(store: S, sources: Vec<Box<dyn SourceGenerator>>, delays: DelayProfile) -> Self {
        Self {
            store,
            sources: Arc::new(sources),
            delays,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Drive one task to its outcome.
    ///
    /// A missing task id is an outcome, not an error: the task may have been
    /// removed by an external collaborator between enqueue and dequeue.
    pub async fn process(&self, task_id: &str) -> Result<TaskOutcome, ProcessError> {
        let Some(task) = self.store.get_task(task_id).await? else {
            return Ok(TaskOutcome::Missing);
        };

        debug!(task_id = %task.id, name = %task.name, "task pending");
        hold(self.delays.pending).await;

        self.store
            .update_status(task_id, TaskState::InProgress)
            .await?;
        info!(task_id = %task.id, "task in progress");
        hold(self.delays.in_progress).await;

        let params: FilterParams = serde_json::from_str(&task.filter_params)
            .map_err(|e| ProcessError::InvalidFilter {
                message: e.to_string(),
            })?;

        let mut collected: Vec<DataRecord> = Vec::new();
        for source in self.sources.iter() {
            if !params.wants_source(source.id()) {
                continue;
            }
            let matched = source.fetch(&params);
            debug!(
                task_id = %task.id,
                source = source.id(),
                matched = matched.len(),
                "source fetched"
            );
            collected.extend(matched);
        }

        self.store.append_records(task_id, &collected).await?;

        Ok(TaskOutcome::Completed {
            records: collected.len(),
        })
    }
}
