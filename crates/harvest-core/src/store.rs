//! Storage contract consumed by the task processor.
//!
//! The concrete implementation lives with the persistence layer (the server
//! crate ships a SQLite one); swapping engines means implementing this trait
//! for a new type, nothing in the core changes.
//!
//! All trait methods use `impl Future` in their signatures (stable since Rust
//! 1.75) so no extra `async-trait` crate is required.

use std::future::Future;

use crate::types::{DataRecord, StoreError, StoredTask, TaskState};

/// Task and record persistence as the processor sees it.
///
/// Writes must be durable when the returned future resolves; the processor
/// awaits each one before moving to the next phase.
pub trait TaskStore: Send + Sync + 'static {
    /// Fetch a task by id, or `None` if the id is unknown.
    fn get_task(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<StoredTask>, StoreError>> + Send;

    /// Set the task status and refresh `updated_at`.
    ///
    /// Implementations must refuse to overwrite a terminal status so the
    /// `pending → in_progress → {completed, failed}` progression holds even
    /// under races.
    fn update_status(
        &self,
        id: &str,
        status: TaskState,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Persist a batch of records attributed to the task.
    fn append_records(
        &self,
        task_id: &str,
        records: &[DataRecord],
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
