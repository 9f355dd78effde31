//! harvest-core – the asynchronous task-processing core.
//!
//! A task is created elsewhere (see the server crate) with status `pending`
//! and its id handed to [`queue::TaskQueue::enqueue`]. A single lazily
//! started background worker pulls ids, drives each task through
//! [`processor::TaskProcessor`] — `pending → in_progress → {completed,
//! failed}` — invokes the [`sources`] filtered by [`filter::matches`] and
//! persists the results through the [`store::TaskStore`] contract.

pub mod filter;
pub mod processor;
pub mod queue;
pub mod sources;
pub mod store;
pub mod types;


pub use processor::{DelayProfile, TaskProcessor};
pub use queue::{QueueConfig, TaskQueue};
pub use sources::SourceGenerator;
pub use store::TaskStore;
pub use types::{
    DataRecord, FilterParams, ProcessError, Source, StoreError, StoredTask, TaskOutcome, TaskState,
};
