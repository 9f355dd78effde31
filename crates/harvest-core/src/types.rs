use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle state of a collection task.
///
/// Transitions are monotonic along
/// `Pending → InProgress → {Completed, Failed}`; a task never re-enters an
/// earlier state once it has left it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl TaskState {
    /// Returns `true` once the task can no longer transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Completed | TaskState::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Pending => "pending",
            TaskState::InProgress => "in_progress",
            TaskState::Completed => "completed",
            TaskState::Failed => "failed",
        }
    }
}

/// Tag identifying which simulated upstream system produced a record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Source {
    SourceA,
    SourceB,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::SourceA => "source_a",
            Source::SourceB => "source_b",
        }
    }
}

/// Filter parameters attached to a task at creation time.
///
/// Absent or empty keys impose no restriction. Unknown keys are ignored when
/// deserializing so clients can send extra fields without failing the task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterParams {
    /// Inclusive lower bound on the purchase year. Applied by the filter
    /// predicate only when `year_to` is also present.
    pub year_from: Option<i32>,
    /// Inclusive upper bound on the purchase year.
    pub year_to: Option<i32>,
    /// Brand names to keep; empty means unrestricted.
    #[serde(default)]
    pub companies: Vec<String>,
    /// Category names to keep; empty means unrestricted.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Source tags to collect from; `None` selects every registered source.
    /// Tags are matched against generator ids, so an unknown tag simply
    /// selects nothing rather than failing the task.
    #[serde(default)]
    pub data_sources: Option<Vec<String>>,
}

impl FilterParams {
    /// Whether the source with the given tag should be invoked.
    pub fn wants_source(&self, tag: &str) -> bool {
        match &self.data_sources {
            None => true,
            Some(tags) => tags.iter().any(|t| t == tag),
        }
    }
}

/// One synthetic purchase record produced by a source generator.
///
/// `rating` is present only for [`Source::SourceA`] records and `location`
/// only for [`Source::SourceB`] records. Records are never mutated after
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataRecord {
    pub source: Source,
    pub category: String,
    pub brand: String,
    pub price: f64,
    pub purchase_date: DateTime<Utc>,
    pub quantity: u32,
    pub rating: Option<f64>,
    pub platform: String,
    pub location: Option<String>,
    pub payment_method: String,
    pub product_id: String,
}

/// Task row as seen by the processor.
#[derive(Debug, Clone)]
pub struct StoredTask {
    pub id: String,
    pub name: String,
    pub status: TaskState,
    /// JSON filter parameters exactly as submitted at creation time.
    pub filter_params: String,
}

/// Opaque storage failure reported by a [`crate::store::TaskStore`]
/// implementation.
#[derive(Debug, Error)]
#[error("store error: {0}")]
pub struct StoreError(#[from] anyhow::Error);

impl StoreError {
    pub fn new(source: impl Into<anyhow::Error>) -> Self {
        Self(source.into())
    }
}

/// Failure raised while processing a single task.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The stored `filter_params` text could not be parsed.
    #[error("invalid filter_params: {message}")]
    InvalidFilter { message: String },

    /// A storage operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of driving one task through the processor.
///
/// The worker interprets the outcome and writes the terminal status; the
/// processor itself never writes `Completed` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// All active sources ran and their matches were persisted.
    Completed { records: usize },
    /// The task id was unknown at dequeue time; skipped.
    Missing,
}
