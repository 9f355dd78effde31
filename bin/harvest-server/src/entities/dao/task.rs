use chrono::{DateTime, Utc};

/// A row in the `tasks` table.
#[derive(Debug, Clone)]
pub struct TaskRecord {
    pub id: String,
    pub name: String,
    /// One of `pending`, `in_progress`, `completed`, `failed`.
    pub status: String,
    /// JSON filter parameters exactly as submitted at creation time.
    pub filter_params: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
