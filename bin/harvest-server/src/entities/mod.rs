//! Database abstraction layer.
//!
//! Each store concern is a trait ([`TaskStore`], [`DataRecordStore`]) with
//! the default implementation on [`SqliteStore`]. To swap to another
//! database, implement the traits (plus [`harvest_core::store::TaskStore`],
//! which the background worker consumes) for a new type and change the
//! concrete type in [`crate::state::AppState`].
//!
//! All trait methods use `impl Future` in their signatures (stable since Rust
//! 1.75) so no extra `async-trait` crate is required.
//!
//! # Migrations path
//!
//! `sqlx::migrate!("./migrations")` resolves the path **at compile time**
//! relative to `CARGO_MANIFEST_DIR` (the crate root), so the directory is
//! embedded into the binary. The database file location is determined at
//! runtime by `HARVEST_DATABASE_URL` and is **not** related to the current
//! working directory at runtime.
//!
//! # Queries
//!
//! The `sqlx::query` (runtime-verified) form is used deliberately so that no
//! `DATABASE_URL` environment variable is needed at compile time.

pub mod dao;
pub mod data_record;
pub mod task;

pub use dao::{DataRecordRow, TaskRecord};
pub use data_record::{DataRecordStore, RecordQuery};
pub use task::TaskStore;

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// SQLite-backed task and record store.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the SQLite database at `url` and run pending
    /// migrations.
    ///
    /// `url` should be a sqlx-compatible SQLite URL, e.g.
    /// `"sqlite://harvest.db"` or `"sqlite::memory:"` for tests.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        // In-memory databases exist per connection, so the pool must be
        // pinned to a single long-lived connection or later queries would
        // see an empty schema.
        let pool = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePool::connect_with(options).await?
        };
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }
}

/// Parse an RFC 3339 timestamp column, warning and substituting `now` on
/// malformed rows rather than failing the whole query.
pub(crate) fn parse_timestamp(raw: &str, column: &str) -> DateTime<Utc> {
    raw.parse().unwrap_or_else(|e: chrono::ParseError| {
        tracing::warn!(raw = %raw, column = %column, error = %e, "failed to parse timestamp; using now");
        Utc::now()
    })
}
