use std::future::Future;
use std::str::FromStr;

use chrono::Utc;

use harvest_core::types::{DataRecord, StoreError, StoredTask, TaskState};

use crate::entities::{SqliteStore, TaskRecord, parse_timestamp};

/// CRUD surface consumed by the HTTP handlers.
pub trait TaskStore: Send + Sync + 'static {
    fn insert_task(&self, record: TaskRecord)
    -> impl Future<Output = Result<(), sqlx::Error>> + Send;
    fn get_task(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<TaskRecord>, sqlx::Error>> + Send;
    fn list_tasks(&self) -> impl Future<Output = Result<Vec<TaskRecord>, sqlx::Error>> + Send;
}

type TaskRow = (String, String, String, String, String, String);

fn row_to_record((id, name, status, filter_params, created_at, updated_at): TaskRow) -> TaskRecord {
    TaskRecord {
        id,
        name,
        status,
        filter_params,
        created_at: parse_timestamp(&created_at, "tasks.created_at"),
        updated_at: parse_timestamp(&updated_at, "tasks.updated_at"),
    }
}

impl TaskStore for SqliteStore {
    async fn insert_task(&self, record: TaskRecord) -> Result<(), sqlx::Error> {
        let created_at = record.created_at.to_rfc3339();
        let updated_at = record.updated_at.to_rfc3339();
        sqlx::query(
            "INSERT INTO tasks (id, name, status, filter_params, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.status)
        .bind(&record.filter_params)
        .bind(&created_at)
        .bind(&updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_task(&self, id: &str) -> Result<Option<TaskRecord>, sqlx::Error> {
        let row: Option<TaskRow> = sqlx::query_as(
            "SELECT id, name, status, filter_params, created_at, updated_at \
             FROM tasks WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(row_to_record))
    }

    async fn list_tasks(&self) -> Result<Vec<TaskRecord>, sqlx::Error> {
        let rows: Vec<TaskRow> = sqlx::query_as(
            "SELECT id, name, status, filter_params, created_at, updated_at \
             FROM tasks ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(row_to_record).collect())
    }
}

// ── Worker-facing store ──────────────────────────────────────────────────────

fn store_err(e: sqlx::Error) -> StoreError {
    StoreError::new(e)
}

impl harvest_core::store::TaskStore for SqliteStore {
    async fn get_task(&self, id: &str) -> Result<Option<StoredTask>, StoreError> {
        let row: Option<(String, String, String, String)> =
            sqlx::query_as("SELECT id, name, status, filter_params FROM tasks WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(store_err)?;
        row.map(|(id, name, status, filter_params)| -> Result<StoredTask, StoreError> {
            let status = TaskState::from_str(&status)
                .map_err(|_| StoreError::new(anyhow::anyhow!("unknown task status: {status}")))?;
            Ok(StoredTask {
                id,
                name,
                status,
                filter_params,
            })
        })
        .transpose()
    }

    async fn update_status(&self, id: &str, status: TaskState) -> Result<(), StoreError> {
        let updated_at = Utc::now().to_rfc3339();
        // The WHERE guard keeps terminal statuses sticky, enforcing the
        // pending → in_progress → {completed, failed} progression.
        sqlx::query(
            "UPDATE tasks SET status = ?1, updated_at = ?2 \
             WHERE id = ?3 AND status NOT IN ('completed', 'failed')",
        )
        .bind(status.as_str())
        .bind(&updated_at)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(())
    }

    async fn append_records(
        &self,
        task_id: &str,
        records: &[DataRecord],
    ) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }
        let created_at = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await.map_err(store_err)?;
        for record in records {
            sqlx::query(
                "INSERT INTO data_records \
                 (task_id, source, category, brand, price, purchase_date, quantity, rating, \
                  platform, location, payment_method, product_id, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            )
            .bind(task_id)
            .bind(record.source.as_str())
            .bind(&record.category)
            .bind(&record.brand)
            .bind(record.price)
            .bind(record.purchase_date.to_rfc3339())
            .bind(record.quantity as i64)
            .bind(record.rating)
            .bind(&record.platform)
            .bind(&record.location)
            .bind(&record.payment_method)
            .bind(&record.product_id)
            .bind(&created_at)
            .execute(&mut *tx)
            .await
            .map_err(store_err)?;
        }
        tx.commit().await.map_err(store_err)?;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use harvest_core::store::TaskStore as CoreTaskStore;

    use super::*;
    use crate::entities::SqliteStore;

    async fn memory_store() -> SqliteStore {
        SqliteStore::connect("sqlite::memory:")
            .await
            .expect("in-memory database should open")
    }

    fn record(id: &str) -> TaskRecord {
        let now = Utc::now();
        TaskRecord {
            id: id.to_owned(),
            name: "roundtrip".to_owned(),
            status: TaskState::Pending.as_str().to_owned(),
            filter_params: r#"{"year_from":2021}"#.to_owned(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn insert_and_get_roundtrip() {
        let store = memory_store().await;
        store
            .insert_task(record("t1"))
            .await
            .expect("insert should succeed");

        let fetched = TaskStore::get_task(&store, "t1")
            .await
            .expect("query should succeed")
            .expect("task should exist");
        assert_eq!(fetched.name, "roundtrip");
        assert_eq!(fetched.status, "pending");
        assert_eq!(fetched.filter_params, r#"{"year_from":2021}"#);
    }

    #[tokio::test]
    async fn unknown_id_is_none() {
        let store = memory_store().await;
        assert!(
            TaskStore::get_task(&store, "missing")
                .await
                .expect("query should succeed")
                .is_none()
        );
    }

    #[tokio::test]
    async fn update_status_refreshes_updated_at() {
        let store = memory_store().await;
        store
            .insert_task(record("t1"))
            .await
            .expect("insert should succeed");

        CoreTaskStore::update_status(&store, "t1", TaskState::InProgress)
            .await
            .expect("update should succeed");

        let fetched = CoreTaskStore::get_task(&store, "t1")
            .await
            .expect("query should succeed")
            .expect("task should exist");
        assert_eq!(fetched.status, TaskState::InProgress);
    }

    #[tokio::test]
    async fn terminal_status_is_sticky() {
        let store = memory_store().await;
        store
            .insert_task(record("t1"))
            .await
            .expect("insert should succeed");

        CoreTaskStore::update_status(&store, "t1", TaskState::Completed)
            .await
            .expect("update should succeed");
        CoreTaskStore::update_status(&store, "t1", TaskState::InProgress)
            .await
            .expect("update should succeed");

        let fetched = CoreTaskStore::get_task(&store, "t1")
            .await
            .expect("query should succeed")
            .expect("task should exist");
        assert_eq!(fetched.status, TaskState::Completed);
    }
}
