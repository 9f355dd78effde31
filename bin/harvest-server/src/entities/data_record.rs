use std::future::Future;

use chrono::{DateTime, Utc};

use crate::entities::{DataRecordRow, SqliteStore, parse_timestamp};

/// Query-string refinements applied when reading a task's records.
///
/// Year bounds compare against the stored RFC 3339 `purchase_date` text, so
/// they are expanded to `[year-01-01, next-year-01-01)` date prefixes.
#[derive(Debug, Clone, Default)]
pub struct RecordQuery {
    /// Keep only records whose brand equals this value.
    pub company: Option<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
}

/// Read surface for persisted records, consumed by the HTTP handlers.
pub trait DataRecordStore: Send + Sync + 'static {
    fn list_records(
        &self,
        task_id: &str,
        query: &RecordQuery,
    ) -> impl Future<Output = Result<Vec<DataRecordRow>, sqlx::Error>> + Send;
}

type RecordRow = (
    i64,
    String,
    String,
    Option<String>,
    Option<String>,
    Option<f64>,
    Option<String>,
    i64,
    Option<f64>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    String,
);

fn row_to_record(row: RecordRow) -> DataRecordRow {
    let (
        id,
        task_id,
        source,
        category,
        brand,
        price,
        purchase_date,
        quantity,
        rating,
        platform,
        location,
        payment_method,
        product_id,
        created_at,
    ) = row;
    let purchase_date: Option<DateTime<Utc>> = purchase_date.and_then(|raw| {
        let parsed = raw.parse().ok();
        if parsed.is_none() {
            tracing::warn!(raw = %raw, "failed to parse data_records.purchase_date; dropping");
        }
        parsed
    });
    DataRecordRow {
        id,
        task_id,
        source,
        category,
        brand,
        price,
        purchase_date,
        quantity,
        rating,
        platform,
        location,
        payment_method,
        product_id,
        created_at: parse_timestamp(&created_at, "data_records.created_at"),
    }
}

impl DataRecordStore for SqliteStore {
    async fn list_records(
        &self,
        task_id: &str,
        query: &RecordQuery,
    ) -> Result<Vec<DataRecordRow>, sqlx::Error> {
        let mut sql = String::from(
            "SELECT id, task_id, source, category, brand, price, purchase_date, quantity, \
             rating, platform, location, payment_method, product_id, created_at \
             FROM data_records WHERE task_id = ?",
        );
        if query.company.is_some() {
            sql.push_str(" AND brand = ?");
        }
        if query.year_from.is_some() {
            sql.push_str(" AND purchase_date >= ?");
        }
        if query.year_to.is_some() {
            sql.push_str(" AND purchase_date < ?");
        }
        sql.push_str(" ORDER BY id");

        let mut q = sqlx::query_as::<_, RecordRow>(&sql).bind(task_id);
        if let Some(company) = &query.company {
            q = q.bind(company);
        }
        if let Some(year) = query.year_from {
            q = q.bind(format!("{year}-01-01"));
        }
        if let Some(year) = query.year_to {
            q = q.bind(format!("{}-01-01", year + 1));
        }

        let rows = q.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(row_to_record).collect())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use chrono::TimeZone;
    use harvest_core::store::TaskStore as CoreTaskStore;
    use harvest_core::types::{DataRecord, Source, TaskState};

    use super::*;
    use crate::entities::{TaskRecord, TaskStore};

    async fn store_with_task() -> SqliteStore {
        let store = SqliteStore::connect("sqlite::memory:")
            .await
            .expect("in-memory database should open");
        let now = Utc::now();
        store
            .insert_task(TaskRecord {
                id: "t1".to_owned(),
                name: "records".to_owned(),
                status: TaskState::Pending.as_str().to_owned(),
                filter_params: "{}".to_owned(),
                created_at: now,
                updated_at: now,
            })
            .await
            .expect("insert should succeed");
        store
    }

    fn purchase(brand: &str, year: i32) -> DataRecord {
        DataRecord {
            source: Source::SourceA,
            category: "Clothing".to_owned(),
            brand: brand.to_owned(),
            price: 49.99,
            purchase_date: Utc
                .with_ymd_and_hms(year, 7, 1, 9, 30, 0)
                .single()
                .expect("valid test date"),
            quantity: 2,
            rating: Some(4.0),
            platform: "Online".to_owned(),
            location: None,
            payment_method: "PayPal".to_owned(),
            product_id: "P4711".to_owned(),
        }
    }

    #[tokio::test]
    async fn append_and_list_roundtrip() {
        let store = store_with_task().await;
        store
            .append_records("t1", &[purchase("Nike", 2021), purchase("Adidas", 2022)])
            .await
            .expect("append should succeed");

        let rows = store
            .list_records("t1", &RecordQuery::default())
            .await
            .expect("query should succeed");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].task_id, "t1");
        assert_eq!(rows[0].source, "source_a");
        assert!(rows[0].purchase_date.is_some());
    }

    #[tokio::test]
    async fn company_filter_matches_brand() {
        let store = store_with_task().await;
        store
            .append_records("t1", &[purchase("Nike", 2021), purchase("Adidas", 2021)])
            .await
            .expect("append should succeed");

        let query = RecordQuery {
            company: Some("Nike".to_owned()),
            ..Default::default()
        };
        let rows = store
            .list_records("t1", &query)
            .await
            .expect("query should succeed");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].brand.as_deref(), Some("Nike"));
    }

    #[tokio::test]
    async fn year_bounds_are_inclusive() {
        let store = store_with_task().await;
        store
            .append_records(
                "t1",
                &[
                    purchase("Nike", 2020),
                    purchase("Nike", 2021),
                    purchase("Nike", 2023),
                ],
            )
            .await
            .expect("append should succeed");

        let query = RecordQuery {
            year_from: Some(2021),
            year_to: Some(2021),
            ..Default::default()
        };
        let rows = store
            .list_records("t1", &query)
            .await
            .expect("query should succeed");
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn empty_append_is_a_noop() {
        let store = store_with_task().await;
        store
            .append_records("t1", &[])
            .await
            .expect("empty append should succeed");
        let rows = store
            .list_records("t1", &RecordQuery::default())
            .await
            .expect("query should succeed");
        assert!(rows.is_empty());
    }
}
