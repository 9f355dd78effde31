use chrono::{DateTime, Utc};

/// A row in the `data_records` table.
///
/// `rating` is populated only for `source_a` rows and `location` only for
/// `source_b` rows; rows are written once by the background worker and never
/// updated.
#[derive(Debug, Clone)]
pub struct DataRecordRow {
    pub id: i64,
    pub task_id: String,
    pub source: String,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price: Option<f64>,
    pub purchase_date: Option<DateTime<Utc>>,
    pub quantity: i64,
    pub rating: Option<f64>,
    pub platform: Option<String>,
    pub location: Option<String>,
    pub payment_method: Option<String>,
    pub product_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
