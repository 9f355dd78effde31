use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entities::{DataRecordRow, RecordQuery};
use crate::schemas::task::TaskResponse;

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct RecordFilterQuery {
    /// Keep only records whose brand equals this value.
    pub company: Option<String>,
    /// Accepted for compatibility with older clients; collected records
    /// carry no model field, so this filter matches everything.
    pub car_model: Option<String>,
    /// Inclusive lower bound on the purchase year.
    pub year_from: Option<i32>,
    /// Inclusive upper bound on the purchase year.
    pub year_to: Option<i32>,
}

impl RecordFilterQuery {
    pub fn into_query(self) -> RecordQuery {
        RecordQuery {
            company: self.company,
            year_from: self.year_from,
            year_to: self.year_to,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DataRecordResponse {
    pub id: i64,
    pub task_id: String,
    pub source: String,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price: Option<f64>,
    pub purchase_date: Option<String>,
    pub quantity: i64,
    pub rating: Option<f64>,
    pub platform: Option<String>,
    pub location: Option<String>,
    pub payment_method: Option<String>,
    pub product_id: Option<String>,
    pub created_at: String,
}

/// Envelope returned by `GET /tasks/{id}/data`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TaskDataResponse {
    pub task: TaskResponse,
    pub data: Vec<DataRecordResponse>,
}

impl DataRecordRow {
    pub fn to_response(&self) -> DataRecordResponse {
        DataRecordResponse {
            id: self.id,
            task_id: self.task_id.clone(),
            source: self.source.clone(),
            category: self.category.clone(),
            brand: self.brand.clone(),
            price: self.price,
            purchase_date: self.purchase_date.map(|d| d.to_rfc3339()),
            quantity: self.quantity,
            rating: self.rating,
            platform: self.platform.clone(),
            location: self.location.clone(),
            payment_method: self.payment_method.clone(),
            product_id: self.product_id.clone(),
            created_at: self.created_at.to_rfc3339(),
        }
    }
}
