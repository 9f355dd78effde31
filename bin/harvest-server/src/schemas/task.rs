use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::TaskRecord;

fn default_name() -> String {
    "New Task".to_owned()
}

fn default_filter_params() -> serde_json::Value {
    serde_json::json!({})
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTaskRequest {
    #[serde(default = "default_name")]
    pub name: String,
    /// Stored verbatim; parsed by the background worker when the task runs.
    /// Recognised keys: `year_from`, `year_to`, `companies`, `categories`,
    /// `data_sources`. Unknown keys are ignored.
    #[serde(default = "default_filter_params")]
    pub filter_params: serde_json::Value,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TaskResponse {
    pub id: String,
    pub name: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub filter_params: serde_json::Value,
}

impl TaskRecord {
    pub fn to_response(&self) -> TaskResponse {
        TaskResponse {
            id: self.id.clone(),
            name: self.name.clone(),
            status: self.status.clone(),
            created_at: self.created_at.to_rfc3339(),
            updated_at: self.updated_at.to_rfc3339(),
            filter_params: serde_json::from_str(&self.filter_params)
                .unwrap_or_else(|_| serde_json::json!({})),
        }
    }
}
