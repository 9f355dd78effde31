//! Retrieval of the records collected for a task, with query-string
//! refinement over the already-persisted rows.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::entities::{DataRecordStore, TaskStore};
use crate::error::ServerError;
use crate::schemas::data_record::{DataRecordResponse, RecordFilterQuery, TaskDataResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(get_task_data),
    components(schemas(RecordFilterQuery, DataRecordResponse, TaskDataResponse))
)]
pub struct DataApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/tasks/{id}/data", get(get_task_data))
}

#[utoipa::path(
    get,
    path = "/tasks/{id}/data",
    tag = "data",
    params(
        ("id" = String, Path, description = "ID of the task whose records to read"),
        RecordFilterQuery,
    ),
    responses(
        (status = 200, description = "Task and its records", body = TaskDataResponse),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Backend error"),
    )
)]
pub async fn get_task_data(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(filter): Query<RecordFilterQuery>,
) -> Result<Json<TaskDataResponse>, ServerError> {
    let task = state
        .store
        .get_task(&id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("task {id} not found")))?;

    let records = state.store.list_records(&id, &filter.into_query()).await?;

    Ok(Json(TaskDataResponse {
        task: task.to_response(),
        data: records.iter().map(|r| r.to_response()).collect(),
    }))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use serde_json::json;

    use crate::routes::testutil::{request, test_router, test_state, wait_terminal};

    #[tokio::test]
    async fn data_for_unknown_task_returns_404() {
        let state = test_state().await;
        let router = test_router(state);

        let (status, body) = request(&router, "GET", "/tasks/9999/data", None).await;
        assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn collects_only_matching_records() {
        let state = test_state().await;
        let router = test_router(Arc::clone(&state));

        let (_, created) = request(
            &router,
            "POST",
            "/tasks",
            Some(json!({
                "name": "T1",
                "filter_params": {
                    "year_from": 2021,
                    "year_to": 2021,
                    "companies": ["Nike"],
                    "data_sources": ["source_a"]
                }
            })),
        )
        .await;
        let id = created["id"].as_str().expect("task id").to_owned();
        assert_eq!(wait_terminal(&state.store, &id).await, "completed");

        let (status, body) = request(&router, "GET", &format!("/tasks/{id}/data"), None).await;
        assert_eq!(status, axum::http::StatusCode::OK);
        assert_eq!(body["task"]["status"], "completed");

        let data = body["data"].as_array().expect("data array");
        assert!(!data.is_empty(), "Nike 2021 filter should keep some records");
        for record in data {
            assert_eq!(record["brand"], "Nike");
            assert_eq!(record["source"], "source_a");
            let date = record["purchase_date"].as_str().expect("purchase date");
            assert!(date.starts_with("2021-"));
            assert!(record["rating"].is_number());
            assert!(record["location"].is_null());
        }
    }

    #[tokio::test]
    async fn unknown_source_completes_with_zero_records() {
        let state = test_state().await;
        let router = test_router(Arc::clone(&state));

        let (_, created) = request(
            &router,
            "POST",
            "/tasks",
            Some(json!({
                "name": "nowhere",
                "filter_params": {"data_sources": ["source_c"]}
            })),
        )
        .await;
        let id = created["id"].as_str().expect("task id").to_owned();
        assert_eq!(wait_terminal(&state.store, &id).await, "completed");

        let (_, body) = request(&router, "GET", &format!("/tasks/{id}/data"), None).await;
        assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn company_query_refines_persisted_records() {
        let state = test_state().await;
        let router = test_router(Arc::clone(&state));

        let (_, created) =
            request(&router, "POST", "/tasks", Some(json!({ "name": "all" }))).await;
        let id = created["id"].as_str().expect("task id").to_owned();
        assert_eq!(wait_terminal(&state.store, &id).await, "completed");

        let (_, body) = request(
            &router,
            "GET",
            &format!("/tasks/{id}/data?company=Nike&year_from=2021&year_to=2022"),
            None,
        )
        .await;
        let data = body["data"].as_array().expect("data array");
        for record in data {
            assert_eq!(record["brand"], "Nike");
            let date = record["purchase_date"].as_str().expect("purchase date");
            assert!(date.starts_with("2021-") || date.starts_with("2022-"));
        }
    }
}
