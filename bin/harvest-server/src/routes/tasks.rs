//! Task creation and status endpoints.
//!
//! Creation persists the task with status `pending` and hands its id to the
//! work queue; everything after that is observable only by polling
//! `GET /tasks/{id}` until the status turns terminal.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use tracing::info;
use utoipa::OpenApi;
use uuid::Uuid;

use harvest_core::types::TaskState;

use crate::entities::{TaskRecord, TaskStore};
use crate::error::ServerError;
use crate::schemas::task::{CreateTaskRequest, TaskResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(create_task, list_tasks, get_task),
    components(schemas(CreateTaskRequest, TaskResponse))
)]
pub struct TasksApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", get(get_task))
}

#[utoipa::path(
    post,
    path = "/tasks",
    tag = "tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created and queued", body = TaskResponse),
        (status = 500, description = "Backend error"),
    )
)]
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ServerError> {
    let now = Utc::now();
    let record = TaskRecord {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        status: TaskState::Pending.as_str().to_owned(),
        filter_params: req.filter_params.to_string(),
        created_at: now,
        updated_at: now,
    };
    state.store.insert_task(record.clone()).await?;

    // Hand off for background processing only after the row is durable so
    // the worker can never dequeue an id it cannot read back.
    state.queue.enqueue(record.id.clone());

    info!(task_id = %record.id, name = %record.name, "task created and queued");
    Ok((StatusCode::CREATED, Json(record.to_response())))
}

#[utoipa::path(
    get,
    path = "/tasks",
    tag = "tasks",
    responses(
        (status = 200, description = "Tasks listed", body = [TaskResponse]),
        (status = 500, description = "Backend error"),
    )
)]
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TaskResponse>>, ServerError> {
    let records = state.store.list_tasks().await?;
    Ok(Json(records.iter().map(|r| r.to_response()).collect()))
}

#[utoipa::path(
    get,
    path = "/tasks/{id}",
    tag = "tasks",
    params(
        ("id" = String, Path, description = "ID of the task to retrieve")
    ),
    responses(
        (status = 200, description = "Task retrieved", body = TaskResponse),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Backend error"),
    )
)]
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TaskResponse>, ServerError> {
    let record = state
        .store
        .get_task(&id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("task {id} not found")))?;
    Ok(Json(record.to_response()))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use serde_json::json;

    use crate::routes::testutil::{request, test_router, test_state, wait_terminal};

    #[tokio::test]
    async fn create_task_returns_201_pending() {
        let state = test_state().await;
        let router = test_router(Arc::clone(&state));

        let (status, body) = request(
            &router,
            "POST",
            "/tasks",
            Some(json!({
                "name": "T1",
                "filter_params": {"year_from": 2021, "year_to": 2022}
            })),
        )
        .await;

        assert_eq!(status, axum::http::StatusCode::CREATED);
        assert_eq!(body["name"], "T1");
        assert_eq!(body["status"], "pending");
        assert_eq!(body["filter_params"]["year_from"], 2021);

        // The queued task must eventually reach a terminal state.
        let id = body["id"].as_str().expect("task id").to_owned();
        assert_eq!(wait_terminal(&state.store, &id).await, "completed");
    }

    #[tokio::test]
    async fn create_task_defaults_name_and_params() {
        let state = test_state().await;
        let router = test_router(Arc::clone(&state));

        let (status, body) = request(&router, "POST", "/tasks", Some(json!({}))).await;
        assert_eq!(status, axum::http::StatusCode::CREATED);
        assert_eq!(body["name"], "New Task");
        assert!(body["filter_params"].is_object());
    }

    #[tokio::test]
    async fn get_unknown_task_returns_404_with_error_body() {
        let state = test_state().await;
        let router = test_router(state);

        let (status, body) = request(&router, "GET", "/tasks/9999", None).await;
        assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap_or("").contains("9999"));
    }

    #[tokio::test]
    async fn list_tasks_includes_created_tasks() {
        let state = test_state().await;
        let router = test_router(Arc::clone(&state));

        for name in ["a", "b"] {
            let (status, _) =
                request(&router, "POST", "/tasks", Some(json!({ "name": name }))).await;
            assert_eq!(status, axum::http::StatusCode::CREATED);
        }

        let (status, body) = request(&router, "GET", "/tasks", None).await;
        assert_eq!(status, axum::http::StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn reads_are_idempotent_once_terminal() {
        let state = test_state().await;
        let router = test_router(Arc::clone(&state));

        let (_, created) =
            request(&router, "POST", "/tasks", Some(json!({ "name": "stable" }))).await;
        let id = created["id"].as_str().expect("task id").to_owned();
        wait_terminal(&state.store, &id).await;

        let (_, first) = request(&router, "GET", &format!("/tasks/{id}"), None).await;
        let (_, second) = request(&router, "GET", &format!("/tasks/{id}"), None).await;
        assert_eq!(first, second);
    }
}
