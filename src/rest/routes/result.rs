use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::pipeline::AppState;
use crate::tasks::TaskStatus;

pub async fn result(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let task = state.tasks.get(&task_id).await.ok_or(AppError::NotFound)?;

    match task.status {
        TaskStatus::Completed => {
            let result = task.result.unwrap_or_else(|| json!({}));
            Ok((StatusCode::OK, Json(result)))
        }
        TaskStatus::Failed => Ok((
            StatusCode::OK,
            Json(json!({
                "status": "failed",
                "error": task.error.unwrap_or_default(),
            })),
        )),
        other => Ok((
            StatusCode::ACCEPTED,
            Json(json!({ "task_id": task.task_id, "status": other })),
        )),
    }
}
