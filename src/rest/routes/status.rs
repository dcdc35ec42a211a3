use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

use crate::error::AppError;
use crate::pipeline::AppState;

pub async fn status(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let task = state.tasks.get(&task_id).await.ok_or(AppError::NotFound)?;
    Ok(Json(task.status_payload()))
}
