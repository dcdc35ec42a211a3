use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::pipeline::{self, AppState};
use crate::tasks::TaskStatus;

#[derive(Deserialize)]
pub struct ScrapeQuery {
    pub url: Option<String>,
}

pub async fn scrape(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScrapeQuery>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let url = query
        .url
        .ok_or_else(|| AppError::InvalidInput("Missing url param".to_string()))?;
    handle_scrape(state, url).await
}

pub async fn scrape_body(
    State(state): State<Arc<AppState>>,
    body: axum::body::Bytes,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let parsed: Value = serde_json::from_slice(&body)
        .map_err(|_| AppError::InvalidInput("Body inválido".to_string()))?;
    let url = parsed
        .get("url")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::InvalidInput("Missing url param".to_string()))?
        .to_string();
    handle_scrape(state, url).await
}

fn domain_of(url: &str) -> Result<String, AppError> {
    url::Url::parse(url)
        .ok()
        .filter(|parsed| matches!(parsed.scheme(), "http" | "https"))
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .ok_or_else(|| AppError::InvalidInput("URL inválida".to_string()))
}

async fn handle_scrape(state: Arc<AppState>, url: String) -> Result<(StatusCode, Json<Value>), AppError> {
    let domain = domain_of(&url)?;

    if !state.rate_limiter.allow(&domain).await {
        return Err(AppError::RateLimited);
    }

    if let Some(cached) = state.cache.get(&url).await {
        let task = state.tasks.create(url.clone()).await;
        state
            .tasks
            .set_result(&task.task_id, cached, TaskStatus::Completed)
            .await?;
        return Ok((
            StatusCode::OK,
            Json(json!({ "task_id": task.task_id, "status": "completed", "cached": true })),
        ));
    }

    let task = state.tasks.create(url.clone()).await;
    let task_id = task.task_id.clone();
    tokio::spawn(pipeline::run_scrape_task(state, task_id.clone(), url));

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "task_id": task_id, "status": "pending" })),
    ))
}
