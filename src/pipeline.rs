//! Scrape -> process -> merge orchestration, run as a detached background
//! task per `/scrape` request. Not coalesced: two concurrent requests for
//! the same URL run two independent fetches and processing calls, each
//! with its own task id — the result cache is the only place repeat
//! requests converge, and only after the first one lands.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::config::FrontendConfig;
use crate::html::{metadata, structure};
use crate::processing::{AnalyzeJob, TaskFlags};
use crate::processing_client;
use crate::tasks::{TaskManager, TaskStatus};
use crate::{cache::ResultCache, rate_limit::RateLimiter};

pub struct AppState {
    pub tasks: Arc<TaskManager>,
    pub cache: Arc<ResultCache>,
    pub rate_limiter: Arc<RateLimiter>,
    pub http_client: reqwest::Client,
    pub config: FrontendConfig,
}

fn build_scraping_data(html: &str, url: &str) -> Value {
    let parsed = structure::parse_basic_structure(html, Some(url));
    let meta = metadata::extract_meta_tags(html);
    json!({
        "title": parsed.title,
        "links": parsed.links,
        "structure": parsed.structure,
        "images_count": parsed.images_count,
        "image_urls": parsed.image_urls,
        "meta": meta,
    })
}

/// Runs the full pipeline for `task_id`/`url`, writing every terminal
/// outcome (fetch failure, timeout, partial, success) back through
/// `state.tasks` and populating `state.cache` on anything that reaches a
/// processing attempt.
pub async fn run_scrape_task(state: Arc<AppState>, task_id: String, url: String) {
    if let Err(err) = state.tasks.set_status(&task_id, TaskStatus::Scraping, None).await {
        warn!(%task_id, %err, "task vanished before scraping started");
        return;
    }

    let fetch = state
        .http_client
        .get(&url)
        .timeout(Duration::from_secs(30))
        .send()
        .await;

    let response = match fetch {
        Ok(resp) => resp,
        Err(err) if err.is_timeout() => {
            let _ = state
                .tasks
                .set_status(&task_id, TaskStatus::Failed, Some("Timeout".to_string()))
                .await;
            return;
        }
        Err(err) => {
            let _ = state
                .tasks
                .set_status(&task_id, TaskStatus::Failed, Some(err.to_string()))
                .await;
            return;
        }
    };

    let bytes = match response.bytes().await {
        Ok(b) => b,
        Err(err) => {
            let _ = state
                .tasks
                .set_status(&task_id, TaskStatus::Failed, Some(err.to_string()))
                .await;
            return;
        }
    };
    let html = String::from_utf8_lossy(&bytes).into_owned();

    let scraping_data = build_scraping_data(&html, &url);
    let image_urls: Vec<String> = scraping_data
        .get("image_urls")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .take(state.config.image_limit)
                .collect()
        })
        .unwrap_or_default();

    if let Err(err) = state.tasks.set_status(&task_id, TaskStatus::Processing, None).await {
        warn!(%task_id, %err, "task vanished before processing started");
        return;
    }

    let job = AnalyzeJob {
        url: url.clone(),
        html,
        scraping_data: scraping_data.clone(),
        image_urls,
        tasks: TaskFlags::default(),
    };

    let proc_addr = format!("{}:{}", state.config.proc_ip, state.config.proc_port);
    let result = match processing_client::call_processing_server(&proc_addr, &job).await {
        Ok(processing_data) => {
            info!(%task_id, %url, "scrape completed");
            json!({
                "status": "success",
                "scraping_data": scraping_data,
                "processing_data": processing_data,
            })
        }
        Err(err) => {
            error!(%task_id, %url, %err, "processing server unavailable, returning partial result");
            json!({
                "status": "partial",
                "scraping_data": scraping_data,
                "processing_data": {},
                "processing_error": err.to_string(),
            })
        }
    };

    state.cache.set(&url, result.clone()).await;
    let _ = state
        .tasks
        .set_result(&task_id, result, TaskStatus::Completed)
        .await;
}
