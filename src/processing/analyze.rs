use std::panic::{catch_unwind, AssertUnwindSafe};

use base64::Engine;
use serde_json::{json, Value};

use crate::analyzers::{accessibility, performance, screenshot, seo, structured_data, tech_stack, thumbnails};
use crate::processing::protocol::AnalyzeJob;

/// Runs every task flagged `true` in `job.tasks` against `job`'s HTML and
/// URLs. Each analyzer is isolated: a panic or network failure yields that
/// field's neutral default (`null`, `[]`, or `{}`) rather than failing the
/// whole job. Network-backed analyzers (`performance`, `thumbnails`) use
/// `client`; the rest are pure functions over `job.html`.
pub async fn run_job(client: &reqwest::Client, job: &AnalyzeJob) -> Value {
    let mut processing_data = serde_json::Map::new();

    if job.tasks.seo {
        let title = job
            .scraping_data
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("");
        let description = job
            .scraping_data
            .get("meta")
            .and_then(|m| m.get("description"))
            .and_then(Value::as_str)
            .unwrap_or("");
        let html = job.html.clone();
        let report = catch_unwind(AssertUnwindSafe(|| seo::evaluate_seo(&html, title, description)));
        processing_data.insert(
            "seo".to_string(),
            report.map(|r| serde_json::to_value(r).unwrap_or(Value::Null)).unwrap_or(Value::Null),
        );
    }

    if job.tasks.accessibility {
        let html = job.html.clone();
        let report = catch_unwind(AssertUnwindSafe(|| accessibility::analyze_accessibility(&html)));
        processing_data.insert(
            "accessibility".to_string(),
            report.map(|r| serde_json::to_value(r).unwrap_or(Value::Null)).unwrap_or(Value::Null),
        );
    }

    if job.tasks.tech_stack {
        let html = job.html.clone();
        let techs = catch_unwind(AssertUnwindSafe(|| tech_stack::detect_technologies(&html)));
        processing_data.insert("tech_stack".to_string(), json!(techs.unwrap_or_default()));
    }

    if job.tasks.structured_data {
        let html = job.html.clone();
        let data = catch_unwind(AssertUnwindSafe(|| structured_data::extract_structured_data(&html)));
        processing_data.insert("structured_data".to_string(), json!(data.unwrap_or_default()));
    }

    if job.tasks.screenshot {
        let url = job.url.clone();
        let shot = catch_unwind(AssertUnwindSafe(|| screenshot::capture_screenshot(&url)));
        let encoded = shot
            .ok()
            .and_then(|r| r.ok())
            .map(|bytes| Value::String(base64::engine::general_purpose::STANDARD.encode(bytes)));
        processing_data.insert("screenshot".to_string(), encoded.unwrap_or(Value::Null));
    }

    if job.tasks.performance {
        match performance::analyze_performance(client, &job.url).await {
            Ok(report) => {
                processing_data.insert(
                    "performance".to_string(),
                    serde_json::to_value(report).unwrap_or(Value::Null),
                );
            }
            Err(_) => {
                processing_data.insert("performance".to_string(), Value::Null);
            }
        }
    }

    if job.tasks.thumbnails {
        let thumbs = thumbnails::generate_thumbnails(client, &job.image_urls, 5).await;
        let encoded: Vec<Value> = thumbs
            .into_iter()
            .map(|t| {
                json!({
                    "source_url": t.source_url,
                    "width": t.width,
                    "height": t.height,
                    "data": base64::engine::general_purpose::STANDARD.encode(t.png_bytes),
                })
            })
            .collect();
        processing_data.insert("thumbnails".to_string(), Value::Array(encoded));
    }

    Value::Object(processing_data)
}
