use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use scrapeforge::cache::ResultCache;
use scrapeforge::config::FrontendConfig;
use scrapeforge::pipeline::AppState;
use scrapeforge::rate_limit::RateLimiter;
use scrapeforge::tasks::TaskManager;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_config() -> FrontendConfig {
    FrontendConfig::resolve(
        IpAddr::V4(Ipv4Addr::LOCALHOST),
        0,
        IpAddr::V4(Ipv4Addr::LOCALHOST),
        0,
        None,
        None,
        None,
        None,
    )
}

fn test_state(rate_limit_per_minute: u32) -> Arc<AppState> {
    Arc::new(AppState {
        tasks: TaskManager::new(),
        cache: Arc::new(ResultCache::new(3600)),
        rate_limiter: Arc::new(RateLimiter::new(rate_limit_per_minute)),
        http_client: reqwest::Client::new(),
        config: test_config(),
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn missing_url_param_is_bad_request() {
    let router = scrapeforge::rest::build_router(test_state(100));
    let response = router
        .oneshot(Request::get("/scrape").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Missing url param");
}

#[tokio::test]
async fn invalid_url_is_bad_request() {
    let router = scrapeforge::rest::build_router(test_state(100));
    let response = router
        .oneshot(Request::get("/scrape?url=not-a-url").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "URL inválida");
}

#[tokio::test]
async fn invalid_json_body_is_bad_request() {
    let router = scrapeforge::rest::build_router(test_state(100));
    let response = router
        .oneshot(
            Request::post("/scrape")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Body inválido");
}

#[tokio::test]
async fn third_request_to_same_domain_is_rate_limited() {
    let router = scrapeforge::rest::build_router(test_state(2));
    for _ in 0..2 {
        let response = router
            .clone()
            .oneshot(
                Request::get("/scrape?url=https://rate-limit-test.invalid/page")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }
    let response = router
        .oneshot(
            Request::get("/scrape?url=https://rate-limit-test.invalid/page")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Rate limit excedido para el dominio");
}

#[tokio::test]
async fn cached_result_short_circuits_the_pipeline() {
    let state = test_state(100);
    let url = "https://cached-example.invalid/page";
    state
        .cache
        .set(url, json!({"status": "success", "processing_data": {"seo": {"score": 90}}}))
        .await;

    let router = scrapeforge::rest::build_router(state);
    let response = router
        .oneshot(
            Request::get(&format!("/scrape?url={url}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["cached"], true);
    assert_eq!(body["status"], "completed");
}

#[tokio::test]
async fn status_for_unknown_task_is_not_found() {
    let router = scrapeforge::rest::build_router(test_state(100));
    let response = router
        .oneshot(Request::get("/status/does-not-exist").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn result_for_pending_task_is_accepted() {
    let state = test_state(100);
    let task = state.tasks.create("https://example.com".to_string()).await;
    let router = scrapeforge::rest::build_router(Arc::clone(&state));
    let response = router
        .oneshot(
            Request::get(format!("/result/{}", task.task_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
}
