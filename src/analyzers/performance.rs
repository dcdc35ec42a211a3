use std::time::Instant;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceReport {
    pub load_time_ms: u64,
    pub total_size_kb: u64,
    pub num_requests: u32,
}

/// Single GET, measuring wall-clock milliseconds and body size in KB.
/// `load_time_ms` is floored at 1.
pub async fn analyze_performance(
    client: &reqwest::Client,
    url: &str,
) -> Result<PerformanceReport, reqwest::Error> {
    let start = Instant::now();
    let response = client.get(url).send().await?;
    let bytes = response.bytes().await?;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    Ok(PerformanceReport {
        load_time_ms: elapsed_ms.max(1),
        total_size_kb: (bytes.len() as u64) / 1024,
        num_requests: 1,
    })
}
