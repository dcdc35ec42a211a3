use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use scrapeforge::cache::ResultCache;
use scrapeforge::config::FrontendConfig;
use scrapeforge::pipeline::AppState;
use scrapeforge::rate_limit::RateLimiter;
use scrapeforge::tasks::TaskManager;
use tracing::info;

/// HTTP front-end: accepts scrape requests, tracks task lifecycle, and
/// delegates page analysis to the processing server.
#[derive(Parser, Debug)]
#[command(name = "scrape-frontend")]
struct Args {
    #[arg(short = 'i', long, env = "SCRAPEFORGE_LISTEN_IP", default_value = "127.0.0.1")]
    ip: IpAddr,

    #[arg(short = 'p', long, env = "SCRAPEFORGE_LISTEN_PORT", default_value = "8080")]
    port: u16,

    #[arg(long, env = "SCRAPEFORGE_PROC_IP", default_value = "127.0.0.1")]
    proc_ip: IpAddr,

    #[arg(long, env = "SCRAPEFORGE_PROC_PORT", default_value = "8090")]
    proc_port: u16,

    #[arg(short = 'w', long, env = "SCRAPEFORGE_MAX_CONN_PER_HOST")]
    workers: Option<usize>,

    #[arg(long, env = "SCRAPEFORGE_RATE_LIMIT")]
    rate_limit: Option<u32>,

    #[arg(long, env = "SCRAPEFORGE_CACHE_TTL")]
    cache_ttl: Option<u64>,

    #[arg(long, env = "SCRAPEFORGE_LOG", default_value = "info")]
    log: String,

    #[arg(long, env = "SCRAPEFORGE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&args.log))
        .init();

    let config = FrontendConfig::resolve(
        args.ip,
        args.port,
        args.proc_ip,
        args.proc_port,
        args.workers,
        args.rate_limit,
        args.cache_ttl,
        args.config.as_deref(),
    );

    let http_client = reqwest::Client::builder()
        .pool_max_idle_per_host(config.max_connections_per_host)
        .timeout(Duration::from_secs(30))
        .build()?;

    let state = Arc::new(AppState {
        tasks: TaskManager::new(),
        cache: Arc::new(ResultCache::new(config.cache_ttl_secs)),
        rate_limiter: Arc::new(RateLimiter::new(config.rate_limit_per_minute)),
        http_client,
        config: config.clone(),
    });

    let router = scrapeforge::rest::build_router(state);
    let addr = format!("{}:{}", config.listen_ip, config.listen_port);
    info!(%addr, "starting scrape-frontend");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
