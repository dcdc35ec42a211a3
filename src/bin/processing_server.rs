use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use scrapeforge::codec;
use scrapeforge::config::ProcessingConfig;
use scrapeforge::processing::{self, AnalyzeJob, AnalyzeOutcome};
use scrapeforge::worker_pool::WorkerPool;
use tracing::{error, info, warn};

/// Processing server: receives scraped pages over TCP and dispatches each
/// to the worker pool for analysis. Re-invoked with `--worker-child` by
/// its own worker pool to run as an isolated analyzer process instead.
#[derive(Parser, Debug)]
#[command(name = "processing-server")]
struct Args {
    #[arg(short = 'i', long, env = "SCRAPEFORGE_PROC_LISTEN_IP", default_value = "127.0.0.1")]
    ip: IpAddr,

    #[arg(short = 'p', long, env = "SCRAPEFORGE_PROC_LISTEN_PORT", default_value = "8090")]
    port: u16,

    #[arg(short = 'n', long, env = "SCRAPEFORGE_WORKER_PROCESSES")]
    processes: Option<usize>,

    #[arg(long, env = "SCRAPEFORGE_LOG", default_value = "info")]
    log: String,

    #[arg(long, env = "SCRAPEFORGE_CONFIG")]
    config: Option<PathBuf>,

    /// Internal: run as a worker-pool child reading jobs from stdin.
    #[arg(long, hide = true)]
    worker_child: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.worker_child {
        // Child processes inherit stdout for the framed protocol, so log
        // to stderr only.
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new(&args.log))
            .with_writer(std::io::stderr)
            .init();
        processing::run_worker_child_loop().await;
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&args.log))
        .init();

    let config = ProcessingConfig::resolve(args.ip, args.port, args.processes, args.config.as_deref());
    info!(pool_size = config.worker_pool_size, "spawning worker pool");
    let pool = WorkerPool::new(config.worker_pool_size).await?;

    let addr = format!("{}:{}", config.listen_ip, config.listen_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "starting processing-server");

    loop {
        let (mut stream, peer) = listener.accept().await?;
        let pool = Arc::clone(&pool);
        tokio::spawn(async move {
            loop {
                let job: AnalyzeJob = match codec::read_frame(&mut stream).await {
                    Ok(job) => job,
                    Err(_) => break,
                };
                let outcome = match pool.dispatch(&job).await {
                    Ok(processing_data) => AnalyzeOutcome::Success { processing_data },
                    Err(err) => {
                        warn!(%peer, %err, "job failed");
                        AnalyzeOutcome::Error { error: err.to_string() }
                    }
                };
                if let Err(err) = codec::write_frame(&mut stream, &outcome).await {
                    error!(%peer, %err, "failed to write response");
                    break;
                }
            }
        });
    }
}
