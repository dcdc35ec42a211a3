//! Wire types and dispatch logic shared by the processing server and its
//! worker-pool child processes.

pub mod analyze;
pub mod protocol;

pub use analyze::run_job;
pub use protocol::{AnalyzeJob, AnalyzeOutcome, TaskFlags};

use tokio::io::{stdin, stdout};

use crate::codec;

/// Entry point for a `--worker-child` process: reads one framed
/// `AnalyzeJob` at a time from stdin, runs it, and writes a framed
/// `AnalyzeOutcome` to stdout, until the parent closes the pipe.
pub async fn run_worker_child_loop() {
    let client = reqwest::Client::new();
    let mut input = stdin();
    let mut output = stdout();
    loop {
        let job: AnalyzeJob = match codec::read_frame(&mut input).await {
            Ok(job) => job,
            Err(_) => break,
        };
        let processing_data = run_job(&client, &job).await;
        let outcome = AnalyzeOutcome::Success { processing_data };
        if codec::write_frame(&mut output, &outcome).await.is_err() {
            break;
        }
    }
}
