//! Bounded pool of child OS processes, each a re-invocation of this binary
//! in `--worker-child` mode. Isolation is process-level rather than
//! thread-level so a crashing or hung analyzer cannot take down the
//! processing server itself; a dead worker is detected on next use and
//! respawned transparently.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;

use serde_json::Value;
use tokio::io::{BufReader, BufWriter};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::{Mutex, Semaphore};
use tracing::warn;

use crate::codec;
use crate::error::AppError;
use crate::processing::protocol::{AnalyzeJob, AnalyzeOutcome};

struct Worker {
    child: Child,
    stdin: BufWriter<ChildStdin>,
    stdout: BufReader<ChildStdout>,
}

impl Worker {
    async fn spawn(exe: &PathBuf) -> Result<Self, AppError> {
        let mut child = Command::new(exe)
            .arg("--worker-child")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AppError::ProcessingUnavailable(format!("worker spawn failed: {e}")))?;
        let stdin = BufWriter::new(
            child
                .stdin
                .take()
                .ok_or_else(|| AppError::ProcessingUnavailable("worker missing stdin".into()))?,
        );
        let stdout = BufReader::new(
            child
                .stdout
                .take()
                .ok_or_else(|| AppError::ProcessingUnavailable("worker missing stdout".into()))?,
        );
        Ok(Self { child, stdin, stdout })
    }

    fn is_alive(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    async fn run(&mut self, job: &AnalyzeJob) -> Result<Value, AppError> {
        codec::write_frame(&mut self.stdin, job).await?;
        let outcome: AnalyzeOutcome = codec::read_frame(&mut self.stdout).await?;
        match outcome {
            AnalyzeOutcome::Success { processing_data } => Ok(processing_data),
            AnalyzeOutcome::Error { error } => Err(AppError::ProcessingUnavailable(error)),
        }
    }
}

pub struct WorkerPool {
    exe: PathBuf,
    idle: Mutex<VecDeque<Worker>>,
    permits: Semaphore,
}

impl WorkerPool {
    pub async fn new(size: usize) -> Result<Arc<Self>, AppError> {
        let exe = std::env::current_exe()
            .map_err(|e| AppError::ProcessingUnavailable(format!("cannot resolve own binary: {e}")))?;
        let mut idle = VecDeque::with_capacity(size);
        for _ in 0..size.max(1) {
            idle.push_back(Worker::spawn(&exe).await?);
        }
        Ok(Arc::new(Self {
            exe,
            idle: Mutex::new(idle),
            permits: Semaphore::new(size.max(1)),
        }))
    }

    /// Runs `job` on the next free worker, blocking until one is available.
    /// A dead worker is replaced before use; a run that fails because the
    /// worker died mid-job is retried once on a freshly spawned worker.
    pub async fn dispatch(&self, job: &AnalyzeJob) -> Result<Value, AppError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| AppError::ProcessingUnavailable("worker pool closed".into()))?;

        let mut worker = {
            let mut idle = self.idle.lock().await;
            match idle.pop_front() {
                Some(w) => w,
                None => Worker::spawn(&self.exe).await?,
            }
        };

        if !worker.is_alive() {
            warn!("worker process died while idle, respawning");
            worker = Worker::spawn(&self.exe).await?;
        }

        match worker.run(job).await {
            Ok(data) => {
                self.idle.lock().await.push_back(worker);
                Ok(data)
            }
            Err(err) => {
                warn!(%err, "worker run failed, respawning and retrying once");
                let mut fresh = Worker::spawn(&self.exe).await?;
                let retried = fresh.run(job).await;
                self.idle.lock().await.push_back(fresh);
                retried
            }
        }
    }
}
