//! TCP client for calling the processing server from the front-end.

use std::time::Duration;

use serde_json::Value;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::codec;
use crate::error::AppError;
use crate::processing::{AnalyzeJob, AnalyzeOutcome};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Opens a fresh connection per call (no pooling — the processing server
/// is expected to be on the same host or a fast local network), sends one
/// framed job, and waits for one framed outcome.
pub async fn call_processing_server(
    proc_addr: &str,
    job: &AnalyzeJob,
) -> Result<Value, AppError> {
    let mut stream = timeout(CONNECT_TIMEOUT, TcpStream::connect(proc_addr))
        .await
        .map_err(|_| AppError::ProcessingUnavailable(format!("connect timeout: {proc_addr}")))?
        .map_err(|e| AppError::ProcessingUnavailable(format!("connect failed: {e}")))?;

    stream
        .set_nodelay(true)
        .map_err(|e| AppError::ProcessingUnavailable(format!("set_nodelay failed: {e}")))?;

    codec::write_frame(&mut stream, job).await?;

    let outcome: AnalyzeOutcome = timeout(READ_TIMEOUT, codec::read_frame(&mut stream))
        .await
        .map_err(|_| AppError::ProcessingUnavailable(format!("read timeout: {proc_addr}")))??;

    match outcome {
        AnalyzeOutcome::Success { processing_data } => Ok(processing_data),
        AnalyzeOutcome::Error { error } => Err(AppError::ProcessingUnavailable(error)),
    }
}
