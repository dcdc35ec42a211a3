use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which analyzers the caller wants run, mirroring the front-end's
/// all-tasks-enabled default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskFlags {
    #[serde(default = "default_true")]
    pub screenshot: bool,
    #[serde(default = "default_true")]
    pub performance: bool,
    #[serde(default = "default_true")]
    pub thumbnails: bool,
    #[serde(default = "default_true")]
    pub tech_stack: bool,
    #[serde(default = "default_true")]
    pub seo: bool,
    #[serde(default = "default_true")]
    pub structured_data: bool,
    #[serde(default = "default_true")]
    pub accessibility: bool,
}

fn default_true() -> bool {
    true
}

impl Default for TaskFlags {
    fn default() -> Self {
        Self {
            screenshot: true,
            performance: true,
            thumbnails: true,
            tech_stack: true,
            seo: true,
            structured_data: true,
            accessibility: true,
        }
    }
}

/// One unit of work sent over the wire to the processing server (and from
/// there, over the same framing to a worker-pool child process).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeJob {
    pub url: String,
    pub html: String,
    pub scraping_data: Value,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub tasks: TaskFlags,
}

/// Response shape: `{"status": "success", "processing_data": {...}}` on
/// success, `{"status": "error", "error": "..."}` if the job could not be
/// run at all (distinct from an individual analyzer failing, which yields
/// a neutral default for that field instead).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnalyzeOutcome {
    Success { processing_data: Value },
    Error { error: String },
}
