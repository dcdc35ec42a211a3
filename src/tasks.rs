//! Opaque-id task records and their lifecycle.
//!
//! In-memory registry guarded by a single `RwLock` (a `HashMap` behind a
//! lock, `register`/`update_status`-style methods returning `bool`/`Option`)
//! carrying tasks through `pending -> scraping -> processing ->
//! completed|failed`.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Scraping,
    Processing,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }

    fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Scraping => "scraping",
            TaskStatus::Processing => "processing",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaskRecord {
    pub task_id: String,
    pub url: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub result: Option<Value>,
    pub error: Option<String>,
}

impl TaskRecord {
    /// Shape returned by `GET /status/{task_id}`.
    pub fn status_payload(&self) -> Value {
        let mut payload = serde_json::json!({
            "task_id": self.task_id,
            "url": self.url,
            "status": self.status.as_str(),
            "created_at": self.created_at.to_rfc3339(),
            "updated_at": self.updated_at.to_rfc3339(),
        });
        let obj = payload.as_object_mut().unwrap();
        if let Some(err) = &self.error {
            obj.insert("error".to_string(), Value::String(err.clone()));
        }
        if let Some(result) = &self.result {
            if let Some(result_status) = result.get("status") {
                obj.insert("result_status".to_string(), result_status.clone());
            }
        }
        payload
    }
}

pub struct TaskManager {
    tasks: RwLock<HashMap<String, TaskRecord>>,
}

impl TaskManager {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            tasks: RwLock::new(HashMap::new()),
        })
    }

    /// Create a fresh task in `pending` state with a collision-resistant
    /// opaque 128-bit hex id.
    pub async fn create(&self, url: String) -> TaskRecord {
        let now = Utc::now();
        let record = TaskRecord {
            task_id: Uuid::new_v4().simple().to_string(),
            url,
            status: TaskStatus::Pending,
            created_at: now,
            updated_at: now,
            result: None,
            error: None,
        };
        self.tasks
            .write()
            .await
            .insert(record.task_id.clone(), record.clone());
        record
    }

    pub async fn get(&self, task_id: &str) -> Option<TaskRecord> {
        self.tasks.read().await.get(task_id).cloned()
    }

    /// Advance `status` and `updated_at`, recording `error` if given.
    /// `completed`/`failed` are terminal; further transitions on a
    /// terminal record are silently ignored rather than erroring.
    pub async fn set_status(
        &self,
        task_id: &str,
        status: TaskStatus,
        error: Option<String>,
    ) -> Result<(), AppError> {
        let mut tasks = self.tasks.write().await;
        let record = tasks.get_mut(task_id).ok_or(AppError::NotFound)?;
        if record.status.is_terminal() {
            return Ok(());
        }
        record.status = status;
        record.error = error;
        record.updated_at = Utc::now();
        Ok(())
    }

    /// Attach `result`, clear `error`, and set `status` (defaults to
    /// `completed`, but the processing pipeline also uses this with
    /// `completed` + a `partial` result status embedded in the JSON body).
    pub async fn set_result(
        &self,
        task_id: &str,
        result: Value,
        status: TaskStatus,
    ) -> Result<(), AppError> {
        let mut tasks = self.tasks.write().await;
        let record = tasks.get_mut(task_id).ok_or(AppError::NotFound)?;
        record.result = Some(result);
        record.error = None;
        record.status = status;
        record.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn create_then_get() {
        let manager = TaskManager::new();
        let record = manager.create("https://example.com".to_string()).await;
        assert_eq!(record.status, TaskStatus::Pending);
        let fetched = manager.get(&record.task_id).await.unwrap();
        assert_eq!(fetched.task_id, record.task_id);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let manager = TaskManager::new();
        assert!(manager.get("does-not-exist").await.is_none());
        let err = manager
            .set_status("does-not-exist", TaskStatus::Scraping, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn lifecycle_transitions_advance_updated_at() {
        let manager = TaskManager::new();
        let record = manager.create("https://example.com".to_string()).await;
        manager
            .set_status(&record.task_id, TaskStatus::Scraping, None)
            .await
            .unwrap();
        let after = manager.get(&record.task_id).await.unwrap();
        assert_eq!(after.status, TaskStatus::Scraping);
        assert!(after.updated_at >= record.updated_at);
    }

    #[tokio::test]
    async fn terminal_states_ignore_further_transitions() {
        let manager = TaskManager::new();
        let record = manager.create("https://example.com".to_string()).await;
        manager
            .set_status(&record.task_id, TaskStatus::Failed, Some("Timeout".into()))
            .await
            .unwrap();
        manager
            .set_status(&record.task_id, TaskStatus::Scraping, None)
            .await
            .unwrap();
        let after = manager.get(&record.task_id).await.unwrap();
        assert_eq!(after.status, TaskStatus::Failed);
        assert_eq!(after.error.as_deref(), Some("Timeout"));
    }

    #[tokio::test]
    async fn set_result_clears_error_and_marks_completed() {
        let manager = TaskManager::new();
        let record = manager.create("https://example.com".to_string()).await;
        manager
            .set_result(&record.task_id, json!({"status": "success"}), TaskStatus::Completed)
            .await
            .unwrap();
        let after = manager.get(&record.task_id).await.unwrap();
        assert_eq!(after.status, TaskStatus::Completed);
        assert!(after.error.is_none());
        assert_eq!(after.result, Some(json!({"status": "success"})));
    }
}
