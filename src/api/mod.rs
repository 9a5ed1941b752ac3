//! Task API
//!
//! The update operation is the only suspending call the edit modal makes.
//! It is expressed as an async trait so the TUI can run it on the tokio
//! runtime and tests can substitute a fake.

pub mod tasks;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::model::{Project, ProjectId, Task, TaskFormData, TaskId};

pub use tasks::StoreTaskApi;

/// Update failure. The message is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

/// Payload of one update call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateTaskRequest {
    pub project_id: ProjectId,
    pub task_id: TaskId,
    pub form_data: TaskFormData,
}

#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Apply `form_data` to the task. Resolves with a success message.
    async fn update_task(&self, request: UpdateTaskRequest) -> Result<String, ApiError>;

    /// Read a project with its tasks
    fn project(&self, project_id: &str) -> Result<Project, ApiError>;

    /// Read one task of a project
    fn task(&self, project_id: &str, task_id: &str) -> Result<Task, ApiError>;
}
