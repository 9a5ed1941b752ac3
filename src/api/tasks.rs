//! File-store backed implementation of [`TaskApi`].
//!
//! Reads go straight to `tasks.toml`; updates run on the blocking pool and
//! are serialized so two saves never interleave their load-modify-save.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::model::{Project, Task};
use crate::storage::tasks::TaskStore;

use super::{ApiError, TaskApi, UpdateTaskRequest};

pub const TASK_UPDATED: &str = "Task updated";
pub const TASK_NOT_FOUND: &str = "Task not found";
pub const PROJECT_NOT_FOUND: &str = "Project not found";
pub const INVALID_ACTION: &str = "Invalid action";

pub struct StoreTaskApi {
    store: TaskStore,
    write_lock: Mutex<()>,
}

impl StoreTaskApi {
    pub fn new(store: TaskStore) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &TaskStore {
        &self.store
    }
}

/// Apply an update against the store. Shared by the async path and the CLI.
pub fn apply_update(store: &TaskStore, request: &UpdateTaskRequest) -> Result<String, ApiError> {
    let mut tasks = store.load_tasks(&request.project_id)?;
    let Some(task) = tasks.iter_mut().find(|t| t.id == request.task_id) else {
        return Err(ApiError::new(TASK_NOT_FOUND));
    };
    if task.project != request.project_id {
        return Err(ApiError::new(INVALID_ACTION));
    }
    task.apply(&request.form_data);
    store.save_tasks(&request.project_id, &tasks)?;
    tracing::info!(
        project = %request.project_id,
        task = %request.task_id,
        "task updated"
    );
    Ok(TASK_UPDATED.to_string())
}

#[async_trait]
impl TaskApi for StoreTaskApi {
    async fn update_task(&self, request: UpdateTaskRequest) -> Result<String, ApiError> {
        let _guard = self.write_lock.lock().await;
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || apply_update(&store, &request))
            .await
            .map_err(|e| ApiError::new(format!("Update interrupted: {}", e)))?
    }

    fn project(&self, project_id: &str) -> Result<Project, ApiError> {
        if !self.store.project_exists(project_id) {
            return Err(ApiError::new(PROJECT_NOT_FOUND));
        }
        Ok(Project {
            id: project_id.to_string(),
            tasks: self.store.load_tasks(project_id)?,
        })
    }

    fn task(&self, project_id: &str, task_id: &str) -> Result<Task, ApiError> {
        let task = self
            .store
            .get_task(project_id, task_id)?
            .ok_or_else(|| ApiError::new(TASK_NOT_FOUND))?;
        if task.project != project_id {
            return Err(ApiError::new(INVALID_ACTION));
        }
        Ok(task)
    }
}
