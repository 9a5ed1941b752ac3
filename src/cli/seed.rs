//! `taskdeck seed`: create a project with demo tasks.

use crate::error::{Result, TaskdeckError};
use crate::model::Task;
use crate::storage::tasks::TaskStore;

const DEMO_TASKS: &[(&str, &str)] = &[
    ("Write spec", "Draft v1 of the task editor behaviour"),
    ("Review copy", "Check toast messages and form labels"),
    ("Ship release", "Tag, build and publish"),
];

/// Seed `project` with demo tasks. Refuses to touch an existing project.
pub fn execute(store: &TaskStore, project: &str) -> Result<Vec<Task>> {
    if project.trim().is_empty() || project.contains('/') {
        return Err(TaskdeckError::invalid_data(format!(
            "invalid project id: {:?}",
            project
        )));
    }
    if store.project_exists(project) {
        return Err(TaskdeckError::invalid_data(format!(
            "project '{}' already exists",
            project
        )));
    }

    let tasks: Vec<Task> = DEMO_TASKS
        .iter()
        .map(|(name, description)| Task::new(project, *name, *description))
        .collect();
    store.save_tasks(project, &tasks)?;
    tracing::info!(project, count = tasks.len(), "project seeded");

    Ok(tasks)
}
