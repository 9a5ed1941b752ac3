//! `taskdeck edit`: run the Edit Task flow without a terminal UI.
//!
//! Mounts the same modal the board uses, fills in the overrides, submits,
//! and reports the toast it produced.

use std::sync::Arc;

use crate::api::{StoreTaskApi, TaskApi};
use crate::error::{Result, TaskdeckError};
use crate::form::FormField;
use crate::notify::{ToastLevel, ToastQueue};
use crate::query::QueryClient;
use crate::route::{Location, RouteHistory, EDIT_TASK_PARAM};
use crate::ui::components::edit_task_modal::{EditTaskModal, ModalHandles};

/// Outcome of a headless edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Saved(String),
    Failed(String),
    /// Validation blocked the submit
    Invalid(Vec<&'static str>),
}

pub async fn run(
    api: &StoreTaskApi,
    project: &str,
    task_id: &str,
    name: Option<String>,
    description: Option<String>,
) -> Result<EditOutcome> {
    let task = api
        .task(project, task_id)
        .map_err(|e| TaskdeckError::not_found(e.message))?;

    let toasts = Arc::new(ToastQueue::default());
    let history = Arc::new(RouteHistory::new(
        Location::project(project).with_query(EDIT_TASK_PARAM, task_id),
    ));
    let handles = ModalHandles {
        queries: Arc::new(QueryClient::default()),
        navigator: history,
        notifier: toasts.clone(),
    };

    let mut modal = EditTaskModal::open(&task, task_id, handles)?;
    if let Some(name) = name {
        modal.form_mut().set_value(FormField::Name, name);
    }
    if let Some(description) = description {
        modal.form_mut().set_value(FormField::Description, description);
    }

    if !modal.save(api).await {
        let errors = modal.form().errors();
        let messages = [errors.name, errors.description]
            .into_iter()
            .flatten()
            .collect();
        return Ok(EditOutcome::Invalid(messages));
    }

    let outcome = match toasts.visible().pop() {
        Some(toast) if toast.level == ToastLevel::Success => EditOutcome::Saved(toast.message),
        Some(toast) => EditOutcome::Failed(toast.message),
        None => EditOutcome::Failed("No response".to_string()),
    };
    Ok(outcome)
}

/// Print the outcome; returns false when the edit did not go through.
pub fn report(outcome: &EditOutcome) -> bool {
    match outcome {
        EditOutcome::Saved(message) => {
            println!("✓ {}", message);
            true
        }
        EditOutcome::Failed(message) => {
            eprintln!("✗ {}", message);
            false
        }
        EditOutcome::Invalid(messages) => {
            for message in messages {
                eprintln!("✗ {}", message);
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{DESCRIPTION_REQUIRED, NAME_REQUIRED};
    use crate::model::Task;
    use crate::storage::tasks::TaskStore;

    fn setup() -> (tempfile::TempDir, StoreTaskApi, Task) {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::open(dir.path());
        let task = Task::new("demo", "Write spec", "Draft v1");
        store.add_task("demo", task.clone()).unwrap();
        (dir, StoreTaskApi::new(store), task)
    }

    #[tokio::test]
    async fn test_edit_keeps_omitted_fields() {
        let (_dir, api, task) = setup();

        let outcome = run(&api, "demo", &task.id, Some("Write full spec".into()), None)
            .await
            .unwrap();

        assert_eq!(outcome, EditOutcome::Saved("Task updated".to_string()));
        let stored = api.task("demo", &task.id).unwrap();
        assert_eq!(stored.name, "Write full spec");
        assert_eq!(stored.description, "Draft v1");
    }

    #[tokio::test]
    async fn test_edit_blank_values_are_rejected() {
        let (_dir, api, task) = setup();

        let outcome = run(&api, "demo", &task.id, Some(" ".into()), Some(String::new()))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            EditOutcome::Invalid(vec![NAME_REQUIRED, DESCRIPTION_REQUIRED])
        );
        assert_eq!(api.task("demo", &task.id).unwrap().name, "Write spec");
    }

    #[tokio::test]
    async fn test_edit_unknown_task() {
        let (_dir, api, _task) = setup();
        assert!(matches!(
            run(&api, "demo", "missing", None, None).await,
            Err(TaskdeckError::NotFound(_))
        ));
    }
}
