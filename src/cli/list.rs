//! `taskdeck list`: print the tasks of a project.

use crate::error::{Result, TaskdeckError};
use crate::model::Task;
use crate::storage::tasks::TaskStore;

/// Format one task per line: `<id>  <name>  <first description line>`.
pub fn format_tasks(tasks: &[Task]) -> Vec<String> {
    tasks
        .iter()
        .map(|task| {
            let summary = task.description.lines().next().unwrap_or("");
            format!("{}  {}  {}", task.id, task.name, summary)
                .trim_end()
                .to_string()
        })
        .collect()
}

pub fn execute(store: &TaskStore, project: &str) -> Result<()> {
    if !store.project_exists(project) {
        return Err(TaskdeckError::not_found(format!("project '{}'", project)));
    }
    let tasks = store.load_tasks(project)?;
    if tasks.is_empty() {
        println!("No tasks in '{}'", project);
        return Ok(());
    }
    for line in format_tasks(&tasks) {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uses_first_description_line() {
        let mut task = Task::new("demo", "Write spec", "Draft v1\nsecond line");
        task.id = "t1".to_string();
        let mut bare = Task::new("demo", "Empty", "");
        bare.id = "t2".to_string();

        assert_eq!(
            format_tasks(&[task, bare]),
            vec!["t1  Write spec  Draft v1".to_string(), "t2  Empty".to_string()]
        );
    }

    #[test]
    fn test_missing_project_errors() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::open(dir.path());
        assert!(matches!(
            execute(&store, "nope"),
            Err(TaskdeckError::NotFound(_))
        ));
    }
}
