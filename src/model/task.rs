//! 任务数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 项目 ID（不透明字符串，来自路由）
pub type ProjectId = String;
/// 任务 ID（不透明字符串）
pub type TaskId = String;

/// 任务数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// 任务 ID
    pub id: TaskId,
    /// 所属项目 ID
    pub project: ProjectId,
    /// 任务名称
    pub name: String,
    /// 任务描述（自由文本，可多行）
    #[serde(default)]
    pub description: String,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 最后修改时间
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// 创建新任务，生成随机 ID
    pub fn new(project: &str, name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().simple().to_string(),
            project: project.to_string(),
            name: name.into(),
            description: description.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// 应用表单数据（只由更新操作的持有方调用）
    pub fn apply(&mut self, form: &TaskFormData) {
        self.name = form.name.clone();
        self.description = form.description.clone();
        self.updated_at = Utc::now();
    }
}

/// 任务表单数据：仅包含可编辑字段，生命周期为一次提交
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFormData {
    pub name: String,
    pub description: String,
}

impl TaskFormData {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl From<&Task> for TaskFormData {
    fn from(task: &Task) -> Self {
        Self::new(task.name.clone(), task.description.clone())
    }
}

/// 项目及其任务列表（`("project", id)` 查询的结果）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub tasks: Vec<Task>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_data_from_task() {
        let task = Task::new("p1", "Write spec", "Draft v1");
        let form = TaskFormData::from(&task);
        assert_eq!(form, TaskFormData::new("Write spec", "Draft v1"));
    }

    #[test]
    fn test_apply_updates_fields_and_timestamp() {
        let mut task = Task::new("p1", "Old", "old desc");
        let before = task.updated_at;
        task.apply(&TaskFormData::new("New", "new desc"));
        assert_eq!(task.name, "New");
        assert_eq!(task.description, "new desc");
        assert!(task.updated_at >= before);
        assert_eq!(task.project, "p1");
    }

    #[test]
    fn test_new_generates_unique_ids() {
        let a = Task::new("p1", "a", "");
        let b = Task::new("p1", "b", "");
        assert_ne!(a.id, b.id);
    }
}
