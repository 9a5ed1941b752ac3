//! 任务持久化: {root}/projects/{project}/tasks.toml

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::Task;

use super::{load_toml, save_toml, taskdeck_dir};

/// 任务列表容器 (用于 TOML 序列化)
#[derive(Debug, Default, Serialize, Deserialize)]
struct TasksFile {
    #[serde(default)]
    tasks: Vec<Task>,
}

/// 基于目录的任务存储
#[derive(Debug, Clone)]
pub struct TaskStore {
    root: PathBuf,
}

impl TaskStore {
    /// 在指定根目录上打开存储
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// 默认存储: ~/.taskdeck/
    pub fn open_default() -> Self {
        Self::open(taskdeck_dir())
    }

    fn tasks_file_path(&self, project: &str) -> PathBuf {
        self.root.join("projects").join(project).join("tasks.toml")
    }

    /// 项目是否存在（有 tasks.toml）
    pub fn project_exists(&self, project: &str) -> bool {
        self.tasks_file_path(project).exists()
    }

    /// 加载任务列表（项目不存在时返回空列表）
    pub fn load_tasks(&self, project: &str) -> io::Result<Vec<Task>> {
        let path = self.tasks_file_path(project);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let file: TasksFile = load_toml(&path)?;
        Ok(file.tasks)
    }

    /// 保存任务列表
    pub fn save_tasks(&self, project: &str, tasks: &[Task]) -> io::Result<()> {
        let file = TasksFile {
            tasks: tasks.to_vec(),
        };
        save_toml(&self.tasks_file_path(project), &file)
    }

    /// 添加单个任务
    pub fn add_task(&self, project: &str, task: Task) -> io::Result<()> {
        let mut tasks = self.load_tasks(project)?;
        tasks.push(task);
        self.save_tasks(project, &tasks)
    }

    /// 查找单个任务
    pub fn get_task(&self, project: &str, task_id: &str) -> io::Result<Option<Task>> {
        Ok(self
            .load_tasks(project)?
            .into_iter()
            .find(|t| t.id == task_id))
    }

    /// 列出所有项目（按名称排序）
    pub fn list_projects(&self) -> io::Result<Vec<String>> {
        let dir = self.root.join("projects");
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut projects: Vec<String> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().join("tasks.toml").exists())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect();
        projects.sort();
        Ok(projects)
    }
}
