//! 路由（导航上下文）
//!
//! 界面状态由一个类 URL 的 `Location` 驱动：
//! `/projects/{projectId}` 显示项目看板，附加 `?editTask={taskId}` 时挂载编辑弹窗。

use std::fmt;
use std::sync::{Mutex, PoisonError};

/// 触发编辑弹窗的查询参数
pub const EDIT_TASK_PARAM: &str = "editTask";

/// 当前位置：路径 + 查询参数（保持插入顺序）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    query: Vec<(String, String)>,
}

impl Location {
    /// 解析 "/projects/p1?editTask=t1"
    pub fn parse(s: &str) -> Self {
        let (path, query) = match s.split_once('?') {
            Some((path, query)) => (path, query),
            None => (s, ""),
        };
        let query = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((k, v)) => (k.to_string(), v.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect();
        Self {
            path: if path.is_empty() { "/".to_string() } else { path.to_string() },
            query,
        }
    }

    /// 项目看板路径
    pub fn project(project_id: &str) -> Self {
        Self::parse(&format!("/projects/{}", project_id))
    }

    /// 读取查询参数
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// 设置查询参数（已存在则覆盖）
    pub fn with_query(mut self, name: &str, value: &str) -> Self {
        match self.query.iter_mut().find(|(k, _)| k == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.query.push((name.to_string(), value.to_string())),
        }
        self
    }

    /// 去掉某个查询参数
    pub fn without_query(&self, name: &str) -> Self {
        Self {
            path: self.path.clone(),
            query: self
                .query
                .iter()
                .filter(|(k, _)| k != name)
                .cloned()
                .collect(),
        }
    }

    /// 只保留路径
    pub fn path_only(&self) -> Self {
        Self {
            path: self.path.clone(),
            query: Vec::new(),
        }
    }

    /// 路由参数 projectId：`/projects/{projectId}[/...]`
    pub fn project_id(&self) -> Option<&str> {
        let mut segments = self.path.split('/').filter(|s| !s.is_empty());
        match (segments.next(), segments.next()) {
            (Some("projects"), Some(id)) => Some(id),
            _ => None,
        }
    }

    /// 正在编辑的任务 ID
    pub fn edit_task_id(&self) -> Option<&str> {
        self.query_param(EDIT_TASK_PARAM).filter(|v| !v.is_empty())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        for (i, (k, v)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, k, v)?;
        }
        Ok(())
    }
}

/// 导航接口：读取当前位置、压入新位置、替换当前位置
pub trait Navigator: Send + Sync {
    fn location(&self) -> Location;
    fn push(&self, location: Location);
    fn replace(&self, location: Location);
}

/// 内存中的路由历史
#[derive(Debug)]
pub struct RouteHistory {
    entries: Mutex<Vec<Location>>,
}

impl RouteHistory {
    pub fn new(initial: Location) -> Self {
        Self {
            entries: Mutex::new(vec![initial]),
        }
    }

    /// 返回上一个位置；已经在最早位置时返回 false
    pub fn back(&self) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.len() > 1 {
            entries.pop();
            true
        } else {
            false
        }
    }

    /// 历史长度
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Navigator for RouteHistory {
    fn location(&self) -> Location {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
            .unwrap_or_default()
    }

    fn push(&self, location: Location) {
        tracing::debug!(to = %location, "navigate push");
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(location);
    }

    /// 替换当前位置；替换后与上一条相同时直接回到上一条，避免历史里堆积重复的看板位置
    fn replace(&self, location: Location) {
        tracing::debug!(to = %location, "navigate replace");
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let len = entries.len();
        if len >= 2 && entries[len - 2] == location {
            entries.pop();
            return;
        }
        match entries.last_mut() {
            Some(last) => *last = location,
            None => entries.push(location),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let loc = Location::parse("/projects/p1?editTask=t1");
        assert_eq!(loc.path, "/projects/p1");
        assert_eq!(loc.project_id(), Some("p1"));
        assert_eq!(loc.edit_task_id(), Some("t1"));
        assert_eq!(loc.to_string(), "/projects/p1?editTask=t1");
    }

    #[test]
    fn test_without_query_keeps_path_and_other_params() {
        let loc = Location::parse("/projects/p1?view=list&editTask=t1");
        let cleared = loc.without_query(EDIT_TASK_PARAM);
        assert_eq!(cleared.to_string(), "/projects/p1?view=list");
        assert_eq!(cleared.edit_task_id(), None);
        assert_eq!(loc.path_only().to_string(), "/projects/p1");
    }

    #[test]
    fn test_with_query_overwrites() {
        let loc = Location::project("p1")
            .with_query(EDIT_TASK_PARAM, "t1")
            .with_query(EDIT_TASK_PARAM, "t2");
        assert_eq!(loc.to_string(), "/projects/p1?editTask=t2");
    }

    #[test]
    fn test_project_id_missing() {
        assert_eq!(Location::parse("/").project_id(), None);
        assert_eq!(Location::parse("/projects").project_id(), None);
        assert_eq!(Location::parse("/settings/p1").project_id(), None);
        assert_eq!(Location::parse("/projects/p1/tasks").project_id(), Some("p1"));
    }

    #[test]
    fn test_empty_edit_param_is_ignored() {
        assert_eq!(Location::parse("/projects/p1?editTask=").edit_task_id(), None);
        assert_eq!(Location::parse("/projects/p1?editTask").edit_task_id(), None);
    }

    #[test]
    fn test_history_push_replace_back() {
        let history = RouteHistory::new(Location::project("p1"));
        history.push(Location::project("p1").with_query(EDIT_TASK_PARAM, "t1"));
        assert_eq!(history.len(), 2);

        history.replace(history.location().path_only());
        assert_eq!(history.len(), 1);
        assert_eq!(history.location().to_string(), "/projects/p1");
        assert!(!history.back());

        // 与上一条不同的替换只覆盖当前位置
        history.push(Location::project("p1").with_query(EDIT_TASK_PARAM, "t1"));
        history.replace(Location::project("p2"));
        assert_eq!(history.len(), 2);
        assert!(history.back());
        assert_eq!(history.location().to_string(), "/projects/p1");
    }

    #[test]
    fn test_repeated_open_close_keeps_single_board_entry() {
        let history = RouteHistory::new(Location::project("p1"));
        for task in ["t1", "t2", "t1"] {
            history.push(history.location().with_query(EDIT_TASK_PARAM, task));
            history.replace(history.location().without_query(EDIT_TASK_PARAM));
        }
        assert_eq!(history.len(), 1);
        assert_eq!(history.location().to_string(), "/projects/p1");
    }
}
