//! 查询结果缓存层
//!
//! 按键缓存读取结果（项目任务列表、单个任务），避免每帧渲染都读取存储。
//! 写操作完成后通过 [`QueryInvalidator::invalidate`] 把相关键标记为过期，
//! 下一次读取会重新获取。

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::model::{Project, Task};

/// 查询键，形如 `("project", id)` 的元组
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    /// `("project", project_id)`
    pub fn project(project_id: &str) -> Self {
        Self::new(["project", project_id])
    }

    /// `("task", task_id)`
    pub fn task(task_id: &str) -> Self {
        Self::new(["task", task_id])
    }

    /// 前缀匹配：`("project")` 匹配所有 `("project", *)`
    pub fn matches(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// 标记缓存过期的能力（弹窗只依赖这个接口，不直接持有缓存）
pub trait QueryInvalidator: Send + Sync {
    fn invalidate(&self, key: &QueryKey);
}

/// 缓存条目
struct CacheEntry<T> {
    value: T,
    expires_at: Instant,
    stale: bool,
}

impl<T> CacheEntry<T> {
    fn is_fresh(&self) -> bool {
        !self.stale && Instant::now() < self.expires_at
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// 单一类型的键值缓存
pub struct QueryCache<T> {
    entries: Mutex<HashMap<QueryKey, CacheEntry<T>>>,
    ttl: Duration,
}

impl<T: Clone> QueryCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// 获取缓存值；缺失、过期或被标记为 stale 时调用 `compute` 重新获取。
    /// 获取失败时不写入缓存，旧条目保持 stale。
    pub fn fetch<E, F>(&self, key: &QueryKey, compute: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let mut entries = lock(&self.entries);
        if let Some(entry) = entries.get(key) {
            if entry.is_fresh() {
                return Ok(entry.value.clone());
            }
        }
        let value = compute()?;
        tracing::trace!(%key, "query fetched");
        entries.insert(
            key.clone(),
            CacheEntry {
                value: value.clone(),
                expires_at: Instant::now() + self.ttl,
                stale: false,
            },
        );
        Ok(value)
    }

    /// 读取缓存值（不论是否过期），不触发获取
    pub fn peek(&self, key: &QueryKey) -> Option<T> {
        lock(&self.entries).get(key).map(|e| e.value.clone())
    }

    /// 条目是否存在且新鲜
    pub fn is_fresh(&self, key: &QueryKey) -> bool {
        lock(&self.entries)
            .get(key)
            .map(CacheEntry::is_fresh)
            .unwrap_or(false)
    }

    /// 把匹配前缀的条目标记为 stale，返回受影响条目数
    pub fn mark_stale(&self, prefix: &QueryKey) -> usize {
        let mut entries = lock(&self.entries);
        let mut count = 0;
        for (key, entry) in entries.iter_mut() {
            if key.matches(prefix) {
                entry.stale = true;
                count += 1;
            }
        }
        count
    }
}

/// 应用级查询客户端：项目任务列表 + 单个任务
pub struct QueryClient {
    pub projects: QueryCache<Project>,
    pub tasks: QueryCache<Task>,
}

/// 默认缓存有效期
pub const DEFAULT_TTL_SECS: u64 = 30;

impl QueryClient {
    pub fn new(ttl: Duration) -> Self {
        Self {
            projects: QueryCache::new(ttl),
            tasks: QueryCache::new(ttl),
        }
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TTL_SECS))
    }
}

impl QueryInvalidator for QueryClient {
    fn invalidate(&self, key: &QueryKey) {
        let count = self.projects.mark_stale(key) + self.tasks.mark_stale(key);
        tracing::debug!(%key, entries = count, "query invalidated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::convert::Infallible;

    fn project(id: &str, names: &[&str]) -> Project {
        Project {
            id: id.to_string(),
            tasks: names.iter().map(|n| Task::new(id, *n, "")).collect(),
        }
    }

    #[test]
    fn test_key_display_and_match() {
        let key = QueryKey::project("p1");
        assert_eq!(key.to_string(), "[project, p1]");
        assert!(key.matches(&QueryKey::new(["project"])));
        assert!(key.matches(&QueryKey::project("p1")));
        assert!(!key.matches(&QueryKey::project("p2")));
        assert!(!key.matches(&QueryKey::task("p1")));
    }

    #[test]
    fn test_fetch_uses_cache_until_invalidated() {
        let client = QueryClient::default();
        let calls = Cell::new(0);
        let key = QueryKey::project("p1");
        let load = || {
            calls.set(calls.get() + 1);
            Ok::<_, Infallible>(project("p1", &["a"]))
        };

        client.projects.fetch(&key, load).unwrap();
        client.projects.fetch(&key, load).unwrap();
        assert_eq!(calls.get(), 1);

        client.invalidate(&key);
        assert!(!client.projects.is_fresh(&key));
        // stale 值仍可读取
        assert!(client.projects.peek(&key).is_some());

        client.projects.fetch(&key, load).unwrap();
        assert_eq!(calls.get(), 2);
        assert!(client.projects.is_fresh(&key));
    }

    #[test]
    fn test_invalidate_only_touches_matching_keys() {
        let client = QueryClient::default();
        let p1 = QueryKey::project("p1");
        let p2 = QueryKey::project("p2");
        let t1 = QueryKey::task("t1");

        client.projects.fetch(&p1, || Ok::<_, Infallible>(project("p1", &[]))).unwrap();
        client.projects.fetch(&p2, || Ok::<_, Infallible>(project("p2", &[]))).unwrap();
        client
            .tasks
            .fetch(&t1, || Ok::<_, Infallible>(Task::new("p1", "x", "")))
            .unwrap();

        client.invalidate(&p1);
        assert!(!client.projects.is_fresh(&p1));
        assert!(client.projects.is_fresh(&p2));
        assert!(client.tasks.is_fresh(&t1));

        client.invalidate(&QueryKey::new(["task"]));
        assert!(!client.tasks.is_fresh(&t1));
    }

    #[test]
    fn test_failed_fetch_is_not_cached() {
        let cache: QueryCache<Task> = QueryCache::new(Duration::from_secs(30));
        let key = QueryKey::task("t1");

        let result: Result<Task, &str> = cache.fetch(&key, || Err("boom"));
        assert_eq!(result.unwrap_err(), "boom");
        assert!(cache.peek(&key).is_none());
    }

    #[test]
    fn test_expired_entry_is_refetched() {
        let cache: QueryCache<Task> = QueryCache::new(Duration::ZERO);
        let key = QueryKey::task("t1");
        let calls = Cell::new(0);
        let load = || {
            calls.set(calls.get() + 1);
            Ok::<_, Infallible>(Task::new("p1", "x", ""))
        };

        cache.fetch(&key, load).unwrap();
        cache.fetch(&key, load).unwrap();
        assert_eq!(calls.get(), 2);
    }
}
