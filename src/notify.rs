//! Toast 通知
//!
//! 弹窗通过 [`Notifier`] 发送一次性的成功/失败提示，不关心返回值。
//! 默认实现 [`ToastQueue`] 保存带过期时间的 Toast，由主循环渲染。

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// 同时保留的 Toast 上限
const MAX_TOASTS: usize = 3;

/// Toast 级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

/// Toast 消息
#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub expires_at: Instant,
}

impl Toast {
    pub fn new(level: ToastLevel, message: impl Into<String>, duration: Duration) -> Self {
        Self {
            level,
            message: message.into(),
            expires_at: Instant::now() + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// 通知通道
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// 带过期时间的 Toast 队列
#[derive(Debug)]
pub struct ToastQueue {
    toasts: Mutex<VecDeque<Toast>>,
    duration: Duration,
}

impl ToastQueue {
    pub fn new(duration: Duration) -> Self {
        Self {
            toasts: Mutex::new(VecDeque::new()),
            duration,
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Toast>> {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 添加 Toast，超过上限时丢弃最旧的
    pub fn push(&self, level: ToastLevel, message: impl Into<String>) {
        let mut toasts = self.lock();
        toasts.push_back(Toast::new(level, message, self.duration));
        while toasts.len() > MAX_TOASTS {
            toasts.pop_front();
        }
    }

    /// 清理过期的 Toast
    pub fn prune_expired(&self) {
        self.lock().retain(|t| !t.is_expired());
    }

    /// 未过期的 Toast（旧的在前）
    pub fn visible(&self) -> Vec<Toast> {
        self.lock()
            .iter()
            .filter(|t| !t.is_expired())
            .cloned()
            .collect()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.visible().is_empty()
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

impl Notifier for ToastQueue {
    fn success(&self, message: &str) {
        tracing::info!(message, "toast success");
        self.push(ToastLevel::Success, message);
    }

    fn error(&self, message: &str) {
        tracing::warn!(message, "toast error");
        self.push(ToastLevel::Error, message);
    }
}
