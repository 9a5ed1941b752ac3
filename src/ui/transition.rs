//! 弹窗进入/离开动画
//!
//! 进入: 300ms ease-out，遮罩淡入，面板从 95% 放大到 100%。
//! 离开: 200ms ease-in，反向播放。

use std::time::{Duration, Instant};

pub const ENTER_DURATION: Duration = Duration::from_millis(300);
pub const LEAVE_DURATION: Duration = Duration::from_millis(200);
/// 面板最小缩放比例
pub const MIN_SCALE: f32 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Enter,
    Leave,
}

/// 一次进行中的动画
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub kind: TransitionKind,
    pub started_at: Instant,
}

/// 某一时刻的外观
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    /// 遮罩不透明度 0.0 ~ 1.0
    pub opacity: f32,
    /// 面板缩放 MIN_SCALE ~ 1.0
    pub scale: f32,
}

impl Appearance {
    pub const SHOWN: Appearance = Appearance {
        opacity: 1.0,
        scale: 1.0,
    };
    pub const HIDDEN: Appearance = Appearance {
        opacity: 0.0,
        scale: MIN_SCALE,
    };
}

fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

fn ease_in(t: f32) -> f32 {
    t.powi(3)
}

impl Transition {
    pub fn enter(now: Instant) -> Self {
        Self {
            kind: TransitionKind::Enter,
            started_at: now,
        }
    }

    pub fn leave(now: Instant) -> Self {
        Self {
            kind: TransitionKind::Leave,
            started_at: now,
        }
    }

    pub fn duration(&self) -> Duration {
        match self.kind {
            TransitionKind::Enter => ENTER_DURATION,
            TransitionKind::Leave => LEAVE_DURATION,
        }
    }

    /// 线性进度 0.0 ~ 1.0
    pub fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration().as_secs_f32()).min(1.0)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// 按缓动曲线计算外观
    pub fn appearance(&self, now: Instant) -> Appearance {
        let t = self.progress(now);
        let shown = match self.kind {
            TransitionKind::Enter => ease_out(t),
            TransitionKind::Leave => 1.0 - ease_in(t),
        };
        Appearance {
            opacity: shown,
            scale: MIN_SCALE + (1.0 - MIN_SCALE) * shown,
        }
    }
}
