use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

use tokio::runtime::Handle;

use crate::api::tasks::INVALID_ACTION;
use crate::api::{ApiError, TaskApi, UpdateTaskRequest};
use crate::model::{Project, Task};
use crate::notify::{Notifier, ToastLevel, ToastQueue};
use crate::query::{QueryClient, QueryInvalidator, QueryKey};
use crate::route::{Location, Navigator, RouteHistory, EDIT_TASK_PARAM};
use crate::storage::config::{self, Config};
use crate::theme::{get_theme_colors, Theme, ThemeColors};
use crate::ui::click_areas::ClickAreas;
use crate::ui::components::edit_task_modal::{EditTaskModal, ModalHandles};

/// 后台更新结果
pub type SaveResult = Result<String, ApiError>;

/// 全局应用状态
pub struct App {
    /// 是否应该退出
    pub should_quit: bool,
    /// 任务读取与更新
    pub api: Arc<dyn TaskApi>,
    /// 查询缓存
    pub queries: Arc<QueryClient>,
    /// 路由历史（驱动弹窗挂载）
    pub history: Arc<RouteHistory>,
    /// Toast 队列
    pub toasts: Arc<ToastQueue>,
    /// 当前主题
    pub theme: Theme,
    /// 当前颜色方案
    pub colors: ThemeColors,
    /// 任务列表选中行
    pub selected: usize,
    /// 已挂载的 Edit Task 弹窗
    pub edit_modal: Option<EditTaskModal>,
    /// 每帧的点击区域
    pub click_areas: ClickAreas,
    /// tokio 运行时（执行更新请求）
    runtime: Handle,
    /// 后台操作结果通道
    save_tx: mpsc::Sender<SaveResult>,
    save_rx: mpsc::Receiver<SaveResult>,
}

impl App {
    pub fn new(api: Arc<dyn TaskApi>, project_id: &str, config: &Config, runtime: Handle) -> Self {
        let theme = Theme::from_name(&config.theme.name);
        let (save_tx, save_rx) = mpsc::channel();
        Self {
            should_quit: false,
            api,
            queries: Arc::new(QueryClient::default()),
            history: Arc::new(RouteHistory::new(Location::project(project_id))),
            toasts: Arc::new(ToastQueue::new(Duration::from_millis(config.ui.toast_ms))),
            theme,
            colors: get_theme_colors(theme),
            selected: 0,
            edit_modal: None,
            click_areas: ClickAreas::default(),
            runtime,
            save_tx,
            save_rx,
        }
    }

    /// 弹窗使用的协作者
    pub fn modal_handles(&self) -> ModalHandles {
        ModalHandles {
            queries: self.queries.clone(),
            navigator: self.history.clone(),
            notifier: self.toasts.clone(),
        }
    }

    /// 当前路由的项目 ID
    pub fn project_id(&self) -> Option<String> {
        self.history.location().project_id().map(str::to_string)
    }

    /// 读取当前项目（经过查询缓存）
    pub fn project(&self) -> Result<Project, ApiError> {
        let project_id = self
            .project_id()
            .ok_or_else(|| ApiError::new("No project selected"))?;
        self.queries
            .projects
            .fetch(&QueryKey::project(&project_id), || self.api.project(&project_id))
    }

    fn task_count(&self) -> usize {
        self.project().map(|p| p.tasks.len()).unwrap_or(0)
    }

    /// 当前选中的任务
    pub fn selected_task(&self) -> Option<Task> {
        self.project().ok()?.tasks.get(self.selected).cloned()
    }

    /// 选中下一项
    pub fn select_next(&mut self) {
        let len = self.task_count();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// 选中上一项
    pub fn select_previous(&mut self) {
        let len = self.task_count();
        if len > 0 {
            self.selected = if self.selected == 0 { len - 1 } else { self.selected - 1 };
        }
    }

    /// 选中指定行
    pub fn select(&mut self, index: usize) {
        if index < self.task_count() {
            self.selected = index;
        }
    }

    /// 打开选中任务的编辑弹窗（通过路由）
    pub fn open_edit_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let location = self.history.location().with_query(EDIT_TASK_PARAM, &task.id);
        self.history.push(location);
    }

    /// 回到上一个路由位置（回到带 editTask 的位置会重新挂载弹窗）
    pub fn go_back(&mut self) {
        if !self.history.back() {
            tracing::debug!("history is at its first entry");
        }
    }

    /// 手动刷新：标记当前项目过期
    pub fn refresh(&mut self) {
        if let Some(project_id) = self.project_id() {
            self.queries.invalidate(&QueryKey::project(&project_id));
        }
    }

    /// 经过查询缓存读取任务。`("task", id)` 不含项目，缓存里是别的项目的同名任务时重新读取。
    fn fetch_task(&self, project_id: &str, task_id: &str) -> Result<Task, ApiError> {
        let key = QueryKey::task(task_id);
        let load = || self.api.task(project_id, task_id);
        let task = self.queries.tasks.fetch(&key, load)?;
        if task.project == project_id {
            return Ok(task);
        }
        tracing::debug!(project = %project_id, cached = %task.project, task = %task_id, "cached task belongs to another project");
        self.queries.tasks.mark_stale(&key);
        let task = self.queries.tasks.fetch(&key, load)?;
        if task.project != project_id {
            return Err(ApiError::new(INVALID_ACTION));
        }
        Ok(task)
    }

    /// 根据路由挂载/卸载弹窗
    pub fn sync_modal(&mut self, now: Instant) {
        if let Some(modal) = &self.edit_modal {
            if !modal.is_mounted(now) {
                self.edit_modal = None;
            }
        }

        let location = self.history.location();
        let Some(task_id) = location.edit_task_id() else {
            return;
        };
        if self.edit_modal.as_ref().is_some_and(|m| m.is_open()) {
            return;
        }
        // 上一个弹窗还有请求在路上时不替换它
        if self.edit_modal.as_ref().is_some_and(|m| m.is_saving()) {
            return;
        }

        let Some(project_id) = location.project_id() else {
            return;
        };
        match self.fetch_task(project_id, task_id) {
            Ok(task) => match EditTaskModal::open_at(&task, task_id, self.modal_handles(), now) {
                Ok(modal) => self.edit_modal = Some(modal),
                Err(e) => {
                    tracing::error!(error = %e, "failed to mount edit modal");
                    self.toasts.error(&e.to_string());
                    self.history.replace(location.without_query(EDIT_TASK_PARAM));
                }
            },
            Err(e) => {
                self.toasts.error(&e.message);
                self.history.replace(location.without_query(EDIT_TASK_PARAM));
            }
        }
    }

    /// 在后台执行更新请求，结果通过通道返回主循环
    pub fn start_save(&mut self, request: UpdateTaskRequest) {
        let api = self.api.clone();
        let tx = self.save_tx.clone();
        self.runtime.spawn(async move {
            let result = api.update_task(request).await;
            if tx.send(result).is_err() {
                tracing::warn!("save result dropped: UI loop is gone");
            }
        });
    }

    /// 检查后台操作结果
    pub fn poll_bg_result(&mut self) {
        while let Ok(result) = self.save_rx.try_recv() {
            match self.edit_modal.as_mut() {
                Some(modal) => modal.finish_save(result),
                None => tracing::warn!("save result arrived with no modal mounted"),
            }
        }
    }

    /// 是否有进行中的保存（用于 Loading Toast）
    pub fn is_saving(&self) -> bool {
        self.edit_modal.as_ref().is_some_and(|m| m.is_saving())
    }

    /// 每帧调用：清理 Toast、接收结果、同步弹窗
    pub fn tick(&mut self, now: Instant) {
        self.toasts.prune_expired();
        self.poll_bg_result();
        self.sync_modal(now);
    }

    /// 切换到下一个主题
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.colors = get_theme_colors(self.theme);
        self.toasts
            .push(ToastLevel::Info, format!("Theme: {}", self.theme.label()));

        // 保存到配置
        let mut config = config::load_config();
        config.theme.name = self.theme.label().to_string();
        if let Err(e) = config::save_config(&config) {
            tracing::warn!(error = %e, "failed to persist theme");
        }
    }

    /// 退出应用
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
