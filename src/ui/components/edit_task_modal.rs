//! Edit Task 弹窗
//!
//! 挂载即打开：表单初始值取自挂载时的任务，提交后把
//! `{project_id, task_id, form_data}` 交给调用方发送更新请求，
//! 请求结束后由 [`EditTaskModal::finish_save`] 处理结果：
//!
//! - 失败：错误 Toast，弹窗保持打开，表单不变
//! - 成功：标记 `("project", id)` 和 `("task", id)` 过期，成功 Toast，清空表单，关闭
//!
//! 关闭 = 用当前路径（去掉查询参数）替换当前位置。弹窗不会自己重新打开，
//! 再次编辑需要调用方重新挂载。

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::api::{ApiError, TaskApi, UpdateTaskRequest};
use crate::error::{Result, TaskdeckError};
use crate::form::{FormFocus, TaskForm};
use crate::model::{ProjectId, Task, TaskFormData, TaskId};
use crate::notify::Notifier;
use crate::query::{QueryInvalidator, QueryKey};
use crate::route::Navigator;
use crate::theme::ThemeColors;
use crate::ui::click_areas::{ClickAreas, ModalClick};
use crate::ui::transition::{Appearance, Transition, TransitionKind};

use super::dialog_utils::{center_dialog, dim_outside, render_dialog_frame, render_hint, scale_rect};
use super::task_form;

/// 弹窗基准尺寸（缩放前）
const PANEL_WIDTH: u16 = 72;
const PANEL_HEIGHT: u16 = 22;

/// 遮罩开始生效的不透明度
const DIM_THRESHOLD: f32 = 0.25;

/// 弹窗依赖的外部协作者，构造时注入
#[derive(Clone)]
pub struct ModalHandles {
    pub queries: Arc<dyn QueryInvalidator>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
}

/// 弹窗状态：挂载即 Open，关闭后不再打开
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Open,
    Closed,
}

pub struct EditTaskModal {
    task_id: TaskId,
    project_id: ProjectId,
    form: TaskForm,
    state: ModalState,
    /// 更新请求进行中
    saving: bool,
    transition: Option<Transition>,
    handles: ModalHandles,
}

impl EditTaskModal {
    /// 挂载弹窗。projectId 取自当前路由，缺失时报错。
    pub fn open(task: &Task, task_id: impl Into<TaskId>, handles: ModalHandles) -> Result<Self> {
        Self::open_at(task, task_id, handles, Instant::now())
    }

    pub fn open_at(
        task: &Task,
        task_id: impl Into<TaskId>,
        handles: ModalHandles,
        now: Instant,
    ) -> Result<Self> {
        let location = handles.navigator.location();
        let project_id = location
            .project_id()
            .ok_or_else(|| TaskdeckError::missing_param("projectId"))?
            .to_string();
        let task_id = task_id.into();
        tracing::debug!(project = %project_id, task = %task_id, "edit modal mounted");

        Ok(Self {
            task_id,
            project_id,
            form: TaskForm::new(TaskFormData::from(task)),
            state: ModalState::Open,
            saving: false,
            transition: Some(Transition::enter(now)),
            handles,
        })
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TaskForm {
        &mut self.form
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ModalState::Open
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// 是否需要渲染：打开中，或离开动画尚未结束
    pub fn is_visible(&self, now: Instant) -> bool {
        match (self.state, self.transition) {
            (ModalState::Open, _) => true,
            (ModalState::Closed, Some(t)) if t.kind == TransitionKind::Leave => !t.is_finished(now),
            (ModalState::Closed, _) => false,
        }
    }

    /// 是否仍需保留实例：可见，或还有未返回的更新请求
    pub fn is_mounted(&self, now: Instant) -> bool {
        self.is_visible(now) || self.saving
    }

    /// 当前外观（动画中途或静止）
    pub fn appearance(&self, now: Instant) -> Appearance {
        match (self.state, self.transition) {
            (_, Some(t)) => t.appearance(now),
            (ModalState::Open, None) => Appearance::SHOWN,
            (ModalState::Closed, None) => Appearance::HIDDEN,
        }
    }

    /// 提交表单。校验失败、已关闭或已有请求进行中时返回 None。
    pub fn submit(&mut self) -> Option<UpdateTaskRequest> {
        if !self.is_open() {
            return None;
        }
        if self.saving {
            tracing::debug!(task = %self.task_id, "submit ignored: save in flight");
            return None;
        }
        let form_data = self.form.handle_submit()?;
        self.saving = true;
        tracing::info!(project = %self.project_id, task = %self.task_id, "submitting task update");
        Some(UpdateTaskRequest {
            project_id: self.project_id.clone(),
            task_id: self.task_id.clone(),
            form_data,
        })
    }

    /// 处理更新结果
    pub fn finish_save(&mut self, result: std::result::Result<String, ApiError>) {
        self.finish_save_at(result, Instant::now());
    }

    pub fn finish_save_at(&mut self, result: std::result::Result<String, ApiError>, now: Instant) {
        self.saving = false;
        match result {
            Err(e) => {
                tracing::warn!(task = %self.task_id, error = %e, "task update failed");
                self.handles.notifier.error(&e.message);
            }
            Ok(message) => {
                let queries = &self.handles.queries;
                queries.invalidate(&QueryKey::project(&self.project_id));
                queries.invalidate(&QueryKey::task(&self.task_id));
                self.handles.notifier.success(&message);
                self.form.reset();
                self.close_at(now);
            }
        }
    }

    /// 发送更新并等待结果。返回是否真的发出了请求。
    pub async fn save(&mut self, api: &dyn TaskApi) -> bool {
        let Some(request) = self.submit() else {
            return false;
        };
        let result = api.update_task(request).await;
        self.finish_save(result);
        true
    }

    /// 用户关闭（点击外部 / Esc），不提交
    pub fn dismiss(&mut self) {
        self.dismiss_at(Instant::now());
    }

    pub fn dismiss_at(&mut self, now: Instant) {
        if self.is_open() {
            tracing::debug!(task = %self.task_id, "edit modal dismissed");
        }
        self.close_at(now);
    }

    /// 替换当前位置为当前路径（去掉触发弹窗的查询参数）
    fn close_at(&mut self, now: Instant) {
        if !self.is_open() {
            return;
        }
        self.state = ModalState::Closed;
        let navigator = &self.handles.navigator;
        navigator.replace(navigator.location().path_only());
        self.transition = Some(Transition::leave(now));
    }

    /// 处理键盘事件，需要发送更新时返回请求
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<UpdateTaskRequest> {
        if !self.is_open() {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('s') = key.code {
                return self.submit();
            }
            return None;
        }

        match key.code {
            KeyCode::Esc => self.dismiss(),
            KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
            KeyCode::Enter => match self.form.focus() {
                FormFocus::Name => self.form.focus_next(),
                FormFocus::Description => self.form.input_char('\n'),
                FormFocus::Submit => return self.submit(),
            },
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(c) => self.form.input_char(c),
            _ => {}
        }
        None
    }

    /// 处理鼠标点击
    pub fn handle_click(&mut self, click: ModalClick) -> Option<UpdateTaskRequest> {
        if !self.is_open() {
            return None;
        }
        match click {
            ModalClick::Outside => self.dismiss(),
            ModalClick::Name => self.form.set_focus(FormFocus::Name),
            ModalClick::Description => self.form.set_focus(FormFocus::Description),
            // 保存中按钮不可用，点击不抢焦点
            ModalClick::Submit if self.saving => {}
            ModalClick::Submit => {
                self.form.set_focus(FormFocus::Submit);
                return self.submit();
            }
            ModalClick::Panel => {}
        }
        None
    }
}

/// 渲染 Edit Task 弹窗
pub fn render(
    frame: &mut Frame,
    modal: &EditTaskModal,
    colors: &ThemeColors,
    click_areas: &mut ClickAreas,
    now: Instant,
) {
    let appearance = modal.appearance(now);
    let base = center_dialog(frame.area(), PANEL_WIDTH, PANEL_HEIGHT);
    let panel = scale_rect(base, appearance.scale);

    if appearance.opacity >= DIM_THRESHOLD {
        dim_outside(frame, panel);
    }

    let inner = render_dialog_frame(frame, panel, " Edit Task ", colors.highlight, colors);

    let [_, subtitle_area, _, form_area, _, button_area, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(task_form::MIN_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let subtitle = Paragraph::new(Line::from(vec![
        Span::styled(
            "Make changes to a task in ",
            Style::default().fg(colors.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "this form",
            Style::default().fg(colors.accent).add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(subtitle, subtitle_area);

    let form_area = Rect {
        x: form_area.x + 2,
        width: form_area.width.saturating_sub(4),
        ..form_area
    };
    let fields = task_form::render(frame, form_area, modal.form(), colors);

    let button_rect = render_submit_button(frame, button_area, modal, colors);

    render_hint(
        frame,
        hint_area,
        &[("Tab", "next"), ("Ctrl-S", "save"), ("Esc", "close")],
        colors,
    );

    // 注册点击区域
    click_areas.dialog_area = Some(panel);
    click_areas.modal_targets.push((fields.name, ModalClick::Name));
    click_areas
        .modal_targets
        .push((fields.description, ModalClick::Description));
    click_areas.modal_targets.push((button_rect, ModalClick::Submit));
}

fn render_submit_button(
    frame: &mut Frame,
    area: Rect,
    modal: &EditTaskModal,
    colors: &ThemeColors,
) -> Rect {
    let focused = modal.form().focus() == FormFocus::Submit;
    let (label, style) = if modal.is_saving() {
        // 请求进行中按钮不可用
        (
            "  Saving…  ".to_string(),
            Style::default().fg(colors.muted).bg(colors.bg_secondary),
        )
    } else if focused {
        (
            "▶ Save Task ◀".to_string(),
            Style::default()
                .fg(colors.bg)
                .bg(colors.accent)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            "  Save Task  ".to_string(),
            Style::default()
                .fg(colors.text)
                .bg(colors.bg_secondary)
                .add_modifier(Modifier::BOLD),
        )
    };

    let width = (label.chars().count() as u16).min(area.width);
    let rect = Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height);
    frame.render_widget(Paragraph::new(label).style(style), rect);
    rect
}
