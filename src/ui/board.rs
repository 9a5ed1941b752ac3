use std::time::Instant;

use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::{Block, Widget},
    Frame,
};

use crate::app::App;

use super::components::{
    edit_task_modal, empty_state, empty_state::EmptyReason, footer, header, task_list, toast,
};

/// 渲染项目看板页面（任务列表 + Edit Task 弹窗 + Toast）
pub fn render(frame: &mut Frame, app: &mut App, now: Instant) {
    let area = frame.area();
    let colors = app.colors;

    // 填充整个背景
    Block::default()
        .style(Style::default().bg(colors.bg))
        .render(area, frame.buffer_mut());

    let [header_area, list_area, footer_area] = Layout::vertical([
        Constraint::Length(header::HEADER_HEIGHT),
        Constraint::Fill(1),
        Constraint::Length(3),
    ])
    .areas(area);

    let project_id = app.project_id().unwrap_or_default();
    let project = app.project();
    let task_count = project.as_ref().map(|p| p.tasks.len()).unwrap_or(0);

    header::render(frame, header_area, &project_id, task_count, &colors);

    match &project {
        Ok(project) if !project.tasks.is_empty() => {
            let selected = Some(app.selected.min(project.tasks.len() - 1));
            task_list::render(
                frame,
                list_area,
                &project.tasks,
                selected,
                &colors,
                &mut app.click_areas,
            );
        }
        Ok(_) => empty_state::render(frame, list_area, EmptyReason::NoTasks, &colors),
        Err(e) => empty_state::render(frame, list_area, EmptyReason::LoadFailed(&e.message), &colors),
    }

    footer::render(frame, footer_area, task_count > 0, &colors);

    // 弹窗在最上层（离开动画期间仍然绘制）
    if let Some(modal) = app.edit_modal.as_ref().filter(|m| m.is_visible(now)) {
        edit_task_modal::render(frame, modal, &colors, &mut app.click_areas, now);
    }

    // Toast 盖在弹窗之上
    let mut first_slot = 0;
    if app.is_saving() {
        toast::render_loading(frame, "Saving task...", &colors);
        first_slot = 1;
    }
    toast::render(frame, &app.toasts.visible(), first_slot, &colors);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use ratatui::{backend::TestBackend, Terminal};

    use crate::api::StoreTaskApi;
    use crate::model::Task;
    use crate::storage::config::Config;
    use crate::storage::tasks::TaskStore;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_board_renders_tasks_and_modal() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::open(dir.path());
        store
            .add_task("demo", Task::new("demo", "Write spec", "Draft v1"))
            .unwrap();
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = App::new(
            Arc::new(StoreTaskApi::new(store)),
            "demo",
            &Config::default(),
            runtime.handle().clone(),
        );
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();

        terminal
            .draw(|f| render(f, &mut app, Instant::now()))
            .unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("projects/demo"));
        assert!(text.contains("Write spec"));
        assert!(!text.contains("Edit Task"));
        assert_eq!(app.click_areas.task_rows.len(), 1);

        app.open_edit_selected();
        let now = Instant::now();
        app.sync_modal(now);
        app.click_areas.reset();
        terminal
            .draw(|f| render(f, &mut app, now + std::time::Duration::from_millis(400)))
            .unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Edit Task"));
        assert!(app.click_areas.dialog_area.is_some());
    }

    #[test]
    fn test_missing_project_shows_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = App::new(
            Arc::new(StoreTaskApi::new(TaskStore::open(dir.path()))),
            "nowhere",
            &Config::default(),
            runtime.handle().clone(),
        );
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();

        terminal
            .draw(|f| render(f, &mut app, Instant::now()))
            .unwrap();

        assert!(screen_text(&terminal).contains("Press"));
        assert!(app.click_areas.task_rows.is_empty());
    }
}
