use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::app::App;

/// 处理事件，返回 true 表示应该继续运行
pub fn handle_events(app: &mut App) -> io::Result<bool> {
    // 轮询事件（100ms 超时）
    if event::poll(Duration::from_millis(100))? {
        match event::read()? {
            Event::Key(key) => {
                // 只处理按下事件
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
            Event::Mouse(mouse) => handle_mouse(app, mouse),
            _ => {}
        }
    }

    Ok(!app.should_quit)
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl-C 在任何状态下退出
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    // 优先处理弹窗事件
    if let Some(modal) = app.edit_modal.as_mut().filter(|m| m.is_open()) {
        if let Some(request) = modal.handle_key(key) {
            app.start_save(request);
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_selected(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Backspace => app.go_back(),
        KeyCode::Char('t') => app.cycle_theme(),
        _ => {}
    }
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let (col, row) = (mouse.column, mouse.row);

    if let Some(modal) = app.edit_modal.as_mut().filter(|m| m.is_open()) {
        // 弹窗打开时只响应左键按下，其余鼠标事件不穿透到列表
        if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
            let click = app.click_areas.resolve_modal_click(col, row);
            if let Some(request) = modal.handle_click(click) {
                app.start_save(request);
            }
        }
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(index) = app.click_areas.task_row_at(col, row) {
                if app.selected == index {
                    app.open_edit_selected();
                } else {
                    app.select(index);
                }
            }
        }
        MouseEventKind::ScrollDown => {
            if is_over_list(app, col, row) {
                app.select_next();
            }
        }
        MouseEventKind::ScrollUp => {
            if is_over_list(app, col, row) {
                app.select_previous();
            }
        }
        _ => {}
    }
}

fn is_over_list(app: &App, col: u16, row: u16) -> bool {
    app.click_areas
        .task_list_area
        .is_some_and(|area| crate::ui::click_areas::contains(&area, col, row))
}
