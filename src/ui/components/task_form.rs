//! 任务表单字段渲染（名称 + 描述）

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::form::{FormField, FormFocus, TaskForm};
use crate::theme::ThemeColors;

use super::dialog_utils::render_error;

/// 表单所需最小高度：名称 (标签 1 + 输入 3 + 错误 1) + 描述 (标签 1 + 输入 3 + 错误 1)
pub const MIN_HEIGHT: u16 = 10;

/// 每个输入框的屏幕区域（用于鼠标点击聚焦）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFormAreas {
    pub name: Rect,
    pub description: Rect,
}

/// 渲染表单字段，返回输入框区域
pub fn render(frame: &mut Frame, area: Rect, form: &TaskForm, colors: &ThemeColors) -> TaskFormAreas {
    let [name_label, name_input, name_error, desc_label, desc_input, desc_error] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

    render_field(
        frame,
        [name_label, name_input, name_error],
        form,
        FormField::Name,
        colors,
    );
    render_field(
        frame,
        [desc_label, desc_input, desc_error],
        form,
        FormField::Description,
        colors,
    );

    TaskFormAreas {
        name: name_input,
        description: desc_input,
    }
}

fn render_field(
    frame: &mut Frame,
    [label_area, input_area, error_area]: [Rect; 3],
    form: &TaskForm,
    field: FormField,
    colors: &ThemeColors,
) {
    let focused = match field {
        FormField::Name => form.focus() == FormFocus::Name,
        FormField::Description => form.focus() == FormFocus::Description,
    };
    let error = form.errors().get(field);

    // 标签
    let label = Paragraph::new(Line::from(Span::styled(
        field.label(),
        Style::default().fg(colors.text).add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(label, label_area);

    // 输入框
    let border_color = if error.is_some() {
        colors.error
    } else if focused {
        colors.highlight
    } else {
        colors.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(input_area);
    frame.render_widget(block, input_area);

    let value = form.value(field);
    let mut lines: Vec<Line> = value
        .split('\n')
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(colors.text))))
        .collect();
    if value.is_empty() && !focused {
        lines = vec![Line::from(Span::styled(
            placeholder(field),
            Style::default().fg(colors.muted),
        ))];
    }
    if focused {
        if let Some(last) = lines.last_mut() {
            last.push_span(Span::styled("█", Style::default().fg(colors.highlight))); // 光标
        }
    }

    // 光标总在末尾，内容超出时滚动到底部
    let scroll = (lines.len() as u16).saturating_sub(inner.height);
    let input = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(input, inner);

    if let Some(message) = error {
        render_error(frame, error_area, message, colors);
    }
}

fn placeholder(field: FormField) -> &'static str {
    match field {
        FormField::Name => "Task name",
        FormField::Description => "Task description",
    }
}
