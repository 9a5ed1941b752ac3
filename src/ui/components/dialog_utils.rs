//! Dialog 组件共享工具函数
//!
//! 提供 dialog 组件常用的渲染工具，减少重复代码

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::ThemeColors;

/// 计算居中 dialog 区域
pub fn center_dialog(frame_area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(frame_area.width);
    let height = height.min(frame_area.height);
    let x = frame_area.x + frame_area.width.saturating_sub(width) / 2;
    let y = frame_area.y + frame_area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// 按比例缩放区域（保持中心不变）
pub fn scale_rect(area: Rect, scale: f32) -> Rect {
    let width = ((area.width as f32) * scale).round() as u16;
    let height = ((area.height as f32) * scale).round() as u16;
    center_dialog(area, width, height)
}

/// 渲染 dialog 框架（带标题、边框）并返回内部可用区域
///
/// # Arguments
/// * `frame` - ratatui Frame
/// * `area` - dialog 区域
/// * `title` - 标题文本
/// * `border_color` - 边框颜色
/// * `colors` - 主题颜色
///
/// # Returns
/// 内部可用区域 (已扣除边框)
pub fn render_dialog_frame(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    colors: &ThemeColors,
) -> Rect {
    // 清除背景
    frame.render_widget(Clear, area);

    // 外框
    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(colors.bg));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// 渲染标准提示行
///
/// `hints` 格式为 [(快捷键, 描述), ...]
pub fn render_hint(frame: &mut Frame, area: Rect, hints: &[(&str, &str)], colors: &ThemeColors) {
    let spans: Vec<Span> = hints
        .iter()
        .enumerate()
        .flat_map(|(i, (key, desc))| {
            let mut v = vec![];
            if i > 0 {
                v.push(Span::styled("  ", Style::default().fg(colors.muted)));
            }
            v.push(Span::styled(*key, Style::default().fg(colors.highlight)));
            v.push(Span::styled(
                format!(" {}", desc),
                Style::default().fg(colors.muted),
            ));
            v
        })
        .collect();

    let hint = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(hint, area);
}

/// 渲染错误信息（左对齐，跟在输入框下方）
pub fn render_error(frame: &mut Frame, area: Rect, message: &str, colors: &ThemeColors) {
    let error = Paragraph::new(message)
        .style(Style::default().fg(colors.error))
        .alignment(Alignment::Left);
    frame.render_widget(error, area);
}

/// 遮罩：把 `keep` 以外的区域变暗
pub fn dim_outside(frame: &mut Frame, keep: Rect) {
    let area = frame.area();
    let buf = frame.buffer_mut();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if keep.contains((x, y).into()) {
                continue;
            }
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.modifier.insert(Modifier::DIM);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_dialog() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(center_dialog(area, 60, 20), Rect::new(20, 10, 60, 20));
        // 超出屏幕时收缩
        assert_eq!(center_dialog(area, 200, 80), area);
    }

    #[test]
    fn test_scale_rect_keeps_center() {
        let area = Rect::new(10, 5, 60, 20);
        let scaled = scale_rect(area, 0.95);
        assert_eq!(scaled.width, 57);
        assert_eq!(scaled.height, 19);
        assert_eq!(scaled.x, 11);
        assert_eq!(scaled.y, 5);
        assert_eq!(scale_rect(area, 1.0), area);
    }
}
