use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::ThemeColors;

/// Header 总高度：1 (上边框) + 1 (标题) + 1 (项目信息)
pub const HEADER_HEIGHT: u16 = 3;

/// 渲染顶部区域（应用名 + 项目信息）
pub fn render(
    frame: &mut Frame,
    area: Rect,
    project_id: &str,
    task_count: usize,
    colors: &ThemeColors,
) {
    // 外框
    let block = Block::default()
        .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
        .border_style(Style::default().fg(colors.border));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let title = Line::from(Span::styled(
        " taskdeck",
        Style::default()
            .fg(colors.accent)
            .add_modifier(Modifier::BOLD),
    ));

    let left = Span::styled(
        format!(" projects/{}", project_id),
        Style::default().fg(colors.text),
    );
    let right = Span::styled(
        format!("{} tasks ", task_count),
        Style::default().fg(colors.muted),
    );

    // 计算中间填充空格
    let padding_len = (inner_area.width as usize).saturating_sub(left.width() + right.width());
    let info = Line::from(vec![left, Span::raw(" ".repeat(padding_len)), right]);

    frame.render_widget(Paragraph::new(vec![title, info]), inner_area);
}
