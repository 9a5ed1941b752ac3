use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::ThemeColors;

/// 空状态的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason<'a> {
    /// 项目里没有任务
    NoTasks,
    /// 项目读取失败
    LoadFailed(&'a str),
}

/// 渲染空状态（居中的提示文字）
pub fn render(frame: &mut Frame, area: Rect, reason: EmptyReason, colors: &ThemeColors) {
    let block = Block::default()
        .borders(Borders::LEFT | Borders::RIGHT)
        .border_style(Style::default().fg(colors.border));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let lines = match reason {
        EmptyReason::NoTasks => vec![
            Line::from(Span::styled("No tasks yet", Style::default().fg(colors.muted))),
            Line::from(vec![
                Span::styled("Run ", Style::default().fg(colors.text)),
                Span::styled(
                    " taskdeck seed ",
                    Style::default()
                        .fg(colors.highlight)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("to add demo tasks", Style::default().fg(colors.text)),
            ]),
        ],
        EmptyReason::LoadFailed(message) => vec![
            Line::from(Span::styled(message.to_string(), Style::default().fg(colors.error))),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(colors.text)),
                Span::styled(
                    " r ",
                    Style::default()
                        .fg(colors.highlight)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("to retry", Style::default().fg(colors.text)),
            ]),
        ],
    };

    // 垂直居中
    let y_offset = inner_area.height.saturating_sub(2) / 2;
    let centered_area = Rect {
        x: inner_area.x,
        y: inner_area.y + y_offset,
        width: inner_area.width,
        height: inner_area.height.min(2),
    };

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        centered_area,
    );
}
