use std::time::{SystemTime, UNIX_EPOCH};

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::notify::{Toast, ToastLevel};
use crate::theme::ThemeColors;

const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

const TOAST_HEIGHT: u16 = 3;
/// 距离底部的行数
const BOTTOM_MARGIN: u16 = 3;

/// 第 `slot` 个 Toast 的区域（0 在最下方）
fn toast_area(area: Rect, text: &str, slot: u16) -> Option<Rect> {
    let width = (text.chars().count() as u16 + 6).min(area.width.saturating_sub(4));
    let offset = BOTTOM_MARGIN + TOAST_HEIGHT * (slot + 1);
    if width == 0 || area.height < offset {
        return None;
    }
    let x = area.x + (area.width - width) / 2;
    let y = area.y + area.height - offset;
    Some(Rect::new(x, y, width, TOAST_HEIGHT))
}

fn render_box(frame: &mut Frame, area: Rect, text: &str, border: Color, colors: &ThemeColors) {
    // 清除背景
    frame.render_widget(Clear, area);

    let toast = Paragraph::new(text)
        .style(
            Style::default()
                .fg(colors.text)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .style(Style::default().bg(colors.bg)),
        );

    frame.render_widget(toast, area);
}

/// 在屏幕底部居中堆叠显示 Toast（最新的在最下方），从 `first_slot` 开始向上排
pub fn render(frame: &mut Frame, toasts: &[Toast], first_slot: u16, colors: &ThemeColors) {
    let area = frame.area();
    for (slot, toast) in toasts.iter().rev().enumerate() {
        let (icon, border) = match toast.level {
            ToastLevel::Success => ("✓", colors.success),
            ToastLevel::Error => ("✗", colors.error),
            ToastLevel::Info => ("•", colors.highlight),
        };
        let text = format!("{} {}", icon, toast.message);
        let Some(toast_area) = toast_area(area, &text, first_slot + slot as u16) else {
            break;
        };
        render_box(frame, toast_area, &text, border, colors);
    }
}

/// 在屏幕底部居中显示 Loading Toast（带 spinner 动画）
pub fn render_loading(frame: &mut Frame, message: &str, colors: &ThemeColors) {
    // 选择 spinner 帧（基于时间，每 100ms 切换）
    let tick = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        / 100;
    let spinner = SPINNER_FRAMES[(tick as usize) % SPINNER_FRAMES.len()];
    let display = format!("{} {}", spinner, message);

    if let Some(area) = toast_area(frame.area(), &display, 0) {
        render_box(frame, area, &display, colors.highlight, colors);
    }
}
