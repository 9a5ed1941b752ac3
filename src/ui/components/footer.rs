use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::ThemeColors;

/// 渲染底部快捷键提示栏
pub fn render(frame: &mut Frame, area: Rect, has_items: bool, colors: &ThemeColors) {
    let shortcuts = get_shortcuts(has_items);

    let mut spans = vec![Span::raw("  ")];
    for (i, (key, desc)) in shortcuts.iter().enumerate() {
        spans.push(Span::styled(
            *key,
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(colors.muted),
        ));

        if i < shortcuts.len() - 1 {
            spans.push(Span::raw("   "));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn get_shortcuts(has_items: bool) -> Vec<(&'static str, &'static str)> {
    if has_items {
        vec![
            ("e", "edit"),
            ("j/k", "move"),
            ("r", "refresh"),
            ("t", "theme"),
            ("q", "quit"),
        ]
    } else {
        vec![("r", "refresh"), ("t", "theme"), ("q", "quit")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_shortcut_only_with_items() {
        assert!(get_shortcuts(true).iter().any(|(k, _)| *k == "e"));
        assert!(!get_shortcuts(false).iter().any(|(k, _)| *k == "e"));
    }
}
