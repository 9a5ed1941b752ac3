use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::model::Task;
use crate::theme::ThemeColors;
use crate::ui::click_areas::ClickAreas;

use super::truncate;

/// 表头高度（标题行 + 下边距）
const HEADER_ROWS: u16 = 2;

/// 渲染任务列表，同时登记每一行的点击区域
pub fn render(
    frame: &mut Frame,
    area: Rect,
    tasks: &[Task],
    selected_index: Option<usize>,
    colors: &ThemeColors,
    click_areas: &mut ClickAreas,
) {
    // 表头
    let header = Row::new(vec![
        Cell::from(""), // 选择指示器
        Cell::from("TASK"),
        Cell::from("DESCRIPTION"),
        Cell::from("UPDATED"),
    ])
    .style(Style::default().fg(colors.muted))
    .height(1)
    .bottom_margin(1);

    let rows: Vec<Row> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let is_selected = selected_index == Some(i);
            let selector = if is_selected { "❯" } else { " " };

            // 描述只显示第一行
            let summary = task.description.lines().next().unwrap_or("");

            let row_style = if is_selected {
                Style::default().fg(colors.text).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text)
            };

            Row::new(vec![
                Cell::from(selector).style(Style::default().fg(colors.highlight)),
                Cell::from(truncate(&task.name, 40)),
                Cell::from(truncate(summary, 60)).style(Style::default().fg(colors.muted)),
                Cell::from(task.updated_at.format("%m-%d %H:%M").to_string())
                    .style(Style::default().fg(colors.muted)),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(2),  // 选择器
        Constraint::Fill(2),    // TASK
        Constraint::Fill(3),    // DESCRIPTION
        Constraint::Length(12), // UPDATED
    ];

    let block = Block::default()
        .borders(Borders::LEFT | Borders::RIGHT)
        .border_style(Style::default().fg(colors.border));
    let inner = block.inner(area);

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(colors.bg_secondary).add_modifier(Modifier::BOLD));

    let mut table_state = TableState::default();
    table_state.select(selected_index);
    frame.render_stateful_widget(table, area, &mut table_state);

    // 点击区域（按滚动偏移计算每一行的位置）
    click_areas.task_list_area = Some(area);
    let first_row_y = inner.y + HEADER_ROWS;
    let visible = inner.height.saturating_sub(HEADER_ROWS) as usize;
    for (slot, index) in (table_state.offset()..tasks.len()).take(visible).enumerate() {
        let row = Rect::new(inner.x, first_row_y + slot as u16, inner.width, 1);
        click_areas.task_rows.push((row, index));
    }
}
