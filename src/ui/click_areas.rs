use ratatui::layout::Rect;

/// Edit Task 弹窗内的点击目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalClick {
    /// 面板外部（遮罩）
    Outside,
    /// 面板内非交互区域
    Panel,
    Name,
    Description,
    Submit,
}

/// 每帧渲染时缓存的可点击区域
#[derive(Debug, Default, Clone)]
pub struct ClickAreas {
    /// 任务列表行 (区域, 行索引)
    pub task_rows: Vec<(Rect, usize)>,
    /// 任务列表区域（滚轮检测）
    pub task_list_area: Option<Rect>,
    /// 弹窗面板区域
    pub dialog_area: Option<Rect>,
    /// 弹窗内的可点击目标
    pub modal_targets: Vec<(Rect, ModalClick)>,
}

impl ClickAreas {
    pub fn reset(&mut self) {
        self.task_rows.clear();
        self.task_list_area = None;
        self.dialog_area = None;
        self.modal_targets.clear();
    }

    /// 把弹窗打开时的点击坐标解析为目标
    pub fn resolve_modal_click(&self, col: u16, row: u16) -> ModalClick {
        let Some(panel) = self.dialog_area else {
            return ModalClick::Outside;
        };
        if !contains(&panel, col, row) {
            return ModalClick::Outside;
        }
        self.modal_targets
            .iter()
            .find(|(rect, _)| contains(rect, col, row))
            .map(|(_, target)| *target)
            .unwrap_or(ModalClick::Panel)
    }

    /// 点击的任务行
    pub fn task_row_at(&self, col: u16, row: u16) -> Option<usize> {
        self.task_rows
            .iter()
            .find(|(rect, _)| contains(rect, col, row))
            .map(|(_, index)| *index)
    }
}

/// 检查坐标 (col, row) 是否在 Rect 内
pub fn contains(rect: &Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_without_dialog_is_outside() {
        let areas = ClickAreas::default();
        assert_eq!(areas.resolve_modal_click(5, 5), ModalClick::Outside);
    }

    #[test]
    fn test_resolve_targets() {
        let mut areas = ClickAreas {
            dialog_area: Some(Rect::new(10, 10, 20, 10)),
            ..Default::default()
        };
        areas
            .modal_targets
            .push((Rect::new(12, 12, 10, 3), ModalClick::Name));

        assert_eq!(areas.resolve_modal_click(9, 10), ModalClick::Outside);
        assert_eq!(areas.resolve_modal_click(30, 10), ModalClick::Outside);
        assert_eq!(areas.resolve_modal_click(12, 14), ModalClick::Name);
        assert_eq!(areas.resolve_modal_click(12, 15), ModalClick::Panel);

        areas.reset();
        assert_eq!(areas.resolve_modal_click(12, 14), ModalClick::Outside);
    }

    #[test]
    fn test_task_row_at() {
        let mut areas = ClickAreas::default();
        areas.task_rows.push((Rect::new(0, 3, 40, 1), 0));
        areas.task_rows.push((Rect::new(0, 4, 40, 1), 1));
        assert_eq!(areas.task_row_at(5, 4), Some(1));
        assert_eq!(areas.task_row_at(5, 5), None);
    }
}
