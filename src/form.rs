//! 任务表单绑定
//!
//! 持有 name/description 两个字段的当前值、焦点和校验错误。
//! 校验失败会阻止提交，调用方拿不到 [`TaskFormData`]。

use crate::model::TaskFormData;

pub const NAME_REQUIRED: &str = "Task name is required";
pub const DESCRIPTION_REQUIRED: &str = "Task description is required";

/// 表单字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Task name",
            FormField::Description => "Task description",
        }
    }
}

/// 焦点位置：两个输入框 + 提交按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormFocus {
    #[default]
    Name,
    Description,
    Submit,
}

impl FormFocus {
    pub fn next(self) -> Self {
        match self {
            FormFocus::Name => FormFocus::Description,
            FormFocus::Description => FormFocus::Submit,
            FormFocus::Submit => FormFocus::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormFocus::Name => FormFocus::Submit,
            FormFocus::Description => FormFocus::Name,
            FormFocus::Submit => FormFocus::Description,
        }
    }

    fn field(self) -> Option<FormField> {
        match self {
            FormFocus::Name => Some(FormField::Name),
            FormFocus::Description => Some(FormField::Description),
            FormFocus::Submit => None,
        }
    }
}

/// 字段级校验错误
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub description: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }

    pub fn get(&self, field: FormField) -> Option<&'static str> {
        match field {
            FormField::Name => self.name,
            FormField::Description => self.description,
        }
    }
}

/// 校验表单值
pub fn validate(values: &TaskFormData) -> FieldErrors {
    FieldErrors {
        name: values.name.trim().is_empty().then_some(NAME_REQUIRED),
        description: values
            .description
            .trim()
            .is_empty()
            .then_some(DESCRIPTION_REQUIRED),
    }
}

/// 表单状态
#[derive(Debug, Clone)]
pub struct TaskForm {
    values: TaskFormData,
    errors: FieldErrors,
    focus: FormFocus,
    /// 提交过一次后，每次编辑都重新校验
    submitted: bool,
}

impl TaskForm {
    /// 以默认值初始化（挂载时的任务字段）
    pub fn new(defaults: TaskFormData) -> Self {
        Self {
            values: defaults,
            errors: FieldErrors::default(),
            focus: FormFocus::default(),
            submitted: false,
        }
    }

    pub fn values(&self) -> &TaskFormData {
        &self.values
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.values.name,
            FormField::Description => &self.values.description,
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn focus(&self) -> FormFocus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: FormFocus) {
        self.focus = focus;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    fn focused_value_mut(&mut self) -> Option<&mut String> {
        match self.focus.field()? {
            FormField::Name => Some(&mut self.values.name),
            FormField::Description => Some(&mut self.values.description),
        }
    }

    /// 输入字符；名称字段不接受换行
    pub fn input_char(&mut self, c: char) {
        if c == '\n' && self.focus != FormFocus::Description {
            return;
        }
        if let Some(value) = self.focused_value_mut() {
            value.push(c);
            self.revalidate();
        }
    }

    /// 删除字符
    pub fn backspace(&mut self) {
        if let Some(value) = self.focused_value_mut() {
            value.pop();
            self.revalidate();
        }
    }

    /// 设置字段值
    pub fn set_value(&mut self, field: FormField, value: impl Into<String>) {
        match field {
            FormField::Name => self.values.name = value.into(),
            FormField::Description => self.values.description = value.into(),
        }
        self.revalidate();
    }

    fn revalidate(&mut self) {
        if self.submitted {
            self.errors = validate(&self.values);
        }
    }

    /// 提交：校验通过返回输入的原始值（空白只参与必填校验），否则记录错误并返回 None。
    /// 出错时焦点移到第一个错误字段。
    pub fn handle_submit(&mut self) -> Option<TaskFormData> {
        self.submitted = true;
        self.errors = validate(&self.values);
        if self.errors.is_empty() {
            return Some(self.values().clone());
        }
        self.focus = if self.errors.name.is_some() {
            FormFocus::Name
        } else {
            FormFocus::Description
        };
        None
    }

    /// 清空字段和错误
    pub fn reset(&mut self) {
        self.values = TaskFormData::default();
        self.errors = FieldErrors::default();
        self.focus = FormFocus::default();
        self.submitted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, description: &str) -> TaskForm {
        TaskForm::new(TaskFormData::new(name, description))
    }

    #[test]
    fn test_initial_values_equal_defaults() {
        let form = form("Write spec", "Draft v1");
        assert_eq!(form.value(FormField::Name), "Write spec");
        assert_eq!(form.value(FormField::Description), "Draft v1");
        assert!(form.errors().is_empty());
        assert_eq!(form.focus(), FormFocus::Name);
    }

    #[test]
    fn test_submit_keeps_values_as_typed() {
        let mut form = form("  Write spec  ", "Draft v1\n");
        let data = form.handle_submit().unwrap();
        assert_eq!(&data, form.values());
        assert_eq!(data, TaskFormData::new("  Write spec  ", "Draft v1\n"));
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_submit_empty_name_rejected() {
        let mut form = form("   ", "Draft v1");
        form.set_focus(FormFocus::Submit);
        assert!(form.handle_submit().is_none());
        assert_eq!(form.errors().get(FormField::Name), Some(NAME_REQUIRED));
        assert_eq!(form.errors().get(FormField::Description), None);
        assert_eq!(form.focus(), FormFocus::Name);
    }

    #[test]
    fn test_submit_empty_description_rejected() {
        let mut form = form("Write spec", "");
        assert!(form.handle_submit().is_none());
        assert_eq!(form.errors().description, Some(DESCRIPTION_REQUIRED));
        assert_eq!(form.focus(), FormFocus::Description);
    }

    #[test]
    fn test_errors_clear_while_editing_after_submit() {
        let mut form = form("", "Draft v1");
        assert!(form.handle_submit().is_none());
        assert!(form.errors().name.is_some());

        form.input_char('W');
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_editing_focused_field() {
        let mut form = form("ab", "x");
        form.input_char('c');
        form.input_char('\n');
        assert_eq!(form.value(FormField::Name), "abc");

        form.focus_next();
        form.input_char('\n');
        form.input_char('y');
        form.backspace();
        form.input_char('z');
        assert_eq!(form.value(FormField::Description), "x\nz");

        // 按钮上输入无效
        form.focus_next();
        form.input_char('q');
        assert_eq!(form.values(), &TaskFormData::new("abc", "x\nz"));
    }

    #[test]
    fn test_focus_cycle() {
        let mut form = form("", "");
        form.focus_prev();
        assert_eq!(form.focus(), FormFocus::Submit);
        form.focus_next();
        assert_eq!(form.focus(), FormFocus::Name);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut form = form("", "");
        form.handle_submit();
        form.set_value(FormField::Name, "x");
        form.reset();
        assert_eq!(form.values(), &TaskFormData::default());
        assert!(form.errors().is_empty());
        // reset 后不再实时校验
        form.input_char('a');
        form.backspace();
        assert!(form.errors().is_empty());
    }
}
