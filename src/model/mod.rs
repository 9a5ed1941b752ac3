mod task;

pub use task::{Project, ProjectId, Task, TaskFormData, TaskId};
