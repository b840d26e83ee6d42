//! Task list use-cases as pure functions.
//!
//! # Responsibility
//! - Validate task form input and build new records.
//! - Produce new task lists for create/toggle/delete without mutating input.
//! - Derive progress counts shared by every view.
//!
//! # Invariants
//! - New tasks are prepended with `status = pending`.
//! - Toggle and delete touch only the record whose id matches.
//! - `complete + pending == list.len()`.

use crate::model::task::{
    parse_due_date, Priority, Task, TaskId, TaskStatus, TaskType, TaskValidationError,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Raw task form input, before trimming and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub kind: TaskType,
    /// Defaults to `Priority::DEFAULT` when absent.
    pub priority: Option<u8>,
    pub due_date: Option<String>,
    pub description: Option<String>,
    /// Only consulted for `TaskType::PasswordNote`; never stored.
    pub password: Option<String>,
}

impl TaskForm {
    /// Form with only a title filled in, as a plain todo.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: TaskType::Todo,
            priority: None,
            due_date: None,
            description: None,
            password: None,
        }
    }

    pub fn with_kind(mut self, kind: TaskType) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

/// Task form rejection; the message is user-facing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFormError {
    TitleRequired,
    PasswordRequired,
    Invalid(TaskValidationError),
}

impl TaskFormError {
    /// Short heading for alert-style display.
    pub fn title(&self) -> &'static str {
        match self {
            Self::TitleRequired => "Title required",
            Self::PasswordRequired => "Password required",
            Self::Invalid(_) => "Invalid input",
        }
    }
}

impl Display for TaskFormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TitleRequired => write!(f, "Please enter a task or note title."),
            Self::PasswordRequired => write!(f, "Add a password to protect this note."),
            Self::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskFormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for TaskFormError {
    fn from(value: TaskValidationError) -> Self {
        match value {
            TaskValidationError::EmptyTitle => Self::TitleRequired,
            other => Self::Invalid(other),
        }
    }
}

/// Complete-vs-pending tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressCounts {
    pub complete: usize,
    pub pending: usize,
}

impl ProgressCounts {
    pub fn total(&self) -> usize {
        self.complete + self.pending
    }
}

/// Validates `form` and builds a pending task with the given id.
pub fn build_task(form: &TaskForm, id: TaskId) -> Result<Task, TaskFormError> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err(TaskFormError::TitleRequired);
    }
    if form.kind.is_protected() && non_blank(form.password.as_deref()).is_none() {
        return Err(TaskFormError::PasswordRequired);
    }

    let priority = match form.priority {
        Some(value) => Priority::new(value)?,
        None => Priority::DEFAULT,
    };
    let due_date = match non_blank(form.due_date.as_deref()) {
        Some(value) => {
            parse_due_date(value)?;
            Some(value.to_string())
        }
        None => None,
    };

    let mut task = Task::new(id, title, form.kind, priority)?;
    task.due_date = due_date;
    task.description = non_blank(form.description.as_deref()).map(str::to_string);
    Ok(task)
}

/// Returns a new list with the task built from `form` at the front.
///
/// On validation failure no list is produced, so the caller's list stays
/// as it was.
pub fn create_task(list: &[Task], form: &TaskForm, id: TaskId) -> Result<Vec<Task>, TaskFormError> {
    let task = build_task(form, id)?;
    let mut next = Vec::with_capacity(list.len() + 1);
    next.push(task);
    next.extend_from_slice(list);
    Ok(next)
}

/// Returns a new list where only `id` has its status flipped.
pub fn toggle_status(list: &[Task], id: TaskId) -> Vec<Task> {
    list.iter()
        .map(|task| {
            if task.id != id {
                return task.clone();
            }
            Task {
                status: task.status.toggled(),
                ..task.clone()
            }
        })
        .collect()
}

/// Returns a new list without `id`. Unknown ids leave the list unchanged.
pub fn delete_task(list: &[Task], id: TaskId) -> Vec<Task> {
    list.iter().filter(|task| task.id != id).cloned().collect()
}

pub fn find_task(list: &[Task], id: TaskId) -> Option<&Task> {
    list.iter().find(|task| task.id == id)
}

pub fn progress_counts(list: &[Task]) -> ProgressCounts {
    let complete = list
        .iter()
        .filter(|task| task.status == TaskStatus::Complete)
        .count();
    ProgressCounts {
        complete,
        pending: list.len() - complete,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{build_task, TaskForm, TaskFormError};
    use crate::model::task::{TaskId, TaskStatus, TaskType, TaskValidationError};

    #[test]
    fn build_task_trims_and_applies_defaults() {
        let form = TaskForm::new("  Write retro  ")
            .with_due_date("  ")
            .with_description("");
        let task = build_task(&form, TaskId::new(10)).expect("valid form");
        assert_eq!(task.title, "Write retro");
        assert_eq!(task.priority.get(), 3);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.due_date, None);
        assert_eq!(task.description, None);
        assert!(!task.is_protected);
    }

    #[test]
    fn build_task_requires_title_before_password() {
        let form = TaskForm::new(" ").with_kind(TaskType::PasswordNote);
        assert_eq!(
            build_task(&form, TaskId::new(1)).unwrap_err(),
            TaskFormError::TitleRequired
        );
    }

    #[test]
    fn build_task_rejects_blank_password_for_protected_note() {
        let form = TaskForm::new("vault")
            .with_kind(TaskType::PasswordNote)
            .with_password("   ");
        assert_eq!(
            build_task(&form, TaskId::new(1)).unwrap_err(),
            TaskFormError::PasswordRequired
        );
    }

    #[test]
    fn build_task_rejects_invalid_priority_and_due_date() {
        let err = build_task(&TaskForm::new("x").with_priority(9), TaskId::new(1)).unwrap_err();
        assert_eq!(
            err,
            TaskFormError::Invalid(TaskValidationError::PriorityOutOfRange(9))
        );

        let err =
            build_task(&TaskForm::new("x").with_due_date("next week"), TaskId::new(1)).unwrap_err();
        assert!(matches!(
            err,
            TaskFormError::Invalid(TaskValidationError::InvalidDueDate(_))
        ));
    }

    #[test]
    fn password_for_plain_todo_is_ignored() {
        let form = TaskForm::new("todo").with_password("unused");
        let task = build_task(&form, TaskId::new(1)).expect("valid form");
        assert!(!task.is_protected);
    }
}
