//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task/note record rendered by every view.
//! - Validate records on construction and on deserialization.
//!
//! # Invariants
//! - `id` is positive and unique within one task list.
//! - `title` is non-empty after trimming.
//! - `is_protected` is true iff `kind == TaskType::PasswordNote`.
//! - `due_date`, when set, is a valid `YYYY-MM-DD` calendar date.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Wire format for due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Stable task identifier derived from creation time (epoch milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out time-derived ids that never repeat or go backwards.
///
/// Two ids requested within the same millisecond (or after a clock step
/// back) are bumped to `last + 1`.
#[derive(Debug, Clone, Default)]
pub struct TaskIdGenerator {
    last: i64,
}

impl TaskIdGenerator {
    /// Creates a generator that will only issue ids above every id in `existing`.
    pub fn after<'a>(existing: impl IntoIterator<Item = &'a Task>) -> Self {
        let last = existing
            .into_iter()
            .map(|task| task.id.get())
            .max()
            .unwrap_or(0);
        Self { last }
    }

    /// Returns the next id using the current wall clock.
    pub fn next_id(&mut self) -> TaskId {
        self.next_id_at(Utc::now().timestamp_millis())
    }

    /// Returns the next id for an explicit clock reading.
    pub fn next_id_at(&mut self, now_ms: i64) -> TaskId {
        let candidate = if now_ms > self.last {
            now_ms
        } else {
            self.last + 1
        };
        self.last = candidate;
        TaskId(candidate)
    }
}

/// Category tag distinguishing plain todos from notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    #[serde(rename = "Todo")]
    Todo,
    #[serde(rename = "Plan Note")]
    PlanNote,
    /// Protected note; requires a password at creation time.
    #[serde(rename = "Password Note")]
    PasswordNote,
}

impl TaskType {
    /// Display and wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::PlanNote => "Plan Note",
            Self::PasswordNote => "Password Note",
        }
    }

    /// Parses a label case-insensitively. Accepts `-`/`_` as word separators.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value
            .trim()
            .to_ascii_lowercase()
            .replace(['-', '_'], " ");
        match normalized.as_str() {
            "todo" => Some(Self::Todo),
            "plan note" | "plan" => Some(Self::PlanNote),
            "password note" | "password" => Some(Self::PasswordNote),
            _ => None,
        }
    }

    pub fn is_protected(self) -> bool {
        matches!(self, Self::PasswordNote)
    }
}

impl Display for TaskType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task completion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Complete,
}

impl TaskStatus {
    /// Returns the opposite state.
    pub fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Complete,
            Self::Complete => Self::Pending,
        }
    }

    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Complete => "complete",
        }
    }

    /// Capitalized label used by badges and table cells.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Complete => "Complete",
        }
    }
}

/// Task priority in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    pub const DEFAULT: Priority = Priority(3);

    pub fn new(value: u8) -> Result<Self, TaskValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TaskValidationError::PriorityOutOfRange(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Priority {
    type Error = TaskValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(value: Priority) -> Self {
        value.0
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    InvalidId(i64),
    EmptyTitle,
    PriorityOutOfRange(u8),
    ProtectedFlagMismatch { kind: TaskType, is_protected: bool },
    InvalidDueDate(String),
    /// An optional text field is present but blank; absence is `None`.
    BlankOptionalField(&'static str),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(id) => write!(f, "task id must be positive, got {id}"),
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::PriorityOutOfRange(value) => write!(
                f,
                "priority {value} is out of range {}..={}",
                Priority::MIN,
                Priority::MAX
            ),
            Self::ProtectedFlagMismatch { kind, is_protected } => write!(
                f,
                "isProtected={is_protected} does not match task type `{kind}`"
            ),
            Self::InvalidDueDate(value) => {
                write!(f, "due date `{value}` is not a valid YYYY-MM-DD date")
            }
            Self::BlankOptionalField(field) => {
                write!(f, "{field} must be omitted rather than blank")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task/note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TaskWire")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Serialized as `type` to match the persisted JSON shape.
    #[serde(rename = "type")]
    pub kind: TaskType,
    pub priority: Priority,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_protected: bool,
}

impl Task {
    /// Creates a pending task and validates it.
    ///
    /// `is_protected` is derived from `kind`.
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        kind: TaskType,
        priority: Priority,
    ) -> Result<Self, TaskValidationError> {
        let task = Self {
            id,
            title: title.into(),
            kind,
            priority,
            status: TaskStatus::Pending,
            due_date: None,
            description: None,
            is_protected: kind.is_protected(),
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.get() <= 0 {
            return Err(TaskValidationError::InvalidId(self.id.get()));
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        if self.is_protected != self.kind.is_protected() {
            return Err(TaskValidationError::ProtectedFlagMismatch {
                kind: self.kind,
                is_protected: self.is_protected,
            });
        }
        if let Some(due) = self.due_date.as_deref() {
            if due.trim().is_empty() {
                return Err(TaskValidationError::BlankOptionalField("dueDate"));
            }
            parse_due_date(due)?;
        }
        if self
            .description
            .as_deref()
            .is_some_and(|text| text.trim().is_empty())
        {
            return Err(TaskValidationError::BlankOptionalField("description"));
        }
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.status == TaskStatus::Complete
    }

    /// Parsed due date, when present and valid.
    pub fn due(&self) -> Option<NaiveDate> {
        self.due_date
            .as_deref()
            .and_then(|value| parse_due_date(value).ok())
    }
}

/// Parses a `YYYY-MM-DD` due date.
pub fn parse_due_date(value: &str) -> Result<NaiveDate, TaskValidationError> {
    NaiveDate::parse_from_str(value.trim(), DUE_DATE_FORMAT)
        .map_err(|_| TaskValidationError::InvalidDueDate(value.to_string()))
}

/// Persisted shape accepted on read. Empty strings count as absent, which
/// is what a blank form field produces.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskWire {
    id: TaskId,
    title: String,
    #[serde(rename = "type")]
    kind: TaskType,
    #[serde(default)]
    priority: Priority,
    status: TaskStatus,
    #[serde(default)]
    due_date: Option<String>,
    #[serde(default)]
    description: Option<String>,
    is_protected: bool,
}

impl TryFrom<TaskWire> for Task {
    type Error = TaskValidationError;

    fn try_from(value: TaskWire) -> Result<Self, Self::Error> {
        let task = Task {
            id: value.id,
            title: value.title,
            kind: value.kind,
            priority: value.priority,
            status: value.status,
            due_date: non_blank(value.due_date),
            description: non_blank(value.description),
            is_protected: value.is_protected,
        };
        task.validate()?;
        Ok(task)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
