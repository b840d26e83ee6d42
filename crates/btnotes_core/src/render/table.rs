//! Searchable, sortable task table.
//!
//! The table keeps its own copy of the row data plus the user's search and
//! ordering controls. `reload` swaps the data and keeps the controls, so a
//! re-render after a mutation does not reset what the user was looking at.

use super::{format_date, pad};
use crate::model::task::{Task, TaskId};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskColumn {
    Title,
    Type,
    Priority,
    Status,
    Due,
    /// Delete button column; never orderable.
    Actions,
}

impl TaskColumn {
    pub const ALL: [TaskColumn; 6] = [
        Self::Title,
        Self::Type,
        Self::Priority,
        Self::Status,
        Self::Due,
        Self::Actions,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Type => "Type",
            Self::Priority => "Priority",
            Self::Status => "Status",
            Self::Due => "Due",
            Self::Actions => "Actions",
        }
    }

    pub fn is_orderable(self) -> bool {
        !matches!(self, Self::Actions)
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Some(Self::Title),
            "type" => Some(Self::Type),
            "priority" => Some(Self::Priority),
            "status" => Some(Self::Status),
            "due" | "due_date" | "duedate" => Some(Self::Due),
            "actions" => Some(Self::Actions),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub column: TaskColumn,
    pub direction: SortDirection,
}

impl Default for SortOrder {
    /// Due date ascending.
    fn default() -> Self {
        Self {
            column: TaskColumn::Due,
            direction: SortDirection::Asc,
        }
    }
}

/// One rendered table row; every cell is display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    pub title: String,
    pub kind: String,
    pub priority: String,
    pub status: String,
    pub due: String,
    pub action: &'static str,
}

impl TaskRow {
    fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            kind: task.kind.to_string(),
            priority: format!("P{}", task.priority),
            status: task.status.label().to_string(),
            due: format_date(task.due_date.as_deref()),
            action: "Delete",
        }
    }

    fn cells(&self) -> [&str; 6] {
        [
            &self.title,
            &self.kind,
            &self.priority,
            &self.status,
            &self.due,
            self.action,
        ]
    }

    fn matches(&self, needle: &str) -> bool {
        self.cells()[..5]
            .iter()
            .any(|cell| cell.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone)]
pub struct TaskTable {
    data: Vec<Task>,
    order: SortOrder,
    search: Option<String>,
    reloads: usize,
}

impl TaskTable {
    /// Creates the table with default ordering and no search.
    pub fn new(tasks: &[Task]) -> Self {
        Self {
            data: tasks.to_vec(),
            order: SortOrder::default(),
            search: None,
            reloads: 0,
        }
    }

    /// Clears the row data and loads `tasks`, keeping search and order.
    pub fn reload(&mut self, tasks: &[Task]) {
        self.data.clear();
        self.data.extend_from_slice(tasks);
        self.reloads += 1;
    }

    /// Number of in-place reloads since creation.
    pub fn reload_count(&self) -> usize {
        self.reloads
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Sets the ordering. Returns `false` and keeps the current order for
    /// non-orderable columns.
    pub fn set_order(&mut self, column: TaskColumn, direction: SortDirection) -> bool {
        if !column.is_orderable() {
            return false;
        }
        self.order = SortOrder { column, direction };
        true
    }

    /// Sets a case-insensitive search filter; blank input clears it.
    pub fn set_search(&mut self, query: &str) {
        let trimmed = query.trim();
        self.search = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        };
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Total rows loaded, ignoring the search filter.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Rows after search filtering, in the current order.
    pub fn visible_rows(&self) -> Vec<TaskRow> {
        let mut tasks: Vec<&Task> = self.data.iter().collect();
        // Stable sort: ties keep list order.
        tasks.sort_by(|a, b| {
            let ordering = compare(a, b, self.order.column);
            match self.order.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        tasks
            .into_iter()
            .map(TaskRow::from_task)
            .filter(|row| match self.search.as_deref() {
                Some(needle) => row.matches(needle),
                None => true,
            })
            .collect()
    }

    /// Renders header plus visible rows as aligned text.
    pub fn render(&self) -> String {
        let rows = self.visible_rows();
        let mut widths = TaskColumn::ALL.map(|column| column.header().chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.cells()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        out.push_str(&format!("{:<6}  ", "ID"));
        out.push_str(&join_cells(TaskColumn::ALL.map(TaskColumn::header), &widths));
        out.push('\n');
        for row in &rows {
            out.push_str(&format!("{:<6}  ", row.id.to_string()));
            out.push_str(&join_cells(row.cells(), &widths));
            out.push('\n');
        }
        if rows.is_empty() {
            out.push_str("No matching records found.\n");
        }
        out
    }
}

fn compare(a: &Task, b: &Task, column: TaskColumn) -> Ordering {
    match column {
        TaskColumn::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        TaskColumn::Type => a.kind.as_str().cmp(b.kind.as_str()),
        TaskColumn::Priority => a.priority.cmp(&b.priority),
        TaskColumn::Status => a.status.label().cmp(b.status.label()),
        // `None` sorts before every date.
        TaskColumn::Due => a.due().cmp(&b.due()),
        TaskColumn::Actions => Ordering::Equal,
    }
}

fn join_cells(cells: [&str; 6], widths: &[usize; 6]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad(cell, *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
