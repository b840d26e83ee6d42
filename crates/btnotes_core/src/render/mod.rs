//! Text render layer.
//!
//! # Responsibility
//! - Derive every view (cards, task table, progress chart, projects, team)
//!   from the current in-memory lists.
//! - Keep table and chart instances alive across renders and update them in
//!   place.
//!
//! # Invariants
//! - Views hold no task state of their own beyond the last rendered copy;
//!   each render replaces it wholesale.
//! - `Views::render_tasks` always refreshes cards, table and chart together.

use crate::model::project::{Project, TeamMember};
use crate::model::task::{Task, DUE_DATE_FORMAT};
use crate::service::task_service::progress_counts;
use chrono::NaiveDate;
use log::debug;

mod cards;
mod chart;
mod reference;
mod table;

pub use cards::{render_task_cards, TaskCard};
pub use chart::{ProgressChart, CHART_COLORS, CHART_LABELS};
pub use reference::{render_team_list, ProjectRow, ProjectsTable, TeamEntry};
pub use table::{SortDirection, SortOrder, TaskColumn, TaskRow, TaskTable};

/// Placeholder shown for absent dates.
pub const NO_DATE: &str = "—";
const DISPLAY_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Formats an optional `YYYY-MM-DD` date as `M/D/YYYY`.
///
/// Absent or blank values render as `NO_DATE`; unparseable values are
/// returned unchanged.
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value.filter(|raw| !raw.trim().is_empty()) else {
        return NO_DATE.to_string();
    };
    match NaiveDate::parse_from_str(raw.trim(), DUE_DATE_FORMAT) {
        Ok(date) => date.format(DISPLAY_DATE_FORMAT).to_string(),
        Err(_) => raw.to_string(),
    }
}

/// All views of one app page.
#[derive(Debug, Default)]
pub struct Views {
    cards: Vec<TaskCard>,
    tasks_table: Option<TaskTable>,
    progress_chart: Option<ProgressChart>,
    projects_table: Option<ProjectsTable>,
    team_list: Vec<TeamEntry>,
}

impl Views {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-renders every task-derived view from `tasks`.
    ///
    /// The table and chart are created on first call and updated in place
    /// afterwards.
    pub fn render_tasks(&mut self, tasks: &[Task]) {
        self.cards = render_task_cards(tasks);

        match self.tasks_table.as_mut() {
            Some(table) => table.reload(tasks),
            None => self.tasks_table = Some(TaskTable::new(tasks)),
        }

        let counts = progress_counts(tasks);
        match self.progress_chart.as_mut() {
            Some(chart) => chart.update(counts),
            None => self.progress_chart = Some(ProgressChart::new(counts)),
        }

        debug!(
            "event=render_tasks module=render status=ok rows={} complete={} pending={}",
            tasks.len(),
            counts.complete,
            counts.pending
        );
    }

    /// Renders the read-only project table and team list.
    pub fn render_reference(&mut self, projects: &[Project], team: &[TeamMember]) {
        match self.projects_table.as_mut() {
            Some(table) => table.reload(projects),
            None => self.projects_table = Some(ProjectsTable::new(projects)),
        }
        self.team_list = render_team_list(team);
    }

    pub fn cards(&self) -> &[TaskCard] {
        &self.cards
    }

    pub fn tasks_table(&self) -> Option<&TaskTable> {
        self.tasks_table.as_ref()
    }

    /// Mutable access for search and ordering controls.
    pub fn tasks_table_mut(&mut self) -> Option<&mut TaskTable> {
        self.tasks_table.as_mut()
    }

    pub fn progress_chart(&self) -> Option<&ProgressChart> {
        self.progress_chart.as_ref()
    }

    pub fn projects_table(&self) -> Option<&ProjectsTable> {
        self.projects_table.as_ref()
    }

    pub fn team_list(&self) -> &[TeamEntry] {
        &self.team_list
    }

    /// Full dashboard text: cards, task table, chart, projects, team.
    pub fn dashboard(&self) -> String {
        let mut out = String::new();

        push_section(&mut out, "Tasks & Notes");
        if self.cards.is_empty() {
            out.push_str("No items yet.\n");
        }
        for card in &self.cards {
            out.push_str(&card.to_string());
            out.push('\n');
        }

        if let Some(table) = &self.tasks_table {
            push_section(&mut out, "Task Table");
            out.push_str(&table.render());
        }
        if let Some(chart) = &self.progress_chart {
            push_section(&mut out, "Progress");
            out.push_str(&chart.render());
        }
        if let Some(table) = &self.projects_table {
            push_section(&mut out, "Projects");
            out.push_str(&table.render());
        }

        push_section(&mut out, "Team");
        for entry in &self.team_list {
            out.push_str(&entry.to_string());
            out.push('\n');
        }
        out
    }
}

fn push_section(out: &mut String, title: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&format!("== {title} ==\n"));
}

/// Left-aligns `value` to `width` characters.
pub(crate) fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.to_string();
    }
    format!("{value}{}", " ".repeat(width - len))
}
