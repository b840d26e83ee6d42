//! Read-only project table and team list.

use super::pad;
use crate::model::project::{Project, TeamMember, MAX_PROGRESS};
use std::fmt::{Display, Formatter};

const PROGRESS_BAR_WIDTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRow {
    pub name: String,
    pub lead: String,
    pub status: String,
    /// Progress bar plus `N% done` pill.
    pub progress: String,
}

impl ProjectRow {
    fn from_project(project: &Project) -> Self {
        let percent = project.progress.min(MAX_PROGRESS);
        let filled = usize::from(percent) * PROGRESS_BAR_WIDTH / usize::from(MAX_PROGRESS);
        Self {
            name: project.name.clone(),
            lead: project.lead.clone(),
            status: project.status.clone(),
            progress: format!(
                "[{}{}] {percent}% done",
                "=".repeat(filled),
                " ".repeat(PROGRESS_BAR_WIDTH - filled)
            ),
        }
    }
}

/// Project table: no paging, no search, reloaded in place.
#[derive(Debug, Clone)]
pub struct ProjectsTable {
    rows: Vec<ProjectRow>,
    reloads: usize,
}

impl ProjectsTable {
    pub fn new(projects: &[Project]) -> Self {
        Self {
            rows: projects.iter().map(ProjectRow::from_project).collect(),
            reloads: 0,
        }
    }

    pub fn reload(&mut self, projects: &[Project]) {
        self.rows.clear();
        self.rows
            .extend(projects.iter().map(ProjectRow::from_project));
        self.reloads += 1;
    }

    pub fn rows(&self) -> &[ProjectRow] {
        &self.rows
    }

    pub fn reload_count(&self) -> usize {
        self.reloads
    }

    pub fn render(&self) -> String {
        let name_width = column_width("Project", self.rows.iter().map(|row| row.name.as_str()));
        let lead_width = column_width("Lead", self.rows.iter().map(|row| row.lead.as_str()));
        let status_width = column_width("Status", self.rows.iter().map(|row| row.status.as_str()));

        let mut out = format!(
            "{}  {}  {}  Progress\n",
            pad("Project", name_width),
            pad("Lead", lead_width),
            pad("Status", status_width)
        );
        for row in &self.rows {
            out.push_str(&format!(
                "{}  {}  {}  {}\n",
                pad(&row.name, name_width),
                pad(&row.lead, lead_width),
                pad(&row.status, status_width),
                row.progress
            ));
        }
        out
    }
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|cell| cell.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0)
}

/// One team list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamEntry {
    pub name: String,
    pub role: String,
    pub focus: String,
}

impl Display for TeamEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}) - {}", self.name, self.role, self.focus)
    }
}

pub fn render_team_list(team: &[TeamMember]) -> Vec<TeamEntry> {
    team.iter()
        .map(|member| TeamEntry {
            name: member.name.clone(),
            role: member.role.clone(),
            focus: member.focus.clone(),
        })
        .collect()
}
