//! Read-only reference records: projects and team members.
//!
//! These are seeded once per session and only ever displayed.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Upper bound for `Project::progress`.
pub const MAX_PROGRESS: u8 = 100;

/// Project summary row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProjectWire")]
pub struct Project {
    pub id: u32,
    pub name: String,
    pub lead: String,
    /// Free-form status label such as `On Track` or `At Risk`.
    pub status: String,
    /// Completion percentage in `0..=100`.
    pub progress: u8,
}

impl Project {
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.progress > MAX_PROGRESS {
            return Err(ProjectValidationError::ProgressOutOfRange(self.progress));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    ProgressOutOfRange(u8),
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProgressOutOfRange(value) => {
                write!(f, "project progress {value} exceeds {MAX_PROGRESS}")
            }
        }
    }
}

impl Error for ProjectValidationError {}

#[derive(Deserialize)]
struct ProjectWire {
    id: u32,
    name: String,
    lead: String,
    status: String,
    progress: u8,
}

impl TryFrom<ProjectWire> for Project {
    type Error = ProjectValidationError;

    fn try_from(value: ProjectWire) -> Result<Self, Self::Error> {
        let project = Project {
            id: value.id,
            name: value.name,
            lead: value.lead,
            status: value.status,
            progress: value.progress,
        };
        project.validate()?;
        Ok(project)
    }
}

/// Team directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    /// What the member is currently working on.
    pub focus: String,
}
