//! Default records used when the session store holds no usable value.

use crate::model::project::{Project, TeamMember};
use crate::model::task::{Priority, Task, TaskId, TaskStatus, TaskType};

/// Seed task list: three items, one of them protected, one complete.
pub fn seed_tasks() -> Vec<Task> {
    vec![
        seed_task(
            1,
            "Prepare onboarding checklist",
            TaskType::Todo,
            2,
            TaskStatus::Pending,
            "2026-02-04",
            "Finalize tasks for new team members.",
        ),
        seed_task(
            2,
            "Sprint planning notes",
            TaskType::PlanNote,
            3,
            TaskStatus::Complete,
            "2026-02-03",
            "Key milestones and risks.",
        ),
        seed_task(
            3,
            "API credentials vault",
            TaskType::PasswordNote,
            5,
            TaskStatus::Pending,
            "2026-02-06",
            "Store with restricted access.",
        ),
    ]
}

pub fn seed_projects() -> Vec<Project> {
    vec![
        seed_project(1, "Launch Campaign", "Amira", "On Track", 78),
        seed_project(2, "Mobile Redesign", "Bayo", "At Risk", 52),
        seed_project(3, "Customer Success", "Chen", "On Track", 64),
    ]
}

pub fn seed_team() -> Vec<TeamMember> {
    vec![
        seed_member("Amira", "Project Lead", "Launch campaign updates"),
        seed_member("Bayo", "Designer", "Mobile UI refresh"),
        seed_member("Chen", "Product Ops", "Customer success metrics"),
    ]
}

// Seed records bypass `Task::new`; `tests::seed_records_are_valid` keeps them valid.
fn seed_task(
    id: i64,
    title: &str,
    kind: TaskType,
    priority: u8,
    status: TaskStatus,
    due_date: &str,
    description: &str,
) -> Task {
    Task {
        id: TaskId::new(id),
        title: title.to_string(),
        kind,
        priority: Priority::new(priority).unwrap_or_default(),
        status,
        due_date: Some(due_date.to_string()),
        description: Some(description.to_string()),
        is_protected: kind.is_protected(),
    }
}

fn seed_project(id: u32, name: &str, lead: &str, status: &str, progress: u8) -> Project {
    Project {
        id,
        name: name.to_string(),
        lead: lead.to_string(),
        status: status.to_string(),
        progress,
    }
}

fn seed_member(name: &str, role: &str, focus: &str) -> TeamMember {
    TeamMember {
        name: name.to_string(),
        role: role.to_string(),
        focus: focus.to_string(),
    }
}
