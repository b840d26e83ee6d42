//! Card grid view.

use super::format_date;
use crate::model::task::{Task, TaskId, TaskStatus};
use std::fmt::{Display, Formatter};

const NO_DESCRIPTION: &str = "No description provided.";

/// One rendered task card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    pub id: TaskId,
    pub title: String,
    /// `type • date` line.
    pub subtitle: String,
    pub priority_label: String,
    pub description: String,
    pub status_label: &'static str,
    /// Label of the toggle action for the current status.
    pub toggle_label: &'static str,
    pub is_protected: bool,
}

impl TaskCard {
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            subtitle: format!("{} • {}", task.kind, format_date(task.due_date.as_deref())),
            priority_label: format!("Priority {}", task.priority),
            description: task
                .description
                .clone()
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            status_label: task.status.label(),
            toggle_label: match task.status {
                TaskStatus::Complete => "Mark Pending",
                TaskStatus::Pending => "Mark Complete",
            },
            is_protected: task.is_protected,
        }
    }
}

impl Display for TaskCard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let lock = if self.is_protected { " [locked]" } else { "" };
        writeln!(f, "[{}] {}{}  ({})", self.id, self.title, lock, self.priority_label)?;
        writeln!(f, "    {}", self.subtitle)?;
        writeln!(f, "    {}", self.description)?;
        write!(
            f,
            "    <{}>  actions: {} | Delete",
            self.status_label, self.toggle_label
        )
    }
}

/// Renders one card per task, in list order.
pub fn render_task_cards(tasks: &[Task]) -> Vec<TaskCard> {
    tasks.iter().map(TaskCard::from_task).collect()
}

#[cfg(test)]
mod tests {
    use super::{render_task_cards, NO_DESCRIPTION};
    use crate::model::seed::seed_tasks;
    use crate::model::task::{Priority, Task, TaskId, TaskType};

    #[test]
    fn cards_follow_list_order_and_status_labels() {
        let cards = render_task_cards(&seed_tasks());
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].title, "Prepare onboarding checklist");
        assert_eq!(cards[0].subtitle, "Todo • 2/4/2026");
        assert_eq!(cards[0].toggle_label, "Mark Complete");
        assert_eq!(cards[1].status_label, "Complete");
        assert_eq!(cards[1].toggle_label, "Mark Pending");
        assert!(cards[2].is_protected);
    }

    #[test]
    fn card_without_description_or_date_uses_placeholders() {
        let task = Task::new(TaskId::new(9), "bare", TaskType::PlanNote, Priority::DEFAULT)
            .expect("valid task");
        let card = render_task_cards(&[task]).remove(0);
        assert_eq!(card.description, NO_DESCRIPTION);
        assert_eq!(card.subtitle, "Plan Note • —");
        assert_eq!(card.priority_label, "Priority 3");
        assert!(card.to_string().contains("actions: Mark Complete | Delete"));
    }
}
