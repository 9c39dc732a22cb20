//! Render-ready projections of the coordinator state.

use habit_core::goal::Goal;
use habit_core::task::Task;
use habit_core::user::User;

/// What the task panel shows.
///
/// Exactly one variant applies for any combination of selection and task
/// list, so front ends can match exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskPanel {
    /// No goal selected ("Choose goal")
    NoSelection,
    /// A goal is selected but has no tasks
    Empty { goal: Goal },
    /// A goal is selected and has tasks
    Populated { goal: Goal, tasks: Vec<Task> },
}

impl TaskPanel {
    pub fn from_state(selected_goal: Option<&Goal>, tasks: &[Task]) -> Self {
        match selected_goal {
            None => Self::NoSelection,
            Some(goal) if tasks.is_empty() => Self::Empty { goal: goal.clone() },
            Some(goal) => Self::Populated {
                goal: goal.clone(),
                tasks: tasks.to_vec(),
            },
        }
    }

    pub fn goal(&self) -> Option<&Goal> {
        match self {
            Self::NoSelection => None,
            Self::Empty { goal } | Self::Populated { goal, .. } => Some(goal),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        match self {
            Self::Populated { tasks, .. } => tasks,
            _ => &[],
        }
    }
}

/// Owned copy of everything the dashboard renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub user: Option<User>,
    pub panel: TaskPanel,
    /// Task ids whose completion toggle is currently disabled
    pub toggles_in_flight: Vec<String>,
}

impl DashboardView {
    pub fn goals(&self) -> &[Goal] {
        self.user.as_ref().map(|u| u.goals.as_slice()).unwrap_or(&[])
    }

    pub fn selected_goal(&self) -> Option<&Goal> {
        self.panel.goal()
    }

    pub fn is_toggle_enabled(&self, task_id: &str) -> bool {
        !self.toggles_in_flight.iter().any(|id| id == task_id)
    }
}
