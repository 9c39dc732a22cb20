use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use habit_core::goal::Goal;
use habit_core::task::Task;
use habit_core::user::User;

/// Mutable view state behind the coordinator's lock.
#[derive(Debug, Default)]
pub(super) struct ViewState {
    pub user: Option<User>,
    pub selected_goal: Option<Goal>,
    pub tasks: Vec<Task>,
    /// Bumped on every selection change and task fetch; a fetch whose
    /// generation no longer matches is stale.
    pub generation: u64,
    /// Bumped on every user profile load; only the newest load is applied.
    pub user_generation: u64,
}

impl ViewState {
    pub fn selected_goal_id(&self) -> Option<&str> {
        self.selected_goal.as_ref().map(|g| g.id.as_str())
    }

    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn next_user_generation(&mut self) -> u64 {
        self.user_generation += 1;
        self.user_generation
    }

    /// Clears selection and tasks together and invalidates in-flight fetches.
    pub fn clear_selection(&mut self) {
        self.selected_goal = None;
        self.tasks.clear();
        self.generation += 1;
    }
}

/// Task ids whose completion toggle is disabled.
///
/// Kept outside the async lock so the guard can release its entry on drop.
#[derive(Debug, Clone, Default)]
pub(super) struct ToggleRegistry {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl ToggleRegistry {
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Marks the task as in flight, or returns `None` if it already is.
    pub fn acquire(&self, task_id: &str) -> Option<ToggleGuard> {
        if !self.lock().insert(task_id.to_string()) {
            return None;
        }
        Some(ToggleGuard {
            registry: self.clone(),
            task_id: task_id.to_string(),
        })
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.lock().contains(task_id)
    }

    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.lock().iter().cloned().collect();
        ids.sort();
        ids
    }
}

/// Re-enables the task's toggle when dropped.
pub(super) struct ToggleGuard {
    registry: ToggleRegistry,
    task_id: String,
}

impl Drop for ToggleGuard {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.task_id);
    }
}
