use chrono::NaiveDate;
use habit_core::goal::Goal;
use habit_core::user::User;
use habit_core::validation::{GoalForm, TaskForm};
use habit_core::{HabitError, Result};
use tokio::sync::RwLock;

use super::state::{ToggleRegistry, ViewState};
use super::view::{DashboardView, TaskPanel};
use crate::api::HabitApi;

/// Owns the dashboard state: the signed-in user's goals, the selected goal
/// and its tasks.
///
/// Every mutation goes to the server first; local state is only replaced
/// with fresh server data, never patched. The state lock is never held
/// across a request, so calls may overlap. Task fetches carry the selection
/// generation they were issued under and are dropped if it has moved on;
/// profile loads are tagged the same way with their own counter.
pub struct GoalTaskCoordinator {
    api: HabitApi,
    state: RwLock<ViewState>,
    toggles: ToggleRegistry,
}

impl GoalTaskCoordinator {
    pub fn new(api: HabitApi) -> Self {
        Self {
            api,
            state: RwLock::new(ViewState::default()),
            toggles: ToggleRegistry::default(),
        }
    }

    /// Fetches the user profile and replaces the goal collection wholesale.
    ///
    /// A selected goal is swapped for its fresh record, or cleared together
    /// with the task list if the server no longer has it. If a newer load
    /// was issued while this one was in flight, the response is returned but
    /// not applied.
    pub async fn load_user(&self) -> Result<User> {
        let generation = self.state.write().await.next_user_generation();
        let user = self.api.current_user().await.inspect_err(|e| {
            tracing::warn!("Failed to load user profile: {}", e);
        })?;

        let mut state = self.state.write().await;
        if state.user_generation != generation {
            tracing::debug!(
                "Discarding stale profile for {} (generation {} < {})",
                user.username,
                generation,
                state.user_generation
            );
            return Ok(user);
        }
        let selected_id = state.selected_goal_id().map(str::to_string);
        if let Some(selected_id) = selected_id {
            match user.goal(&selected_id) {
                Some(fresh) => state.selected_goal = Some(fresh.clone()),
                None => {
                    tracing::debug!("Selected goal {} no longer exists", selected_id);
                    state.clear_selection();
                }
            }
        }
        state.user = Some(user.clone());
        tracing::debug!("Loaded {} goal(s) for {}", user.goals.len(), user.username);
        Ok(user)
    }

    /// Selects `goal` and fetches its tasks.
    ///
    /// Switching to a different goal empties the task list at once;
    /// reselecting the current goal keeps it visible until the fetch lands.
    pub async fn select_goal(&self, goal: Goal) -> Result<()> {
        let generation = {
            let mut state = self.state.write().await;
            if state.selected_goal_id() != Some(goal.id.as_str()) {
                state.tasks.clear();
            }
            tracing::debug!("Selecting goal {} ({})", goal.name, goal.id);
            state.selected_goal = Some(goal.clone());
            state.next_generation()
        };
        self.fetch_tasks(&goal.id, generation).await
    }

    /// Looks up a goal in the loaded collection by id.
    pub async fn find_goal(&self, goal_id: &str) -> Result<Goal> {
        let state = self.state.read().await;
        state
            .user
            .as_ref()
            .and_then(|u| u.goal(goal_id))
            .cloned()
            .ok_or_else(|| HabitError::not_found("Goal", goal_id))
    }

    /// Re-fetches the selected goal's tasks. No-op without a selection.
    pub async fn refresh_tasks(&self) -> Result<()> {
        let target = {
            let mut state = self.state.write().await;
            let selected_id = state.selected_goal_id().map(str::to_string);
            selected_id.map(|goal_id| (goal_id, state.next_generation()))
        };
        match target {
            Some((goal_id, generation)) => self.fetch_tasks(&goal_id, generation).await,
            None => Ok(()),
        }
    }

    /// Re-fetches both the goal collection and the selected goal's tasks.
    pub async fn refresh(&self) -> Result<()> {
        self.load_user().await?;
        self.refresh_tasks().await
    }

    async fn fetch_tasks(&self, goal_id: &str, generation: u64) -> Result<()> {
        let result = self.api.goal_tasks(goal_id).await;

        let mut state = self.state.write().await;
        if state.generation != generation {
            tracing::debug!(
                "Discarding stale task list for goal {} (generation {} < {})",
                goal_id,
                generation,
                state.generation
            );
            return Ok(());
        }
        match result {
            Ok(tasks) => {
                tracing::debug!("Loaded {} task(s) for goal {}", tasks.len(), goal_id);
                state.tasks = tasks;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load tasks for goal {}: {}", goal_id, e);
                Err(e)
            }
        }
    }

    /// Validates the form, creates the goal, then reloads the collection.
    pub async fn create_goal(&self, form: &GoalForm, today: NaiveDate) -> Result<()> {
        let new_goal = form.validate(today)?;
        let user_id = match self.user_id().await {
            Some(id) => id,
            None => self.load_user().await?.id,
        };

        self.api.create_goal(&user_id, &new_goal).await.inspect_err(|e| {
            tracing::warn!("Failed to create goal '{}': {}", new_goal.name, e);
        })?;
        tracing::info!("Created goal '{}'", new_goal.name);

        self.reload_goals_after_change().await;
        Ok(())
    }

    /// Deletes the goal, clears selection and tasks in one step, then
    /// reloads the collection.
    pub async fn delete_goal(&self, goal_id: &str) -> Result<()> {
        self.api.delete_goal(goal_id).await.inspect_err(|e| {
            tracing::warn!("Failed to delete goal {}: {}", goal_id, e);
        })?;
        tracing::info!("Deleted goal {}", goal_id);

        self.state.write().await.clear_selection();
        self.reload_goals_after_change().await;
        Ok(())
    }

    /// Validates the form and adds the task to the selected goal.
    pub async fn create_task(&self, form: &TaskForm) -> Result<()> {
        let goal_id = self.selected_goal_id().await.ok_or(HabitError::NoGoalSelected)?;
        let new_task = form.validate()?;

        self.api
            .create_task(&goal_id, &new_task)
            .await
            .inspect_err(|e| {
                tracing::warn!("Failed to create task '{}': {}", new_task.name, e);
            })?;
        tracing::info!("Created task '{}' under goal {}", new_task.name, goal_id);

        self.reload_after_task_change().await;
        Ok(())
    }

    /// Sets the task's completion flag on the server.
    ///
    /// The task's toggle stays disabled until the update and the follow-up
    /// reloads finish, whether or not they succeed. A second toggle of the
    /// same task in the meantime fails with `ToggleInFlight`.
    pub async fn toggle_task(&self, task_id: &str, completed: bool) -> Result<()> {
        let _guard = self
            .toggles
            .acquire(task_id)
            .ok_or_else(|| HabitError::ToggleInFlight(task_id.to_string()))?;

        self.api
            .set_task_completed(task_id, completed)
            .await
            .inspect_err(|e| {
                tracing::warn!("Failed to update task {}: {}", task_id, e);
            })?;
        tracing::info!("Marked task {} completed={}", task_id, completed);

        self.reload_after_task_change().await;
        Ok(())
    }

    pub async fn delete_task(&self, task_id: &str) -> Result<()> {
        self.api.delete_task(task_id).await.inspect_err(|e| {
            tracing::warn!("Failed to delete task {}: {}", task_id, e);
        })?;
        tracing::info!("Deleted task {}", task_id);

        self.reload_after_task_change().await;
        Ok(())
    }

    /// The mutation already succeeded, so reload failures are only logged.
    async fn reload_after_task_change(&self) {
        if let Err(e) = self.refresh_tasks().await {
            tracing::debug!("Task reload after change failed: {}", e);
        }
        self.reload_goals_after_change().await;
    }

    async fn reload_goals_after_change(&self) {
        if let Err(e) = self.load_user().await {
            tracing::debug!("Goal reload after change failed: {}", e);
        }
    }

    /// Drops all view state, e.g. after sign-out. Loads still in flight are
    /// discarded when they land.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        state.user = None;
        state.next_user_generation();
        state.clear_selection();
    }

    pub fn is_toggle_enabled(&self, task_id: &str) -> bool {
        !self.toggles.contains(task_id)
    }

    pub async fn goals(&self) -> Vec<Goal> {
        let state = self.state.read().await;
        state.user.as_ref().map(|u| u.goals.clone()).unwrap_or_default()
    }

    pub async fn selected_goal(&self) -> Option<Goal> {
        self.state.read().await.selected_goal.clone()
    }

    pub async fn task_panel(&self) -> TaskPanel {
        let state = self.state.read().await;
        TaskPanel::from_state(state.selected_goal.as_ref(), &state.tasks)
    }

    pub async fn snapshot(&self) -> DashboardView {
        let state = self.state.read().await;
        DashboardView {
            user: state.user.clone(),
            panel: TaskPanel::from_state(state.selected_goal.as_ref(), &state.tasks),
            toggles_in_flight: self.toggles.ids(),
        }
    }

    async fn user_id(&self) -> Option<String> {
        self.state.read().await.user.as_ref().map(|u| u.id.clone())
    }

    async fn selected_goal_id(&self) -> Option<String> {
        self.state.read().await.selected_goal_id().map(str::to_string)
    }
}
