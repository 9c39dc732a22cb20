use anyhow::Result;
use habit_core::validation::TaskForm;

use crate::app::App;
use crate::render;

pub async fn list(app: &App, goal: &str) -> Result<()> {
    app.open_goal(goal).await?;
    render::print_task_panel(&app.coordinator.snapshot().await);
    Ok(())
}

pub async fn add(app: &App, goal: &str, form: TaskForm) -> Result<()> {
    app.open_goal(goal).await?;
    app.coordinator.create_task(&form).await?;
    render::success(&format!("Added task '{}'.", form.name.trim()));
    render::print_task_panel(&app.coordinator.snapshot().await);
    Ok(())
}

pub async fn toggle(app: &App, goal: &str, task: &str) -> Result<()> {
    app.open_goal(goal).await?;
    let task = app.find_task(task).await?;

    app.coordinator.toggle_task(&task.id, !task.completed).await?;
    render::print_task_panel(&app.coordinator.snapshot().await);
    Ok(())
}

pub async fn delete(app: &App, goal: &str, task: &str) -> Result<()> {
    app.open_goal(goal).await?;
    let task = app.find_task(task).await?;

    app.coordinator.delete_task(&task.id).await?;
    render::success(&format!("Deleted task '{}'.", task.name));
    Ok(())
}

/// Builds the task form from command-line values.
pub fn form(
    name: String,
    quantity: String,
    frequency: String,
    reminder_time: Option<String>,
    days: Vec<u8>,
    time: Option<String>,
) -> TaskForm {
    let mut form = TaskForm::new(name, quantity, frequency);
    if let Some(reminder_time) = reminder_time {
        form = form.with_reminder_time(reminder_time);
    }
    if !days.is_empty() || time.is_some() {
        form = form.with_custom_reminder(days, time.unwrap_or_default());
    }
    form
}
