use anyhow::Result;
use chrono::{Local, NaiveDate};
use habit_core::HabitError;
use habit_core::validation::GoalForm;

use crate::app::{App, pick};
use crate::render;

pub async fn list(app: &App) -> Result<()> {
    app.ensure_signed_in()?;
    app.coordinator.load_user().await?;
    render::print_goals(&app.coordinator.snapshot().await);
    Ok(())
}

pub async fn add(app: &App, name: String, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<()> {
    app.ensure_signed_in()?;
    let today = Local::now().date_naive();
    let form = GoalForm::new(name, start.or(Some(today)), end);

    app.coordinator.create_goal(&form, today).await?;
    render::success(&format!("Created goal '{}'.", form.name.trim()));
    render::print_goals(&app.coordinator.snapshot().await);
    Ok(())
}

pub async fn delete(app: &App, selector: &str) -> Result<()> {
    app.ensure_signed_in()?;
    let user = app.coordinator.load_user().await?;
    let goal = pick(&user.goals, selector, |g| &g.id)
        .ok_or_else(|| HabitError::not_found("Goal", selector))?;

    app.coordinator.delete_goal(&goal.id).await?;
    render::success(&format!("Deleted goal '{}'.", goal.name));
    Ok(())
}
