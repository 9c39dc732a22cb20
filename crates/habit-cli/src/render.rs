//! Terminal rendering of the dashboard view.

use colored::Colorize;
use habit_application::{DashboardView, TaskPanel};
use habit_core::HabitError;
use habit_core::goal::Goal;
use habit_core::task::Task;
use habit_core::validation::PasswordStrength;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn goal_line(index: usize, goal: &Goal, selected: bool) -> String {
    let marker = if selected { ">" } else { " " };
    let status = if goal.completed {
        "done".green().to_string()
    } else {
        "in progress".yellow().to_string()
    };
    format!(
        "{} {}. {}  {} to {}  {}",
        marker,
        index,
        goal.name.bold(),
        goal.min_time_line.format(DATE_FORMAT),
        goal.max_time_line.format(DATE_FORMAT),
        status
    )
}

pub fn task_line(index: usize, task: &Task, toggle_enabled: bool) -> String {
    let check = if task.completed { "[x]" } else { "[ ]" };
    let mut line = format!(
        "{} {}. {}  {} x {}",
        check,
        index,
        task.name,
        task.quantity,
        task.frequency
    );
    if let Some(at) = task.reminder_time {
        line.push_str(&format!("  remind {}", at.format("%Y-%m-%d %H:%M")));
    }
    if let Some(custom) = &task.custom_reminder {
        line.push_str(&format!(
            "  every {} at {}",
            custom.day_labels(),
            custom.time.format("%H:%M")
        ));
    }
    if !toggle_enabled {
        line.push_str(&format!("  {}", "(updating)".bright_black()));
    }
    if task.completed {
        line.green().to_string()
    } else {
        line
    }
}

pub fn print_goals(view: &DashboardView) {
    let goals = view.goals();
    if goals.is_empty() {
        println!("{}", "No goals yet. Add one with `add-goal`.".bright_black());
        return;
    }
    let selected = view.selected_goal().map(|g| g.id.as_str());
    for (i, goal) in goals.iter().enumerate() {
        println!("{}", goal_line(i + 1, goal, selected == Some(goal.id.as_str())));
    }
}

pub fn print_task_panel(view: &DashboardView) {
    match &view.panel {
        TaskPanel::NoSelection => {
            println!("{}", "Choose a goal to see its tasks.".bright_black());
        }
        TaskPanel::Empty { goal } => {
            println!("{}", goal.name.bright_cyan().bold());
            println!("{}", "No task present.".bright_black());
        }
        TaskPanel::Populated { goal, tasks } => {
            println!("{}", goal.name.bright_cyan().bold());
            for (i, task) in tasks.iter().enumerate() {
                println!("  {}", task_line(i + 1, task, view.is_toggle_enabled(&task.id)));
            }
        }
    }
}

pub fn print_dashboard(view: &DashboardView) {
    if let Some(user) = &view.user {
        println!("{}", format!("{} <{}>", user.username, user.email).bright_magenta());
    }
    print_goals(view);
    println!();
    print_task_panel(view);
}

pub fn print_error(err: &HabitError) {
    match err {
        HabitError::Validation(errors) => {
            for e in errors.iter() {
                eprintln!("{}", format!("  {}: {}", e.field, e.message).red());
            }
        }
        other => eprintln!("{}", format!("Error: {}", other).red()),
    }
    if err.is_unauthorized() {
        eprintln!("{}", "Sign in with `habit signin`.".yellow());
    }
}

/// Prints a command failure, with per-field detail for validation errors.
pub fn report(err: &anyhow::Error) {
    match err.downcast_ref::<HabitError>() {
        Some(habit_err) => print_error(habit_err),
        None => eprintln!("{}", format!("Error: {:#}", err).red()),
    }
}

pub fn print_password_hint(strength: &PasswordStrength) {
    if strength.is_strong() {
        return;
    }
    println!(
        "{}",
        format!("Hint: a stronger password has {}.", strength.missing().join(", ")).yellow()
    );
}

pub fn success(message: &str) {
    println!("{}", message.bright_green());
}
