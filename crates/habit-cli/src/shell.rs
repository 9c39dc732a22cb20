use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::{Result, bail};
use chrono::{Local, NaiveDate};
use colored::Colorize;
use habit_core::HabitError;
use habit_core::validation::{GoalForm, SignInForm, TaskForm};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use crate::app::{App, pick};
use crate::prompt::{ask, confirm};
use crate::render;

type ShellEditor = Editor<ShellHelper, DefaultHistory>;

const COMMANDS: &[(&str, &str)] = &[
    ("goals", "list your goals"),
    ("select", "<n|id>  show the tasks of a goal"),
    ("add-goal", "create a goal"),
    ("add-task", "add a task to the selected goal"),
    ("toggle", "<n>  flip a task between done and not done"),
    ("rm-goal", "[n|id]  delete a goal (default: the selected one)"),
    ("rm-task", "<n>  delete a task of the selected goal"),
    ("refresh", "reload goals and tasks"),
    ("signin", "sign in"),
    ("signout", "sign out"),
    ("help", "show this list"),
    ("quit", "leave the shell"),
];

/// Completion, highlighting and hints for shell commands.
#[derive(Clone)]
struct ShellHelper {
    commands: Vec<String>,
}

impl ShellHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|(name, _)| name.to_string()).collect(),
        }
    }

    fn is_command(&self, word: &str) -> bool {
        self.commands.iter().any(|c| c == word)
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if line.contains(' ') {
            return Ok((0, vec![]));
        }
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let word = line.split_whitespace().next().unwrap_or_default();
        if self.is_command(word) {
            Owned(line.replacen(word, &word.bright_cyan().to_string(), 1))
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.is_empty() || line.contains(' ') {
            return None;
        }
        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for ShellHelper {}

enum Flow {
    Continue,
    Quit,
}

/// Runs the interactive shell until `quit` or Ctrl-D.
///
/// The coordinator lives for the whole shell, so selection survives between
/// commands. Session changes (sign-in, sign-out) are picked up through the
/// session's watch channel before each prompt.
pub async fn run(app: &App) -> Result<()> {
    let mut rl: ShellEditor = Editor::new()?;
    rl.set_helper(Some(ShellHelper::new()));
    let mut session_changes = app.session.subscribe();

    println!("{}", "=== Habit Tracker ===".bright_magenta().bold());
    println!("{}", "Type 'help' for commands, 'quit' to exit.".bright_black());
    println!();

    if app.session.is_authenticated() {
        show_dashboard(app).await;
    } else {
        println!("{}", "Not signed in. Type 'signin' to start.".yellow());
    }

    loop {
        if session_changes.has_changed().unwrap_or(false) {
            let signed_in = *session_changes.borrow_and_update();
            if signed_in {
                show_dashboard(app).await;
            } else {
                app.coordinator.reset().await;
            }
        }

        let prompt = match app.coordinator.selected_goal().await {
            Some(goal) => format!("habit [{}]> ", goal.name),
            None => "habit> ".to_string(),
        };

        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match execute(app, &mut rl, trimmed).await {
                    Ok(Flow::Quit) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Ok(Flow::Continue) => {}
                    Err(e) => render::report(&e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

async fn show_dashboard(app: &App) {
    if let Err(e) = app.coordinator.refresh().await {
        render::print_error(&e);
    }
    render::print_dashboard(&app.coordinator.snapshot().await);
}

async fn execute(app: &App, rl: &mut ShellEditor, line: &str) -> Result<Flow> {
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };

    match command {
        "quit" | "exit" => return Ok(Flow::Quit),
        "help" => print_help(),
        "signin" => {
            let email = ask(rl, "Email")?;
            let password = ask(rl, "Password")?;
            app.auth.sign_in(&SignInForm::new(email, password)).await?;
            render::success("Signed in.");
        }
        "signout" => {
            app.auth.sign_out().await?;
            render::success("Signed out.");
        }
        "goals" => {
            app.ensure_signed_in()?;
            app.coordinator.load_user().await?;
            render::print_goals(&app.coordinator.snapshot().await);
        }
        "refresh" => {
            app.ensure_signed_in()?;
            app.coordinator.refresh().await?;
            render::print_dashboard(&app.coordinator.snapshot().await);
        }
        "select" => {
            app.ensure_signed_in()?;
            let goals = app.coordinator.goals().await;
            let goal = pick(&goals, required(arg, "select <n|id>")?, |g| &g.id)
                .cloned()
                .ok_or_else(|| HabitError::not_found("Goal", arg))?;
            app.coordinator.select_goal(goal).await?;
            render::print_task_panel(&app.coordinator.snapshot().await);
        }
        "add-goal" => {
            app.ensure_signed_in()?;
            let name = ask(rl, "Name")?;
            let today = Local::now().date_naive();
            let start = ask(rl, "Start date (YYYY-MM-DD, blank for today)")?;
            let start = parse_date(&start)?.or(Some(today));
            let end = parse_date(&ask(rl, "End date (YYYY-MM-DD)")?)?;

            app.coordinator
                .create_goal(&GoalForm::new(name, start, end), today)
                .await?;
            render::print_goals(&app.coordinator.snapshot().await);
        }
        "add-task" => {
            app.ensure_signed_in()?;
            if app.coordinator.selected_goal().await.is_none() {
                return Err(HabitError::NoGoalSelected.into());
            }
            let form = ask_task_form(rl)?;
            app.coordinator.create_task(&form).await?;
            render::print_task_panel(&app.coordinator.snapshot().await);
        }
        "toggle" => {
            let task = app.find_task(required(arg, "toggle <n>")?).await?;
            app.coordinator.toggle_task(&task.id, !task.completed).await?;
            render::print_task_panel(&app.coordinator.snapshot().await);
        }
        "rm-task" => {
            let task = app.find_task(required(arg, "rm-task <n>")?).await?;
            if confirm(rl, &format!("Delete task '{}'?", task.name))? {
                app.coordinator.delete_task(&task.id).await?;
                render::print_task_panel(&app.coordinator.snapshot().await);
            }
        }
        "rm-goal" => {
            app.ensure_signed_in()?;
            let goal = if arg.is_empty() {
                app.coordinator
                    .selected_goal()
                    .await
                    .ok_or(HabitError::NoGoalSelected)?
            } else {
                let goals = app.coordinator.goals().await;
                pick(&goals, arg, |g| &g.id)
                    .cloned()
                    .ok_or_else(|| HabitError::not_found("Goal", arg))?
            };
            if confirm(rl, &format!("Delete goal '{}' and its tasks?", goal.name))? {
                app.coordinator.delete_goal(&goal.id).await?;
                render::print_dashboard(&app.coordinator.snapshot().await);
            }
        }
        other => bail!("Unknown command '{}'. Type 'help' for commands.", other),
    }
    Ok(Flow::Continue)
}

fn required<'a>(arg: &'a str, usage: &str) -> Result<&'a str> {
    if arg.is_empty() {
        bail!("Usage: {}", usage);
    }
    Ok(arg)
}

/// Blank input is `None`; anything else must be `YYYY-MM-DD`.
fn parse_date(input: &str) -> Result<Option<NaiveDate>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    match NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        Ok(date) => Ok(Some(date)),
        Err(_) => bail!("'{}' is not a date. Use YYYY-MM-DD.", input),
    }
}

fn parse_days(input: &str) -> Result<Vec<u8>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| {
            d.parse::<u8>()
                .map_err(|_| anyhow::anyhow!("'{}' is not a weekday number (0-6)", d))
        })
        .collect()
}

fn ask_task_form(rl: &mut ShellEditor) -> Result<TaskForm> {
    let name = ask(rl, "Name")?;
    let quantity = ask(rl, "Quantity [1]")?;
    let frequency = ask(rl, "Frequency (once a week | twice a day | one day) [once a week]")?;
    let reminder_time = ask(rl, "Reminder (YYYY-MM-DDTHH:MM, blank for none)")?;
    let days = parse_days(&ask(rl, "Weekly reminder days (0=Sun..6=Sat, comma separated, blank for none)")?)?;
    let time = if days.is_empty() {
        String::new()
    } else {
        ask(rl, "Weekly reminder time (HH:MM)")?
    };

    let mut form = TaskForm::new(
        name,
        if quantity.is_empty() { "1".to_string() } else { quantity },
        if frequency.is_empty() { "once a week".to_string() } else { frequency },
    )
    .with_reminder_time(reminder_time);
    if !days.is_empty() {
        form = form.with_custom_reminder(days, time);
    }
    Ok(form)
}

fn print_help() {
    for (name, description) in COMMANDS {
        println!("  {:<10} {}", name.bright_cyan(), description.bright_black());
    }
}
