use anyhow::Result;
use clap::Parser;
use habit_infrastructure::{ConfigService, HabitPaths};

mod app;
mod cli;
mod commands;
mod logging;
mod prompt;
mod render;
mod shell;

use app::App;
use cli::{Cli, Commands, ConfigAction, GoalsAction, TasksAction};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        render::report(&e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_service = ConfigService::new(HabitPaths::new(cli.config_dir.as_deref()));
    let mut config = config_service.load()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    let _log_guard = logging::init(&config, config_service.paths().logs_dir().ok());
    let app = App::build(config_service, config)?;

    match cli.command {
        Commands::Signup {
            username,
            email,
            password,
            accept_terms,
        } => commands::auth::signup(&app, username, email, password, accept_terms).await?,
        Commands::Signin { email, password } => commands::auth::signin(&app, email, password).await?,
        Commands::Signout => commands::auth::signout(&app).await?,
        Commands::Status => commands::auth::status(&app),
        Commands::Goals { action } => match action {
            GoalsAction::List => commands::goals::list(&app).await?,
            GoalsAction::Add { name, start, end } => commands::goals::add(&app, name, start, end).await?,
            GoalsAction::Delete { goal } => commands::goals::delete(&app, &goal).await?,
        },
        Commands::Tasks { action } => match action {
            TasksAction::List { goal } => commands::tasks::list(&app, &goal).await?,
            TasksAction::Add {
                goal,
                name,
                quantity,
                frequency,
                reminder_time,
                days,
                time,
            } => {
                let form = commands::tasks::form(name, quantity, frequency, reminder_time, days, time);
                commands::tasks::add(&app, &goal, form).await?
            }
            TasksAction::Toggle { goal, task } => commands::tasks::toggle(&app, &goal, &task).await?,
            TasksAction::Delete { goal, task } => commands::tasks::delete(&app, &goal, &task).await?,
        },
        Commands::Shell => shell::run(&app).await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&app)?,
            ConfigAction::Init => commands::config::init(&app)?,
        },
    }

    Ok(())
}
