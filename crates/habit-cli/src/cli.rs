use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "habit")]
#[command(about = "Habit Tracker - goals and the habits that get you there", long_about = None)]
pub struct Cli {
    /// Service base URL (overrides config file and HABIT_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Configuration directory (default: ~/.config/habit-tracker)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account
    Signup {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
        /// Accept the terms and conditions
        #[arg(long)]
        accept_terms: bool,
    },
    /// Sign in and store the session token
    Signin {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign out and remove the stored token
    Signout,
    /// Show whether a session token is stored
    Status,
    /// Manage goals
    Goals {
        #[command(subcommand)]
        action: GoalsAction,
    },
    /// Manage the tasks of a goal
    Tasks {
        #[command(subcommand)]
        action: TasksAction,
    },
    /// Interactive shell
    Shell,
    /// Inspect or initialize the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum GoalsAction {
    /// List your goals
    List,
    /// Create a goal
    Add {
        name: String,
        /// First day, YYYY-MM-DD (default: today)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last day, YYYY-MM-DD
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// Delete a goal by list number or id
    Delete { goal: String },
}

#[derive(Subcommand, Debug)]
pub enum TasksAction {
    /// List the tasks of a goal
    List {
        /// Goal list number or id
        #[arg(long, short)]
        goal: String,
    },
    /// Add a task to a goal
    Add {
        #[arg(long, short)]
        goal: String,
        name: String,
        #[arg(long, default_value = "1")]
        quantity: String,
        /// once a week | twice a day | one day
        #[arg(long, default_value = "once a week")]
        frequency: String,
        /// One-off reminder, YYYY-MM-DDTHH:MM
        #[arg(long)]
        reminder_time: Option<String>,
        /// Weekly reminder days, 0 (Sunday) to 6, comma separated
        #[arg(long, value_delimiter = ',')]
        days: Vec<u8>,
        /// Weekly reminder time, HH:MM
        #[arg(long)]
        time: Option<String>,
    },
    /// Flip a task between done and not done
    Toggle {
        #[arg(long, short)]
        goal: String,
        /// Task list number or id
        task: String,
    },
    /// Delete a task
    Delete {
        #[arg(long, short)]
        goal: String,
        task: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the effective configuration to the config file
    Init,
}
