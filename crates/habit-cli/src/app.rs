use std::path::PathBuf;
use std::sync::Arc;

use habit_application::{AuthUseCase, GoalTaskCoordinator, HabitApi};
use habit_core::config::ClientConfig;
use habit_core::goal::Goal;
use habit_core::session::Session;
use habit_core::task::Task;
use habit_core::token::TokenStore;
use habit_core::{HabitError, Result};
use habit_infrastructure::{ConfigService, HttpGateway};

/// Everything a command needs, wired from the effective configuration.
pub struct App {
    pub config: ClientConfig,
    pub config_service: ConfigService,
    pub session: Arc<Session>,
    pub auth: AuthUseCase,
    pub coordinator: GoalTaskCoordinator,
    pub token_path: PathBuf,
}

impl App {
    pub fn build(config_service: ConfigService, config: ClientConfig) -> Result<Self> {
        let store = config_service.token_store(&config)?;
        let token_path = store.path().to_path_buf();
        let tokens: Arc<dyn TokenStore> = Arc::new(store);
        let session = Arc::new(Session::initialize(tokens.as_ref()));

        let base_url = config.base_url()?;
        tracing::debug!("Using service at {}", base_url);
        let api = HabitApi::new(Arc::new(HttpGateway::new(base_url, tokens.clone())));

        Ok(Self {
            auth: AuthUseCase::new(api.clone(), tokens, session.clone()),
            coordinator: GoalTaskCoordinator::new(api),
            config,
            config_service,
            session,
            token_path,
        })
    }

    pub fn ensure_signed_in(&self) -> Result<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(HabitError::Unauthenticated)
        }
    }

    /// Loads the goal collection and selects the goal named by `selector`.
    pub async fn open_goal(&self, selector: &str) -> Result<Goal> {
        self.ensure_signed_in()?;
        let user = self.coordinator.load_user().await?;
        let goal = pick(&user.goals, selector, |g| &g.id)
            .cloned()
            .ok_or_else(|| HabitError::not_found("Goal", selector))?;
        self.coordinator.select_goal(goal.clone()).await?;
        Ok(goal)
    }

    /// Finds a task of the selected goal by list number or id.
    pub async fn find_task(&self, selector: &str) -> Result<Task> {
        let panel = self.coordinator.task_panel().await;
        if panel.goal().is_none() {
            return Err(HabitError::NoGoalSelected);
        }
        pick(panel.tasks(), selector, |t| &t.id)
            .cloned()
            .ok_or_else(|| HabitError::not_found("Task", selector))
    }
}

/// Resolves a 1-based list number or an id against `items`.
pub fn pick<'a, T>(items: &'a [T], selector: &str, id: impl Fn(&T) -> &String) -> Option<&'a T> {
    let selector = selector.trim();
    if let Ok(n) = selector.parse::<usize>() {
        if let Some(item) = n.checked_sub(1).and_then(|i| items.get(i)) {
            return Some(item);
        }
    }
    items.iter().find(|item| id(item) == selector)
}
