//! Typed endpoints of the habit service.
//!
//! Maps each operation onto a gateway verb and path, and converts between
//! domain types and JSON.

use std::sync::Arc;

use habit_core::auth::{SignInRequest, SignUpRequest, TokenResponse};
use habit_core::gateway::ApiGateway;
use habit_core::goal::{GoalDetail, NewGoal};
use habit_core::task::{NewTask, Task, TaskCompletion};
use habit_core::user::User;
use habit_core::{HabitError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Endpoint layer over an [`ApiGateway`].
#[derive(Clone)]
pub struct HabitApi {
    gateway: Arc<dyn ApiGateway>,
}

impl HabitApi {
    pub fn new(gateway: Arc<dyn ApiGateway>) -> Self {
        Self { gateway }
    }

    /// `POST auth/signin`, returning the issued bearer token.
    pub async fn sign_in(&self, request: &SignInRequest) -> Result<String> {
        let response: TokenResponse = decode(
            self.gateway
                .create("auth/signin", encode(request)?)
                .await?,
        )?;
        if response.token.trim().is_empty() {
            return Err(HabitError::request(None, "Sign-in response carried an empty token"));
        }
        Ok(response.token)
    }

    /// `POST auth/signup`
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<()> {
        self.gateway.create("auth/signup", encode(request)?).await?;
        Ok(())
    }

    /// `GET auth/signout`
    pub async fn sign_out(&self) -> Result<()> {
        self.gateway.fetch("auth/signout").await?;
        Ok(())
    }

    /// `GET users/me`
    pub async fn current_user(&self) -> Result<User> {
        decode(self.gateway.fetch("users/me").await?)
    }

    /// `POST goals/{userId}`
    pub async fn create_goal(&self, user_id: &str, goal: &NewGoal) -> Result<()> {
        self.gateway
            .create(&format!("goals/{}", user_id), encode(goal)?)
            .await?;
        Ok(())
    }

    /// `GET goals/{goalId}`, returning the goal's full task list.
    pub async fn goal_tasks(&self, goal_id: &str) -> Result<Vec<Task>> {
        let detail: GoalDetail = decode(self.gateway.fetch(&format!("goals/{}", goal_id)).await?)?;
        Ok(detail.tasks)
    }

    /// `DELETE goals/delete/{goalId}`
    pub async fn delete_goal(&self, goal_id: &str) -> Result<()> {
        self.gateway
            .remove(&format!("goals/delete/{}", goal_id))
            .await?;
        Ok(())
    }

    /// `POST tasks/{goalId}`
    pub async fn create_task(&self, goal_id: &str, task: &NewTask) -> Result<()> {
        self.gateway
            .create(&format!("tasks/{}", goal_id), encode(task)?)
            .await?;
        Ok(())
    }

    /// `PUT tasks/update/{taskId}`
    pub async fn set_task_completed(&self, task_id: &str, completed: bool) -> Result<()> {
        self.gateway
            .replace(
                &format!("tasks/update/{}", task_id),
                encode(&TaskCompletion { completed })?,
            )
            .await?;
        Ok(())
    }

    /// `DELETE tasks/delete/{taskId}`
    pub async fn delete_task(&self, task_id: &str) -> Result<()> {
        self.gateway
            .remove(&format!("tasks/delete/{}", task_id))
            .await?;
        Ok(())
    }
}

fn encode<T: Serialize>(body: &T) -> Result<Value> {
    Ok(serde_json::to_value(body)?)
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}
