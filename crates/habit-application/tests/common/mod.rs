//! Test doubles for the service gateway.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use habit_core::gateway::ApiGateway;
use habit_core::{HabitError, Result};
use serde_json::{Value, json};
use tokio::sync::Notify;

/// A recorded gateway call: `"METHOD path"` plus the request body.
#[derive(Debug, Clone)]
pub struct Call {
    pub route: String,
    pub body: Option<Value>,
}

/// Gateway answering from a fixed route table.
///
/// Routes are keyed `"METHOD path"`. A gated route parks its next call until
/// the returned `Notify` fires, which lets tests interleave requests.
#[derive(Default)]
pub struct ScriptedGateway {
    routes: Mutex<HashMap<String, Result<Value>>>,
    queued: Mutex<HashMap<String, VecDeque<Result<Value>>>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, route: &str, value: Value) {
        self.routes.lock().unwrap().insert(route.to_string(), Ok(value));
    }

    /// Answers the next call to `route` with `value`, ahead of the fixed
    /// route. The answer is chosen when the call arrives, before any gate.
    pub fn respond_once(&self, route: &str, value: Value) {
        self.queued
            .lock()
            .unwrap()
            .entry(route.to_string())
            .or_default()
            .push_back(Ok(value));
    }

    pub fn fail(&self, route: &str, status: u16, message: &str) {
        self.routes
            .lock()
            .unwrap()
            .insert(route.to_string(), Err(HabitError::request(Some(status), message)));
    }

    /// Holds the next call to `route` until the returned handle is notified.
    pub fn gate(&self, route: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(route.to_string(), notify.clone());
        notify
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, route: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.route == route)
            .count()
    }

    async fn handle(&self, method: &str, path: &str, body: Option<Value>) -> Result<Value> {
        let route = format!("{} {}", method, path);
        self.calls.lock().unwrap().push(Call {
            route: route.clone(),
            body,
        });

        let queued = self
            .queued
            .lock()
            .unwrap()
            .get_mut(&route)
            .and_then(VecDeque::pop_front);
        let gate = self.gates.lock().unwrap().remove(&route);
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if let Some(response) = queued {
            return response;
        }

        self.routes
            .lock()
            .unwrap()
            .get(&route)
            .cloned()
            .unwrap_or_else(|| Err(HabitError::request(Some(404), format!("no route for {}", route))))
    }
}

#[async_trait]
impl ApiGateway for ScriptedGateway {
    async fn fetch(&self, path: &str) -> Result<Value> {
        self.handle("GET", path, None).await
    }

    async fn create(&self, path: &str, body: Value) -> Result<Value> {
        self.handle("POST", path, Some(body)).await
    }

    async fn replace(&self, path: &str, body: Value) -> Result<Value> {
        self.handle("PUT", path, Some(body)).await
    }

    async fn remove(&self, path: &str) -> Result<Value> {
        self.handle("DELETE", path, None).await
    }
}

pub fn goal_json(id: &str, name: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "minTimeLine": "2024-01-01T00:00:00.000Z",
        "maxTimeLine": "2024-02-01T00:00:00.000Z",
        "completed": false
    })
}

pub fn task_json(id: &str, name: &str, goal_id: &str, completed: bool) -> Value {
    json!({
        "_id": id,
        "name": name,
        "quantity": 1,
        "frequency": "once a week",
        "completed": completed,
        "goal": goal_id
    })
}

pub fn user_json(goals: Vec<Value>) -> Value {
    json!({
        "_id": "u1",
        "username": "reader",
        "email": "reader@example.com",
        "goals": goals
    })
}

/// Stateful stand-in for the habit service.
///
/// Implements every endpoint the client uses against in-memory documents.
/// A goal counts as completed once it has tasks and all of them are done.
pub struct FakeService {
    state: Mutex<FakeState>,
    calls: Mutex<Vec<String>>,
}

struct FakeState {
    goals: Vec<Value>,
    tasks: Vec<Value>,
    next_id: u32,
}

impl FakeService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(FakeState {
                goals: Vec::new(),
                tasks: Vec::new(),
                next_id: 1,
            }),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn count(&self, route: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == route).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn route(&self, method: &str, path: &str, body: Option<Value>) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{} {}", method, path));

        let mut state = self.state.lock().unwrap();
        let segments: Vec<&str> = path.split('/').collect();
        match (method, segments.as_slice()) {
            ("POST", ["auth", "signin"]) => Ok(json!({ "token": "fake-token" })),
            ("POST", ["auth", "signup"]) => Ok(json!({ "message": "created" })),
            ("GET", ["auth", "signout"]) => Ok(Value::Null),
            ("GET", ["users", "me"]) => Ok(user_json(state.goals.clone())),
            ("POST", ["goals", "u1"]) => {
                let id = state.allocate("g");
                let mut goal = body.unwrap_or_default();
                goal["_id"] = json!(id);
                goal["completed"] = json!(false);
                state.goals.push(goal.clone());
                Ok(goal)
            }
            ("GET", ["goals", goal_id]) => {
                if !state.goals.iter().any(|g| g["_id"] == *goal_id) {
                    return Err(HabitError::request(Some(404), "Goal not found"));
                }
                let tasks: Vec<Value> = state
                    .tasks
                    .iter()
                    .filter(|t| t["goal"] == *goal_id)
                    .cloned()
                    .collect();
                Ok(json!({ "tasks": tasks }))
            }
            ("DELETE", ["goals", "delete", goal_id]) => {
                state.goals.retain(|g| g["_id"] != *goal_id);
                state.tasks.retain(|t| t["goal"] != *goal_id);
                Ok(Value::Null)
            }
            ("POST", ["tasks", goal_id]) => {
                let id = state.allocate("t");
                let mut task = body.unwrap_or_default();
                task["_id"] = json!(id);
                task["goal"] = json!(goal_id);
                task["completed"] = json!(false);
                state.tasks.push(task.clone());
                state.recompute_goal(goal_id);
                Ok(task)
            }
            ("PUT", ["tasks", "update", task_id]) => {
                let completed = body
                    .as_ref()
                    .and_then(|b| b["completed"].as_bool())
                    .unwrap_or(false);
                let goal_id = match state.tasks.iter_mut().find(|t| t["_id"] == *task_id) {
                    Some(task) => {
                        task["completed"] = json!(completed);
                        task["goal"].as_str().unwrap_or_default().to_string()
                    }
                    None => return Err(HabitError::request(Some(404), "Task not found")),
                };
                state.recompute_goal(&goal_id);
                Ok(Value::Null)
            }
            ("DELETE", ["tasks", "delete", task_id]) => {
                state.tasks.retain(|t| t["_id"] != *task_id);
                Ok(Value::Null)
            }
            _ => Err(HabitError::request(Some(404), format!("no route for {} {}", method, path))),
        }
    }
}

impl FakeState {
    fn allocate(&mut self, prefix: &str) -> String {
        let id = format!("{}{}", prefix, self.next_id);
        self.next_id += 1;
        id
    }

    fn recompute_goal(&mut self, goal_id: &str) {
        let tasks: Vec<&Value> = self.tasks.iter().filter(|t| t["goal"] == goal_id).collect();
        let done = !tasks.is_empty() && tasks.iter().all(|t| t["completed"] == true);
        if let Some(goal) = self.goals.iter_mut().find(|g| g["_id"] == goal_id) {
            goal["completed"] = json!(done);
        }
    }
}

#[async_trait]
impl ApiGateway for FakeService {
    async fn fetch(&self, path: &str) -> Result<Value> {
        self.route("GET", path, None)
    }

    async fn create(&self, path: &str, body: Value) -> Result<Value> {
        self.route("POST", path, Some(body))
    }

    async fn replace(&self, path: &str, body: Value) -> Result<Value> {
        self.route("PUT", path, Some(body))
    }

    async fn remove(&self, path: &str) -> Result<Value> {
        self.route("DELETE", path, None)
    }
}
