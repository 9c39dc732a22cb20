//! Goal domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// A goal as returned by the service.
///
/// `completed` is an opaque server-side value. It is mirrored as-is and never
/// computed from the goal's tasks on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Server identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Start of the goal's date range
    pub min_time_line: DateTime<Utc>,
    /// End of the goal's date range
    pub max_time_line: DateTime<Utc>,
    /// Completion status mirrored from the server
    #[serde(default)]
    pub completed: bool,
}

/// Payload for `POST goals/{userId}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub name: String,
    pub min_time_line: DateTime<Utc>,
    pub max_time_line: DateTime<Utc>,
}

/// Response of `GET goals/{goalId}`: the goal's full task list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoalDetail {
    #[serde(default)]
    pub tasks: Vec<Task>,
}
