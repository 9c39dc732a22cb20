//! Goal domain module.
//!
//! A goal is a user-defined objective with a start/end date range. It owns
//! zero or more tasks; the server derives its `completed` flag.

mod model;

pub use model::{Goal, GoalDetail, NewGoal};
