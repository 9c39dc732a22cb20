//! Goal/task view-state coordination.

mod service;
mod state;
mod view;

pub use service::GoalTaskCoordinator;
pub use view::{DashboardView, TaskPanel};
