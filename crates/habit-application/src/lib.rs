//! Application layer of the habit tracker client.
//!
//! [`HabitApi`] maps operations onto service endpoints, [`AuthUseCase`]
//! drives sign-in and sign-out, and [`GoalTaskCoordinator`] owns the
//! dashboard view state.

pub mod api;
pub mod auth;
pub mod coordinator;

pub use api::HabitApi;
pub use auth::AuthUseCase;
pub use coordinator::{DashboardView, GoalTaskCoordinator, TaskPanel};
