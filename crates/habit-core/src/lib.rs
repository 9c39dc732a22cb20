//! Domain layer of the habit tracker client.
//!
//! Holds the wire model (users, goals, tasks), the form schemas, the session
//! context and the ports (`ApiGateway`, `TokenStore`) implemented by the
//! infrastructure crate.

pub mod auth;
pub mod config;
pub mod datetime;
pub mod error;
pub mod gateway;
pub mod goal;
pub mod session;
pub mod task;
pub mod token;
pub mod user;
pub mod validation;

// Re-export common error type
pub use error::{HabitError, Result};
