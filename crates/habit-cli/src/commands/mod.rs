pub mod auth;
pub mod config;
pub mod goals;
pub mod tasks;
