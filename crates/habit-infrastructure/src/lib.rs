//! Infrastructure adapters for the habit tracker client.
//!
//! - `http_gateway`: reqwest-backed [`ApiGateway`](habit_core::gateway::ApiGateway)
//! - `storage`: file-backed [`TokenStore`](habit_core::token::TokenStore)
//! - `config_service`: config file and environment loading
//! - `paths`: local directory layout

pub mod config_service;
pub mod http_gateway;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::http_gateway::HttpGateway;
pub use crate::paths::HabitPaths;
pub use crate::storage::FileTokenStore;
