//! Local storage backends.

pub mod token_storage;

pub use token_storage::FileTokenStore;
