pub mod api;
pub mod error;
pub mod format;
pub mod store;
pub mod types;
