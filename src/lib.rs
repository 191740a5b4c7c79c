pub mod config;
pub mod http;
pub mod search;
pub mod store;
pub mod types;
