pub mod broadcast;
pub mod catchers;
pub mod client_info;
pub mod config;
pub mod cors;
pub mod error;
pub mod processor;
pub mod rate_limiter;
pub mod routes;
pub mod store;
pub mod utils;
