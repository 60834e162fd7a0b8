pub mod api;
pub mod config;
pub mod error;
pub mod logs;
pub mod stats;
