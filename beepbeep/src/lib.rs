pub mod alert;
pub mod commands;
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod watcher;
