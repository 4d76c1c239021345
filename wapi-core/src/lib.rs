// src/lib.rs

pub mod auth;
pub mod config;
pub mod context;
pub mod db;
pub mod eventbus;
pub mod forms;
pub mod repositories;
pub mod routes;
pub mod seed;
pub mod services;
pub mod test_utils;
pub mod utils;

pub use config::DashboardConfig;
pub use context::DashboardContext;
pub use db::Database;
pub use wapi_common::error::Error;
