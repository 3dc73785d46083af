//! Lectern Library Lending Reports
//!
//! A Rust server answering aggregate lending reports over a library's
//! books, users and lending records, exposed through a REST JSON API and
//! an RPC-style message surface.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
