//! Libris Library Catalog Service
//!
//! A Rust REST API server exposing a book catalog backed by a relational
//! store, built around a bounded connection pool and scoped per-operation
//! database sessions.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod db;
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
