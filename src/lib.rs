//! Athenaeum Community Library & Events Server
//!
//! A Rust REST JSON API for a small community library: book catalog with a
//! checkout/return lifecycle, event scheduling with token-based invitations,
//! role-gated access, and LLM-backed text extraction helpers.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod policy;
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
