//! Route handlers organized by resource

pub mod contacts;
pub mod health;
pub mod todos;

use std::sync::Arc;

use axum::Router;

use crate::http::AppState;

/// Everything mounted under `/api`
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::router())
        .merge(todos::router())
        .merge(contacts::router())
}
