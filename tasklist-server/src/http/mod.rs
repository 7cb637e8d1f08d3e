//! HTTP server layer
//!
//! Axum server with:
//! - `/api` routes for health, todos and contacts
//! - Optional single-origin CORS
//! - Request tracing
//! - Optional static frontend bundle with SPA fallback
//! - Graceful shutdown
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::{build_router, run_server};
pub use state::AppState;
