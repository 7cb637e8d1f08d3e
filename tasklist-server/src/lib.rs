//! tasklist-server: REST API for todos and contacts over PostgreSQL
//!
//! - [`db`]: pool, schema bootstrap, repositories and the [`db::Store`] seam
//! - [`http`]: axum handlers, error mapping and server lifecycle
//! - [`models`]: records and validated inputs
//! - [`config`]: validated server configuration

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;

pub use config::{ConfigError, CorsPolicy, Environment, ServerConfig};
pub use error::{Error, Result};
pub use http::{build_router, run_server, AppState};
