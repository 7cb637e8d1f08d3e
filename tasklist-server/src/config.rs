//! Server configuration
//!
//! Built by the CLI from flags and environment variables, validated here.
//! The library never reads the process environment itself.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::HeaderValue;

use crate::db::SchemaName;

/// Port used when none is given outside production.
pub const DEFAULT_DEV_PORT: u16 = 8080;

/// Origin allowed by CORS in development when none is configured
/// (the frontend dev server).
pub const DEFAULT_DEV_CORS_ORIGIN: &str = "http://localhost:5173";

/// Configuration errors surfaced at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT not set")]
    PortRequired,

    #[error("schema name cannot be empty")]
    EmptySchema,

    #[error("invalid CORS origin '{0}'")]
    InvalidCorsOrigin(String),
}

/// Deployment environment, named after the raw `APP_ENV` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment(String);

impl Environment {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.is_empty() {
            return Self::default();
        }
        Self(name)
    }

    pub fn production() -> Self {
        Self("production".to_owned())
    }

    /// Anything other than `production` counts as development.
    pub fn is_production(&self) -> bool {
        self.0 == "production"
    }

    pub fn is_development(&self) -> bool {
        !self.is_production()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self("development".to_owned())
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pick the listening port: explicit wins, development falls back to
/// [`DEFAULT_DEV_PORT`], production without a port is an error.
pub fn resolve_port(port: Option<u16>, env: &Environment) -> Result<u16, ConfigError> {
    match port {
        Some(port) => Ok(port),
        None if env.is_development() => Ok(DEFAULT_DEV_PORT),
        None => Err(ConfigError::PortRequired),
    }
}

/// CORS policy derived from `CORS_ORIGIN` and the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Allow exactly one origin
    Origin(HeaderValue),
    /// No CORS headers at all
    Disabled,
}

impl CorsPolicy {
    pub fn resolve(origin: Option<&str>, env: &Environment) -> Result<Self, ConfigError> {
        let origin = match origin.filter(|o| !o.is_empty()) {
            Some(origin) => origin,
            None if env.is_development() => DEFAULT_DEV_CORS_ORIGIN,
            None => return Ok(Self::Disabled),
        };

        HeaderValue::from_str(origin)
            .map(Self::Origin)
            .map_err(|_| ConfigError::InvalidCorsOrigin(origin.to_owned()))
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8080)
    pub bind_addr: SocketAddr,

    /// Deployment environment reported by `/api/health`
    pub env: Environment,

    /// PostgreSQL connection string; `None` disables DB-backed routes (503)
    pub database_url: Option<String>,

    /// Schema holding the `todos` and `contacts` tables
    pub schema: SchemaName,

    pub cors: CorsPolicy,

    /// Directory of a built frontend bundle, served with SPA fallback
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_DEV_PORT)),
            env: Environment::default(),
            database_url: None,
            schema: SchemaName::default(),
            cors: CorsPolicy::Origin(HeaderValue::from_static(DEFAULT_DEV_CORS_ORIGIN)),
            static_dir: None,
        }
    }
}
