//! HTTP server command
//!
//! Every flag falls back to the environment variable the deployment
//! platform sets, after `.env` has been loaded.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use tasklist_server::db::SchemaName;
use tasklist_server::{config, CorsPolicy, Environment, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Interface to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on (required in production, 8080 otherwise)
    #[arg(long, short = 'p', env = "PORT")]
    pub port: Option<u16>,

    /// PostgreSQL connection string; without it DB-backed routes answer 503
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Schema holding the todos and contacts tables
    #[arg(long, env = "PG_SCHEMA", default_value = "public")]
    pub schema: String,

    /// Single origin allowed by CORS (development defaults to the Vite dev server)
    #[arg(long, env = "CORS_ORIGIN")]
    pub cors_origin: Option<String>,

    /// Deployment environment reported by /api/health ("production" enables TLS to the database)
    #[arg(long = "env", env = "APP_ENV", default_value = "development")]
    pub environment: String,

    /// Serve the built frontend bundle from --static-dir with SPA fallback
    #[arg(long, env = "SERVE_STATIC")]
    pub serve_static: bool,

    /// Directory of the built frontend bundle
    #[arg(long, env = "STATIC_DIR", default_value = "public")]
    pub static_dir: PathBuf,
}

impl ServeArgs {
    /// Validate flags into a server configuration.
    pub fn into_config(self) -> Result<ServerConfig> {
        let env = Environment::new(self.environment);
        let port = config::resolve_port(self.port, &env)?;
        let schema = SchemaName::new(&self.schema).context("Invalid PG_SCHEMA")?;
        let cors = CorsPolicy::resolve(self.cors_origin.as_deref(), &env)?;

        Ok(ServerConfig {
            bind_addr: SocketAddr::new(self.host, port),
            env,
            database_url: self.database_url.filter(|url| !url.is_empty()),
            schema,
            cors,
            static_dir: self.serve_static.then_some(self.static_dir),
        })
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.into_config()?;

    tracing::info!(
        bind = %config.bind_addr,
        env = %config.env,
        schema = %config.schema,
        "Starting tasklist server"
    );

    // Run server (blocks until shutdown)
    tasklist_server::run_server(config)
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ServeArgs {
        let mut argv = vec!["serve"];
        argv.extend_from_slice(args);
        ServeArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn development_defaults() {
        let config = parse(&["--env", "development"]).into_config().unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.schema.as_str(), "public");
        assert!(config.static_dir.is_none());
        assert!(matches!(config.cors, CorsPolicy::Origin(_)));
    }

    #[test]
    fn production_requires_port() {
        let err = parse(&["--env", "production"]).into_config().unwrap_err();
        assert!(err.to_string().contains("PORT not set"));

        let config = parse(&["--env", "production", "--port", "3000"])
            .into_config()
            .unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.cors, CorsPolicy::Disabled);
    }

    #[test]
    fn static_dir_only_when_enabled() {
        let config = parse(&["--serve-static", "--static-dir", "dist"])
            .into_config()
            .unwrap();
        assert_eq!(config.static_dir, Some(PathBuf::from("dist")));
    }

    #[test]
    fn empty_database_url_is_absent() {
        let config = parse(&["--database-url", ""]).into_config().unwrap();
        assert!(config.database_url.is_none());
    }
}
