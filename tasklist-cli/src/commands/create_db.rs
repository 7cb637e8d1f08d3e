//! Database bootstrap command
//!
//! Connects to the server's `postgres` maintenance database and creates the
//! application database if it does not exist yet.

use anyhow::{Context, Result};
use clap::Parser;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use sqlx::{ConnectOptions, Connection};

use tasklist_server::Environment;

/// Database every PostgreSQL server ships with
const MAINTENANCE_DB: &str = "postgres";

/// Arguments for the create-db command
#[derive(Parser, Debug)]
pub struct CreateDbArgs {
    #[arg(long, env = "PGHOST", default_value = "localhost")]
    pub host: String,

    #[arg(long, env = "PGPORT", default_value = "5432")]
    pub port: u16,

    #[arg(long, env = "PGUSER")]
    pub user: Option<String>,

    #[arg(long, env = "PGPASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Name of the database to create
    #[arg(long, env = "PGDBNAME")]
    pub dbname: String,

    /// Deployment environment ("production" requires TLS)
    #[arg(long = "env", env = "APP_ENV", default_value = "development")]
    pub environment: String,
}

impl CreateDbArgs {
    fn connect_options(&self) -> PgConnectOptions {
        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(MAINTENANCE_DB);
        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        if Environment::new(self.environment.clone()).is_production() {
            options = options.ssl_mode(PgSslMode::Require);
        }
        options
    }
}

/// `CREATE DATABASE` cannot take a bind parameter, so the name is quoted.
fn create_database_sql(name: &str) -> String {
    format!("CREATE DATABASE \"{}\"", name.replace('"', "\"\""))
}

/// Create the target database if absent
pub async fn run_create_db(args: CreateDbArgs) -> Result<()> {
    let mut conn = args
        .connect_options()
        .connect()
        .await
        .with_context(|| format!("Failed to connect to {}:{}", args.host, args.port))?;

    let result = ensure_database(&mut conn, &args.dbname).await;
    conn.close().await.ok();
    result
}

async fn ensure_database(conn: &mut sqlx::PgConnection, name: &str) -> Result<()> {
    let exists = sqlx::query("SELECT 1 FROM pg_database WHERE datname = $1")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await
        .context("Failed to query pg_database")?
        .is_some();

    if exists {
        tracing::info!(database = name, "Database exists");
        return Ok(());
    }

    sqlx::query(&create_database_sql(name))
        .execute(&mut *conn)
        .await
        .with_context(|| format!("Failed to create database {name}"))?;
    tracing::info!(database = name, "Database created");
    Ok(())
}
