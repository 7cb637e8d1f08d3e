//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. The pool connects
//! lazily so the server can come up while PostgreSQL is still unreachable.

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::{Executor, PgPool};

use super::repos::DbError;
use super::schema::{SchemaName, Statements};
use crate::config::Environment;

/// Default maximum connections for the pool.
/// Kept low: every request issues a single short statement.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Shared database handle: the pool plus the statements rendered for its
/// schema. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
    schema: SchemaName,
    sql: Statements,
}

impl Database {
    /// Build a lazily-connecting pool for `database_url`.
    ///
    /// Every new physical connection runs `SET search_path` for `schema`.
    /// In production the connection requires TLS.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string cannot be parsed.
    pub fn connect(
        database_url: &str,
        schema: SchemaName,
        env: &Environment,
    ) -> Result<Self, DbError> {
        let mut options = PgConnectOptions::from_str(database_url)?;
        if env.is_production() {
            options = options.ssl_mode(PgSslMode::Require);
        }

        let sql = Statements::new(&schema);
        let search_path = sql.search_path.clone();

        let pool = PgPoolOptions::new()
            .max_connections(DEFAULT_MAX_CONNECTIONS)
            .after_connect(move |conn, _meta| {
                let search_path = search_path.clone();
                Box::pin(async move {
                    conn.execute(search_path.as_str()).await?;
                    Ok(())
                })
            })
            .connect_lazy_with(options);

        Ok(Self { pool, schema, sql })
    }

    /// Idempotently create the schema and both tables.
    pub async fn initialize(&self) -> Result<(), DbError> {
        tracing::info!(schema = %self.schema, "Initializing database schema");

        sqlx::query(&self.sql.create_schema)
            .execute(&self.pool)
            .await?;
        sqlx::query(&self.sql.todos.create_table)
            .execute(&self.pool)
            .await?;
        sqlx::query(&self.sql.contacts.create_table)
            .execute(&self.pool)
            .await?;

        tracing::info!(schema = %self.schema, "Database connected and initialized");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn schema(&self) -> &SchemaName {
        &self.schema
    }

    pub fn statements(&self) -> &Statements {
        &self.sql
    }
}

/// Open the process-wide database handle.
///
/// Never fails: with no URL the API answers 503 for DB-backed routes, and
/// a failed bootstrap still yields a handle so routes fail per request.
pub async fn open(
    database_url: Option<&str>,
    schema: SchemaName,
    env: &Environment,
) -> Option<Database> {
    let Some(url) = database_url.filter(|u| !u.is_empty()) else {
        tracing::warn!("DATABASE_URL is not set. API will respond with 503 for DB-backed routes.");
        return None;
    };

    let db = match Database::connect(url, schema, env) {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error = %e, "Invalid DATABASE_URL, DB-backed routes disabled");
            return None;
        }
    };

    if let Err(e) = db.initialize().await {
        tracing::error!(error = %e, "Failed to initialize database");
    }

    Some(db)
}
