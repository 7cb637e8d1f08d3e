//! Persistence layer - connection pool, schema bootstrap and repositories
//!
//! # Design Principles
//!
//! - One pool per process, built once at startup and injected into the API
//! - One parameterized statement per operation, no transactions
//! - Every table reference is schema-qualified (see [`schema`])
//! - Startup is best-effort: a missing URL disables the store, a failing
//!   bootstrap is logged and left to fail per request

pub mod memory;
pub mod pool;
pub mod repos;
pub mod schema;
pub mod store;

pub use memory::MemoryStore;
pub use pool::{open, Database};
pub use repos::DbError;
pub use schema::{QualifiedTable, SchemaName, Statements, Table};
pub use store::Store;
