//! Repository implementations for database access
//!
//! Each repository borrows the pool and the statements rendered for the
//! active schema, and issues exactly one statement per method.

pub mod contacts;
pub mod todos;

pub use contacts::ContactRepo;
pub use todos::TodoRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}
