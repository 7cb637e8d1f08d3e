//! Validation error types

use std::fmt;

/// Client input rejected before any database call.
///
/// The `Display` text is the exact message returned in the `error` field
/// of the 400 response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `title` missing, empty, or not a string
    TitleRequired,

    /// `name` or `email` missing, empty, or not a string
    NameAndEmailRequired,

    /// Path id is not an integer
    InvalidId { raw: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TitleRequired => write!(f, "title is required"),
            Self::NameAndEmailRequired => write!(f, "name and email are required"),
            Self::InvalidId { .. } => write!(f, "Invalid id"),
        }
    }
}

impl std::error::Error for ValidationError {}
