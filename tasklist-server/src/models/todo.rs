//! Todo record and its validated inputs

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;

use super::ValidationError;

/// Todo row as stored and as returned over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub completed: bool,
    /// Null only in tables whose column predates the `NOT NULL` constraint
    pub created_at: Option<DateTime<Utc>>,
}

/// Validated todo title (non-empty string).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    /// Validate a title taken from a JSON body.
    ///
    /// Only presence is checked: whitespace-only titles are accepted, the
    /// frontend is the one that trims.
    ///
    /// # Example
    /// ```
    /// use serde_json::json;
    /// use tasklist_server::models::TodoTitle;
    ///
    /// assert!(TodoTitle::from_json(Some(&json!("buy milk"))).is_ok());
    /// assert!(TodoTitle::from_json(Some(&json!(""))).is_err());
    /// assert!(TodoTitle::from_json(Some(&json!(42))).is_err());
    /// assert!(TodoTitle::from_json(None).is_err());
    /// ```
    pub fn from_json(value: Option<&Value>) -> Result<Self, ValidationError> {
        match value {
            Some(Value::String(s)) if !s.is_empty() => Ok(Self(s.clone())),
            _ => Err(ValidationError::TitleRequired),
        }
    }

    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::TitleRequired);
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TodoTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Numeric todo id taken from the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoId(pub i64);

impl TodoId {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        raw.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ValidationError::InvalidId { raw: raw.to_owned() })
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Loose boolean coercion for the `completed` field.
///
/// Absent, `null`, `false`, `0`, `NaN` and `""` are false. Everything else,
/// including empty arrays and objects, is true.
pub fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
