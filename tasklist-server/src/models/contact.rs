//! Contact record and its validated input

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;

use super::ValidationError;

/// Contact row as stored and as returned over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Contact {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// Null only in tables whose column predates the `NOT NULL` constraint
    pub created_at: Option<DateTime<Utc>>,
}

/// Validated contact payload. Email format is not checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    name: String,
    email: String,
}

impl NewContact {
    /// Both fields must be non-empty strings; either failing yields the
    /// same combined error.
    pub fn from_json(name: Option<&Value>, email: Option<&Value>) -> Result<Self, ValidationError> {
        match (name, email) {
            (Some(Value::String(name)), Some(Value::String(email)))
                if !name.is_empty() && !email.is_empty() =>
            {
                Ok(Self {
                    name: name.clone(),
                    email: email.clone(),
                })
            }
            _ => Err(ValidationError::NameAndEmailRequired),
        }
    }

    pub fn new(name: &str, email: &str) -> Result<Self, ValidationError> {
        if name.is_empty() || email.is_empty() {
            return Err(ValidationError::NameAndEmailRequired);
        }
        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_any_non_empty_strings() {
        let contact =
            NewContact::from_json(Some(&json!("Ada")), Some(&json!("not-an-email"))).unwrap();
        assert_eq!(contact.name(), "Ada");
        assert_eq!(contact.email(), "not-an-email");
    }

    #[test]
    fn rejects_missing_either_field() {
        let err = NewContact::from_json(Some(&json!("Ada")), None).unwrap_err();
        assert_eq!(err, ValidationError::NameAndEmailRequired);

        let err = NewContact::from_json(None, Some(&json!("ada@example.com"))).unwrap_err();
        assert_eq!(err, ValidationError::NameAndEmailRequired);
    }

    #[test]
    fn rejects_empty_or_non_string() {
        assert!(NewContact::from_json(Some(&json!("")), Some(&json!("a@b.c"))).is_err());
        assert!(NewContact::from_json(Some(&json!("Ada")), Some(&json!(7))).is_err());
        assert!(NewContact::new("Ada", "").is_err());
    }
}
