//! API error types with IntoResponse
//!
//! Errors are converted to `{"error": "<message>"}` with the matching
//! status code. Database failures are logged, never echoed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// Body text for every DB-backed route when no database is configured
pub const DATABASE_NOT_CONFIGURED: &str = "Database not configured. Set DATABASE_URL.";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// No database configured (503)
    ServiceUnavailable,

    /// Validation failed (400)
    Validation(ValidationError),

    /// Mutation target absent (404)
    NotFound { resource: &'static str, id: String },

    /// Statement failed (500, logged). `message` names the operation.
    Database {
        message: &'static str,
        source: DbError,
    },
}

impl ApiError {
    /// Map a store error for the operation described by `message`.
    ///
    /// ```ignore
    /// store.list_todos().await.map_err(ApiError::db("Failed to fetch todos"))?;
    /// ```
    pub fn db(message: &'static str) -> impl FnOnce(DbError) -> Self {
        move |source| match source {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            source => Self::Database { message, source },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::ServiceUnavailable => DATABASE_NOT_CONFIGURED.to_owned(),
            Self::Validation(e) => e.to_string(),
            Self::NotFound { resource, id } => {
                tracing::debug!(resource, id = %id, "Mutation target not found");
                "Not found".to_owned()
            }
            Self::Database { message, source } => {
                // Log the actual error, return the generic message
                tracing::error!(error = %source, "{}", message);
                (*message).to_owned()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn service_unavailable_is_503_with_literal() {
        let response = ApiError::ServiceUnavailable.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Database not configured. Set DATABASE_URL." })
        );
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let response = ApiError::Validation(ValidationError::TitleRequired).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "title is required" }));
    }

    #[tokio::test]
    async fn not_found_maps_from_db_error() {
        let err = ApiError::db("Failed to update todo")(DbError::NotFound {
            resource: "todo",
            id: "9".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "error": "Not found" }));
    }

    #[tokio::test]
    async fn database_error_hides_details() {
        let err = ApiError::db("Failed to fetch todos")(DbError::Sqlx(sqlx::Error::Protocol(
            "relation \"todos\" does not exist".into(),
        )));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({ "error": "Failed to fetch todos" }));
    }
}
