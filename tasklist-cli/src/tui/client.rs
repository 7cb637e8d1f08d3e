//! HTTP client for the tasklist API

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Default API base when `--api-url` is not given
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Client-side copy of a todo
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TodoItem {
    pub id: i32,
    pub title: String,
    pub completed: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Client-side copy of a contact
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContactItem {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// `GET /health` payload
#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub ok: bool,
    pub env: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// API call failure
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Connection, timeout or undecodable body
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx answer; `message` is the body's `error` field when present
    #[error("server returned {status}")]
    Status { status: u16, message: Option<String> },
}

impl ClientError {
    /// The server's own error text, if it sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            Self::Transport(_) => None,
        }
    }
}

/// Operations the frontend performs against the API
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn health(&self) -> Result<Health, ClientError>;
    async fn list_todos(&self) -> Result<Vec<TodoItem>, ClientError>;
    async fn create_todo(&self, title: &str) -> Result<TodoItem, ClientError>;
    async fn set_completed(&self, id: i32, completed: bool) -> Result<TodoItem, ClientError>;
    async fn delete_todo(&self, id: i32) -> Result<(), ClientError>;
    async fn list_contacts(&self) -> Result<Vec<ContactItem>, ClientError>;
    async fn create_contact(&self, name: &str, email: &str) -> Result<ContactItem, ClientError>;
}

/// reqwest-backed [`TaskApi`]
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct CreateTodo<'a> {
    title: &'a str,
}

#[derive(Serialize)]
struct SetCompleted {
    completed: bool,
}

#[derive(Serialize)]
struct CreateContact<'a> {
    name: &'a str,
    email: &'a str,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn non-2xx answers into `ClientError::Status`
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error);
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, ClientError> {
        let response = Self::check(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl TaskApi for HttpApi {
    async fn health(&self) -> Result<Health, ClientError> {
        Self::json(self.client.get(self.url("/health"))).await
    }

    async fn list_todos(&self) -> Result<Vec<TodoItem>, ClientError> {
        Self::json(self.client.get(self.url("/todos"))).await
    }

    async fn create_todo(&self, title: &str) -> Result<TodoItem, ClientError> {
        Self::json(self.client.post(self.url("/todos")).json(&CreateTodo { title })).await
    }

    async fn set_completed(&self, id: i32, completed: bool) -> Result<TodoItem, ClientError> {
        let request = self
            .client
            .patch(self.url(&format!("/todos/{id}")))
            .json(&SetCompleted { completed });
        Self::json(request).await
    }

    async fn delete_todo(&self, id: i32) -> Result<(), ClientError> {
        let request = self.client.delete(self.url(&format!("/todos/{id}")));
        Self::check(request.send().await?).await?;
        Ok(())
    }

    async fn list_contacts(&self) -> Result<Vec<ContactItem>, ClientError> {
        Self::json(self.client.get(self.url("/contacts"))).await
    }

    async fn create_contact(&self, name: &str, email: &str) -> Result<ContactItem, ClientError> {
        let request = self
            .client
            .post(self.url("/contacts"))
            .json(&CreateContact { name, email });
        Self::json(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use tasklist_server::db::{MemoryStore, Store};
    use tasklist_server::{build_router, AppState, Environment, ServerConfig};

    /// Serve the real router on an ephemeral port
    async fn spawn_server(store: Option<Arc<dyn Store>>) -> HttpApi {
        let config = ServerConfig::default();
        let app = build_router(AppState::new(store, Environment::default()), &config);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        HttpApi::new(format!("http://{addr}/api/"))
    }

    #[test]
    fn base_url_is_normalized() {
        let api = HttpApi::new("http://localhost:8080/api/");
        assert_eq!(api.base_url(), "http://localhost:8080/api");
        assert_eq!(api.url("/todos"), "http://localhost:8080/api/todos");
    }

    #[test]
    fn undated_rows_decode() {
        let todo: TodoItem = serde_json::from_str(
            r#"{"id": 1, "title": "old", "completed": false, "created_at": null}"#,
        )
        .unwrap();
        assert!(todo.created_at.is_none());

        let contact: ContactItem = serde_json::from_str(
            r#"{"id": 1, "name": "Ada", "email": "a@b.c", "created_at": "2024-05-01T10:00:00.123456Z"}"#,
        )
        .unwrap();
        assert!(contact.created_at.is_some());
    }

    #[tokio::test]
    async fn round_trips_against_live_server() {
        let api = spawn_server(Some(Arc::new(MemoryStore::new()))).await;

        let health = api.health().await.unwrap();
        assert!(health.ok);
        assert_eq!(health.env, "development");

        let todo = api.create_todo("buy milk").await.unwrap();
        assert_eq!(todo.id, 1);
        assert!(!todo.completed);

        let todo = api.set_completed(todo.id, true).await.unwrap();
        assert!(todo.completed);

        api.delete_todo(todo.id).await.unwrap();
        assert!(api.list_todos().await.unwrap().is_empty());

        let err = api.delete_todo(todo.id).await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 404, .. }));
        assert_eq!(err.server_message(), Some("Not found"));

        let contact = api.create_contact("Ada", "ada@example.com").await.unwrap();
        assert_eq!(api.list_contacts().await.unwrap(), vec![contact]);
    }

    #[tokio::test]
    async fn surfaces_server_error_text() {
        let api = spawn_server(None).await;

        let err = api.list_todos().await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 503, .. }));
        assert_eq!(
            err.server_message(),
            Some("Database not configured. Set DATABASE_URL.")
        );
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        // Nothing listens on port 1
        let api = HttpApi::new("http://127.0.0.1:1/api");
        let err = api.health().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert!(err.server_message().is_none());
    }
}
