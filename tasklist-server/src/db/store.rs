//! Storage seam between the API layer and PostgreSQL
//!
//! Handlers only see `dyn Store`, so tests can substitute
//! [`MemoryStore`](super::MemoryStore) or a failing fake.

use async_trait::async_trait;

use super::repos::{ContactRepo, DbError, TodoRepo};
use super::Database;
use crate::models::{Contact, NewContact, Todo, TodoId, TodoTitle};

/// Operations backing the REST API. One statement per call.
#[async_trait]
pub trait Store: Send + Sync {
    /// All todos, newest id first
    async fn list_todos(&self) -> Result<Vec<Todo>, DbError>;

    async fn create_todo(&self, title: &TodoTitle) -> Result<Todo, DbError>;

    /// Returns `DbError::NotFound` if no row has `id`.
    async fn set_todo_completed(&self, id: TodoId, completed: bool) -> Result<Todo, DbError>;

    /// Returns `DbError::NotFound` if no row has `id`.
    async fn delete_todo(&self, id: TodoId) -> Result<(), DbError>;

    /// All contacts, newest id first
    async fn list_contacts(&self) -> Result<Vec<Contact>, DbError>;

    async fn create_contact(&self, contact: &NewContact) -> Result<Contact, DbError>;
}

impl Database {
    fn todos(&self) -> TodoRepo<'_> {
        TodoRepo::new(self.pool(), &self.statements().todos)
    }

    fn contacts(&self) -> ContactRepo<'_> {
        ContactRepo::new(self.pool(), &self.statements().contacts)
    }
}

#[async_trait]
impl Store for Database {
    async fn list_todos(&self) -> Result<Vec<Todo>, DbError> {
        self.todos().list().await
    }

    async fn create_todo(&self, title: &TodoTitle) -> Result<Todo, DbError> {
        self.todos().create(title).await
    }

    async fn set_todo_completed(&self, id: TodoId, completed: bool) -> Result<Todo, DbError> {
        self.todos().set_completed(id, completed).await
    }

    async fn delete_todo(&self, id: TodoId) -> Result<(), DbError> {
        self.todos().delete(id).await
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, DbError> {
        self.contacts().list().await
    }

    async fn create_contact(&self, contact: &NewContact) -> Result<Contact, DbError> {
        self.contacts().create(contact).await
    }
}
