//! In-memory [`Store`] with the same observable behaviour as PostgreSQL:
//! ids start at 1 and only grow, lists come back newest id first, and
//! mutations on a missing id report `NotFound`.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::repos::DbError;
use super::Store;
use crate::models::{Contact, NewContact, Todo, TodoId, TodoTitle};

#[derive(Debug, Default)]
struct Tables {
    todos: Vec<Todo>,
    contacts: Vec<Contact>,
    next_todo_id: i32,
    next_contact_id: i32,
}

/// Process-local store, mainly for tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: TodoId) -> DbError {
    DbError::NotFound {
        resource: "todo",
        id: id.to_string(),
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_todos(&self) -> Result<Vec<Todo>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.todos.iter().rev().cloned().collect())
    }

    async fn create_todo(&self, title: &TodoTitle) -> Result<Todo, DbError> {
        let mut tables = self.tables.write().await;
        tables.next_todo_id += 1;
        let todo = Todo {
            id: tables.next_todo_id,
            title: title.as_str().to_owned(),
            completed: false,
            created_at: Some(Utc::now()),
        };
        tables.todos.push(todo.clone());
        Ok(todo)
    }

    async fn set_todo_completed(&self, id: TodoId, completed: bool) -> Result<Todo, DbError> {
        let mut tables = self.tables.write().await;
        let todo = tables
            .todos
            .iter_mut()
            .find(|t| i64::from(t.id) == id.0)
            .ok_or_else(|| not_found(id))?;
        todo.completed = completed;
        Ok(todo.clone())
    }

    async fn delete_todo(&self, id: TodoId) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        let before = tables.todos.len();
        tables.todos.retain(|t| i64::from(t.id) != id.0);
        if tables.todos.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.contacts.iter().rev().cloned().collect())
    }

    async fn create_contact(&self, contact: &NewContact) -> Result<Contact, DbError> {
        let mut tables = self.tables.write().await;
        tables.next_contact_id += 1;
        let contact = Contact {
            id: tables.next_contact_id,
            name: contact.name().to_owned(),
            email: contact.email().to_owned(),
            created_at: Some(Utc::now()),
        };
        tables.contacts.push(contact.clone());
        Ok(contact)
    }
}
