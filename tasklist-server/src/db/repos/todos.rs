//! Todo repository
//!
//! - list: newest id first
//! - set_completed / delete: zero affected rows is `NotFound`

use sqlx::PgPool;

use super::DbError;
use crate::db::schema::TodoSql;
use crate::models::{Todo, TodoId, TodoTitle};

/// Todo repository
pub struct TodoRepo<'a> {
    pool: &'a PgPool,
    sql: &'a TodoSql,
}

impl<'a> TodoRepo<'a> {
    pub fn new(pool: &'a PgPool, sql: &'a TodoSql) -> Self {
        Self { pool, sql }
    }

    pub async fn list(&self) -> Result<Vec<Todo>, DbError> {
        let todos = sqlx::query_as::<_, Todo>(&self.sql.list)
            .fetch_all(self.pool)
            .await?;
        Ok(todos)
    }

    /// Insert a todo, returning the full row (id and created_at come from
    /// the database defaults).
    pub async fn create(&self, title: &TodoTitle) -> Result<Todo, DbError> {
        let todo = sqlx::query_as::<_, Todo>(&self.sql.insert)
            .bind(title.as_str())
            .fetch_one(self.pool)
            .await?;
        Ok(todo)
    }

    pub async fn set_completed(&self, id: TodoId, completed: bool) -> Result<Todo, DbError> {
        sqlx::query_as::<_, Todo>(&self.sql.set_completed)
            .bind(completed)
            .bind(id.0)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "todo",
                id: id.to_string(),
            })
    }

    /// Hard delete. Not idempotent: a second delete reports `NotFound`.
    pub async fn delete(&self, id: TodoId) -> Result<(), DbError> {
        let result = sqlx::query(&self.sql.delete)
            .bind(id.0)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "todo",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
