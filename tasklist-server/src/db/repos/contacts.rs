//! Contact repository - insert and list only

use sqlx::PgPool;

use super::DbError;
use crate::db::schema::ContactSql;
use crate::models::{Contact, NewContact};

/// Contact repository
pub struct ContactRepo<'a> {
    pool: &'a PgPool,
    sql: &'a ContactSql,
}

impl<'a> ContactRepo<'a> {
    pub fn new(pool: &'a PgPool, sql: &'a ContactSql) -> Self {
        Self { pool, sql }
    }

    pub async fn list(&self) -> Result<Vec<Contact>, DbError> {
        let contacts = sqlx::query_as::<_, Contact>(&self.sql.list)
            .fetch_all(self.pool)
            .await?;
        Ok(contacts)
    }

    pub async fn create(&self, contact: &NewContact) -> Result<Contact, DbError> {
        let contact = sqlx::query_as::<_, Contact>(&self.sql.insert)
            .bind(contact.name())
            .bind(contact.email())
            .fetch_one(self.pool)
            .await?;
        Ok(contact)
    }
}
