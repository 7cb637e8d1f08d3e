//! Schema-qualified identifiers and the statement catalogue
//!
//! Every statement is rendered once from a [`SchemaName`] when the
//! database handle is built. Nothing else in the crate formats SQL.

use std::fmt;

use crate::config::ConfigError;

/// Schema used when `PG_SCHEMA` is not set
pub const DEFAULT_SCHEMA: &str = "public";

/// Validated PostgreSQL schema name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaName(String);

impl SchemaName {
    pub fn new(name: &str) -> Result<Self, ConfigError> {
        if name.is_empty() {
            return Err(ConfigError::EmptySchema);
        }
        Ok(Self(name.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Double-quoted identifier with embedded quotes doubled.
    ///
    /// # Example
    /// ```
    /// use tasklist_server::db::SchemaName;
    ///
    /// assert_eq!(SchemaName::new("app").unwrap().quoted(), r#""app""#);
    /// assert_eq!(SchemaName::new(r#"we"ird"#).unwrap().quoted(), r#""we""ird""#);
    /// ```
    pub fn quoted(&self) -> String {
        quote_ident(&self.0)
    }

    /// Resolve a logical table to its qualified identifier.
    pub fn table(&self, table: Table) -> QualifiedTable {
        QualifiedTable(format!("{}.{}", self.quoted(), quote_ident(table.name())))
    }
}

impl Default for SchemaName {
    fn default() -> Self {
        Self(DEFAULT_SCHEMA.to_owned())
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Logical tables owned by the persistence layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Todos,
    Contacts,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Self::Todos => "todos",
            Self::Contacts => "contacts",
        }
    }
}

/// `"schema"."table"`, safe to splice into SQL text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedTable(String);

impl QualifiedTable {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QualifiedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Columns read back from `todos`.
///
/// `created_at` is cast so tables created with a plain `TIMESTAMP` column
/// decode the same as `TIMESTAMPTZ` ones.
const TODO_COLUMNS: &str = "id, title, completed, created_at::timestamptz AS created_at";

/// Columns read back from `contacts`
const CONTACT_COLUMNS: &str = "id, name, email, created_at::timestamptz AS created_at";

/// Statements for the `todos` table
#[derive(Debug, Clone)]
pub struct TodoSql {
    pub create_table: String,
    pub list: String,
    pub insert: String,
    pub set_completed: String,
    pub delete: String,
}

/// Statements for the `contacts` table
#[derive(Debug, Clone)]
pub struct ContactSql {
    pub create_table: String,
    pub list: String,
    pub insert: String,
}

/// All statements issued against one schema
#[derive(Debug, Clone)]
pub struct Statements {
    pub create_schema: String,
    pub search_path: String,
    pub todos: TodoSql,
    pub contacts: ContactSql,
}

impl Statements {
    pub fn new(schema: &SchemaName) -> Self {
        let todos = schema.table(Table::Todos);
        let contacts = schema.table(Table::Contacts);

        Self {
            create_schema: format!("CREATE SCHEMA IF NOT EXISTS {}", schema.quoted()),
            search_path: format!("SET search_path TO {}", schema.quoted()),
            todos: TodoSql {
                create_table: format!(
                    r#"
                    CREATE TABLE IF NOT EXISTS {todos} (
                        id SERIAL PRIMARY KEY,
                        title TEXT NOT NULL,
                        completed BOOLEAN NOT NULL DEFAULT FALSE,
                        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                    )
                    "#
                ),
                list: format!("SELECT {TODO_COLUMNS} FROM {todos} ORDER BY id DESC"),
                insert: format!(
                    "INSERT INTO {todos} (title) VALUES ($1) RETURNING {TODO_COLUMNS}"
                ),
                set_completed: format!(
                    "UPDATE {todos} SET completed = $1 WHERE id = $2 \
                     RETURNING {TODO_COLUMNS}"
                ),
                delete: format!("DELETE FROM {todos} WHERE id = $1"),
            },
            contacts: ContactSql {
                create_table: format!(
                    r#"
                    CREATE TABLE IF NOT EXISTS {contacts} (
                        id SERIAL PRIMARY KEY,
                        name TEXT NOT NULL,
                        email TEXT NOT NULL,
                        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                    )
                    "#
                ),
                list: format!("SELECT {CONTACT_COLUMNS} FROM {contacts} ORDER BY id DESC"),
                insert: format!(
                    "INSERT INTO {contacts} (name, email) VALUES ($1, $2) \
                     RETURNING {CONTACT_COLUMNS}"
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schema_is_public() {
        let schema = SchemaName::default();
        assert_eq!(schema.as_str(), "public");
        assert_eq!(schema.table(Table::Todos).as_str(), r#""public"."todos""#);
        assert_eq!(
            schema.table(Table::Contacts).to_string(),
            r#""public"."contacts""#
        );
    }

    #[test]
    fn rejects_empty_schema() {
        assert!(matches!(SchemaName::new(""), Err(ConfigError::EmptySchema)));
    }

    #[test]
    fn quotes_are_escaped() {
        let schema = SchemaName::new(r#"x"; DROP TABLE todos; --"#).unwrap();
        assert_eq!(
            schema.table(Table::Todos).as_str(),
            r#""x""; DROP TABLE todos; --"."todos""#
        );
    }

    #[test]
    fn every_statement_is_qualified() {
        let schema = SchemaName::new("tenant_a").unwrap();
        let sql = Statements::new(&schema);

        assert_eq!(sql.create_schema, r#"CREATE SCHEMA IF NOT EXISTS "tenant_a""#);
        assert_eq!(sql.search_path, r#"SET search_path TO "tenant_a""#);

        for stmt in [
            &sql.todos.create_table,
            &sql.todos.list,
            &sql.todos.insert,
            &sql.todos.set_completed,
            &sql.todos.delete,
        ] {
            assert!(stmt.contains(r#""tenant_a"."todos""#), "{stmt}");
        }
        for stmt in [&sql.contacts.create_table, &sql.contacts.list, &sql.contacts.insert] {
            assert!(stmt.contains(r#""tenant_a"."contacts""#), "{stmt}");
        }
    }

    #[test]
    fn reads_cast_created_at() {
        let sql = Statements::new(&SchemaName::default());
        for stmt in [
            &sql.todos.list,
            &sql.todos.insert,
            &sql.todos.set_completed,
            &sql.contacts.list,
            &sql.contacts.insert,
        ] {
            assert!(stmt.contains("created_at::timestamptz AS created_at"), "{stmt}");
        }
    }

    #[test]
    fn lists_order_by_descending_id() {
        let sql = Statements::new(&SchemaName::default());
        assert!(sql.todos.list.ends_with("ORDER BY id DESC"));
        assert!(sql.contacts.list.ends_with("ORDER BY id DESC"));
    }
}
