//! The persistence gateway: one SQLite connection, opened at startup and closed at exit.
//!
//! Every statement goes through `query` or `execute` with positional `?N` placeholders.
//! User input is never spliced into SQL text.

use rusqlite::{Connection, Params, Row};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub type Result<T> = std::result::Result<T, GatewayError>;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS departments (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS roles (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    title         TEXT    NOT NULL,
    salary        REAL    NOT NULL,
    department_id INTEGER NOT NULL REFERENCES departments(id)
);

CREATE TABLE IF NOT EXISTS employees (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT    NOT NULL,
    last_name  TEXT    NOT NULL,
    role_id    INTEGER NOT NULL REFERENCES roles(id),
    manager_id INTEGER          REFERENCES employees(id)
);
";

pub struct Gateway {
    conn: Connection,
}

impl Gateway {
    /// Open (or create) the database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening database");

        let conn = Connection::open(path).map_err(GatewayError::Open)?;
        Self::configure(conn)
    }

    /// Open a private in-memory database. Used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(GatewayError::Open)?;
        Self::configure(conn)
    }

    // SQLite leaves foreign keys unenforced unless asked, per connection.
    fn configure(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(GatewayError::Open)?;

        Ok(Gateway { conn })
    }

    /// Create the three tables if they are missing. Existing tables are left alone.
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Run a read statement and map every returned row with `map`.
    pub fn query<T, P, F>(&self, sql: &str, params: P, map: F) -> Result<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, map)?
            .collect::<rusqlite::Result<Vec<T>>>()?;

        debug!(sql, rows = rows.len(), "query");
        Ok(rows)
    }

    /// Run a write statement, returning the number of affected rows.
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> Result<usize> {
        let affected = self.conn.execute(sql, params)?;

        debug!(sql, affected, "execute");
        Ok(affected)
    }

    /// Identifier generated by the most recent successful insert on this connection.
    pub fn last_insert_id(&self) -> i64 {
        self.conn.last_insert_rowid()
    }

    pub fn close(self) -> Result<()> {
        debug!("closing database");
        self.conn.close().map_err(|(_, e)| GatewayError::Close(e))
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("could not open database: {0}")]
    Open(#[source] rusqlite::Error),
    #[error("database error: {0}")]
    Statement(#[from] rusqlite::Error),
    #[error("could not close database: {0}")]
    Close(#[source] rusqlite::Error),
}
