//! Key-value store with connection pooling
//!
//! Every collection lives as one JSON document under a fixed key in a single
//! `kv_store` table. This module is organized by collection:
//! - `expenses` - Expense CRUD
//! - `budgets` - Budget settings
//! - `goals` - Savings goals
//! - `categories` - Category registry

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::error::Result;

mod budgets;
mod categories;
mod expenses;
mod goals;

pub use categories::CategoryUpdate;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Storage keys, one per collection
pub const EXPENSES_KEY: &str = "expense-tracker-expenses";
pub const BUDGETS_KEY: &str = "expense-tracker-budgets";
pub const GOALS_KEY: &str = "expense-tracker-goals";
pub const CATEGORIES_KEY: &str = "expense-tracker-categories";

pub const ALL_KEYS: [&str; 4] = [EXPENSES_KEY, BUDGETS_KEY, GOALS_KEY, CATEGORIES_KEY];

/// Generate a record id: `<epoch millis>-<9 hex chars>`
pub fn generate_id() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let now = Utc::now();
    let millis = now.timestamp_millis();
    let seq = COUNTER.fetch_add(1, Ordering::SeqCst);

    let mut hasher = Sha256::new();
    hasher.update(now.timestamp_nanos_opt().unwrap_or(millis).to_le_bytes());
    hasher.update(seq.to_le_bytes());
    hasher.update(std::process::id().to_le_bytes());
    let digest = hex::encode(hasher.finalize());

    format!("{}-{}", millis, &digest[..9])
}

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file (`:memory:` for in-memory stores)
    db_path: String,
}

impl Database {
    /// Open (or create) a database file
    pub fn new(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(4).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Create an in-memory database (for testing)
    ///
    /// The pool holds a single connection since every `:memory:` connection
    /// is its own database.
    pub fn in_memory() -> Result<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder().max_size(1).build(manager)?;

        let db = Self {
            pool,
            db_path: ":memory:".to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;

            -- One JSON document per collection
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )?;

        info!("Database schema initialized");
        Ok(())
    }

    /// Raw stored text for a key
    pub fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Store raw text under a key, replacing any previous value
    pub fn put_raw(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Decode the JSON document under `key`
    ///
    /// Missing keys and undecodable documents both read as `None`; the latter
    /// is logged so a corrupt blob never blocks the app.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.get_raw(key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "Stored value is not valid, using default");
                Ok(None)
            }
        }
    }

    /// Encode `value` as JSON and store it under `key`
    pub fn put_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.put_raw(key, &raw)
    }

    /// Delete a key; returns whether it existed
    pub fn remove(&self, key: &str) -> Result<bool> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM kv_store WHERE key = ?", params![key])?;
        Ok(removed > 0)
    }

    /// Keys currently holding a value, with their last update time
    pub fn stored_keys(&self) -> Result<Vec<(String, String)>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT key, updated_at FROM kv_store ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(keys)
    }

    /// Remove every collection
    pub fn reset(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM kv_store", [])?;
        info!("Database reset complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
