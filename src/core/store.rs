//! Customer storage backed by SQLite
//!
//! This module provides the CustomerStore component that owns the single
//! `customers` table. The store creates the schema on startup, inserts
//! validated customers, and lists them for the home page and the export.
//!
//! # Uniqueness
//!
//! `email` carries a UNIQUE constraint. A conflicting insert fails with
//! `ImportError::DuplicateEmail` and never overwrites the existing row.
//!
//! # Transactions
//!
//! An upload runs inside an [`ImportBatch`]: one database transaction that
//! commits once at the end. Dropping the batch without committing (header
//! error, malformed CSV, storage failure) rolls every insert back, and the
//! pooled connection is returned on every exit path.

use crate::core::traits::CustomerSink;
use crate::types::{CustomerId, CustomerRecord, ImportError, NewCustomer, CREATED_AT_FORMAT};
use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS customers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    age INTEGER NOT NULL,
    created_at TEXT NOT NULL
)";

/// Storage settings, read once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite database file; created (with its parent directory) if missing
    pub db_path: PathBuf,

    /// Upper bound on pooled connections
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            db_path: PathBuf::from("/data/app.db"),
            max_connections: 5,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    name: String,
    email: String,
    age: i64,
    created_at: String,
}

impl TryFrom<CustomerRow> for CustomerRecord {
    type Error = ImportError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|e| {
                ImportError::storage(format!(
                    "customer {} has unreadable created_at '{}': {}",
                    row.id, row.created_at, e
                ))
            })?
            .with_timezone(&Utc);

        Ok(CustomerRecord {
            id: row.id,
            name: row.name,
            email: row.email,
            age: row.age,
            created_at,
        })
    }
}

/// Handle to the customers table
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct CustomerStore {
    pool: SqlitePool,
}

impl CustomerStore {
    /// Open (or create) the database described by `config` and ensure the schema
    pub async fn connect(config: &StoreConfig) -> Result<Self, ImportError> {
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(&config.db_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .connect_with(options)
            .await?;

        info!(db_path = %config.db_path.display(), "customer store opened");

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Private in-memory database, for tests and benchmarks
    ///
    /// Pinned to a single connection that never expires, since each SQLite
    /// in-memory connection is its own database.
    pub async fn in_memory() -> Result<Self, ImportError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Create the customers table if it does not exist; safe to call repeatedly
    pub async fn ensure_schema(&self) -> Result<(), ImportError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    /// Start a transactional import; see [`ImportBatch`]
    pub async fn begin_import(&self) -> Result<ImportBatch, ImportError> {
        let tx = self.pool.begin().await?;
        Ok(ImportBatch { tx })
    }

    /// Up to `limit` most recently inserted records, newest first
    pub async fn list_latest(&self, limit: u32) -> Result<Vec<CustomerRecord>, ImportError> {
        let rows: Vec<CustomerRow> = sqlx::query_as(
            "SELECT id, name, email, age, created_at \
             FROM customers ORDER BY id DESC LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CustomerRecord::try_from).collect()
    }

    /// Every record, oldest first
    pub async fn list_all(&self) -> Result<Vec<CustomerRecord>, ImportError> {
        let rows: Vec<CustomerRow> = sqlx::query_as(
            "SELECT id, name, email, age, created_at FROM customers ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CustomerRecord::try_from).collect()
    }

    /// Close the pool, waiting for checked-out connections to come back
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Each call autocommits on its own
#[async_trait]
impl CustomerSink for CustomerStore {
    async fn insert(&mut self, customer: &NewCustomer) -> Result<CustomerId, ImportError> {
        insert_customer(&self.pool, customer).await
    }
}

/// One upload's worth of inserts inside a single transaction
///
/// Nothing becomes visible to other connections until [`ImportBatch::commit`].
/// Dropping the batch rolls back.
pub struct ImportBatch {
    tx: Transaction<'static, Sqlite>,
}

impl ImportBatch {
    /// Make every insert of this batch durable
    pub async fn commit(self) -> Result<(), ImportError> {
        self.tx.commit().await?;
        Ok(())
    }

    /// Discard every insert of this batch
    pub async fn rollback(self) -> Result<(), ImportError> {
        self.tx.rollback().await?;
        Ok(())
    }
}

#[async_trait]
impl CustomerSink for ImportBatch {
    async fn insert(&mut self, customer: &NewCustomer) -> Result<CustomerId, ImportError> {
        insert_customer(&mut *self.tx, customer).await
    }
}

async fn insert_customer<'e, E>(executor: E, customer: &NewCustomer) -> Result<CustomerId, ImportError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let created_at = Utc::now().trunc_subsecs(0).format(CREATED_AT_FORMAT).to_string();

    let result = sqlx::query(
        "INSERT INTO customers (name, email, age, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(&customer.name)
    .bind(&customer.email)
    .bind(customer.age)
    .bind(&created_at)
    .execute(executor)
    .await
    .map_err(|e| match ImportError::from(e) {
        ImportError::DuplicateEmail { .. } => ImportError::duplicate_email(&customer.email),
        other => other,
    })?;

    let id = result.last_insert_rowid();
    debug!(id, email = %customer.email, "customer inserted");
    Ok(id)
}
