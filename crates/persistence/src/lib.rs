// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Append-only persistence for the Sales Dash service.
//!
//! This crate owns the durable `sales` table. Its contract is deliberately
//! narrow: normalized batches are appended atomically, and consumers reload
//! the full record set on every query. There are no updates, deletes, or
//! incremental indexes, and the schema is fixed across all uploads.
//!
//! Built on Diesel with the `SQLite` backend. `SQLite` needs no external
//! infrastructure, which fits the single-user deployment model; tests run
//! against isolated in-memory databases.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use diesel::SqliteConnection;
use sales_dash_domain::SalesRecord;
use tracing::{debug, info};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{NewSaleRow, SaleRow};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique sequential
/// ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// The append store for normalized sales records.
///
/// Owns the database connection for its lifetime: initialized once at
/// process start and released at shutdown. Callers pass it by reference
/// into the ingestion and aggregation call sites; it is never an ambient
/// singleton.
pub struct SqliteStore {
    conn: SqliteConnection,
}

impl SqliteStore {
    /// Creates a store backed by an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-cache database name via an atomic
    /// counter, so concurrently running tests never collide.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("sales_dash_mem_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        Ok(Self { conn })
    }

    /// Creates a store backed by a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // WAL gives better read concurrency for file-based databases.
        backend::sqlite::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }

    /// Appends every record of a normalized batch to the store.
    ///
    /// The append is transactional: it happens entirely or not at all.
    /// Existing rows are never reordered or deduplicated.
    ///
    /// # Returns
    ///
    /// The number of records appended.
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be converted to its storage row
    /// or the insert fails; in either case nothing is persisted.
    pub fn append_batch(&mut self, records: &[SalesRecord]) -> Result<usize, PersistenceError> {
        let rows: Vec<NewSaleRow> = records
            .iter()
            .map(NewSaleRow::from_record)
            .collect::<Result<Vec<NewSaleRow>, PersistenceError>>()?;

        let appended: usize = mutations::append_sales(&mut self.conn, &rows)?;
        info!(appended, "Appended sales batch");
        Ok(appended)
    }

    /// Loads the full persisted record set, in insertion order.
    ///
    /// A store that has never been written to yields an empty vector, not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried or a persisted row
    /// violates the record invariants.
    pub fn load_all(&mut self) -> Result<Vec<SalesRecord>, PersistenceError> {
        let rows: Vec<SaleRow> = queries::load_all_sales(&mut self.conn)?;
        debug!(rows = rows.len(), "Loaded sales table");
        rows.into_iter().map(SaleRow::into_record).collect()
    }

    /// Counts the persisted records.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn count(&mut self) -> Result<usize, PersistenceError> {
        queries::count_sales(&mut self.conn)
    }
}
