// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Opening and preparing the `SQLite` store.

use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Schema for the `kv_entries` table.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How long a writer waits on a locked file database, in milliseconds.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Applies any migrations the connection has not seen yet.
///
/// # Errors
///
/// Returns `PersistenceError::MigrationFailed` if a migration fails.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    info!(applied = applied.len(), "Applied state store migrations");
    Ok(())
}

/// Opens a connection and brings the schema up to date.
///
/// # Arguments
///
/// * `database_url` - A file path or an `SQLite` URI such as
///   `file:name?mode=memory&cache=shared`
///
/// # Errors
///
/// Returns an error if the database cannot be opened or migrated.
pub fn initialize_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    debug!(database_url, "Opening state store");

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;
    run_migrations(&mut conn)?;

    Ok(conn)
}

/// Prepares a file database for use by several server processes.
///
/// Switches the journal to WAL and sets a busy timeout so a second writer
/// waits instead of failing on a locked file.
///
/// # Errors
///
/// Returns an error if a PRAGMA statement fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    // Diesel has no PRAGMA DSL.
    diesel::sql_query("PRAGMA journal_mode = WAL").execute(conn)?;
    diesel::sql_query(format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}")).execute(conn)?;
    Ok(())
}
