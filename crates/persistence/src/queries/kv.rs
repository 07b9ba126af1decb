// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::diesel_schema::kv_entries;
use crate::error::PersistenceError;

/// Reads the raw JSON stored under a key.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `scope` - The `scope` column value
/// * `key` - The `entry_key` column value
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the key is not set.
pub fn get_entry(
    conn: &mut SqliteConnection,
    scope: &str,
    key: &str,
) -> Result<Option<String>, PersistenceError> {
    debug!(scope, key, "Reading state entry");
    let value: Option<String> = kv_entries::table
        .filter(kv_entries::scope.eq(scope))
        .filter(kv_entries::entry_key.eq(key))
        .select(kv_entries::value_json)
        .first::<String>(conn)
        .optional()?;
    Ok(value)
}

/// Counts the keys stored under a scope.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_entries(conn: &mut SqliteConnection, scope: &str) -> Result<i64, PersistenceError> {
    let count: i64 = kv_entries::table
        .filter(kv_entries::scope.eq(scope))
        .count()
        .get_result(conn)?;
    Ok(count)
}
