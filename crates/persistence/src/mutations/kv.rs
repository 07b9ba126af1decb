// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info};

use crate::diesel_schema::kv_entries;
use crate::error::PersistenceError;

/// Writes raw JSON under a key, replacing any previous value.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `scope` - The `scope` column value
/// * `key` - The `entry_key` column value
/// * `value_json` - Serialized value
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted or the write fails.
pub fn put_entry(
    conn: &mut SqliteConnection,
    scope: &str,
    key: &str,
    value_json: &str,
) -> Result<(), PersistenceError> {
    let updated_at: String = OffsetDateTime::now_utc().format(&Rfc3339)?;

    diesel::replace_into(kv_entries::table)
        .values((
            kv_entries::scope.eq(scope),
            kv_entries::entry_key.eq(key),
            kv_entries::value_json.eq(value_json),
            kv_entries::updated_at.eq(&updated_at),
        ))
        .execute(conn)?;

    debug!(scope, key, updated_at, "Wrote state entry");
    Ok(())
}

/// Removes one key.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_entry(
    conn: &mut SqliteConnection,
    scope: &str,
    key: &str,
) -> Result<usize, PersistenceError> {
    let removed: usize = diesel::delete(
        kv_entries::table
            .filter(kv_entries::scope.eq(scope))
            .filter(kv_entries::entry_key.eq(key)),
    )
    .execute(conn)?;
    Ok(removed)
}

/// Removes every key in a scope.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_scope(conn: &mut SqliteConnection, scope: &str) -> Result<usize, PersistenceError> {
    let removed: usize =
        diesel::delete(kv_entries::table.filter(kv_entries::scope.eq(scope))).execute(conn)?;
    info!(scope, removed, "Cleared state scope");
    Ok(removed)
}
