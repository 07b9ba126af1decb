// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Sambhram fest registration.
//!
//! State is stored as flat JSON values under `(scope, key)` pairs, mirroring
//! the layout the browser client keeps in its own storage:
//!
//! | Scope | Key | Value |
//! |---|---|---|
//! | `session:<id>` | `selectedEvent` | cart, list of event ids |
//! | `session:<id>` | `eventRegistrations` | map of event id to team record |
//! | `session:<id>` | `registrationFormData` | personal details form |
//! | `session:<id>` | `checkoutStep` | `1` or `2` |
//! | `device` | `stOrderIds` | list of completed order ids |
//!
//! Each key is written on its own, so a crash between writes can leave the
//! cart and the registrations out of step. Callers re-validate a loaded
//! session before using it. A key holding JSON that no longer decodes is
//! logged and read as its default.

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

use diesel::SqliteConnection;
use sambhram::{CheckoutStep, RegistrationStore, SelectionSet, Session};
use sambhram_domain::PersonalDetails;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, warn};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{DEVICE_SCOPE, Scope, StateKey};
pub use error::PersistenceError;

use data_models::StoredOrderIds;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for session and device state.
pub struct SqlitePersistence {
    conn: SqliteConnection,
}

impl SqlitePersistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
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
            PersistenceError::InvalidPath(path.as_ref().display().to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Raw entries
    // ========================================================================

    /// Reads the raw JSON stored under a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_raw(
        &mut self,
        scope: &Scope,
        key: StateKey,
    ) -> Result<Option<String>, PersistenceError> {
        queries::kv::get_entry(&mut self.conn, &scope.column_value(), key.as_str())
    }

    /// Writes raw JSON under a key.
    ///
    /// The value is stored as given; it is not checked to be valid JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn put_raw(
        &mut self,
        scope: &Scope,
        key: StateKey,
        value_json: &str,
    ) -> Result<(), PersistenceError> {
        mutations::kv::put_entry(&mut self.conn, &scope.column_value(), key.as_str(), value_json)
    }

    /// Number of keys stored under a scope.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_entries(&mut self, scope: &Scope) -> Result<i64, PersistenceError> {
        queries::kv::count_entries(&mut self.conn, &scope.column_value())
    }

    fn put_value<T: Serialize>(
        &mut self,
        scope: &Scope,
        key: StateKey,
        value: &T,
    ) -> Result<(), PersistenceError> {
        let json: String = serde_json::to_string(value)?;
        self.put_raw(scope, key, &json)
    }

    /// Reads and decodes a key, falling back to the default when absent or corrupt.
    fn get_value<T: DeserializeOwned + Default>(
        &mut self,
        scope: &Scope,
        key: StateKey,
    ) -> Result<T, PersistenceError> {
        let Some(json) = self.get_raw(scope, key)? else {
            return Ok(T::default());
        };
        Ok(serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!(%scope, %key, error = %e, "Discarding unreadable stored value");
            T::default()
        }))
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Loads a session, with order history from the device scope.
    ///
    /// Missing keys read as empty. The loaded session has not been
    /// re-validated against the catalog.
    ///
    /// # Arguments
    ///
    /// * `session_id` - The browsing session id
    ///
    /// # Errors
    ///
    /// Returns an error if the session id is invalid or a query fails.
    pub fn load_session(&mut self, session_id: &str) -> Result<Session, PersistenceError> {
        let scope: Scope = Scope::session(session_id)?;

        let selection: SelectionSet = self.get_value(&scope, StateKey::SelectedEvent)?;
        let registrations: RegistrationStore =
            self.get_value(&scope, StateKey::EventRegistrations)?;
        let personal: PersonalDetails = self.get_value(&scope, StateKey::RegistrationFormData)?;
        let step_number: u8 = self.get_value(&scope, StateKey::CheckoutStep)?;
        let step: CheckoutStep = CheckoutStep::from_number(step_number).unwrap_or_default();
        let order_history: Vec<String> = self.order_ids()?;

        Ok(Session {
            selection,
            registrations,
            personal,
            step,
            order_history,
        })
    }

    /// Saves the session-scoped parts of a session.
    ///
    /// Order history is device state and is written by `append_order_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session id is invalid or a write fails.
    /// Keys written before the failure stay written.
    pub fn save_session(
        &mut self,
        session_id: &str,
        session: &Session,
    ) -> Result<(), PersistenceError> {
        let scope: Scope = Scope::session(session_id)?;

        self.put_value(&scope, StateKey::SelectedEvent, &session.selection)?;
        self.put_value(&scope, StateKey::EventRegistrations, &session.registrations)?;
        self.put_value(&scope, StateKey::RegistrationFormData, &session.personal)?;
        self.put_value(&scope, StateKey::CheckoutStep, &session.step.number())?;

        info!(
            session_id,
            selected = session.selection.len(),
            registrations = session.registrations.len(),
            "Saved session"
        );
        Ok(())
    }

    /// Removes every session-scoped key. Device state is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the session id is invalid or the delete fails.
    pub fn clear_session(&mut self, session_id: &str) -> Result<usize, PersistenceError> {
        let scope: Scope = Scope::session(session_id)?;
        mutations::kv::delete_scope(&mut self.conn, &scope.column_value())
    }

    // ========================================================================
    // Device
    // ========================================================================

    /// Completed order ids, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn order_ids(&mut self) -> Result<Vec<String>, PersistenceError> {
        let stored: Option<StoredOrderIds> = self.get_value(&Scope::Device, StateKey::OrderIds)?;
        Ok(stored.map(StoredOrderIds::into_vec).unwrap_or_default())
    }

    /// Appends a completed order id unless it is already recorded.
    ///
    /// # Returns
    ///
    /// The full list after the append.
    ///
    /// # Errors
    ///
    /// Returns an error if the read or write fails.
    pub fn append_order_id(&mut self, order_id: &str) -> Result<Vec<String>, PersistenceError> {
        let mut ids: Vec<String> = self.order_ids()?;
        if ids.iter().any(|id| id == order_id) {
            return Ok(ids);
        }
        ids.push(order_id.to_string());
        self.put_value(&Scope::Device, StateKey::OrderIds, &ids)?;
        info!(order_id, total = ids.len(), "Recorded order id");
        Ok(ids)
    }

    /// Forgets every recorded order id.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn clear_order_ids(&mut self) -> Result<(), PersistenceError> {
        mutations::kv::delete_entry(
            &mut self.conn,
            &Scope::Device.column_value(),
            StateKey::OrderIds.as_str(),
        )?;
        Ok(())
    }
}
