// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised while storing or restoring session and device state.
///
/// A stored value that no longer decodes is not an error; it is logged and
/// read as its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The database file could not be opened.
    ConnectionFailed(String),
    /// Embedded migrations could not be applied.
    MigrationFailed(String),
    /// A read, write or PRAGMA statement failed.
    Database(String),
    /// A value could not be encoded for storage.
    Encoding(String),
    /// The database path is not valid UTF-8.
    InvalidPath(String),
    /// A session id was empty or contained characters not allowed in a scope.
    InvalidSessionId(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionFailed(msg) => write!(f, "Could not open database: {msg}"),
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::Database(msg) => write!(f, "Database error: {msg}"),
            Self::Encoding(msg) => write!(f, "Could not encode stored value: {msg}"),
            Self::InvalidPath(path) => write!(f, "Invalid database path: '{path}'"),
            Self::InvalidSessionId(id) => write!(f, "Invalid session id: '{id}'"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::ConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encoding(err.to_string())
    }
}

impl From<time::error::Format> for PersistenceError {
    fn from(err: time::error::Format) -> Self {
        Self::Encoding(err.to_string())
    }
}
