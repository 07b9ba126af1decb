// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::Deserialize;
use std::fmt;

use crate::error::PersistenceError;

/// Scope value for state that outlives a browsing session.
pub const DEVICE_SCOPE: &str = "device";

/// Prefix of session scope values.
const SESSION_SCOPE_PREFIX: &str = "session:";

/// The owner of a group of stored keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// One browsing session.
    Session(String),
    /// The device, shared by every session.
    Device,
}

impl Scope {
    /// A session scope.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or contains whitespace or `:`.
    pub fn session(id: &str) -> Result<Self, PersistenceError> {
        if id.is_empty() || id.chars().any(|c| c.is_whitespace() || c == ':') {
            return Err(PersistenceError::InvalidSessionId(id.to_string()));
        }
        Ok(Self::Session(id.to_string()))
    }

    /// The value stored in the `scope` column.
    #[must_use]
    pub fn column_value(&self) -> String {
        match self {
            Self::Session(id) => format!("{SESSION_SCOPE_PREFIX}{id}"),
            Self::Device => DEVICE_SCOPE.to_string(),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_value())
    }
}

/// The stored keys, named as the browser client names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKey {
    /// Cart contents, session scope.
    SelectedEvent,
    /// Team registrations, session scope.
    EventRegistrations,
    /// Personal details form, session scope.
    RegistrationFormData,
    /// Checkout screen number, session scope.
    CheckoutStep,
    /// Completed order ids, device scope.
    OrderIds,
}

impl StateKey {
    /// Keys written by `save_session`.
    pub const SESSION_KEYS: [Self; 4] = [
        Self::SelectedEvent,
        Self::EventRegistrations,
        Self::RegistrationFormData,
        Self::CheckoutStep,
    ];

    /// The value stored in the `entry_key` column.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SelectedEvent => "selectedEvent",
            Self::EventRegistrations => "eventRegistrations",
            Self::RegistrationFormData => "registrationFormData",
            Self::CheckoutStep => "checkoutStep",
            Self::OrderIds => "stOrderIds",
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored order ids.
///
/// Older clients wrote a bare string instead of a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum StoredOrderIds {
    Many(Vec<String>),
    One(String),
}

impl StoredOrderIds {
    pub(crate) fn into_vec(self) -> Vec<String> {
        match self {
            Self::Many(ids) => ids,
            Self::One(id) if id.is_empty() => Vec::new(),
            Self::One(id) => vec![id],
        }
    }
}
