// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::EventId;
use crate::validation::RegistrationError;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Category name is not one of the known listing categories.
    InvalidCategory(String),
    /// The catalog document could not be read.
    InvalidCatalog(String),
    /// Two catalog records share an identifier.
    DuplicateEvent(EventId),
    /// Event does not exist in the catalog.
    EventNotFound(EventId),
    /// Event is closed for registration.
    EventClosed(EventId),
    /// A team registration failed validation.
    RegistrationRejected {
        /// The event the registration belongs to.
        event_id: EventId,
        /// The first rule that failed.
        reason: RegistrationError,
    },
    /// Required personal fields are empty.
    MissingFields {
        /// Names of the empty fields, in form order.
        fields: Vec<&'static str>,
    },
    /// Email address does not look like an address.
    InvalidEmail(String),
    /// Mobile number is not exactly ten digits.
    InvalidMobile(String),
    /// No events are selected.
    EmptySelection,
    /// Payable amount is zero or negative.
    InvalidAmount(i64),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCategory(name) => write!(f, "Unknown event category '{name}'"),
            Self::InvalidCatalog(msg) => write!(f, "Invalid event catalog: {msg}"),
            Self::DuplicateEvent(id) => write!(f, "Event '{id}' appears more than once"),
            Self::EventNotFound(id) => write!(f, "Event '{id}' not found"),
            Self::EventClosed(_) => write!(f, "This event is closed"),
            Self::RegistrationRejected { reason, .. } => write!(f, "{reason}"),
            Self::MissingFields { fields } => {
                write!(f, "Missing required fields: {}", fields.join(", "))
            }
            Self::InvalidEmail(_) => write!(f, "Please enter a valid email address."),
            Self::InvalidMobile(_) => write!(f, "Please enter a valid 10-digit mobile number."),
            Self::EmptySelection => write!(f, "Please select at least one event"),
            Self::InvalidAmount(amount) => write!(f, "Invalid amount: {amount}"),
        }
    }
}

impl std::error::Error for DomainError {}
