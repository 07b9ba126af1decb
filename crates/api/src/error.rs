// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use sambhram::CoreError;
use sambhram_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// No payment gateway key is configured.
    PaymentNotConfigured,
    /// The order backend failed or answered with something unusable.
    Backend {
        /// A human-readable description of the failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { message, .. } => write!(f, "{message}"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::PaymentNotConfigured => write!(f, "Payment gateway key not configured"),
            Self::Backend { message } => write!(f, "Payment server error: {message}"),
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidCategory(name) => ApiError::InvalidInput {
            field: String::from("category"),
            message: format!("Unknown event category '{name}'"),
        },
        DomainError::InvalidCatalog(_) | DomainError::DuplicateEvent(_) => ApiError::Internal {
            message: err.to_string(),
        },
        DomainError::EventNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Event"),
            message: format!("Event '{id}' does not exist"),
        },
        DomainError::EventClosed(_) => ApiError::DomainRuleViolation {
            rule: String::from("event_closed"),
            message: err.to_string(),
        },
        DomainError::RegistrationRejected { reason, .. } => ApiError::DomainRuleViolation {
            rule: reason.rule().to_string(),
            message: reason.to_string(),
        },
        DomainError::MissingFields { ref fields } => ApiError::InvalidInput {
            field: fields.join(","),
            message: err.to_string(),
        },
        DomainError::InvalidEmail(_) => ApiError::InvalidInput {
            field: String::from("email"),
            message: err.to_string(),
        },
        DomainError::InvalidMobile(_) => ApiError::InvalidInput {
            field: String::from("mobile"),
            message: err.to_string(),
        },
        DomainError::EmptySelection => ApiError::DomainRuleViolation {
            rule: String::from("selection_required"),
            message: err.to_string(),
        },
        DomainError::InvalidAmount(_) => ApiError::InvalidInput {
            field: String::from("amount"),
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NotATeamEvent(_) => ApiError::DomainRuleViolation {
            rule: String::from("team_event_required"),
            message: err.to_string(),
        },
        CoreError::MemberIndexOutOfRange { .. }
        | CoreError::FormMemberIndexOutOfRange { .. } => ApiError::InvalidInput {
            field: String::from("index"),
            message: err.to_string(),
        },
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}
