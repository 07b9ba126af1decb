// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sambhram_domain::{DomainError, EventId};

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A team-only operation was requested for an individual event.
    NotATeamEvent(EventId),
    /// A member row does not exist.
    MemberIndexOutOfRange {
        /// The team event.
        event_id: EventId,
        /// The requested zero-based row.
        index: usize,
        /// Number of rows present.
        len: usize,
    },
    /// A checkout-form member row does not exist.
    FormMemberIndexOutOfRange {
        /// The requested zero-based row.
        index: usize,
        /// Number of rows present.
        len: usize,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "{err}"),
            Self::NotATeamEvent(id) => write!(f, "Event '{id}' does not take team registrations"),
            Self::MemberIndexOutOfRange {
                event_id,
                index,
                len,
            } => write!(
                f,
                "Member row {index} does not exist for event '{event_id}' ({len} rows)"
            ),
            Self::FormMemberIndexOutOfRange { index, len } => {
                write!(f, "Team member {index} does not exist ({len} rows)")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
