// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::team_size::TeamRequirement;
use crate::types::{PersonalDetails, RegistrationRecord};
use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::unwrap_used)]
static EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[allow(clippy::unwrap_used)]
static PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

/// Returns true if `email` looks like a mail address.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Returns true if `phone` is exactly ten ASCII digits.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE.is_match(phone)
}

/// The first registration rule a team record failed.
///
/// Member indices are one-based, matching the form labels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("Please enter a team name.")]
    MissingTeamName,
    #[error("Please fill all required team leader details (Name, Email, and Phone).")]
    MissingLeaderDetails,
    #[error("Team leader email is not a valid email address.")]
    InvalidLeaderEmail,
    #[error("Team leader phone must be exactly 10 digits.")]
    InvalidLeaderPhone,
    #[error("Alternate phone (if provided) must be exactly 10 digits.")]
    InvalidAltPhone,
    #[error("This event needs at least {required} participants; add {missing} more member(s).")]
    TooFewParticipants { required: u32, missing: u32 },
    #[error("This event allows at most {allowed} participants; remove {excess} member(s).")]
    TooManyParticipants { allowed: u32, excess: u32 },
    #[error("Member {index} must have both name and email, or leave both fields empty.")]
    IncompleteMember { index: usize },
    #[error("Member {index} email is not a valid email address.")]
    InvalidMemberEmail { index: usize },
}

impl RegistrationError {
    /// Stable identifier of the rule that failed.
    #[must_use]
    pub const fn rule(&self) -> &'static str {
        match self {
            Self::MissingTeamName => "team_name_required",
            Self::MissingLeaderDetails => "leader_details_required",
            Self::InvalidLeaderEmail => "leader_email_format",
            Self::InvalidLeaderPhone => "leader_phone_format",
            Self::InvalidAltPhone => "alt_phone_format",
            Self::TooFewParticipants { .. } => "too_few_participants",
            Self::TooManyParticipants { .. } => "too_many_participants",
            Self::IncompleteMember { .. } => "member_incomplete",
            Self::InvalidMemberEmail { .. } => "member_email_format",
        }
    }
}

/// Validates a team registration against its event's requirement.
///
/// Checks run in a fixed order and the first failure is returned.
/// Individual events always pass.
///
/// # Errors
///
/// Returns the first failed rule:
/// - team name empty when more than one participant is required
/// - leader name, email or phone empty
/// - leader email malformed
/// - leader phone or non-empty alternate phone not ten digits
/// - complete participants outside `min..=max`
/// - a member with only one of name and email, or a malformed member email
pub fn validate_registration(
    record: &RegistrationRecord,
    requirement: &TeamRequirement,
) -> Result<(), RegistrationError> {
    if !requirement.is_team {
        return Ok(());
    }

    if requirement.min > 1 && record.team_name.is_empty() {
        return Err(RegistrationError::MissingTeamName);
    }

    let leader = &record.leader;
    if requirement.min > 0 && !leader.is_complete() {
        return Err(RegistrationError::MissingLeaderDetails);
    }

    if !is_valid_email(&leader.email) {
        return Err(RegistrationError::InvalidLeaderEmail);
    }

    if !is_valid_phone(&leader.phone) {
        return Err(RegistrationError::InvalidLeaderPhone);
    }
    if !leader.alt_phone.is_empty() && !is_valid_phone(&leader.alt_phone) {
        return Err(RegistrationError::InvalidAltPhone);
    }

    let filled: u32 = u32::try_from(record.filled_count()).unwrap_or(u32::MAX);
    if filled < requirement.min {
        return Err(RegistrationError::TooFewParticipants {
            required: requirement.min,
            missing: requirement.min - filled,
        });
    }
    if filled > requirement.max {
        return Err(RegistrationError::TooManyParticipants {
            allowed: requirement.max,
            excess: filled - requirement.max,
        });
    }

    for (offset, member) in record.members.iter().enumerate() {
        let index: usize = offset + 1;
        if member.is_half_filled() {
            return Err(RegistrationError::IncompleteMember { index });
        }
        if !member.email.is_empty() && !is_valid_email(&member.email) {
            return Err(RegistrationError::InvalidMemberEmail { index });
        }
    }

    Ok(())
}

/// Validates the registrant's personal details before confirming checkout.
///
/// # Errors
///
/// Returns an error if:
/// - the resolved college or branch is empty
/// - name, email or mobile is empty
/// - the email is malformed
/// - the mobile number is not ten digits
pub fn validate_personal_details(details: &PersonalDetails) -> Result<(), DomainError> {
    if details.resolved_college().is_empty() {
        return Err(DomainError::MissingFields {
            fields: vec!["college"],
        });
    }

    if details.resolved_branch().is_empty() {
        return Err(DomainError::MissingFields {
            fields: vec!["branch"],
        });
    }

    let missing: Vec<&'static str> = [
        ("name", &details.name),
        ("email", &details.email),
        ("mobile", &details.mobile),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(field, _)| field)
    .collect();
    if !missing.is_empty() {
        return Err(DomainError::MissingFields { fields: missing });
    }

    if !is_valid_email(&details.email) {
        return Err(DomainError::InvalidEmail(details.email.clone()));
    }

    if !is_valid_phone(&details.mobile) {
        return Err(DomainError::InvalidMobile(details.mobile.clone()));
    }

    Ok(())
}
