// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The category an event is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Dance, music, drama and other stage events.
    Cultural,
    /// Engineering, coding and workshop events.
    Technical,
    /// Awareness drives, charity events and the headline nights.
    Special,
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cultural" => Ok(Self::Cultural),
            "technical" => Ok(Self::Technical),
            "special" => Ok(Self::Special),
            _ => Err(DomainError::InvalidCategory(s.to_string())),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Category {
    /// Converts this category to its display representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cultural => "Cultural",
            Self::Technical => "Technical",
            Self::Special => "Special",
        }
    }
}

/// Identifier of a catalog event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Creates a new `EventId`.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Student coordinator listed for an event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Coordinator {
    /// Coordinator name.
    pub name: String,
    /// Coordinator phone number.
    pub contact: String,
}

/// A canonical catalog event.
///
/// Produced once by catalog normalization and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Unique identifier.
    pub id: EventId,
    /// Display title.
    pub title: String,
    /// Optional sub-title shown under the title.
    pub subtitle: Option<String>,
    /// Listing category.
    pub category: Category,
    /// Free-form team size text, e.g. `"2-4 members"` or `"Individual"`.
    pub team_size: String,
    /// Short description.
    pub description: String,
    /// Event rules, in display order.
    pub rules: Vec<String>,
    /// Venue, when announced.
    pub venue: Option<String>,
    /// Date, when announced.
    pub date: Option<String>,
    /// Start time, when announced.
    pub time: Option<String>,
    /// Card image path.
    pub image: Option<String>,
    /// Student coordinator.
    pub coordinator: Coordinator,
}

/// An additional team member.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberEntry {
    /// Member name.
    pub name: String,
    /// Member email.
    pub email: String,
}

impl MemberEntry {
    /// Creates a new member entry.
    #[must_use]
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    /// Both name and email are filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty()
    }

    /// Exactly one of name and email is filled.
    #[must_use]
    pub fn is_half_filled(&self) -> bool {
        self.name.is_empty() != self.email.is_empty()
    }

    /// Neither field is filled.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.email.is_empty()
    }
}

/// The team leader, the primary registrant of a team event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeaderEntry {
    /// Leader name.
    pub name: String,
    /// Leader email.
    pub email: String,
    /// Leader phone, ten digits.
    pub phone: String,
    /// Optional alternate phone; empty when not given.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub alt_phone: String,
}

impl LeaderEntry {
    /// Creates a new leader entry without an alternate phone.
    #[must_use]
    pub fn new(name: &str, email: &str, phone: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            alt_phone: String::new(),
        }
    }

    /// Name, email and phone are all filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty() && !self.phone.is_empty()
    }
}

/// Per-event registration details for a team event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationRecord {
    /// Team name; empty when not given.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub team_name: String,
    /// Team leader.
    pub leader: LeaderEntry,
    /// Additional members, leader excluded, in entry order.
    pub members: Vec<MemberEntry>,
}

impl RegistrationRecord {
    /// Number of participants with complete details, leader included.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        let leader: usize = usize::from(self.leader.is_complete());
        leader + self.members.iter().filter(|m| m.is_complete()).count()
    }
}

/// Leader fields editable from the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LeaderField {
    Name,
    Email,
    Phone,
    AltPhone,
}

/// Member fields editable from the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemberField {
    Name,
    Email,
}

/// The registrant's own contact details collected at checkout.
///
/// `college` and `branch` hold the literal `"Other"` when the free-text
/// `other_college` / `other_branch` values apply.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalDetails {
    pub name: String,
    pub email: String,
    pub college: String,
    pub branch: String,
    pub mobile: String,
    #[serde(rename = "Othercollege")]
    pub other_college: String,
    #[serde(rename = "Otherbranch")]
    pub other_branch: String,
    /// Team leader entered on the checkout form rather than per event.
    #[serde(rename = "teamLeader")]
    pub team_leader: LeaderEntry,
    /// Team members entered on the checkout form rather than per event.
    #[serde(rename = "teamMembers")]
    pub team_members: Vec<MemberEntry>,
}

/// Select value meaning "use the free-text field instead".
pub const OTHER_OPTION: &str = "Other";

impl PersonalDetails {
    /// The college name after resolving the `"Other"` option.
    #[must_use]
    pub fn resolved_college(&self) -> &str {
        if self.college == OTHER_OPTION {
            &self.other_college
        } else {
            &self.college
        }
    }

    /// The branch name after resolving the `"Other"` option.
    #[must_use]
    pub fn resolved_branch(&self) -> &str {
        if self.branch == OTHER_OPTION {
            &self.other_branch
        } else {
            &self.branch
        }
    }
}

/// Personal-form fields editable at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    Name,
    Email,
    College,
    Branch,
    Mobile,
    OtherCollege,
    OtherBranch,
}

impl PersonalDetails {
    /// Returns a mutable reference to the given field.
    pub fn field_mut(&mut self, field: PersonalField) -> &mut String {
        match field {
            PersonalField::Name => &mut self.name,
            PersonalField::Email => &mut self.email,
            PersonalField::College => &mut self.college,
            PersonalField::Branch => &mut self.branch,
            PersonalField::Mobile => &mut self.mobile,
            PersonalField::OtherCollege => &mut self.other_college,
            PersonalField::OtherBranch => &mut self.other_branch,
        }
    }
}

impl LeaderEntry {
    /// Returns a mutable reference to the given field.
    pub fn field_mut(&mut self, field: LeaderField) -> &mut String {
        match field {
            LeaderField::Name => &mut self.name,
            LeaderField::Email => &mut self.email,
            LeaderField::Phone => &mut self.phone,
            LeaderField::AltPhone => &mut self.alt_phone,
        }
    }
}

impl MemberEntry {
    /// Returns a mutable reference to the given field.
    pub fn field_mut(&mut self, field: MemberField) -> &mut String {
        match field {
            MemberField::Name => &mut self.name,
            MemberField::Email => &mut self.email,
        }
    }
}
