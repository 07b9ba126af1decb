// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Team-size classification.
//!
//! Catalog events describe their team size as free text (`"2-4 members"`,
//! `"Individual"`, `"Team of 3"`). This module turns that text into a
//! structured [`TeamRequirement`]. Classification never fails: anything that
//! cannot be understood resolves to the individual requirement.

use crate::types::EventRecord;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

/// Upper bound on participants, leader included, that a registration form
/// will collect regardless of what the event allows.
pub const MAX_FORM_PARTICIPANTS: u32 = 4;

#[allow(clippy::unwrap_used)]
static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// Events whose descriptor text is known to be misleading.
///
/// Keys are lowercase titles; a match takes precedence over the descriptor.
const TITLE_OVERRIDES: &[(&str, TeamRequirement)] = &[(
    "agni chakravyuha",
    TeamRequirement {
        is_team: true,
        min: 4,
        max: 4,
    },
)];

/// Inclusive range of participants, leader included, an event accepts.
///
/// Invariants: `1 <= min <= max`, and `min == max == 1` when `is_team` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRequirement {
    /// Whether the event is registered as a team.
    pub is_team: bool,
    /// Minimum participants.
    pub min: u32,
    /// Maximum participants.
    pub max: u32,
}

impl TeamRequirement {
    /// A single participant.
    pub const INDIVIDUAL: Self = Self {
        is_team: false,
        min: 1,
        max: 1,
    };

    /// Used when the descriptor says "team" without giving numbers.
    pub const DEFAULT_TEAM: Self = Self {
        is_team: true,
        min: 2,
        max: 4,
    };

    /// Builds a requirement from a parsed range.
    ///
    /// Returns `None` when the range violates `1 <= min <= max`.
    #[must_use]
    pub const fn from_range(min: u32, max: u32) -> Option<Self> {
        if min == 0 || max < min {
            return None;
        }
        if max == 1 {
            return Some(Self::INDIVIDUAL);
        }
        Some(Self {
            is_team: true,
            min,
            max,
        })
    }

    /// Participants the registration form collects, leader included.
    #[must_use]
    pub const fn form_capacity(&self) -> u32 {
        if self.max < MAX_FORM_PARTICIPANTS {
            self.max
        } else {
            MAX_FORM_PARTICIPANTS
        }
    }

    /// Member rows the registration form offers beyond the leader.
    #[must_use]
    pub const fn max_additional_members(&self) -> usize {
        self.form_capacity().saturating_sub(1) as usize
    }
}

/// Looks up a title in the override table.
#[must_use]
pub fn title_override(title: &str) -> Option<TeamRequirement> {
    let key: String = title.trim().to_lowercase();
    TITLE_OVERRIDES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, requirement)| *requirement)
}

/// Classifies a free-form team-size descriptor.
///
/// Rules, in order:
/// 1. Contains "individual" (any case): individual.
/// 2. Contains "team" and no digits: two to four participants.
/// 3. Two or more integers: the smaller of the first two is `min`, the
///    larger is `max`.
/// 4. Exactly one integer `n`: exactly `n` participants.
/// 5. Anything else: individual.
#[must_use]
pub fn classify_descriptor(descriptor: &str) -> TeamRequirement {
    let lowered: String = descriptor.to_lowercase();
    if lowered.contains("individual") {
        return TeamRequirement::INDIVIDUAL;
    }

    let numbers: Option<Vec<u32>> = NUMBER
        .find_iter(descriptor)
        .map(|m| m.as_str().parse::<u32>().ok())
        .collect();
    let Some(numbers) = numbers else {
        debug!(descriptor, "Team size number out of range, treating as individual");
        return TeamRequirement::INDIVIDUAL;
    };

    let parsed: Option<TeamRequirement> = match numbers.as_slice() {
        [] if lowered.contains("team") => Some(TeamRequirement::DEFAULT_TEAM),
        [] => {
            if !descriptor.trim().is_empty() {
                debug!(descriptor, "Unrecognized team size, treating as individual");
            }
            Some(TeamRequirement::INDIVIDUAL)
        }
        [n] => TeamRequirement::from_range(*n, *n),
        [first, second, ..] => {
            TeamRequirement::from_range((*first).min(*second), (*first).max(*second))
        }
    };

    parsed.unwrap_or_else(|| {
        debug!(descriptor, "Invalid team size range, treating as individual");
        TeamRequirement::INDIVIDUAL
    })
}

/// Classifies a catalog event, honoring title overrides.
#[must_use]
pub fn classify(event: &EventRecord) -> TeamRequirement {
    title_override(&event.title).unwrap_or_else(|| classify_descriptor(&event.team_size))
}
