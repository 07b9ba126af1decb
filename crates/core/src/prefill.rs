// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::{RegistrationStore, SelectionSet, SessionContext};
use sambhram_domain::{LeaderEntry, PersonalDetails};

fn fill_if_empty(current: &mut String, candidate: &str) {
    if current.trim().is_empty() {
        *current = candidate.to_string();
    }
}

/// Fills empty personal contact fields from a team leader's details.
///
/// The leader comes from the first selected team event, in selection order,
/// whose record has a leader name or phone. Only `name`, `email` and
/// `mobile` are touched, and only when blank.
#[must_use]
pub fn prefill_from_team_leader(
    context: &SessionContext,
    selection: &SelectionSet,
    store: &RegistrationStore,
    personal: &PersonalDetails,
) -> PersonalDetails {
    let leader: Option<&LeaderEntry> = selection
        .ids()
        .iter()
        .filter(|id| {
            context
                .catalog
                .requirement(id)
                .is_some_and(|requirement| requirement.is_team)
        })
        .filter_map(|id| store.find(id))
        .map(|record| &record.leader)
        .find(|leader| !leader.name.is_empty() || !leader.phone.is_empty());

    let mut updated: PersonalDetails = personal.clone();
    if let Some(leader) = leader {
        fill_if_empty(&mut updated.name, &leader.name);
        fill_if_empty(&mut updated.email, &leader.email);
        fill_if_empty(&mut updated.mobile, &leader.phone);
    }
    updated
}
