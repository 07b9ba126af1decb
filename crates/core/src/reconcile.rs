// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Keeps the cart consistent with the registration store.
//!
//! Every selected team event must have a registration that passes
//! validation. These functions compute the selection that satisfies that
//! invariant and report what had to be removed; they never mutate their
//! inputs.

use crate::state::{Notice, RegistrationStore, SelectionSet, SessionContext};
use sambhram_domain::{EventId, RegistrationError, TeamRequirement, validate_registration};
use tracing::warn;

/// Why an event was taken out of the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvictionCause {
    /// The team registration no longer passes validation.
    InvalidRegistration(RegistrationError),
    /// The event is no longer in the catalog.
    NotListed,
}

/// An event removed from the cart by reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eviction {
    /// The removed event.
    pub event_id: EventId,
    /// Why it was removed.
    pub cause: EvictionCause,
}

/// The outcome of a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// The selection with failing events removed.
    pub selection: SelectionSet,
    /// Removed events, in selection order.
    pub evictions: Vec<Eviction>,
}

impl Reconciliation {
    /// User-facing messages describing each eviction.
    #[must_use]
    pub fn notices(&self, context: &SessionContext) -> Vec<Notice> {
        self.evictions
            .iter()
            .map(|eviction| {
                let title: &str = context
                    .catalog
                    .get(&eviction.event_id)
                    .map_or(eviction.event_id.value(), |event| event.title.as_str());
                match &eviction.cause {
                    EvictionCause::InvalidRegistration(reason) => {
                        Notice::error(format!("{title} was removed from your cart: {reason}"))
                    }
                    EvictionCause::NotListed => Notice::error(format!(
                        "{title} is no longer available and was removed from your cart"
                    )),
                }
            })
            .collect()
    }
}

fn check(
    context: &SessionContext,
    store: &RegistrationStore,
    event_id: &EventId,
) -> Option<EvictionCause> {
    let Some(requirement) = context.catalog.requirement(event_id) else {
        return Some(EvictionCause::NotListed);
    };
    team_check(&requirement, store, event_id)
}

fn team_check(
    requirement: &TeamRequirement,
    store: &RegistrationStore,
    event_id: &EventId,
) -> Option<EvictionCause> {
    if !requirement.is_team {
        return None;
    }
    validate_registration(&store.get(event_id), requirement)
        .err()
        .map(EvictionCause::InvalidRegistration)
}

/// Re-validates one event after its registration changed.
///
/// The event is evicted only if it is selected, is a team event, and its
/// current record fails validation.
#[must_use]
pub fn reconcile_selection(
    context: &SessionContext,
    selection: &SelectionSet,
    store: &RegistrationStore,
    changed: &EventId,
) -> Reconciliation {
    let mut next: SelectionSet = selection.clone();
    let mut evictions: Vec<Eviction> = Vec::new();

    if selection.contains(changed) {
        let cause: Option<EvictionCause> = context
            .catalog
            .requirement(changed)
            .and_then(|requirement| team_check(&requirement, store, changed));
        if let Some(cause) = cause {
            warn!(event_id = %changed, ?cause, "Evicting event after registration edit");
            next.remove(changed);
            evictions.push(Eviction {
                event_id: changed.clone(),
                cause,
            });
        }
    }

    Reconciliation {
        selection: next,
        evictions,
    }
}

/// Re-validates every selected event.
///
/// Used when a session is restored, since the selection and the store are
/// persisted independently and may disagree.
#[must_use]
pub fn reconcile_all(
    context: &SessionContext,
    selection: &SelectionSet,
    store: &RegistrationStore,
) -> Reconciliation {
    let mut next: SelectionSet = SelectionSet::new();
    let mut evictions: Vec<Eviction> = Vec::new();

    for event_id in selection.ids() {
        match check(context, store, event_id) {
            None => {
                next.insert(event_id.clone());
            }
            Some(cause) => {
                warn!(event_id = %event_id, ?cause, "Evicting event from restored cart");
                evictions.push(Eviction {
                    event_id: event_id.clone(),
                    cause,
                });
            }
        }
    }

    Reconciliation {
        selection: next,
        evictions,
    }
}
