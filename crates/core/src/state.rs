// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sambhram_domain::{
    Catalog, CheckoutTotals, DiscountPolicy, EventId, PersonalDetails, RegistrationRecord,
    compute_totals,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The events a user intends to pay for, in the order they were added.
///
/// Ids are unique.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet {
    ids: Vec<EventId>,
}

impl SelectionSet {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Builds a selection from ids, dropping repeats after the first.
    #[must_use]
    pub fn from_ids(ids: impl IntoIterator<Item = EventId>) -> Self {
        let mut selection: Self = Self::new();
        for id in ids {
            selection.insert(id);
        }
        selection
    }

    /// Checks if an event is selected.
    #[must_use]
    pub fn contains(&self, id: &EventId) -> bool {
        self.ids.contains(id)
    }

    /// Appends an event. Returns false if it was already selected.
    pub fn insert(&mut self, id: EventId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Removes an event. Returns false if it was not selected.
    pub fn remove(&mut self, id: &EventId) -> bool {
        let before: usize = self.ids.len();
        self.ids.retain(|selected| selected != id);
        self.ids.len() != before
    }

    /// Removes every event.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Selected ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[EventId] {
        &self.ids
    }

    /// Number of selected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Team registration details keyed by event id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationStore {
    records: BTreeMap<EventId, RegistrationRecord>,
}

impl RegistrationStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// The record for an event, or an empty record if none exists.
    #[must_use]
    pub fn get(&self, id: &EventId) -> RegistrationRecord {
        self.records.get(id).cloned().unwrap_or_default()
    }

    /// The stored record for an event, if any.
    #[must_use]
    pub fn find(&self, id: &EventId) -> Option<&RegistrationRecord> {
        self.records.get(id)
    }

    /// Checks if a record exists for an event.
    #[must_use]
    pub fn contains(&self, id: &EventId) -> bool {
        self.records.contains_key(id)
    }

    /// Replaces the record for an event.
    pub fn set(&mut self, id: EventId, record: RegistrationRecord) {
        self.records.insert(id, record);
    }

    /// Removes every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The two checkout screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    /// Personal details form.
    #[default]
    Register,
    /// Selected items, totals and payment.
    Review,
}

impl CheckoutStep {
    /// The one-based step number shown to the user.
    #[must_use]
    pub const fn number(&self) -> u8 {
        match self {
            Self::Register => 1,
            Self::Review => 2,
        }
    }

    /// The step for a one-based step number.
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::Register),
            2 => Some(Self::Review),
            _ => None,
        }
    }
}

/// Everything one browsing session has entered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    /// The cart.
    pub selection: SelectionSet,
    /// Team details per event.
    pub registrations: RegistrationStore,
    /// The registrant's own details.
    pub personal: PersonalDetails,
    /// Current checkout screen.
    pub step: CheckoutStep,
    /// Order ids of completed payments, oldest first.
    pub order_history: Vec<String>,
}

impl Session {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Read-only inputs every transition needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// Events open for browsing.
    pub catalog: Catalog,
    /// Events that can no longer be added to a cart.
    pub closed_events: BTreeSet<EventId>,
    /// Checkout discount rules.
    pub discount_policy: DiscountPolicy,
}

impl SessionContext {
    /// Creates a context with no closed events and the default discount policy.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            closed_events: BTreeSet::new(),
            discount_policy: DiscountPolicy::default(),
        }
    }

    /// Checks if an event is closed for registration.
    #[must_use]
    pub fn is_closed(&self, id: &EventId) -> bool {
        self.closed_events.contains(id)
    }

    /// Totals for a session's current selection.
    #[must_use]
    pub fn totals(&self, session: &Session) -> CheckoutTotals {
        compute_totals(session.selection.ids(), &self.catalog, &self.discount_policy)
    }
}

/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A transient message for the user, such as a toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    /// An informational message.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// A non-fatal error message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: Session,
    /// Messages to show the user about side effects of the transition.
    pub notices: Vec<Notice>,
}

impl TransitionResult {
    /// A transition with no messages.
    #[must_use]
    pub const fn quiet(new_state: Session) -> Self {
        Self {
            new_state,
            notices: Vec::new(),
        }
    }
}
