// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sambhram_domain::{EventId, LeaderField, MemberField, PersonalField, RegistrationRecord};
use serde::{Deserialize, Serialize};

/// A command represents user intent as data only.
///
/// Commands are the only way to request session changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Add an event to the cart. Team events need a valid registration.
    SelectEvent {
        /// The event to add.
        event_id: EventId,
    },
    /// Remove an event from the cart.
    DeselectEvent {
        /// The event to remove.
        event_id: EventId,
    },
    /// Add the event if absent, remove it if present.
    ToggleEvent {
        /// The event to toggle.
        event_id: EventId,
    },
    /// Open a team event's registration form, creating an empty record.
    OpenRegistration {
        /// The team event.
        event_id: EventId,
    },
    /// Edit the team name.
    SetTeamName {
        /// The team event.
        event_id: EventId,
        /// The new team name.
        value: String,
    },
    /// Edit one leader field.
    SetLeaderField {
        /// The team event.
        event_id: EventId,
        /// The field to edit.
        field: LeaderField,
        /// The new value.
        value: String,
    },
    /// Edit one field of an additional member.
    SetMemberField {
        /// The team event.
        event_id: EventId,
        /// Zero-based member row.
        index: usize,
        /// The field to edit.
        field: MemberField,
        /// The new value.
        value: String,
    },
    /// Append an empty member row, if the form has room.
    AddMember {
        /// The team event.
        event_id: EventId,
    },
    /// Delete a member row.
    RemoveMember {
        /// The team event.
        event_id: EventId,
        /// Zero-based member row.
        index: usize,
    },
    /// Replace a team event's registration record wholesale.
    ReplaceRegistration {
        /// The team event.
        event_id: EventId,
        /// The new record.
        record: RegistrationRecord,
    },
    /// Edit one personal-form field.
    SetPersonalField {
        /// The field to edit.
        field: PersonalField,
        /// The new value.
        value: String,
    },
    /// Edit one team-leader field on the checkout form.
    SetFormLeaderField {
        /// The field to edit.
        field: LeaderField,
        /// The new value.
        value: String,
    },
    /// Append an empty member row to the checkout form.
    AddFormMember,
    /// Edit one field of a checkout-form member.
    SetFormMemberField {
        /// Zero-based member row.
        index: usize,
        /// The field to edit.
        field: MemberField,
        /// The new value.
        value: String,
    },
    /// Delete a checkout-form member row.
    RemoveFormMember {
        /// Zero-based member row.
        index: usize,
    },
    /// Fill empty personal contact fields from a selected team's leader.
    PrefillFromTeamLeader,
    /// Move from the details form to the review screen.
    AdvanceStep,
    /// Move back from the review screen to the details form.
    RetreatStep,
    /// Empty the cart.
    ClearSelection,
    /// Clear the personal form, all registrations and the cart.
    ResetForm,
    /// Record a completed payment and empty the cart.
    RecordPayment {
        /// The gateway order id.
        order_id: String,
    },
}
