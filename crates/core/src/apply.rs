// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::prefill::prefill_from_team_leader;
use crate::reconcile::{Reconciliation, reconcile_all, reconcile_selection};
use crate::state::{CheckoutStep, Notice, Session, SessionContext, TransitionResult};
use sambhram_domain::{
    DomainError, EventId, EventRecord, MemberEntry, PersonalDetails, RegistrationRecord,
    TeamRequirement, classify, validate_registration,
};
use tracing::{debug, info};

/// Applies a command to the current session, producing a new session.
///
/// Registration edits are followed, within the same transition, by a
/// reconciliation pass: if the edited event is in the cart and its record
/// no longer validates, it is removed and an error notice is returned.
///
/// # Arguments
///
/// * `context` - The catalog and checkout rules
/// * `state` - The current session (immutable)
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new session and notices
/// * `Err(CoreError)` if the command is rejected; the session is unchanged
///
/// # Errors
///
/// Returns an error if:
/// - The event does not exist
/// - The event is closed, whether being added or removed
/// - A team event is selected with an invalid registration
/// - A team-only edit targets an individual event
/// - A member row does not exist, on a registration or the checkout form
/// - The review step is requested with an empty cart
pub fn apply(
    context: &SessionContext,
    state: &Session,
    command: Command,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::SelectEvent { event_id } => select_event(context, state, event_id),
        Command::DeselectEvent { event_id } => deselect_event(context, state, &event_id),
        Command::ToggleEvent { event_id } => {
            if state.selection.contains(&event_id) {
                deselect_event(context, state, &event_id)
            } else {
                select_event(context, state, event_id)
            }
        }
        Command::OpenRegistration { event_id } => {
            let event: &EventRecord = context.catalog.require(&event_id)?;
            let mut new_state: Session = state.clone();
            if classify(event).is_team && !state.registrations.contains(&event_id) {
                debug!(event_id = %event_id, "Creating empty registration");
                new_state
                    .registrations
                    .set(event_id, RegistrationRecord::default());
            }
            Ok(TransitionResult::quiet(new_state))
        }
        Command::SetTeamName { event_id, value } => {
            edit_registration(context, state, event_id, |record, _| {
                record.team_name = value;
                Ok(())
            })
        }
        Command::SetLeaderField {
            event_id,
            field,
            value,
        } => edit_registration(context, state, event_id, |record, _| {
            *record.leader.field_mut(field) = value;
            Ok(())
        }),
        Command::SetMemberField {
            event_id,
            index,
            field,
            value,
        } => {
            let target: EventId = event_id.clone();
            edit_registration(context, state, event_id, move |record, _| {
                let len: usize = record.members.len();
                let member: &mut MemberEntry =
                    record
                        .members
                        .get_mut(index)
                        .ok_or(CoreError::MemberIndexOutOfRange {
                            event_id: target,
                            index,
                            len,
                        })?;
                *member.field_mut(field) = value;
                Ok(())
            })
        }
        Command::AddMember { event_id } => {
            edit_registration(context, state, event_id, |record, requirement| {
                if record.members.len() < requirement.max_additional_members() {
                    record.members.push(MemberEntry::default());
                }
                Ok(())
            })
        }
        Command::RemoveMember { event_id, index } => {
            let target: EventId = event_id.clone();
            edit_registration(context, state, event_id, move |record, _| {
                if index >= record.members.len() {
                    return Err(CoreError::MemberIndexOutOfRange {
                        event_id: target,
                        index,
                        len: record.members.len(),
                    });
                }
                record.members.remove(index);
                Ok(())
            })
        }
        Command::ReplaceRegistration { event_id, record } => {
            edit_registration(context, state, event_id, |current, _| {
                *current = record;
                Ok(())
            })
        }
        Command::SetPersonalField { field, value } => {
            let mut new_state: Session = state.clone();
            *new_state.personal.field_mut(field) = value;
            Ok(TransitionResult::quiet(new_state))
        }
        Command::SetFormLeaderField { field, value } => {
            let mut new_state: Session = state.clone();
            *new_state.personal.team_leader.field_mut(field) = value;
            Ok(TransitionResult::quiet(new_state))
        }
        Command::AddFormMember => {
            let mut new_state: Session = state.clone();
            new_state.personal.team_members.push(MemberEntry::default());
            Ok(TransitionResult::quiet(new_state))
        }
        Command::SetFormMemberField {
            index,
            field,
            value,
        } => {
            let mut new_state: Session = state.clone();
            let members: &mut Vec<MemberEntry> = &mut new_state.personal.team_members;
            let len: usize = members.len();
            let member: &mut MemberEntry = members
                .get_mut(index)
                .ok_or(CoreError::FormMemberIndexOutOfRange { index, len })?;
            *member.field_mut(field) = value;
            Ok(TransitionResult::quiet(new_state))
        }
        Command::RemoveFormMember { index } => {
            let mut new_state: Session = state.clone();
            let len: usize = new_state.personal.team_members.len();
            if index >= len {
                return Err(CoreError::FormMemberIndexOutOfRange { index, len });
            }
            new_state.personal.team_members.remove(index);
            Ok(TransitionResult::quiet(new_state))
        }
        Command::PrefillFromTeamLeader => {
            let mut new_state: Session = state.clone();
            new_state.personal = prefill_from_team_leader(
                context,
                &state.selection,
                &state.registrations,
                &state.personal,
            );
            Ok(TransitionResult::quiet(new_state))
        }
        Command::AdvanceStep => {
            if state.selection.is_empty() {
                return Err(CoreError::DomainViolation(DomainError::EmptySelection));
            }
            let mut new_state: Session = state.clone();
            new_state.step = CheckoutStep::Review;
            Ok(TransitionResult::quiet(new_state))
        }
        Command::RetreatStep => {
            let mut new_state: Session = state.clone();
            new_state.step = CheckoutStep::Register;
            Ok(TransitionResult::quiet(new_state))
        }
        Command::ClearSelection => {
            let mut new_state: Session = state.clone();
            new_state.selection.clear();
            Ok(TransitionResult::quiet(new_state))
        }
        Command::ResetForm => {
            info!("Resetting registration form");
            let new_state: Session = Session {
                personal: PersonalDetails::default(),
                order_history: state.order_history.clone(),
                ..Session::default()
            };
            Ok(TransitionResult::quiet(new_state))
        }
        Command::RecordPayment { order_id } => {
            info!(order_id = %order_id, "Recording completed payment");
            let mut new_state: Session = state.clone();
            if !new_state.order_history.contains(&order_id) {
                new_state.order_history.push(order_id);
            }
            new_state.selection.clear();
            Ok(TransitionResult {
                new_state,
                notices: vec![Notice::info("Payment successful")],
            })
        }
    }
}

/// Re-validates a restored session and drops cart entries that no longer hold.
#[must_use]
pub fn revalidate(context: &SessionContext, state: &Session) -> TransitionResult {
    let reconciliation: Reconciliation =
        reconcile_all(context, &state.selection, &state.registrations);
    let notices: Vec<Notice> = reconciliation.notices(context);
    let mut new_state: Session = state.clone();
    new_state.selection = reconciliation.selection;
    TransitionResult {
        new_state,
        notices,
    }
}

fn select_event(
    context: &SessionContext,
    state: &Session,
    event_id: EventId,
) -> Result<TransitionResult, CoreError> {
    if context.is_closed(&event_id) {
        return Err(CoreError::DomainViolation(DomainError::EventClosed(event_id)));
    }
    let event: &EventRecord = context.catalog.require(&event_id)?;

    if state.selection.contains(&event_id) {
        return Ok(TransitionResult::quiet(state.clone()));
    }

    let requirement: TeamRequirement = classify(event);
    if requirement.is_team {
        validate_registration(&state.registrations.get(&event_id), &requirement).map_err(
            |reason| {
                CoreError::DomainViolation(DomainError::RegistrationRejected {
                    event_id: event_id.clone(),
                    reason,
                })
            },
        )?;
    }

    info!(event_id = %event_id, team = requirement.is_team, "Adding event to cart");
    let mut new_state: Session = state.clone();
    new_state.selection.insert(event_id);
    Ok(TransitionResult::quiet(new_state))
}

/// Closed events stay in the cart until it is cleared or re-validated.
fn deselect_event(
    context: &SessionContext,
    state: &Session,
    event_id: &EventId,
) -> Result<TransitionResult, CoreError> {
    if context.is_closed(event_id) {
        return Err(CoreError::DomainViolation(DomainError::EventClosed(
            event_id.clone(),
        )));
    }
    let mut new_state: Session = state.clone();
    if new_state.selection.remove(event_id) {
        info!(event_id = %event_id, "Removed event from cart");
    }
    Ok(TransitionResult::quiet(new_state))
}

/// Edits a team event's record, stores it, and reconciles the cart.
fn edit_registration<F>(
    context: &SessionContext,
    state: &Session,
    event_id: EventId,
    edit: F,
) -> Result<TransitionResult, CoreError>
where
    F: FnOnce(&mut RegistrationRecord, &TeamRequirement) -> Result<(), CoreError>,
{
    let event: &EventRecord = context.catalog.require(&event_id)?;
    let requirement: TeamRequirement = classify(event);
    if !requirement.is_team {
        return Err(CoreError::NotATeamEvent(event_id));
    }

    let mut record: RegistrationRecord = state.registrations.get(&event_id);
    edit(&mut record, &requirement)?;

    let mut new_state: Session = state.clone();
    new_state.registrations.set(event_id.clone(), record);

    let reconciliation: Reconciliation = reconcile_selection(
        context,
        &new_state.selection,
        &new_state.registrations,
        &event_id,
    );
    let notices: Vec<Notice> = reconciliation.notices(context);
    new_state.selection = reconciliation.selection;

    Ok(TransitionResult {
        new_state,
        notices,
    })
}
