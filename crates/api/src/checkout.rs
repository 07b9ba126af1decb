// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Checkout and payment handoff.
//!
//! A checkout moves through three calls: `validate_payment_data` and
//! `prepare_payment_data` build the order request, `begin_checkout` submits
//! it and returns the payment widget options, and `complete_payment` applies
//! whatever the widget reported back.

use sambhram::{Command, Notice, SelectionSet, Session, SessionContext, TransitionResult, apply};
use sambhram_domain::{
    CheckoutTotals, DomainError, PersonalDetails, is_valid_email, validate_personal_details,
};
use tracing::{info, warn};

use crate::backend::OrderBackend;
use crate::error::ApiError;
use crate::request_response::{
    CheckoutHandoff, DEFAULT_CURRENCY, EventRegistration, GatewayConfig, OrderDetails,
    OrderRequest, OrderResponse, PaymentCompletion, PaymentConfirmation, PaymentNotes,
    PaymentOptions, PaymentOutcome, PaymentPrefill, PaymentTheme, TeamDetails,
};

/// Message shown when the gateway does not give a failure reason.
const PAYMENT_FAILED: &str = "Payment failed";

/// Message shown when the user closes the payment widget.
const PAYMENT_CANCELLED: &str = "Payment cancelled";

/// Checks that a checkout can be submitted.
///
/// # Arguments
///
/// * `personal` - The registrant's details
/// * `selection` - The cart
/// * `amount` - The amount payable
///
/// # Errors
///
/// Returns an error if:
/// - any of name, email, college, branch or mobile is empty (all missing
///   fields are listed together)
/// - the email is malformed
/// - nothing is selected
/// - the amount is not positive
pub fn validate_payment_data(
    personal: &PersonalDetails,
    selection: &SelectionSet,
    amount: i64,
) -> Result<(), DomainError> {
    let required: [(&'static str, &str); 5] = [
        ("name", &personal.name),
        ("email", &personal.email),
        ("college", personal.resolved_college()),
        ("branch", personal.resolved_branch()),
        ("mobile", &personal.mobile),
    ];
    let missing: Vec<&'static str> = required
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| *field)
        .collect();
    if !missing.is_empty() {
        return Err(DomainError::MissingFields { fields: missing });
    }

    if !is_valid_email(&personal.email) {
        return Err(DomainError::InvalidEmail(personal.email.clone()));
    }

    if selection.is_empty() {
        return Err(DomainError::EmptySelection);
    }

    if amount <= 0 {
        return Err(DomainError::InvalidAmount(amount));
    }

    Ok(())
}

/// Builds the order request for a session.
///
/// The amount is the discounted total of the cart.
#[must_use]
pub fn prepare_payment_data(context: &SessionContext, session: &Session) -> OrderRequest {
    let personal: &PersonalDetails = &session.personal;
    let totals: CheckoutTotals = context.totals(session);

    OrderRequest {
        name: personal.name.clone(),
        email: personal.email.clone(),
        college: personal.resolved_college().to_string(),
        branch: personal.resolved_branch().to_string(),
        phone: personal.mobile.clone(),
        amount: totals.total,
        registrations: session
            .selection
            .ids()
            .iter()
            .map(|id| EventRegistration {
                event_id: id.clone(),
                details: session.registrations.find(id).cloned(),
            })
            .collect(),
        team_details: TeamDetails::from_form(&personal.team_leader, &personal.team_members),
    }
}

/// Turns a backend answer into an order, or fails if it has no order id.
///
/// # Errors
///
/// Returns `ApiError::Backend` if the answer has no order id.
pub fn accept_order(response: OrderResponse, requested_amount: i64) -> Result<OrderDetails, ApiError> {
    let order_id: String = response
        .order_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::Backend {
            message: String::from("Invalid response from payment server"),
        })?;

    Ok(OrderDetails {
        participant_id: response.participant_id,
        order_id,
        amount: response.amount.unwrap_or(requested_amount),
        currency: response
            .currency
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
    })
}

/// Builds the payment widget options for a created order.
#[must_use]
pub fn payment_options(
    key: &str,
    gateway: &GatewayConfig,
    order: &OrderDetails,
    personal: &PersonalDetails,
) -> PaymentOptions {
    PaymentOptions {
        key: key.to_string(),
        amount: order.amount,
        currency: order.currency.clone(),
        name: gateway.merchant_name.clone(),
        description: gateway.description.clone(),
        image: gateway.image.clone(),
        order_id: order.order_id.clone(),
        prefill: PaymentPrefill {
            name: personal.name.clone(),
            contact: personal.mobile.clone(),
        },
        notes: PaymentNotes {
            address: gateway.address.clone(),
        },
        theme: PaymentTheme {
            color: gateway.theme_color.clone(),
        },
    }
}

/// Submits a session's cart to the order backend.
///
/// # Arguments
///
/// * `backend` - The order backend
/// * `gateway` - Payment widget settings
/// * `context` - The catalog and checkout rules
/// * `session` - The session to check out
///
/// # Errors
///
/// Returns an error if:
/// - no gateway key is configured
/// - the checkout data is invalid
/// - the backend fails or returns no order id
pub async fn begin_checkout(
    backend: &dyn OrderBackend,
    gateway: &GatewayConfig,
    context: &SessionContext,
    session: &Session,
) -> Result<CheckoutHandoff, ApiError> {
    let key: &str = gateway
        .key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or(ApiError::PaymentNotConfigured)?;

    let request: OrderRequest = prepare_payment_data(context, session);
    validate_payment_data(&session.personal, &session.selection, request.amount)?;
    validate_personal_details(&session.personal)?;

    let response: OrderResponse = backend.create_order(&request).await?;
    let order: OrderDetails = accept_order(response, request.amount)?;

    info!(
        order_id = %order.order_id,
        amount = order.amount,
        events = request.registrations.len(),
        "Payment order created"
    );

    let options: PaymentOptions = payment_options(key, gateway, &order, &session.personal);
    Ok(CheckoutHandoff { order, options })
}

/// Applies the payment widget's outcome to a session.
///
/// A successful payment records the order and empties the cart. A failure
/// or a dismissal leaves the session as it was and only adds a notice.
///
/// # Errors
///
/// Returns an error if a successful outcome carries an empty order id.
pub fn complete_payment(
    context: &SessionContext,
    session: &Session,
    outcome: PaymentOutcome,
) -> Result<PaymentCompletion, ApiError> {
    match outcome {
        PaymentOutcome::Succeeded {
            participant_id,
            order_id,
        } => {
            if order_id.is_empty() {
                return Err(ApiError::InvalidInput {
                    field: String::from("order_id"),
                    message: String::from("Order id is required"),
                });
            }
            let transition: TransitionResult = apply(
                context,
                session,
                Command::RecordPayment {
                    order_id: order_id.clone(),
                },
            )?;
            let confirmation: PaymentConfirmation = PaymentConfirmation {
                participant_id,
                order_id,
                order_ids: transition.new_state.order_history.clone(),
            };
            Ok(PaymentCompletion {
                session: transition.new_state,
                notices: transition.notices,
                confirmation: Some(confirmation),
            })
        }
        PaymentOutcome::Failed { reason } => {
            let message: String = reason
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| PAYMENT_FAILED.to_string());
            warn!(%message, "Payment failed");
            Ok(PaymentCompletion {
                session: session.clone(),
                notices: vec![Notice::error(message)],
                confirmation: None,
            })
        }
        PaymentOutcome::Dismissed => {
            info!("Payment widget dismissed");
            Ok(PaymentCompletion {
                session: session.clone(),
                notices: vec![Notice::info(PAYMENT_CANCELLED)],
                confirmation: None,
            })
        }
    }
}
