// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use sambhram::Notice;
use sambhram_domain::{EventId, LeaderEntry, MemberEntry, RegistrationRecord};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Currency used when the order backend does not name one.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Order creation request sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub name: String,
    pub email: String,
    /// College after resolving the "Other" option.
    pub college: String,
    /// Branch after resolving the "Other" option.
    pub branch: String,
    pub phone: String,
    /// Amount payable, after discount.
    pub amount: i64,
    /// One entry per selected event, in cart order.
    pub registrations: Vec<EventRegistration>,
    /// Team details entered on the checkout form itself.
    pub team_details: TeamDetails,
}

/// A selected event and its team record, if it has one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRegistration {
    pub event_id: EventId,
    /// Sent as `{}` when the event has no stored record.
    #[serde(default, serialize_with = "details_or_empty")]
    pub details: Option<RegistrationRecord>,
}

#[allow(clippy::ref_option)]
fn details_or_empty<S: Serializer>(
    details: &Option<RegistrationRecord>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match details {
        Some(record) => record.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

/// Team leader block of the checkout-form team details.
///
/// Empty fields are left out.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamLeaderDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_phone: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl From<&LeaderEntry> for TeamLeaderDetails {
    fn from(leader: &LeaderEntry) -> Self {
        Self {
            name: non_empty(&leader.name),
            email: non_empty(&leader.email),
            phone: non_empty(&leader.phone),
            alt_phone: non_empty(&leader.alt_phone),
        }
    }
}

/// Team details entered on the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamDetails {
    pub leader: TeamLeaderDetails,
    /// Members with at least a name or an email.
    pub members: Vec<MemberEntry>,
}

impl TeamDetails {
    /// Builds the block from the checkout form, dropping blank member rows.
    #[must_use]
    pub fn from_form(leader: &LeaderEntry, members: &[MemberEntry]) -> Self {
        Self {
            leader: TeamLeaderDetails::from(leader),
            members: members
                .iter()
                .filter(|member| !member.is_blank())
                .cloned()
                .collect(),
        }
    }
}

/// Order creation response from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    #[serde(default)]
    pub participant_id: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// A created order, ready to hand to the payment widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    pub participant_id: Option<String>,
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
}

/// Merchant settings for the payment widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Public gateway key. Checkout is refused while this is unset.
    pub key: Option<String>,
    pub merchant_name: String,
    pub description: String,
    pub image: String,
    pub address: String,
    pub theme_color: String,
}

impl GatewayConfig {
    /// Default merchant settings with the given key.
    #[must_use]
    pub fn with_key(key: Option<String>) -> Self {
        Self {
            key,
            ..Self::default()
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            key: None,
            merchant_name: String::from("SHREE DEVI SAMBHRAM"),
            description: String::from("National Level Technical and Cultural Fest"),
            image: String::from(
                "https://storage.googleapis.com/educrib/colleges/uploads/f7a1791dd41f3fa5e5e4f8a6faea2467ShreeDeviCollegeOfPhysiotherapy_Fd.jpg",
            ),
            address: String::from(
                "Shree Devi Institute Of Technology, Kenjar, Near Mangalore International Airport, Karnataka - 574142",
            ),
            theme_color: String::from("#0066ff"),
        }
    }
}

/// Contact details shown pre-filled in the payment widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPrefill {
    /// The participant's name.
    pub name: String,
    /// The participant's mobile number.
    pub contact: String,
}

/// Free-form notes attached to the payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentNotes {
    /// The organiser's postal address.
    pub address: String,
}

/// Widget colour scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTheme {
    /// Accent colour as a CSS hex string.
    pub color: String,
}

/// Options object passed to the payment widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOptions {
    pub key: String,
    pub amount: i64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub order_id: String,
    pub prefill: PaymentPrefill,
    pub notes: PaymentNotes,
    pub theme: PaymentTheme,
}

/// Everything the client needs to open the payment widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutHandoff {
    pub order: OrderDetails,
    pub options: PaymentOptions,
}

/// How the payment widget finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PaymentOutcome {
    /// The gateway captured the payment.
    Succeeded {
        #[serde(default)]
        participant_id: Option<String>,
        order_id: String,
    },
    /// The gateway reported a failure.
    Failed {
        #[serde(default)]
        reason: Option<String>,
    },
    /// The user closed the widget.
    Dismissed,
}

/// Data for the success page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    pub participant_id: Option<String>,
    pub order_id: String,
    /// Every order completed on this device, oldest first.
    pub order_ids: Vec<String>,
}

/// The session after a payment outcome, with messages for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentCompletion {
    pub session: sambhram::Session,
    pub notices: Vec<Notice>,
    /// Present only for a successful payment.
    pub confirmation: Option<PaymentConfirmation>,
}
