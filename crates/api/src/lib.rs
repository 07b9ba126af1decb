// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod backend;
mod checkout;
mod error;
mod request_response;

#[cfg(test)]
mod tests;

pub use backend::{HttpOrderBackend, ORDER_PATH, OrderBackend};
pub use checkout::{
    accept_order, begin_checkout, complete_payment, payment_options, prepare_payment_data,
    validate_payment_data,
};
pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use request_response::{
    CheckoutHandoff, DEFAULT_CURRENCY, EventRegistration, GatewayConfig, OrderDetails,
    OrderRequest, OrderResponse, PaymentCompletion, PaymentConfirmation, PaymentNotes,
    PaymentOptions, PaymentOutcome, PaymentPrefill, PaymentTheme, TeamDetails, TeamLeaderDetails,
};
