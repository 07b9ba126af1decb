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

mod catalog;
mod error;
mod pricing;
mod team_size;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use catalog::Catalog;
pub use error::DomainError;
pub use pricing::{CheckoutTotals, DiscountPolicy, OverflowPolicy, UNIT_PRICE, compute_totals};
pub use team_size::{
    MAX_FORM_PARTICIPANTS, TeamRequirement, classify, classify_descriptor, title_override,
};
pub use types::{
    Category, Coordinator, EventId, EventRecord, LeaderEntry, LeaderField, MemberEntry,
    MemberField, OTHER_OPTION, PersonalDetails, PersonalField, RegistrationRecord,
};
pub use validation::{
    RegistrationError, is_valid_email, is_valid_phone, validate_personal_details,
    validate_registration,
};
