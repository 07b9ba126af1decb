// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::catalog::Catalog;
use crate::types::EventId;
use serde::{Deserialize, Serialize};

/// Flat price of one event, in rupees.
pub const UNIT_PRICE: i64 = 100;

/// Discounts for one to four selected events, indexed by count.
const DISCOUNT_TIERS: [i64; 5] = [0, 0, 40, 80, 150];

/// What to discount when more events are selected than the tier table covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// No discount beyond the last tier.
    #[default]
    NoDiscount,
    /// Keep applying the last tier's discount.
    CapAtTopTier,
}

/// Discount rules applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiscountPolicy {
    /// Behavior past the last tier.
    pub overflow: OverflowPolicy,
}

impl DiscountPolicy {
    /// Creates a discount policy.
    #[must_use]
    pub const fn new(overflow: OverflowPolicy) -> Self {
        Self { overflow }
    }

    /// The flat discount for `count` selected events.
    #[must_use]
    pub fn discount_for(&self, count: usize) -> i64 {
        match DISCOUNT_TIERS.get(count) {
            Some(discount) => *discount,
            None => match self.overflow {
                OverflowPolicy::NoDiscount => 0,
                OverflowPolicy::CapAtTopTier => DISCOUNT_TIERS[DISCOUNT_TIERS.len() - 1],
            },
        }
    }
}

/// Derived checkout amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutTotals {
    pub unit_price: i64,
    pub count: usize,
    pub subtotal: i64,
    pub discount: i64,
    pub total: i64,
}

/// Computes totals for the selected events.
///
/// Only selected ids that resolve in the catalog are counted.
#[must_use]
pub fn compute_totals(
    selection: &[EventId],
    catalog: &Catalog,
    policy: &DiscountPolicy,
) -> CheckoutTotals {
    let count: usize = selection
        .iter()
        .filter(|id| catalog.get(id).is_some())
        .count();
    let subtotal: i64 = i64::try_from(count).unwrap_or(i64::MAX / UNIT_PRICE) * UNIT_PRICE;
    let discount: i64 = policy.discount_for(count);

    CheckoutTotals {
        unit_price: UNIT_PRICE,
        count,
        subtotal,
        discount,
        total: subtotal - discount,
    }
}
