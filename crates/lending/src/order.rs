use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use lendtrack_core::{DomainError, DomainResult, ItemId, OrderId};
use serde::{Deserialize, Serialize};

/// An order: one borrower taking a set of items out.
///
/// Immutable after creation; the only later mutation is wholesale removal
/// when the order is archived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub phone: String,
}

/// One line of an order: how much of an item was lent and how much of it has
/// come back so far.
///
/// `lent` is fixed at order creation. `returned` is never incremented in
/// place; the settlement engine overwrites it from the return log, so the
/// intended invariant `0 <= returned <= lent` is advisory only and
/// over-returns show up here as `returned > lent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_id: OrderId,
    pub item_id: ItemId,
    pub lent: i64,
    pub returned: i64,
}

impl OrderItem {
    /// Quantity still out on loan. Negative once an over-return was recorded.
    pub fn remaining(&self) -> i64 {
        self.lent - self.returned
    }
}

/// Validated item → quantity mapping for order creation.
///
/// Every quantity is at least 1 and the mapping is non-empty; callers at the
/// boundary use [`OrderLines::filtered`] to drop non-positive quantities
/// before validation, mirroring how the order form skips unticked items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLines(BTreeMap<ItemId, i64>);

impl OrderLines {
    pub fn new(lines: BTreeMap<ItemId, i64>) -> DomainResult<Self> {
        if lines.is_empty() {
            return Err(DomainError::validation("order must contain at least one line"));
        }
        for (item_id, qty) in &lines {
            if *qty < 1 {
                return Err(DomainError::validation(format!(
                    "quantity for {item_id} must be at least 1"
                )));
            }
        }
        Ok(Self(lines))
    }

    /// Boundary helper: drop non-positive quantities, then validate.
    pub fn filtered(lines: BTreeMap<ItemId, i64>) -> DomainResult<Self> {
        Self::new(lines.into_iter().filter(|(_, qty)| *qty >= 1).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, i64)> {
        self.0.iter().map(|(item_id, qty)| (item_id, *qty))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
