use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use lendtrack_core::{DomainError, DomainResult, ItemId, OrderId, ReturnId};
use serde::{Deserialize, Serialize};

use crate::order::OrderItem;

/// One return submission against an order. Append-only: return events are
/// never edited or deleted, even after their order is archived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnEvent {
    pub return_id: ReturnId,
    pub order_id: OrderId,
    pub timestamp: DateTime<Utc>,
    /// Name of the person handing the items back (not necessarily the borrower).
    pub name: String,
}

/// Per-item quantity within one return event. Only recorded for quantities
/// greater than zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnLine {
    pub return_id: ReturnId,
    pub item_id: ItemId,
    pub returned: i64,
}

/// Validated item → quantity mapping for a return submission.
///
/// Zero quantities are legal here (the caller submits the whole form and the
/// store skips them); negative quantities are rejected at construction so the
/// core only ever sees non-negative integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnQuantities(BTreeMap<ItemId, i64>);

impl ReturnQuantities {
    pub fn new(quantities: BTreeMap<ItemId, i64>) -> DomainResult<Self> {
        for (item_id, qty) in &quantities {
            if *qty < 0 {
                return Err(DomainError::validation(format!(
                    "returned quantity for {item_id} must not be negative"
                )));
            }
        }
        Ok(Self(quantities))
    }

    /// Entries with quantity > 0, i.e. the ones that become return lines.
    pub fn positive(&self) -> impl Iterator<Item = (&ItemId, i64)> {
        self.0
            .iter()
            .filter(|(_, qty)| **qty > 0)
            .map(|(item_id, qty)| (item_id, *qty))
    }
}

/// Items for which the requested return quantity exceeds what is still out.
///
/// An item the order never contained has a remaining quantity of zero, so
/// any positive request against it is flagged too. The caller decides what
/// to do with the warnings; the core never rejects an over-return on its own.
pub fn over_returned(items: &[OrderItem], quantities: &ReturnQuantities) -> Vec<ItemId> {
    quantities
        .positive()
        .filter(|(item_id, qty)| {
            let remaining = items
                .iter()
                .find(|item| &item.item_id == *item_id)
                .map(OrderItem::remaining)
                .unwrap_or(0);
            *qty > remaining
        })
        .map(|(item_id, _)| item_id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quantities(entries: &[(&str, i64)]) -> ReturnQuantities {
        ReturnQuantities::new(
            entries
                .iter()
                .map(|(id, qty)| (ItemId::from(*id), *qty))
                .collect(),
        )
        .unwrap()
    }

    fn order_item(item_id: &str, lent: i64, returned: i64) -> OrderItem {
        OrderItem {
            order_id: OrderId::new(1),
            item_id: ItemId::from(item_id),
            lent,
            returned,
        }
    }

    #[test]
    fn negative_quantities_are_rejected() {
        let err = ReturnQuantities::new([(ItemId::from("hammer"), -1)].into_iter().collect());
        assert!(err.is_err());
    }

    #[test]
    fn zero_quantities_are_allowed_but_not_positive() {
        let q = quantities(&[("hammer", 0), ("drill", 2)]);
        let positive: Vec<_> = q.positive().map(|(id, qty)| (id.as_str().to_string(), qty)).collect();
        assert_eq!(positive, vec![("drill".to_string(), 2)]);
    }

    #[test]
    fn within_remaining_yields_no_warnings() {
        let items = vec![order_item("hammer", 5, 2)];
        assert!(over_returned(&items, &quantities(&[("hammer", 3)])).is_empty());
    }

    #[test]
    fn exceeding_remaining_is_flagged() {
        let items = vec![order_item("hammer", 5, 2), order_item("drill", 1, 0)];
        let flagged = over_returned(&items, &quantities(&[("hammer", 4), ("drill", 1)]));
        assert_eq!(flagged, vec![ItemId::from("hammer")]);
    }

    #[test]
    fn unknown_item_with_positive_quantity_is_flagged() {
        let items = vec![order_item("hammer", 5, 0)];
        let flagged = over_returned(&items, &quantities(&[("saw", 1)]));
        assert_eq!(flagged, vec![ItemId::from("saw")]);
    }

    #[test]
    fn zero_quantity_against_unknown_item_is_ignored() {
        let items = vec![order_item("hammer", 5, 0)];
        assert!(over_returned(&items, &quantities(&[("saw", 0)])).is_empty());
    }
}
