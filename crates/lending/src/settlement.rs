//! Settlement decision: when does an order count as fully returned?

use crate::order::OrderItem;

/// True when every lent quantity has come back.
///
/// Compares `sum(lent)` against `sum(returned)` across the order's items.
/// An order with no items is deliberately NOT settled: it cannot be
/// meaningfully "fully returned", and archiving it would make the archive a
/// dumping ground for malformed rows. (SQL-side `SUM` comparisons leave the
/// empty case to NULL semantics; deciding it here keeps the rule explicit.)
///
/// Note the sums can also match when one item is over-returned and another is
/// under-returned; settlement is a totals comparison, not a per-line one.
pub fn is_settled(items: &[OrderItem]) -> bool {
    if items.is_empty() {
        return false;
    }
    let total_lent: i64 = items.iter().map(|item| item.lent).sum();
    let total_returned: i64 = items.iter().map(|item| item.returned).sum();
    total_lent == total_returned
}
