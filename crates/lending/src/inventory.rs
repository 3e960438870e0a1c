use lendtrack_core::ItemId;
use serde::{Deserialize, Serialize};

/// An inventory item and its current stock count.
///
/// Stock reflects total on-hand minus everything currently lent. Both order
/// creation and return processing adjust it with signed deltas; the ledger
/// performs no bounds checking, so stock can legitimately read negative when
/// more was lent out than the ledger ever knew about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub item_id: ItemId,
    pub title: String,
    /// Image reference shown by front-ends; optional.
    pub img: Option<String>,
    pub description: String,
    pub stock: i64,
}
