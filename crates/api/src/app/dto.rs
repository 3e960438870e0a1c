use std::collections::BTreeMap;

use serde::Deserialize;

use lendtrack_lending::{InventoryItem, Order, OrderItem, ReturnEvent, ReturnLine};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub name: String,
    pub phone: String,
    /// itemId → quantity; non-positive quantities are dropped at the boundary.
    pub items: BTreeMap<String, i64>,
}

#[derive(Debug, Deserialize)]
pub struct RecordReturnRequest {
    pub name: String,
    /// itemId → quantity returned now; zeros are allowed and skipped.
    pub items: BTreeMap<String, i64>,
    /// Set to proceed despite over-return warnings.
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpsertItemRequest {
    pub title: String,
    pub img: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub stock: i64,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn inventory_to_json(item: &InventoryItem) -> serde_json::Value {
    serde_json::json!({
        "item_id": item.item_id.as_str(),
        "title": item.title,
        "img": item.img,
        "description": item.description,
        "stock": item.stock,
    })
}

pub fn order_to_json(order: &Order) -> serde_json::Value {
    serde_json::json!({
        "order_id": order.order_id.as_i64(),
        "timestamp": order.timestamp.to_rfc3339(),
        "name": order.name,
        "phone": order.phone,
    })
}

pub fn order_item_to_json(item: &OrderItem) -> serde_json::Value {
    serde_json::json!({
        "item_id": item.item_id.as_str(),
        "lent": item.lent,
        "returned": item.returned,
        "remaining": item.remaining(),
    })
}

pub fn return_event_to_json(event: &ReturnEvent, lines: &[ReturnLine]) -> serde_json::Value {
    serde_json::json!({
        "return_id": event.return_id.as_i64(),
        "timestamp": event.timestamp.to_rfc3339(),
        "name": event.name,
        "lines": lines
            .iter()
            .map(|line| serde_json::json!({
                "item_id": line.item_id.as_str(),
                "returned": line.returned,
            }))
            .collect::<Vec<_>>(),
    })
}
