//! `lendtrack-lending` — lending domain model and settlement rules.
//!
//! Pure types and decision logic only; persistence lives in
//! `lendtrack-store`. The settlement rules here are the single source of
//! truth for when an order counts as fully returned and when a requested
//! return overshoots what is still out.

pub mod inventory;
pub mod order;
pub mod returns;
pub mod settlement;

pub use inventory::InventoryItem;
pub use order::{Order, OrderItem, OrderLines};
pub use returns::{over_returned, ReturnEvent, ReturnLine, ReturnQuantities};
pub use settlement::is_settled;
