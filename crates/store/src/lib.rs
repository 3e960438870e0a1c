//! `lendtrack-store` — SQLite persistence for the lending tracker.
//!
//! Layout:
//! - `db.rs`: pool construction and schema bootstrap
//! - `ledger.rs`: inventory stock (the Inventory Ledger)
//! - `orders.rs`: active orders and their items
//! - `returns.rs`: the append-only Return Log and returned-total recomputation
//! - `archive.rs`: the settlement sweep and the Archive Store
//!
//! Every operation takes an explicit handle (pool or transaction); there is
//! no ambient connection. Multi-row writes that must land together (order
//! creation, return recording, archiving one order) run inside a single
//! transaction.
//!
//! Concurrency: one pool shared across callers, no row locking and no
//! optimistic-concurrency checks beyond what SQLite provides per statement.
//! Two concurrent returns against the same order can both read a stale
//! remaining count and both be accepted. Acceptable for single-operator use
//! only; concurrent deployments need per-order serialization in front of
//! this crate.

pub mod archive;
pub mod db;
pub mod error;
pub mod ledger;
pub mod orders;
pub mod returns;

#[cfg(test)]
pub(crate) mod testutil;

pub use db::{connect, init_schema};
pub use error::{StoreError, StoreResult};
pub use sqlx::SqlitePool;
