//! Shared helpers for store tests.

use std::str::FromStr;

use lendtrack_lending::InventoryItem;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// In-memory database with the full schema applied.
///
/// Capped at one connection and never recycled: every new connection to
/// `sqlite::memory:` would otherwise get its own fresh database.
pub(crate) async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("parse sqlite url")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("open in-memory sqlite");
    crate::db::init_schema(&pool).await.expect("apply schema");
    pool
}

pub(crate) fn item(item_id: &str, stock: i64) -> InventoryItem {
    InventoryItem {
        item_id: item_id.into(),
        title: item_id.to_uppercase(),
        img: None,
        description: String::new(),
        stock,
    }
}

pub(crate) async fn seed_items(pool: &SqlitePool, items: &[(&str, i64)]) {
    for (id, stock) in items {
        crate::ledger::upsert_item(pool, &item(id, *stock))
            .await
            .expect("seed item");
    }
}
