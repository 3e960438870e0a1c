//! Active orders and their line items.

use chrono::{DateTime, Utc};
use lendtrack_core::{ItemId, OrderId};
use lendtrack_lending::{Order, OrderItem, OrderLines};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::error::StoreResult;
use crate::ledger;

/// Create an order: one order row, one item row per line (`lent` = quantity,
/// `returned` = 0), and a stock deduction per line, all in one transaction.
///
/// There is no overselling check; stock may go negative. `lines` is already
/// validated (every quantity >= 1).
pub async fn create_order(
    pool: &SqlitePool,
    name: &str,
    phone: &str,
    lines: &OrderLines,
) -> StoreResult<OrderId> {
    let mut tx = pool.begin().await?;

    let timestamp: DateTime<Utc> = Utc::now();
    let result = sqlx::query("INSERT INTO orders (timestamp, name, phone) VALUES (?, ?, ?)")
        .bind(timestamp)
        .bind(name)
        .bind(phone)
        .execute(&mut *tx)
        .await?;
    let order_id = OrderId::new(result.last_insert_rowid());

    for (item_id, qty) in lines.iter() {
        sqlx::query("INSERT INTO order_items (orderId, itemId, lent, returned) VALUES (?, ?, ?, 0)")
            .bind(order_id.as_i64())
            .bind(item_id.as_str())
            .bind(qty)
            .execute(&mut *tx)
            .await?;
        ledger::adjust_stock(&mut *tx, item_id, -qty).await?;
    }

    tx.commit().await?;
    tracing::info!(order_id = order_id.as_i64(), lines = lines.len(), "order created");
    Ok(order_id)
}

pub async fn get_order(pool: &SqlitePool, order_id: OrderId) -> StoreResult<Option<Order>> {
    let row = sqlx::query("SELECT orderId, timestamp, name, phone FROM orders WHERE orderId = ?")
        .bind(order_id.as_i64())
        .fetch_optional(pool)
        .await?;
    row.map(|r| order_from_row(&r)).transpose().map_err(Into::into)
}

/// Active orders, newest first.
pub async fn list_orders(pool: &SqlitePool) -> StoreResult<Vec<Order>> {
    let rows = sqlx::query("SELECT orderId, timestamp, name, phone FROM orders ORDER BY orderId DESC")
        .fetch_all(pool)
        .await?;
    rows.iter()
        .map(order_from_row)
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

pub async fn list_order_items(pool: &SqlitePool, order_id: OrderId) -> StoreResult<Vec<OrderItem>> {
    let rows = sqlx::query(
        "SELECT orderId, itemId, lent, returned FROM order_items WHERE orderId = ? ORDER BY itemId",
    )
    .bind(order_id.as_i64())
    .fetch_all(pool)
    .await?;
    rows.iter()
        .map(order_item_from_row)
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

pub(crate) fn order_from_row(row: &SqliteRow) -> Result<Order, sqlx::Error> {
    Ok(Order {
        order_id: OrderId::new(row.try_get("orderId")?),
        timestamp: row.try_get("timestamp")?,
        name: row.try_get("name")?,
        phone: row.try_get("phone")?,
    })
}

pub(crate) fn order_item_from_row(row: &SqliteRow) -> Result<OrderItem, sqlx::Error> {
    Ok(OrderItem {
        order_id: OrderId::new(row.try_get("orderId")?),
        item_id: ItemId::new(row.try_get::<String, _>("itemId")?),
        lent: row.try_get("lent")?,
        returned: row.try_get("returned")?,
    })
}
