//! The append-only Return Log and returned-total recomputation.

use chrono::{DateTime, Utc};
use lendtrack_core::{ItemId, OrderId, ReturnId};
use lendtrack_lending::{ReturnEvent, ReturnLine, ReturnQuantities};
use sqlx::{Row, SqlitePool};

use crate::error::StoreResult;

/// Record one return event and its lines, atomically.
///
/// One row in `returns`, plus one row in `return_items` per entry with a
/// quantity > 0; zero quantities are skipped silently, so an all-zero
/// submission still leaves an event row behind. The caller must run
/// [`recompute_returned`] for the order afterwards; the log and the order
/// items are linked only by that explicit step.
pub async fn record_return(
    pool: &SqlitePool,
    order_id: OrderId,
    name: &str,
    quantities: &ReturnQuantities,
) -> StoreResult<ReturnId> {
    let mut tx = pool.begin().await?;

    let timestamp: DateTime<Utc> = Utc::now();
    let result = sqlx::query("INSERT INTO returns (orderId, timestamp, name) VALUES (?, ?, ?)")
        .bind(order_id.as_i64())
        .bind(timestamp)
        .bind(name)
        .execute(&mut *tx)
        .await?;
    let return_id = ReturnId::new(result.last_insert_rowid());

    for (item_id, qty) in quantities.positive() {
        sqlx::query("INSERT INTO return_items (returnId, itemId, returned) VALUES (?, ?, ?)")
            .bind(return_id.as_i64())
            .bind(item_id.as_str())
            .bind(qty)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    tracing::info!(
        order_id = order_id.as_i64(),
        return_id = return_id.as_i64(),
        "return recorded"
    );
    Ok(return_id)
}

/// Overwrite every order item's `returned` with the sum of its return lines.
///
/// Sums across the full return history (no rows = 0), so it is idempotent
/// and independent of insertion order. A nonexistent order matches zero
/// order items and is a no-op.
pub async fn recompute_returned(pool: &SqlitePool, order_id: OrderId) -> StoreResult<()> {
    let mut tx = pool.begin().await?;

    let item_ids: Vec<String> =
        sqlx::query("SELECT itemId FROM order_items WHERE orderId = ?")
            .bind(order_id.as_i64())
            .fetch_all(&mut *tx)
            .await?
            .iter()
            .map(|row| row.try_get::<String, _>("itemId"))
            .collect::<Result<_, _>>()?;

    for item_id in item_ids {
        let row = sqlx::query(
            r#"
            SELECT COALESCE(SUM(ri.returned), 0) AS total_returned
            FROM return_items ri
            JOIN returns r ON ri.returnId = r.returnId
            WHERE r.orderId = ? AND ri.itemId = ?
            "#,
        )
        .bind(order_id.as_i64())
        .bind(&item_id)
        .fetch_one(&mut *tx)
        .await?;
        let total_returned: i64 = row.try_get("total_returned")?;

        sqlx::query("UPDATE order_items SET returned = ? WHERE orderId = ? AND itemId = ?")
            .bind(total_returned)
            .bind(order_id.as_i64())
            .bind(&item_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Return history for an order, oldest event first, each with its lines.
///
/// Reads the log as-is; works for archived orders too, since archival leaves
/// the log untouched.
pub async fn list_returns(
    pool: &SqlitePool,
    order_id: OrderId,
) -> StoreResult<Vec<(ReturnEvent, Vec<ReturnLine>)>> {
    let event_rows = sqlx::query(
        "SELECT returnId, orderId, timestamp, name FROM returns WHERE orderId = ? ORDER BY returnId",
    )
    .bind(order_id.as_i64())
    .fetch_all(pool)
    .await?;

    let mut history = Vec::with_capacity(event_rows.len());
    for row in &event_rows {
        let event = ReturnEvent {
            return_id: ReturnId::new(row.try_get("returnId")?),
            order_id: OrderId::new(row.try_get("orderId")?),
            timestamp: row.try_get("timestamp")?,
            name: row.try_get("name")?,
        };

        let line_rows = sqlx::query(
            "SELECT returnId, itemId, returned FROM return_items WHERE returnId = ? ORDER BY itemId",
        )
        .bind(event.return_id.as_i64())
        .fetch_all(pool)
        .await?;
        let lines = line_rows
            .iter()
            .map(|line| {
                Ok::<_, sqlx::Error>(ReturnLine {
                    return_id: ReturnId::new(line.try_get("returnId")?),
                    item_id: ItemId::new(line.try_get::<String, _>("itemId")?),
                    returned: line.try_get("returned")?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        history.push((event, lines));
    }

    Ok(history)
}
