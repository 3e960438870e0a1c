//! Inventory Ledger: current stock counts per item.

use lendtrack_core::ItemId;
use lendtrack_lending::InventoryItem;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::error::StoreResult;

/// Add a signed `delta` to the stock of `item_id`.
///
/// Positive delta = restock (items returned); negative = deduction (items
/// newly lent). No bounds checking, so stock can go negative, and an unknown
/// `item_id` silently matches zero rows. Generic over the executor so order
/// creation can run it inside its own transaction.
pub async fn adjust_stock<'e, E>(executor: E, item_id: &ItemId, delta: i64) -> StoreResult<()>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    sqlx::query("UPDATE inventory SET stock = stock + ? WHERE itemId = ?")
        .bind(delta)
        .bind(item_id.as_str())
        .execute(executor)
        .await?;
    Ok(())
}

/// Insert or replace an inventory item.
pub async fn upsert_item(pool: &SqlitePool, item: &InventoryItem) -> StoreResult<()> {
    sqlx::query(
        r#"
        INSERT INTO inventory (itemId, title, img, description, stock)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT (itemId)
        DO UPDATE SET
            title = excluded.title,
            img = excluded.img,
            description = excluded.description,
            stock = excluded.stock
        "#,
    )
    .bind(item.item_id.as_str())
    .bind(&item.title)
    .bind(&item.img)
    .bind(&item.description)
    .bind(item.stock)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_item(pool: &SqlitePool, item_id: &ItemId) -> StoreResult<Option<InventoryItem>> {
    let row = sqlx::query("SELECT itemId, title, img, description, stock FROM inventory WHERE itemId = ?")
        .bind(item_id.as_str())
        .fetch_optional(pool)
        .await?;
    row.map(|r| item_from_row(&r)).transpose().map_err(Into::into)
}

pub async fn list_inventory(pool: &SqlitePool) -> StoreResult<Vec<InventoryItem>> {
    let rows = sqlx::query("SELECT itemId, title, img, description, stock FROM inventory ORDER BY itemId")
        .fetch_all(pool)
        .await?;
    rows.iter()
        .map(item_from_row)
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

fn item_from_row(row: &SqliteRow) -> Result<InventoryItem, sqlx::Error> {
    Ok(InventoryItem {
        item_id: ItemId::new(row.try_get::<String, _>("itemId")?),
        title: row.try_get("title")?,
        img: row.try_get("img")?,
        description: row.try_get("description")?,
        stock: row.try_get("stock")?,
    })
}
