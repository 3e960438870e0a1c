//! Pool construction and schema bootstrap.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error::StoreResult;

/// Open a connection pool with foreign-key enforcement on.
///
/// `url` is a sqlx SQLite URL, e.g. `sqlite://lendtrack.db?mode=rwc` or
/// `sqlite::memory:`.
pub async fn connect(url: &str) -> StoreResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?.foreign_keys(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    Ok(pool)
}

/// Create all tables if they do not exist yet.
///
/// `orders`/`order_items` hold active orders, `archive_orders`/`archive_items`
/// their settled copies, `returns`/`return_items` the append-only return log.
/// The return log carries no foreign key to `orders` on purpose: return rows
/// outlive their order once it is archived.
pub async fn init_schema(pool: &SqlitePool) -> StoreResult<()> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS inventory (
            itemId      TEXT PRIMARY KEY,
            title       TEXT NOT NULL,
            img         TEXT,
            description TEXT NOT NULL DEFAULT '',
            stock       INTEGER NOT NULL DEFAULT 0
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            orderId   INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            name      TEXT NOT NULL,
            phone     TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS order_items (
            orderId  INTEGER NOT NULL REFERENCES orders(orderId),
            itemId   TEXT NOT NULL,
            lent     INTEGER NOT NULL,
            returned INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (orderId, itemId)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS returns (
            returnId  INTEGER PRIMARY KEY AUTOINCREMENT,
            orderId   INTEGER NOT NULL,
            timestamp TEXT NOT NULL,
            name      TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS return_items (
            returnId INTEGER NOT NULL REFERENCES returns(returnId),
            itemId   TEXT NOT NULL,
            returned INTEGER NOT NULL,
            PRIMARY KEY (returnId, itemId)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS archive_orders (
            orderId   INTEGER PRIMARY KEY,
            timestamp TEXT NOT NULL,
            name      TEXT NOT NULL,
            phone     TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS archive_items (
            orderId  INTEGER NOT NULL REFERENCES archive_orders(orderId),
            itemId   TEXT NOT NULL,
            lent     INTEGER NOT NULL,
            returned INTEGER NOT NULL,
            PRIMARY KEY (orderId, itemId)
        )
        "#,
    ];

    for statement in statements {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::testutil::memory_pool;

    #[tokio::test]
    async fn init_schema_is_idempotent() {
        let pool = memory_pool().await;
        // memory_pool already applied the schema once.
        crate::db::init_schema(&pool).await.expect("second apply");
    }
}
