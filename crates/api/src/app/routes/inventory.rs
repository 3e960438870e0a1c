use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use sqlx::SqlitePool;

use lendtrack_core::ItemId;
use lendtrack_lending::InventoryItem;
use lendtrack_store::ledger;

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/inventory", get(list_inventory))
        .route("/inventory/:id", put(upsert_item))
}

pub async fn list_inventory(Extension(pool): Extension<SqlitePool>) -> axum::response::Response {
    match ledger::list_inventory(&pool).await {
        Ok(items) => {
            let items: Vec<_> = items.iter().map(dto::inventory_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn upsert_item(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpsertItemRequest>,
) -> axum::response::Response {
    let item = InventoryItem {
        item_id: ItemId::new(id),
        title: body.title,
        img: body.img,
        description: body.description,
        stock: body.stock,
    };

    match ledger::upsert_item(&pool, &item).await {
        Ok(()) => (StatusCode::OK, Json(dto::inventory_to_json(&item))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
