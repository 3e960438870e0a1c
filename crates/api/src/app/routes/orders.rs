use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sqlx::SqlitePool;

use lendtrack_core::{ItemId, OrderId};
use lendtrack_lending::OrderLines;
use lendtrack_store::{archive, orders};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/archived", get(get_archived_order))
}

pub async fn create_order(
    Extension(pool): Extension<SqlitePool>,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    let lines = body
        .items
        .into_iter()
        .map(|(item_id, qty)| (ItemId::new(item_id), qty))
        .collect();
    let lines = match OrderLines::filtered(lines) {
        Ok(lines) => lines,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match orders::create_order(&pool, &body.name, &body.phone, &lines).await {
        Ok(order_id) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "order_id": order_id.as_i64() })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_orders(Extension(pool): Extension<SqlitePool>) -> axum::response::Response {
    let active = match orders::list_orders(&pool).await {
        Ok(orders) => orders,
        Err(e) => return errors::store_error_to_response(e),
    };
    let archived = match archive::list_archived_orders(&pool).await {
        Ok(orders) => orders,
        Err(e) => return errors::store_error_to_response(e),
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "active": active.iter().map(dto::order_to_json).collect::<Vec<_>>(),
            "archived": archived.iter().map(dto::order_to_json).collect::<Vec<_>>(),
        })),
    )
        .into_response()
}

pub async fn get_order(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let order_id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let order = match orders::get_order(&pool, order_id).await {
        Ok(Some(order)) => order,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "order not found"),
        Err(e) => return errors::store_error_to_response(e),
    };
    let items = match orders::list_order_items(&pool, order_id).await {
        Ok(items) => items,
        Err(e) => return errors::store_error_to_response(e),
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "order": dto::order_to_json(&order),
            "items": items.iter().map(dto::order_item_to_json).collect::<Vec<_>>(),
        })),
    )
        .into_response()
}

pub async fn get_archived_order(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let order_id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let order = match archive::get_archived_order(&pool, order_id).await {
        Ok(Some(order)) => order,
        Ok(None) => {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "archived order not found")
        }
        Err(e) => return errors::store_error_to_response(e),
    };
    let items = match archive::list_archived_items(&pool, order_id).await {
        Ok(items) => items,
        Err(e) => return errors::store_error_to_response(e),
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "order": dto::order_to_json(&order),
            "items": items.iter().map(dto::order_item_to_json).collect::<Vec<_>>(),
        })),
    )
        .into_response()
}
