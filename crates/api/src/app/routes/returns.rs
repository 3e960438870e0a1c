use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use sqlx::SqlitePool;

use lendtrack_core::{ItemId, OrderId};
use lendtrack_lending::{over_returned, ReturnQuantities};
use lendtrack_store::{archive, ledger, orders, returns};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/orders/:id/returns", post(record_return).get(list_returns))
}

/// The full return workflow: warn on over-return unless confirmed, record
/// the return event, recompute returned totals, restock, then run the
/// settlement sweep over all active orders.
pub async fn record_return(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
    Json(body): Json<dto::RecordReturnRequest>,
) -> axum::response::Response {
    let order_id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let quantities = body
        .items
        .into_iter()
        .map(|(item_id, qty)| (ItemId::new(item_id), qty))
        .collect();
    let quantities = match ReturnQuantities::new(quantities) {
        Ok(quantities) => quantities,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match orders::get_order(&pool, order_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "order not found"),
        Err(e) => return errors::store_error_to_response(e),
    }

    let items = match orders::list_order_items(&pool, order_id).await {
        Ok(items) => items,
        Err(e) => return errors::store_error_to_response(e),
    };

    // Over-returns are a warning, not a rejection: the caller decides.
    let flagged = over_returned(&items, &quantities);
    if !flagged.is_empty() && !body.confirm {
        return (
            StatusCode::CONFLICT,
            Json(serde_json::json!({
                "error": "over_return",
                "message": "requested quantities exceed remaining lent quantities",
                "items": flagged,
            })),
        )
            .into_response();
    }
    if !flagged.is_empty() {
        tracing::warn!(
            order_id = order_id.as_i64(),
            items = ?flagged,
            "over-return confirmed by caller"
        );
    }

    let return_id = match returns::record_return(&pool, order_id, &body.name, &quantities).await {
        Ok(return_id) => return_id,
        Err(e) => return errors::store_error_to_response(e),
    };

    if let Err(e) = returns::recompute_returned(&pool, order_id).await {
        return errors::store_error_to_response(e);
    }

    for (item_id, qty) in quantities.positive() {
        if let Err(e) = ledger::adjust_stock(&pool, item_id, qty).await {
            return errors::store_error_to_response(e);
        }
    }

    let archived = match archive::archive_settled_orders(&pool).await {
        Ok(archived) => archived,
        Err(e) => return errors::store_error_to_response(e),
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "return_id": return_id.as_i64(),
            "archived": archived.contains(&order_id),
        })),
    )
        .into_response()
}

/// Return history, straight from the append-only log. Works for archived
/// orders too, which is why there is no active-order lookup here.
pub async fn list_returns(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let order_id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match returns::list_returns(&pool, order_id).await {
        Ok(history) => {
            let history: Vec<_> = history
                .iter()
                .map(|(event, lines)| dto::return_event_to_json(event, lines))
                .collect();
            (StatusCode::OK, Json(serde_json::json!({ "returns": history }))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
