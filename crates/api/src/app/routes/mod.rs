use axum::routing::get;
use axum::Router;

pub mod inventory;
pub mod orders;
pub mod returns;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .merge(inventory::router())
        .merge(orders::router())
        .merge(returns::router())
}
