//! HTTP API application wiring (Axum router).
//!
//! This folder is structured like:
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use axum::{Extension, Router};
use sqlx::SqlitePool;
use tower::ServiceBuilder;

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(pool: SqlitePool) -> Router {
    routes::router()
        .layer(Extension(pool))
        .layer(ServiceBuilder::new())
}
