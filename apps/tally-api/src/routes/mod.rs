//! HTTP routes.

pub mod health;
pub mod sales;

use axum::Router;

use crate::AppState;

/// Builds the full router with state attached.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/sales", sales::router())
        .nest("/health", health::router())
        .with_state(state)
}
