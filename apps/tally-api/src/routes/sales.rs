//! # Sale Routes

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tracing::debug;

use tally_core::CreatedSale;

use crate::error::ApiError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(add_sale))
}

/// `POST /sales`
///
/// Body: `[{ "productId": 1, "quantity": 2 }, ...]`
///
/// Answers `201` with `{ id, itemsSold }`, or the service's code with
/// `{ message }`. Bodies that are not JSON at all are a plain `400`.
pub async fn add_sale(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedSale>), ApiError> {
    let Json(body) = body.map_err(|rejection| {
        debug!(error = %rejection, "Unreadable sale request body");
        ApiError::bad_request(rejection.body_text())
    })?;

    let sale = state.sales.add_sale(&body).await?;

    Ok((StatusCode::CREATED, Json(sale)))
}
