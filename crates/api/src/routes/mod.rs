//! API route definitions.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use oneflow_core::order::OrderLineInput;
use oneflow_shared::AppError;
use oneflow_shared::types::RawAmount;

use crate::AppState;

pub mod audit;
pub mod health;
pub mod invoices;
pub mod purchase_orders;
pub mod sales_orders;
pub mod timesheets;
pub mod vendor_bills;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(sales_orders::routes())
        .merge(purchase_orders::routes())
        .merge(invoices::routes())
        .merge(vendor_bills::routes())
        .merge(timesheets::routes())
        .merge(audit::routes())
}

/// Maps an application error to an HTTP response.
pub(crate) fn error_response(err: impl Into<AppError>) -> Response {
    let err = err.into();
    if err.status_code() >= 500 {
        error!(error = %err, "request failed");
    }

    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string(),
        })),
    )
        .into_response()
}

/// Request body for a raw order line.
///
/// Accepts the field aliases legacy clients send (`product_name`/`name` for
/// the description, `price` for the unit price).
#[derive(Debug, Deserialize)]
pub struct OrderLineRequest {
    /// Line description.
    #[serde(alias = "product_name", alias = "name")]
    pub description: Option<String>,
    /// Quantity ordered.
    pub quantity: Option<RawAmount>,
    /// Price per unit.
    #[serde(alias = "price")]
    pub unit_price: Option<RawAmount>,
    /// Optional product reference.
    pub product_id: Option<Uuid>,
}

impl From<OrderLineRequest> for OrderLineInput {
    fn from(req: OrderLineRequest) -> Self {
        Self {
            description: req.description,
            quantity: req.quantity,
            unit_price: req.unit_price,
            product_id: req.product_id,
        }
    }
}
