//! Purchase order routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use oneflow_core::billing::CreateBillInput;
use oneflow_db::VendorBillRepository;
use oneflow_db::entities::{
    purchase_order_lines, purchase_orders, sea_orm_active_enums::PurchaseOrderStatus,
};
use oneflow_db::repositories::purchase_order::{
    CreatePurchaseOrderInput, PurchaseOrderFilter, PurchaseOrderRepository,
    PurchaseOrderWithLines,
};

use super::{OrderLineRequest, error_response};
use crate::AppState;
use crate::routes::vendor_bills::VendorBillResponse;

/// Creates the purchase order routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/purchase-orders", get(list_purchase_orders))
        .route("/purchase-orders", post(create_purchase_order))
        .route("/purchase-orders/{id}", get(get_purchase_order))
        .route("/purchase-orders/{id}/bill", post(bill_purchase_order))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing purchase orders.
#[derive(Debug, Deserialize)]
pub struct ListPurchaseOrdersQuery {
    /// Filter by owning project.
    pub project_id: Option<Uuid>,
    /// Filter by status.
    pub status: Option<String>,
}

/// Request body for creating a purchase order.
#[derive(Debug, Deserialize)]
pub struct CreatePurchaseOrderRequest {
    /// Owning project, if any.
    pub project_id: Option<Uuid>,
    /// Vendor reference, if any.
    pub vendor_id: Option<Uuid>,
    /// Vendor display name.
    pub vendor_name: Option<String>,
    /// Currency tag; defaults to USD.
    pub currency: Option<String>,
    /// Raw order lines.
    #[serde(default)]
    pub lines: Vec<OrderLineRequest>,
}

/// Response for a purchase order with its lines.
#[derive(Debug, Serialize)]
pub struct PurchaseOrderResponse {
    /// Order ID.
    pub id: Uuid,
    /// Document number.
    pub number: String,
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Vendor reference.
    pub vendor_id: Option<Uuid>,
    /// Vendor display name.
    pub vendor_name: Option<String>,
    /// Status.
    pub status: String,
    /// Order total.
    pub total_amount: String,
    /// Currency tag.
    pub currency: String,
    /// Created at timestamp.
    pub created_at: String,
    /// Order lines.
    pub lines: Vec<PurchaseOrderLineResponse>,
}

/// Response for a purchase order line.
#[derive(Debug, Serialize)]
pub struct PurchaseOrderLineResponse {
    /// Line ID.
    pub id: Uuid,
    /// Product reference.
    pub product_id: Option<Uuid>,
    /// Line description.
    pub description: String,
    /// Quantity.
    pub quantity: String,
    /// Price per unit.
    pub unit_price: String,
    /// Line amount.
    pub amount: String,
}

/// Response for a purchase order list item (without lines).
#[derive(Debug, Serialize)]
pub struct PurchaseOrderListItem {
    /// Order ID.
    pub id: Uuid,
    /// Document number.
    pub number: String,
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Vendor display name.
    pub vendor_name: Option<String>,
    /// Status.
    pub status: String,
    /// Order total.
    pub total_amount: String,
    /// Currency tag.
    pub currency: String,
    /// Created at timestamp.
    pub created_at: String,
}

impl From<PurchaseOrderWithLines> for PurchaseOrderResponse {
    fn from(value: PurchaseOrderWithLines) -> Self {
        let PurchaseOrderWithLines { order, lines } = value;
        Self {
            id: order.id,
            number: order.number,
            project_id: order.project_id,
            vendor_id: order.vendor_id,
            vendor_name: order.vendor_name,
            status: status_to_string(&order.status),
            total_amount: order.total_amount.to_string(),
            currency: order.currency,
            created_at: order.created_at.to_rfc3339(),
            lines: lines.into_iter().map(line_response).collect(),
        }
    }
}

fn line_response(line: purchase_order_lines::Model) -> PurchaseOrderLineResponse {
    PurchaseOrderLineResponse {
        id: line.id,
        product_id: line.product_id,
        description: line.description,
        quantity: line.quantity.to_string(),
        unit_price: line.unit_price.to_string(),
        amount: line.amount.to_string(),
    }
}

fn list_item(order: purchase_orders::Model) -> PurchaseOrderListItem {
    PurchaseOrderListItem {
        id: order.id,
        number: order.number,
        project_id: order.project_id,
        vendor_name: order.vendor_name,
        status: status_to_string(&order.status),
        total_amount: order.total_amount.to_string(),
        currency: order.currency,
        created_at: order.created_at.to_rfc3339(),
    }
}

fn status_to_string(status: &PurchaseOrderStatus) -> String {
    oneflow_core::order::PurchaseOrderStatus::from(status.clone())
        .as_str()
        .to_string()
}

fn string_to_status(status: &str) -> Option<PurchaseOrderStatus> {
    match status {
        "draft" => Some(PurchaseOrderStatus::Draft),
        "posted" => Some(PurchaseOrderStatus::Posted),
        "billed" => Some(PurchaseOrderStatus::Billed),
        "cancelled" => Some(PurchaseOrderStatus::Cancelled),
        _ => None,
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/purchase-orders` - List purchase orders with filters.
async fn list_purchase_orders(
    State(state): State<AppState>,
    Query(query): Query<ListPurchaseOrdersQuery>,
) -> impl IntoResponse {
    let repo = PurchaseOrderRepository::new((*state.db).clone());

    let filter = PurchaseOrderFilter {
        project_id: query.project_id,
        status: query.status.as_deref().and_then(string_to_status),
    };

    match repo.list(filter).await {
        Ok(orders) => {
            let items: Vec<PurchaseOrderListItem> = orders.into_iter().map(list_item).collect();
            (
                StatusCode::OK,
                Json(serde_json::json!({ "purchase_orders": items })),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

/// POST `/purchase-orders` - Create a purchase order with lines.
async fn create_purchase_order(
    State(state): State<AppState>,
    Json(payload): Json<CreatePurchaseOrderRequest>,
) -> impl IntoResponse {
    let repo = PurchaseOrderRepository::new((*state.db).clone());

    let input = CreatePurchaseOrderInput {
        project_id: payload.project_id,
        vendor_id: payload.vendor_id,
        vendor_name: payload.vendor_name,
        currency: payload.currency,
        lines: payload.lines.into_iter().map(Into::into).collect(),
    };

    match repo.create(input).await {
        Ok(order) => {
            (StatusCode::CREATED, Json(PurchaseOrderResponse::from(order))).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// GET `/purchase-orders/{id}` - Get a purchase order with its lines.
async fn get_purchase_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = PurchaseOrderRepository::new((*state.db).clone());

    match repo.get(id).await {
        Ok(order) => (StatusCode::OK, Json(PurchaseOrderResponse::from(order))).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST `/purchase-orders/{id}/bill` - Derive a vendor bill from a purchase order.
async fn bill_purchase_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateBillInput>,
) -> impl IntoResponse {
    let repo = VendorBillRepository::new((*state.db).clone());

    match repo.create_from_purchase_order(id, payload).await {
        Ok(bill) => (StatusCode::CREATED, Json(VendorBillResponse::from(bill))).into_response(),
        Err(e) => error_response(e),
    }
}
