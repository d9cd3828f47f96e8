//! Sales order routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use oneflow_db::repositories::sales_order::{
    CreateSalesOrderInput, SalesOrderFilter, SalesOrderRepository, SalesOrderWithLines,
};
use oneflow_db::InvoiceRepository;
use oneflow_db::entities::{sales_order_lines, sales_orders, sea_orm_active_enums::SalesOrderStatus};

use super::{OrderLineRequest, error_response};
use crate::AppState;
use crate::routes::invoices::InvoiceResponse;

/// Creates the sales order routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sales-orders", get(list_sales_orders))
        .route("/sales-orders", post(create_sales_order))
        .route("/sales-orders/{id}", get(get_sales_order))
        .route("/sales-orders/{id}/invoice", post(invoice_sales_order))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing sales orders.
#[derive(Debug, Deserialize)]
pub struct ListSalesOrdersQuery {
    /// Filter by owning project.
    pub project_id: Option<Uuid>,
    /// Filter by status.
    pub status: Option<String>,
}

/// Request body for creating a sales order.
#[derive(Debug, Deserialize)]
pub struct CreateSalesOrderRequest {
    /// Owning project, if any.
    pub project_id: Option<Uuid>,
    /// Customer reference, if any.
    pub customer_id: Option<Uuid>,
    /// Customer display name.
    pub customer_name: Option<String>,
    /// Currency tag; defaults to USD.
    pub currency: Option<String>,
    /// Raw order lines.
    #[serde(default)]
    pub lines: Vec<OrderLineRequest>,
}

/// Response for a sales order with its lines.
#[derive(Debug, Serialize)]
pub struct SalesOrderResponse {
    /// Order ID.
    pub id: Uuid,
    /// Document number.
    pub number: String,
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Customer reference.
    pub customer_id: Option<Uuid>,
    /// Customer display name.
    pub customer_name: Option<String>,
    /// Status.
    pub status: String,
    /// Order total.
    pub total_amount: String,
    /// Currency tag.
    pub currency: String,
    /// Created at timestamp.
    pub created_at: String,
    /// Order lines.
    pub lines: Vec<OrderLineResponse>,
}

/// Response for an order line.
#[derive(Debug, Serialize)]
pub struct OrderLineResponse {
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

/// Response for a sales order list item (without lines).
#[derive(Debug, Serialize)]
pub struct SalesOrderListItem {
    /// Order ID.
    pub id: Uuid,
    /// Document number.
    pub number: String,
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Customer display name.
    pub customer_name: Option<String>,
    /// Status.
    pub status: String,
    /// Order total.
    pub total_amount: String,
    /// Currency tag.
    pub currency: String,
    /// Created at timestamp.
    pub created_at: String,
}

impl From<SalesOrderWithLines> for SalesOrderResponse {
    fn from(value: SalesOrderWithLines) -> Self {
        let SalesOrderWithLines { order, lines } = value;
        Self {
            id: order.id,
            number: order.number,
            project_id: order.project_id,
            customer_id: order.customer_id,
            customer_name: order.customer_name,
            status: status_to_string(&order.status),
            total_amount: order.total_amount.to_string(),
            currency: order.currency,
            created_at: order.created_at.to_rfc3339(),
            lines: lines.into_iter().map(line_response).collect(),
        }
    }
}

fn line_response(line: sales_order_lines::Model) -> OrderLineResponse {
    OrderLineResponse {
        id: line.id,
        product_id: line.product_id,
        description: line.description,
        quantity: line.quantity.to_string(),
        unit_price: line.unit_price.to_string(),
        amount: line.amount.to_string(),
    }
}

fn list_item(order: sales_orders::Model) -> SalesOrderListItem {
    SalesOrderListItem {
        id: order.id,
        number: order.number,
        project_id: order.project_id,
        customer_name: order.customer_name,
        status: status_to_string(&order.status),
        total_amount: order.total_amount.to_string(),
        currency: order.currency,
        created_at: order.created_at.to_rfc3339(),
    }
}

fn status_to_string(status: &SalesOrderStatus) -> String {
    oneflow_core::order::SalesOrderStatus::from(status.clone())
        .as_str()
        .to_string()
}

fn string_to_status(status: &str) -> Option<SalesOrderStatus> {
    match status {
        "draft" => Some(SalesOrderStatus::Draft),
        "posted" => Some(SalesOrderStatus::Posted),
        "paid" => Some(SalesOrderStatus::Paid),
        "cancelled" => Some(SalesOrderStatus::Cancelled),
        _ => None,
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/sales-orders` - List sales orders with filters.
async fn list_sales_orders(
    State(state): State<AppState>,
    Query(query): Query<ListSalesOrdersQuery>,
) -> impl IntoResponse {
    let repo = SalesOrderRepository::new((*state.db).clone());

    let filter = SalesOrderFilter {
        project_id: query.project_id,
        status: query.status.as_deref().and_then(string_to_status),
    };

    match repo.list(filter).await {
        Ok(orders) => {
            let items: Vec<SalesOrderListItem> = orders.into_iter().map(list_item).collect();
            (StatusCode::OK, Json(serde_json::json!({ "sales_orders": items }))).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// POST `/sales-orders` - Create a sales order with lines.
async fn create_sales_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateSalesOrderRequest>,
) -> impl IntoResponse {
    let repo = SalesOrderRepository::new((*state.db).clone());

    let input = CreateSalesOrderInput {
        project_id: payload.project_id,
        customer_id: payload.customer_id,
        customer_name: payload.customer_name,
        currency: payload.currency,
        lines: payload.lines.into_iter().map(Into::into).collect(),
    };

    match repo.create(input).await {
        Ok(order) => {
            (StatusCode::CREATED, Json(SalesOrderResponse::from(order))).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// GET `/sales-orders/{id}` - Get a sales order with its lines.
async fn get_sales_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = SalesOrderRepository::new((*state.db).clone());

    match repo.get(id).await {
        Ok(order) => (StatusCode::OK, Json(SalesOrderResponse::from(order))).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST `/sales-orders/{id}/invoice` - Derive an invoice from a sales order.
async fn invoice_sales_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = InvoiceRepository::new((*state.db).clone());

    match repo.create_from_sales_order(id).await {
        Ok(invoice) => {
            (StatusCode::CREATED, Json(InvoiceResponse::from(invoice))).into_response()
        }
        Err(e) => error_response(e),
    }
}
