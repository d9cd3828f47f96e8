//! Vendor bill routes.
//!
//! Bills are derived through `POST /purchase-orders/{id}/bill`; these routes
//! cover the read side.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use oneflow_db::VendorBillRepository;
use oneflow_db::entities::{
    bill_lines, sea_orm_active_enums::VendorBillStatus, vendor_bills,
};
use oneflow_db::repositories::vendor_bill::VendorBillWithLines;

use super::error_response;
use crate::AppState;

/// Creates the vendor bill routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/vendor-bills", get(list_vendor_bills))
        .route("/vendor-bills/{id}", get(get_vendor_bill))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing vendor bills.
#[derive(Debug, Deserialize)]
pub struct ListVendorBillsQuery {
    /// Filter by owning project.
    pub project_id: Option<Uuid>,
}

/// Response for a vendor bill with its lines.
#[derive(Debug, Serialize)]
pub struct VendorBillResponse {
    /// Bill ID.
    pub id: Uuid,
    /// Document number.
    pub number: String,
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Source purchase order.
    pub source_po_id: Option<Uuid>,
    /// Vendor reference.
    pub vendor_id: Option<Uuid>,
    /// Vendor display name.
    pub vendor_name: Option<String>,
    /// Status.
    pub status: String,
    /// Bill total.
    pub total_amount: String,
    /// Currency tag.
    pub currency: String,
    /// Payment due date.
    pub due_date: Option<String>,
    /// Notes.
    pub notes: Option<String>,
    /// Created at timestamp.
    pub created_at: String,
    /// Bill lines.
    pub lines: Vec<BillLineResponse>,
}

/// Response for a bill line.
#[derive(Debug, Serialize)]
pub struct BillLineResponse {
    /// Line ID.
    pub id: Uuid,
    /// Line description.
    pub description: String,
    /// Quantity.
    pub quantity: String,
    /// Price per unit.
    pub unit_price: String,
    /// Line amount.
    pub amount: String,
}

/// Response for a vendor bill list item (without lines).
#[derive(Debug, Serialize)]
pub struct VendorBillListItem {
    /// Bill ID.
    pub id: Uuid,
    /// Document number.
    pub number: String,
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Vendor display name.
    pub vendor_name: Option<String>,
    /// Status.
    pub status: String,
    /// Bill total.
    pub total_amount: String,
    /// Currency tag.
    pub currency: String,
    /// Created at timestamp.
    pub created_at: String,
}

impl From<VendorBillWithLines> for VendorBillResponse {
    fn from(value: VendorBillWithLines) -> Self {
        let VendorBillWithLines { bill, lines } = value;
        Self {
            id: bill.id,
            number: bill.number,
            project_id: bill.project_id,
            source_po_id: bill.source_po_id,
            vendor_id: bill.vendor_id,
            vendor_name: bill.vendor_name,
            status: status_to_string(&bill.status),
            total_amount: bill.total_amount.to_string(),
            currency: bill.currency,
            due_date: bill.due_date.map(|d| d.to_string()),
            notes: bill.notes,
            created_at: bill.created_at.to_rfc3339(),
            lines: lines.into_iter().map(line_response).collect(),
        }
    }
}

fn line_response(line: bill_lines::Model) -> BillLineResponse {
    BillLineResponse {
        id: line.id,
        description: line.description,
        quantity: line.quantity.to_string(),
        unit_price: line.unit_price.to_string(),
        amount: line.amount.to_string(),
    }
}

fn list_item(bill: vendor_bills::Model) -> VendorBillListItem {
    VendorBillListItem {
        id: bill.id,
        number: bill.number,
        project_id: bill.project_id,
        vendor_name: bill.vendor_name,
        status: status_to_string(&bill.status),
        total_amount: bill.total_amount.to_string(),
        currency: bill.currency,
        created_at: bill.created_at.to_rfc3339(),
    }
}

fn status_to_string(status: &VendorBillStatus) -> String {
    oneflow_core::billing::VendorBillStatus::from(status.clone())
        .as_str()
        .to_string()
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/vendor-bills` - List vendor bills.
async fn list_vendor_bills(
    State(state): State<AppState>,
    Query(query): Query<ListVendorBillsQuery>,
) -> impl IntoResponse {
    let repo = VendorBillRepository::new((*state.db).clone());

    match repo.list(query.project_id).await {
        Ok(bills) => {
            let items: Vec<VendorBillListItem> = bills.into_iter().map(list_item).collect();
            (
                StatusCode::OK,
                Json(serde_json::json!({ "vendor_bills": items })),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

/// GET `/vendor-bills/{id}` - Get a vendor bill with its lines.
async fn get_vendor_bill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = VendorBillRepository::new((*state.db).clone());

    match repo.get(id).await {
        Ok(bill) => (StatusCode::OK, Json(VendorBillResponse::from(bill))).into_response(),
        Err(e) => error_response(e),
    }
}
