//! Customer invoice routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use oneflow_core::invoice::ManualInvoiceInput;
use oneflow_db::InvoiceRepository;
use oneflow_db::entities::{
    customer_invoices, invoice_lines, sea_orm_active_enums::InvoiceStatus,
};
use oneflow_db::repositories::invoice::{
    InvoiceFilter, InvoiceWithLines, TimesheetInvoiceResult,
};

use super::error_response;
use crate::AppState;

/// Creates the invoice routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/invoices", get(list_invoices))
        .route("/invoices", post(create_invoice))
        .route("/invoices/from-timesheets", post(create_from_timesheets))
        .route("/invoices/{id}", get(get_invoice))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing invoices.
#[derive(Debug, Deserialize)]
pub struct ListInvoicesQuery {
    /// Filter by owning project.
    pub project_id: Option<Uuid>,
    /// Filter by status.
    pub status: Option<String>,
}

/// Request body for deriving an invoice from timesheets.
#[derive(Debug, Deserialize)]
pub struct InvoiceFromTimesheetsRequest {
    /// The project the timesheets belong to.
    pub project_id: Uuid,
    /// The timesheets to invoice.
    #[serde(default)]
    pub timesheet_ids: Vec<Uuid>,
}

/// Response for an invoice with its lines.
#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    /// Invoice ID.
    pub id: Uuid,
    /// Document number.
    pub number: String,
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Source sales order.
    pub source_so_id: Option<Uuid>,
    /// Status.
    pub status: String,
    /// Invoice total.
    pub total_amount: String,
    /// Currency tag.
    pub currency: String,
    /// Payment due date.
    pub due_date: Option<String>,
    /// Notes.
    pub notes: Option<String>,
    /// Created at timestamp.
    pub created_at: String,
    /// Invoice lines.
    pub lines: Vec<InvoiceLineResponse>,
}

/// Response for an invoice line.
#[derive(Debug, Serialize)]
pub struct InvoiceLineResponse {
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
    /// Source timesheet.
    pub timesheet_id: Option<Uuid>,
    /// Source expense.
    pub expense_id: Option<Uuid>,
}

/// Response for an invoice derived from timesheets.
#[derive(Debug, Serialize)]
pub struct TimesheetInvoiceResponse {
    /// The created invoice with its lines.
    #[serde(flatten)]
    pub invoice: InvoiceResponse,
    /// Number of timesheets marked invoiced.
    pub timesheets_invoiced: usize,
}

/// Response for an invoice list item (without lines).
#[derive(Debug, Serialize)]
pub struct InvoiceListItem {
    /// Invoice ID.
    pub id: Uuid,
    /// Document number.
    pub number: String,
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Status.
    pub status: String,
    /// Invoice total.
    pub total_amount: String,
    /// Currency tag.
    pub currency: String,
    /// Created at timestamp.
    pub created_at: String,
}

impl From<InvoiceWithLines> for InvoiceResponse {
    fn from(value: InvoiceWithLines) -> Self {
        let InvoiceWithLines { invoice, lines } = value;
        Self {
            id: invoice.id,
            number: invoice.number,
            project_id: invoice.project_id,
            source_so_id: invoice.source_so_id,
            status: status_to_string(&invoice.status),
            total_amount: invoice.total_amount.to_string(),
            currency: invoice.currency,
            due_date: invoice.due_date.map(|d| d.to_string()),
            notes: invoice.notes,
            created_at: invoice.created_at.to_rfc3339(),
            lines: lines.into_iter().map(line_response).collect(),
        }
    }
}

fn line_response(line: invoice_lines::Model) -> InvoiceLineResponse {
    InvoiceLineResponse {
        id: line.id,
        description: line.description,
        quantity: line.quantity.to_string(),
        unit_price: line.unit_price.to_string(),
        amount: line.amount.to_string(),
        timesheet_id: line.timesheet_id,
        expense_id: line.expense_id,
    }
}

fn list_item(invoice: customer_invoices::Model) -> InvoiceListItem {
    InvoiceListItem {
        id: invoice.id,
        number: invoice.number,
        project_id: invoice.project_id,
        status: status_to_string(&invoice.status),
        total_amount: invoice.total_amount.to_string(),
        currency: invoice.currency,
        created_at: invoice.created_at.to_rfc3339(),
    }
}

fn status_to_string(status: &InvoiceStatus) -> String {
    oneflow_core::invoice::InvoiceStatus::from(status.clone())
        .as_str()
        .to_string()
}

fn string_to_status(status: &str) -> Option<InvoiceStatus> {
    match status {
        "draft" => Some(InvoiceStatus::Draft),
        "posted" => Some(InvoiceStatus::Posted),
        "paid" => Some(InvoiceStatus::Paid),
        "cancelled" => Some(InvoiceStatus::Cancelled),
        _ => None,
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/invoices` - List invoices with filters.
async fn list_invoices(
    State(state): State<AppState>,
    Query(query): Query<ListInvoicesQuery>,
) -> impl IntoResponse {
    let repo = InvoiceRepository::new((*state.db).clone());

    let filter = InvoiceFilter {
        project_id: query.project_id,
        status: query.status.as_deref().and_then(string_to_status),
    };

    match repo.list(filter).await {
        Ok(invoices) => {
            let items: Vec<InvoiceListItem> = invoices.into_iter().map(list_item).collect();
            (StatusCode::OK, Json(serde_json::json!({ "invoices": items }))).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// POST `/invoices` - Create an invoice from a caller-supplied payload.
async fn create_invoice(
    State(state): State<AppState>,
    Json(payload): Json<ManualInvoiceInput>,
) -> impl IntoResponse {
    let repo = InvoiceRepository::new((*state.db).clone());

    match repo.create_manual(payload).await {
        Ok(invoice) => {
            (StatusCode::CREATED, Json(InvoiceResponse::from(invoice))).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// POST `/invoices/from-timesheets` - Derive an invoice from approved timesheets.
async fn create_from_timesheets(
    State(state): State<AppState>,
    Json(payload): Json<InvoiceFromTimesheetsRequest>,
) -> impl IntoResponse {
    let repo = InvoiceRepository::new((*state.db).clone());

    match repo
        .create_from_timesheets(payload.project_id, &payload.timesheet_ids)
        .await
    {
        Ok(result) => {
            let TimesheetInvoiceResult {
                invoice,
                lines,
                timesheets_invoiced,
            } = result;
            let response = TimesheetInvoiceResponse {
                invoice: InvoiceResponse::from(InvoiceWithLines { invoice, lines }),
                timesheets_invoiced,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// GET `/invoices/{id}` - Get an invoice with its lines.
async fn get_invoice(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = InvoiceRepository::new((*state.db).clone());

    match repo.get(id).await {
        Ok(invoice) => (StatusCode::OK, Json(InvoiceResponse::from(invoice))).into_response(),
        Err(e) => error_response(e),
    }
}
