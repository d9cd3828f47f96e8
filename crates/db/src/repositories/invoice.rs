//! Customer invoice repository for invoice derivation and reads.
//!
//! Each derivation path runs inside one database transaction: load and
//! validate the source records, write the invoice and its lines, update the
//! source state, append the audit entry. Any failure rolls back all writes.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use oneflow_core::audit::{AuditAction, AuditEntityType, AuditRecord};
use oneflow_core::invoice::{
    BillableTimesheet, InvoiceDraft, InvoiceError, InvoiceLineDraft, InvoiceService,
    ManualInvoiceInput, SourceSalesOrder,
};
use oneflow_core::numbering::DocumentNumbering;
use oneflow_core::order::OrderLineSnapshot;
use oneflow_shared::AppError;

use super::{audit, map_db_err};
use crate::entities::{
    customer_invoices, invoice_lines, sales_order_lines, sales_orders,
    sea_orm_active_enums::SalesOrderStatus, tasks, timesheets,
};

/// Error types for invoice operations.
#[derive(Debug, thiserror::Error)]
pub enum InvoicingError {
    /// No timesheets were selected for invoicing.
    #[error("timesheet_ids is required")]
    EmptyTimesheetSelection,

    /// The source sales order does not exist.
    #[error("Sales Order not found")]
    SalesOrderNotFound(Uuid),

    /// Invoice not found.
    #[error("Invoice not found: {0}")]
    NotFound(Uuid),

    /// A derivation rule rejected the request.
    #[error(transparent)]
    Derivation(#[from] InvoiceError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<InvoicingError> for AppError {
    fn from(err: InvoicingError) -> Self {
        match err {
            InvoicingError::EmptyTimesheetSelection => Self::Validation(err.to_string()),
            InvoicingError::SalesOrderNotFound(_) => {
                Self::Validation("Sales Order not found".to_string())
            }
            InvoicingError::NotFound(id) => Self::NotFound(format!("Invoice {id}")),
            InvoicingError::Derivation(e) => Self::Validation(e.to_string()),
            InvoicingError::Database(e) => map_db_err(&e),
        }
    }
}

/// Filter options for listing invoices.
#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    /// Filter by owning project.
    pub project_id: Option<Uuid>,
    /// Filter by status.
    pub status: Option<crate::entities::sea_orm_active_enums::InvoiceStatus>,
}

/// Invoice header with its lines.
#[derive(Debug, Clone)]
pub struct InvoiceWithLines {
    /// Invoice header.
    pub invoice: customer_invoices::Model,
    /// Invoice lines.
    pub lines: Vec<invoice_lines::Model>,
}

/// Result of deriving an invoice from timesheets.
#[derive(Debug, Clone)]
pub struct TimesheetInvoiceResult {
    /// Invoice header.
    pub invoice: customer_invoices::Model,
    /// Invoice lines, one per timesheet.
    pub lines: Vec<invoice_lines::Model>,
    /// Number of timesheets marked invoiced.
    pub timesheets_invoiced: usize,
}

/// Customer invoice repository.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    db: DatabaseConnection,
}

impl InvoiceRepository {
    /// Creates a new invoice repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Derives an invoice from a project's approved, uninvoiced timesheets.
    ///
    /// The candidate rows are locked (`SELECT ... FOR UPDATE`) before
    /// validation so concurrent derivations over overlapping sets serialize:
    /// the loser sees `invoiced = true` and fails the guard instead of
    /// double-invoicing.
    ///
    /// # Errors
    ///
    /// Returns an error if timesheets are missing, unapproved, or already
    /// invoiced, or if the database operation fails. On error nothing is
    /// committed.
    pub async fn create_from_timesheets(
        &self,
        project_id: Uuid,
        timesheet_ids: &[Uuid],
    ) -> Result<TimesheetInvoiceResult, InvoicingError> {
        if timesheet_ids.is_empty() {
            return Err(InvoicingError::EmptyTimesheetSelection);
        }

        let txn = self.db.begin().await?;

        let rows = timesheets::Entity::find()
            .filter(timesheets::Column::ProjectId.eq(project_id))
            .filter(timesheets::Column::Id.is_in(timesheet_ids.to_vec()))
            .lock_exclusive()
            .all(&txn)
            .await?;

        let task_titles = load_task_titles(&txn, &rows).await?;
        let billables: Vec<BillableTimesheet> = rows
            .iter()
            .map(|ts| BillableTimesheet {
                id: ts.id,
                project_id: ts.project_id,
                status: ts.status.clone().into(),
                invoiced: ts.invoiced,
                duration_hours: ts.duration_hours,
                hourly_rate: ts.hourly_rate,
                amount: ts.amount,
                task_title: ts.task_id.and_then(|id| task_titles.get(&id).cloned()),
                notes: ts.notes.clone(),
            })
            .collect();

        let number = DocumentNumbering::generate(DocumentNumbering::INVOICE);
        let (draft, line_drafts) =
            InvoiceService::from_timesheets(project_id, timesheet_ids, &billables, number)?;

        let (invoice, lines) = insert_invoice(&txn, &draft, &line_drafts).await?;

        let now = Utc::now().into();
        for ts in rows {
            let mut model: timesheets::ActiveModel = ts.into();
            model.invoiced = Set(true);
            model.invoice_id = Set(Some(invoice.id));
            model.updated_at = Set(now);
            model.update(&txn).await?;
        }

        audit::append(
            &txn,
            &AuditRecord::new(
                AuditAction::InvoiceCreated,
                AuditEntityType::CustomerInvoice,
                invoice.id,
                InvoiceService::timesheets_audit_details(timesheet_ids.len()),
            ),
        )
        .await?;

        txn.commit().await?;

        Ok(TimesheetInvoiceResult {
            invoice,
            lines,
            timesheets_invoiced: timesheet_ids.len(),
        })
    }

    /// Derives an invoice from a sales order, copying its lines verbatim.
    ///
    /// The source order is marked posted in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the sales order does not exist or the database
    /// operation fails.
    pub async fn create_from_sales_order(
        &self,
        so_id: Uuid,
    ) -> Result<InvoiceWithLines, InvoicingError> {
        let txn = self.db.begin().await?;

        let so = sales_orders::Entity::find_by_id(so_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(InvoicingError::SalesOrderNotFound(so_id))?;

        let so_lines = so
            .find_related(sales_order_lines::Entity)
            .order_by_asc(sales_order_lines::Column::Id)
            .all(&txn)
            .await?;

        let source = SourceSalesOrder {
            id: so.id,
            number: so.number.clone(),
            project_id: so.project_id,
            total_amount: so.total_amount,
            currency: so.currency.clone(),
        };
        let snapshots: Vec<OrderLineSnapshot> = so_lines
            .iter()
            .map(|line| OrderLineSnapshot {
                description: line.description.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                amount: line.amount,
            })
            .collect();

        let number = DocumentNumbering::generate(DocumentNumbering::INVOICE);
        let (draft, line_drafts) = InvoiceService::from_sales_order(&source, &snapshots, number);

        let (invoice, lines) = insert_invoice(&txn, &draft, &line_drafts).await?;

        mark_sales_order_posted(&txn, so).await?;

        audit::append(
            &txn,
            &AuditRecord::new(
                AuditAction::InvoiceCreated,
                AuditEntityType::CustomerInvoice,
                invoice.id,
                InvoiceService::sales_order_audit_details(&source.number),
            ),
        )
        .await?;

        txn.commit().await?;

        Ok(InvoiceWithLines { invoice, lines })
    }

    /// Creates an invoice from a caller-supplied payload (manual path).
    ///
    /// Line values are trusted and copied verbatim. When the payload links a
    /// sales order, that order is marked posted in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if a linked sales order does not exist or the
    /// database operation fails.
    pub async fn create_manual(
        &self,
        input: ManualInvoiceInput,
    ) -> Result<InvoiceWithLines, InvoicingError> {
        let txn = self.db.begin().await?;

        let source_so = match input.source_so_id {
            Some(so_id) => Some(
                sales_orders::Entity::find_by_id(so_id)
                    .lock_exclusive()
                    .one(&txn)
                    .await?
                    .ok_or(InvoicingError::SalesOrderNotFound(so_id))?,
            ),
            None => None,
        };

        let number = DocumentNumbering::generate(DocumentNumbering::INVOICE);
        let (draft, line_drafts) = InvoiceService::manual(&input, number);

        let (invoice, lines) = insert_invoice(&txn, &draft, &line_drafts).await?;

        let details = match &source_so {
            Some(so) => InvoiceService::sales_order_audit_details(&so.number),
            None => format!("Created invoice {}", invoice.number),
        };

        if let Some(so) = source_so {
            mark_sales_order_posted(&txn, so).await?;
        }

        audit::append(
            &txn,
            &AuditRecord::new(
                AuditAction::InvoiceCreated,
                AuditEntityType::CustomerInvoice,
                invoice.id,
                details,
            ),
        )
        .await?;

        txn.commit().await?;

        Ok(InvoiceWithLines { invoice, lines })
    }

    /// Lists invoices with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: InvoiceFilter,
    ) -> Result<Vec<customer_invoices::Model>, InvoicingError> {
        let mut query = customer_invoices::Entity::find();

        if let Some(project_id) = filter.project_id {
            query = query.filter(customer_invoices::Column::ProjectId.eq(project_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(customer_invoices::Column::Status.eq(status));
        }

        let invoices = query
            .order_by_desc(customer_invoices::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(invoices)
    }

    /// Gets an invoice by id with its lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the invoice is not found or the query fails.
    pub async fn get(&self, id: Uuid) -> Result<InvoiceWithLines, InvoicingError> {
        let invoice = customer_invoices::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(InvoicingError::NotFound(id))?;

        let lines = invoice
            .find_related(invoice_lines::Entity)
            .order_by_asc(invoice_lines::Column::Id)
            .all(&self.db)
            .await?;

        Ok(InvoiceWithLines { invoice, lines })
    }
}

/// Loads the titles of the tasks referenced by the given timesheets.
async fn load_task_titles(
    txn: &DatabaseTransaction,
    rows: &[timesheets::Model],
) -> Result<HashMap<Uuid, String>, DbErr> {
    let task_ids: Vec<Uuid> = rows.iter().filter_map(|ts| ts.task_id).collect();
    if task_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let titles = tasks::Entity::find()
        .filter(tasks::Column::Id.is_in(task_ids))
        .all(txn)
        .await?
        .into_iter()
        .map(|task| (task.id, task.title))
        .collect();

    Ok(titles)
}

/// Inserts an invoice header and its lines.
async fn insert_invoice(
    txn: &DatabaseTransaction,
    draft: &InvoiceDraft,
    line_drafts: &[InvoiceLineDraft],
) -> Result<(customer_invoices::Model, Vec<invoice_lines::Model>), DbErr> {
    let invoice_id = Uuid::now_v7();

    let invoice = customer_invoices::ActiveModel {
        id: Set(invoice_id),
        number: Set(draft.number.clone()),
        project_id: Set(draft.project_id),
        source_so_id: Set(draft.source_so_id),
        status: Set(draft.status.into()),
        total_amount: Set(draft.total_amount),
        currency: Set(draft.currency.clone()),
        due_date: Set(draft.due_date),
        notes: Set(draft.notes.clone()),
        created_at: Set(Utc::now().into()),
    };
    let invoice = invoice.insert(txn).await?;

    let mut lines = Vec::with_capacity(line_drafts.len());
    for line in line_drafts {
        let model = invoice_lines::ActiveModel {
            id: Set(Uuid::now_v7()),
            invoice_id: Set(invoice_id),
            description: Set(line.description.clone()),
            quantity: Set(line.quantity),
            unit_price: Set(line.unit_price),
            amount: Set(line.amount),
            timesheet_id: Set(line.timesheet_id),
            expense_id: Set(line.expense_id),
        };
        lines.push(model.insert(txn).await?);
    }

    Ok((invoice, lines))
}

/// Marks a sales order posted after invoice creation.
async fn mark_sales_order_posted(
    txn: &DatabaseTransaction,
    so: sales_orders::Model,
) -> Result<(), DbErr> {
    if so.status == SalesOrderStatus::Posted {
        return Ok(());
    }

    let mut model: sales_orders::ActiveModel = so.into();
    model.status = Set(SalesOrderStatus::Posted);
    model.update(txn).await?;

    Ok(())
}
