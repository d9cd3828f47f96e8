//! Vendor bill repository for bill derivation and reads.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use oneflow_core::audit::{AuditAction, AuditEntityType, AuditRecord};
use oneflow_core::billing::{BillError, BillingService, CreateBillInput, SourcePurchaseOrder};
use oneflow_core::numbering::DocumentNumbering;
use oneflow_core::order::OrderLineSnapshot;
use oneflow_shared::AppError;

use super::{audit, map_db_err};
use crate::entities::{
    bill_lines, purchase_order_lines, purchase_orders,
    sea_orm_active_enums::PurchaseOrderStatus, vendor_bills,
};

/// Error types for vendor bill operations.
#[derive(Debug, thiserror::Error)]
pub enum VendorBillError {
    /// The source purchase order does not exist.
    #[error("Purchase Order not found")]
    PurchaseOrderNotFound(Uuid),

    /// Vendor bill not found.
    #[error("Vendor bill not found: {0}")]
    NotFound(Uuid),

    /// The billing guard rejected the request.
    #[error(transparent)]
    Billing(#[from] BillError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<VendorBillError> for AppError {
    fn from(err: VendorBillError) -> Self {
        match err {
            VendorBillError::PurchaseOrderNotFound(_) => {
                Self::Validation("Purchase Order not found".to_string())
            }
            VendorBillError::NotFound(id) => Self::NotFound(format!("Vendor bill {id}")),
            VendorBillError::Billing(e @ BillError::AlreadyBilled(_)) => {
                Self::Conflict(e.to_string())
            }
            VendorBillError::Billing(e @ BillError::Cancelled(_)) => {
                Self::BusinessRule(e.to_string())
            }
            VendorBillError::Database(e) => map_db_err(&e),
        }
    }
}

/// Vendor bill header with its lines.
#[derive(Debug, Clone)]
pub struct VendorBillWithLines {
    /// Bill header.
    pub bill: vendor_bills::Model,
    /// Bill lines.
    pub lines: Vec<bill_lines::Model>,
}

/// Vendor bill repository.
#[derive(Debug, Clone)]
pub struct VendorBillRepository {
    db: DatabaseConnection,
}

impl VendorBillRepository {
    /// Creates a new vendor bill repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Derives a vendor bill from a purchase order, copying its lines
    /// verbatim.
    ///
    /// The order row is locked before the billing guard runs so concurrent
    /// derivations serialize; the source order is marked billed in the same
    /// transaction. A partial unique index on the bill's source reference
    /// backs the at-most-one-bill-per-order rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the purchase order does not exist, was already
    /// billed or cancelled, or the database operation fails. On error
    /// nothing is committed.
    pub async fn create_from_purchase_order(
        &self,
        po_id: Uuid,
        input: CreateBillInput,
    ) -> Result<VendorBillWithLines, VendorBillError> {
        let txn = self.db.begin().await?;

        let po = purchase_orders::Entity::find_by_id(po_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(VendorBillError::PurchaseOrderNotFound(po_id))?;

        let po_lines = po
            .find_related(purchase_order_lines::Entity)
            .order_by_asc(purchase_order_lines::Column::Id)
            .all(&txn)
            .await?;

        let source = SourcePurchaseOrder {
            id: po.id,
            number: po.number.clone(),
            project_id: po.project_id,
            vendor_id: po.vendor_id,
            vendor_name: po.vendor_name.clone(),
            status: po.status.clone().into(),
            total_amount: po.total_amount,
            currency: po.currency.clone(),
        };
        let snapshots: Vec<OrderLineSnapshot> = po_lines
            .iter()
            .map(|line| OrderLineSnapshot {
                description: line.description.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                amount: line.amount,
            })
            .collect();

        let number = DocumentNumbering::generate(DocumentNumbering::VENDOR_BILL);
        let (draft, line_drafts) =
            BillingService::from_purchase_order(&source, &snapshots, &input, number)?;

        let bill_id = Uuid::now_v7();
        let bill = vendor_bills::ActiveModel {
            id: Set(bill_id),
            number: Set(draft.number.clone()),
            project_id: Set(draft.project_id),
            source_po_id: Set(draft.source_po_id),
            vendor_id: Set(draft.vendor_id),
            vendor_name: Set(draft.vendor_name.clone()),
            status: Set(draft.status.into()),
            total_amount: Set(draft.total_amount),
            currency: Set(draft.currency.clone()),
            due_date: Set(draft.due_date),
            notes: Set(draft.notes.clone()),
            created_at: Set(Utc::now().into()),
        };
        let bill = bill.insert(&txn).await?;

        let mut lines = Vec::with_capacity(line_drafts.len());
        for line in &line_drafts {
            let model = bill_lines::ActiveModel {
                id: Set(Uuid::now_v7()),
                bill_id: Set(bill_id),
                description: Set(line.description.clone()),
                quantity: Set(line.quantity),
                unit_price: Set(line.unit_price),
                amount: Set(line.amount),
            };
            lines.push(model.insert(&txn).await?);
        }

        let mut po_model: purchase_orders::ActiveModel = po.into();
        po_model.status = Set(PurchaseOrderStatus::Billed);
        po_model.update(&txn).await?;

        audit::append(
            &txn,
            &AuditRecord::new(
                AuditAction::VendorBillCreated,
                AuditEntityType::VendorBill,
                bill_id,
                BillingService::audit_details(&source.number),
            ),
        )
        .await?;

        txn.commit().await?;

        Ok(VendorBillWithLines { bill, lines })
    }

    /// Lists vendor bills, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        project_id: Option<Uuid>,
    ) -> Result<Vec<vendor_bills::Model>, VendorBillError> {
        let mut query = vendor_bills::Entity::find();

        if let Some(project_id) = project_id {
            query = query.filter(vendor_bills::Column::ProjectId.eq(project_id));
        }

        let bills = query
            .order_by_desc(vendor_bills::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(bills)
    }

    /// Gets a vendor bill by id with its lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the bill is not found or the query fails.
    pub async fn get(&self, id: Uuid) -> Result<VendorBillWithLines, VendorBillError> {
        let bill = vendor_bills::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(VendorBillError::NotFound(id))?;

        let lines = bill
            .find_related(bill_lines::Entity)
            .order_by_asc(bill_lines::Column::Id)
            .all(&self.db)
            .await?;

        Ok(VendorBillWithLines { bill, lines })
    }
}
