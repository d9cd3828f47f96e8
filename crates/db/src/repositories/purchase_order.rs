//! Purchase order repository for order creation and reads.
//!
//! Mirrors the sales order repository for the procurement side. Purchase
//! orders are created in draft, unlike sales orders which post immediately.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use oneflow_core::audit::{AuditAction, AuditEntityType, AuditRecord};
use oneflow_core::invoice::currency_or_default;
use oneflow_core::numbering::DocumentNumbering;
use oneflow_core::order::{OrderLineInput, OrderService, PURCHASE_LINE_FALLBACK};
use oneflow_shared::AppError;

use super::{audit, map_db_err};
use crate::entities::{
    purchase_order_lines, purchase_orders, sea_orm_active_enums::PurchaseOrderStatus,
};

/// Error types for purchase order operations.
#[derive(Debug, thiserror::Error)]
pub enum PurchaseOrderError {
    /// Purchase order not found.
    #[error("Purchase Order not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<PurchaseOrderError> for AppError {
    fn from(err: PurchaseOrderError) -> Self {
        match err {
            PurchaseOrderError::NotFound(id) => Self::NotFound(format!("Purchase Order {id}")),
            PurchaseOrderError::Database(e) => map_db_err(&e),
        }
    }
}

/// Input for creating a purchase order.
#[derive(Debug, Clone, Default)]
pub struct CreatePurchaseOrderInput {
    /// Owning project, if any.
    pub project_id: Option<Uuid>,
    /// Vendor reference, if any.
    pub vendor_id: Option<Uuid>,
    /// Vendor display name.
    pub vendor_name: Option<String>,
    /// Currency tag; defaults to USD.
    pub currency: Option<String>,
    /// Raw order lines.
    pub lines: Vec<OrderLineInput>,
}

/// Filter options for listing purchase orders.
#[derive(Debug, Clone, Default)]
pub struct PurchaseOrderFilter {
    /// Filter by owning project.
    pub project_id: Option<Uuid>,
    /// Filter by status.
    pub status: Option<PurchaseOrderStatus>,
}

/// Purchase order header with its lines.
#[derive(Debug, Clone)]
pub struct PurchaseOrderWithLines {
    /// Order header.
    pub order: purchase_orders::Model,
    /// Order lines.
    pub lines: Vec<purchase_order_lines::Model>,
}

/// Purchase order repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct PurchaseOrderRepository {
    db: DatabaseConnection,
}

impl PurchaseOrderRepository {
    /// Creates a new purchase order repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a purchase order with its lines in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(
        &self,
        input: CreatePurchaseOrderInput,
    ) -> Result<PurchaseOrderWithLines, PurchaseOrderError> {
        let resolved = OrderService::resolve_lines(&input.lines, PURCHASE_LINE_FALLBACK);
        let total_amount = OrderService::total_amount(&resolved);
        let number = DocumentNumbering::generate(DocumentNumbering::PURCHASE_ORDER);
        let now = Utc::now().into();
        let order_id = Uuid::now_v7();

        let txn = self.db.begin().await?;

        let order = purchase_orders::ActiveModel {
            id: Set(order_id),
            number: Set(number),
            project_id: Set(input.project_id),
            vendor_id: Set(input.vendor_id),
            vendor_name: Set(input.vendor_name),
            status: Set(PurchaseOrderStatus::Draft),
            total_amount: Set(total_amount),
            currency: Set(currency_or_default(input.currency.as_deref())),
            created_at: Set(now),
        };
        let order = order.insert(&txn).await?;

        for line in &resolved {
            let line = purchase_order_lines::ActiveModel {
                id: Set(Uuid::now_v7()),
                po_id: Set(order_id),
                product_id: Set(line.product_id),
                description: Set(line.description.clone()),
                quantity: Set(line.quantity),
                unit_price: Set(line.unit_price),
                amount: Set(line.amount),
            };
            line.insert(&txn).await?;
        }

        audit::append(
            &txn,
            &AuditRecord::new(
                AuditAction::PurchaseOrderCreated,
                AuditEntityType::PurchaseOrder,
                order_id,
                format!(
                    "Created purchase order {} with {} lines",
                    order.number,
                    resolved.len()
                ),
            ),
        )
        .await?;

        txn.commit().await?;

        // Return the persisted state, not the in-memory values
        self.get(order_id).await
    }

    /// Lists purchase orders with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: PurchaseOrderFilter,
    ) -> Result<Vec<purchase_orders::Model>, PurchaseOrderError> {
        let mut query = purchase_orders::Entity::find();

        if let Some(project_id) = filter.project_id {
            query = query.filter(purchase_orders::Column::ProjectId.eq(project_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(purchase_orders::Column::Status.eq(status));
        }

        let orders = query
            .order_by_desc(purchase_orders::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(orders)
    }

    /// Gets a purchase order by id with its lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found or the query fails.
    pub async fn get(&self, id: Uuid) -> Result<PurchaseOrderWithLines, PurchaseOrderError> {
        let order = purchase_orders::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(PurchaseOrderError::NotFound(id))?;

        let lines = order
            .find_related(purchase_order_lines::Entity)
            .order_by_asc(purchase_order_lines::Column::Id)
            .all(&self.db)
            .await?;

        Ok(PurchaseOrderWithLines { order, lines })
    }
}
