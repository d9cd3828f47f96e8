//! Sales order repository for order creation and reads.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use oneflow_core::audit::{AuditAction, AuditEntityType, AuditRecord};
use oneflow_core::invoice::currency_or_default;
use oneflow_core::numbering::DocumentNumbering;
use oneflow_core::order::{OrderLineInput, OrderService, SALES_LINE_FALLBACK};
use oneflow_shared::AppError;

use super::{audit, map_db_err};
use crate::entities::{sales_order_lines, sales_orders, sea_orm_active_enums::SalesOrderStatus};

/// Error types for sales order operations.
#[derive(Debug, thiserror::Error)]
pub enum SalesOrderError {
    /// Sales order not found.
    #[error("Sales Order not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<SalesOrderError> for AppError {
    fn from(err: SalesOrderError) -> Self {
        match err {
            SalesOrderError::NotFound(id) => Self::NotFound(format!("Sales Order {id}")),
            SalesOrderError::Database(e) => map_db_err(&e),
        }
    }
}

/// Input for creating a sales order.
#[derive(Debug, Clone, Default)]
pub struct CreateSalesOrderInput {
    /// Owning project, if any.
    pub project_id: Option<Uuid>,
    /// Customer reference, if any.
    pub customer_id: Option<Uuid>,
    /// Customer display name.
    pub customer_name: Option<String>,
    /// Currency tag; defaults to USD.
    pub currency: Option<String>,
    /// Raw order lines.
    pub lines: Vec<OrderLineInput>,
}

/// Filter options for listing sales orders.
#[derive(Debug, Clone, Default)]
pub struct SalesOrderFilter {
    /// Filter by owning project.
    pub project_id: Option<Uuid>,
    /// Filter by status.
    pub status: Option<SalesOrderStatus>,
}

/// Sales order header with its lines.
#[derive(Debug, Clone)]
pub struct SalesOrderWithLines {
    /// Order header.
    pub order: sales_orders::Model,
    /// Order lines.
    pub lines: Vec<sales_order_lines::Model>,
}

/// Sales order repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct SalesOrderRepository {
    db: DatabaseConnection,
}

impl SalesOrderRepository {
    /// Creates a new sales order repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a sales order with its lines in one transaction.
    ///
    /// Line amounts and the order total are computed from the normalized
    /// quantities and unit prices. Sales orders are created posted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(
        &self,
        input: CreateSalesOrderInput,
    ) -> Result<SalesOrderWithLines, SalesOrderError> {
        let resolved = OrderService::resolve_lines(&input.lines, SALES_LINE_FALLBACK);
        let total_amount = OrderService::total_amount(&resolved);
        let number = DocumentNumbering::generate(DocumentNumbering::SALES_ORDER);
        let now = Utc::now().into();
        let order_id = Uuid::now_v7();

        let txn = self.db.begin().await?;

        let order = sales_orders::ActiveModel {
            id: Set(order_id),
            number: Set(number),
            project_id: Set(input.project_id),
            customer_id: Set(input.customer_id),
            customer_name: Set(input.customer_name),
            status: Set(SalesOrderStatus::Posted),
            total_amount: Set(total_amount),
            currency: Set(currency_or_default(input.currency.as_deref())),
            created_at: Set(now),
        };
        let order = order.insert(&txn).await?;

        for line in &resolved {
            let line = sales_order_lines::ActiveModel {
                id: Set(Uuid::now_v7()),
                so_id: Set(order_id),
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
                AuditAction::SalesOrderCreated,
                AuditEntityType::SalesOrder,
                order_id,
                format!(
                    "Created sales order {} with {} lines",
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

    /// Lists sales orders with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: SalesOrderFilter,
    ) -> Result<Vec<sales_orders::Model>, SalesOrderError> {
        let mut query = sales_orders::Entity::find();

        if let Some(project_id) = filter.project_id {
            query = query.filter(sales_orders::Column::ProjectId.eq(project_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(sales_orders::Column::Status.eq(status));
        }

        let orders = query
            .order_by_desc(sales_orders::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(orders)
    }

    /// Gets a sales order by id with its lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found or the query fails.
    pub async fn get(&self, id: Uuid) -> Result<SalesOrderWithLines, SalesOrderError> {
        let order = sales_orders::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(SalesOrderError::NotFound(id))?;

        let lines = order
            .find_related(sales_order_lines::Entity)
            .order_by_asc(sales_order_lines::Column::Id)
            .all(&self.db)
            .await?;

        Ok(SalesOrderWithLines { order, lines })
    }
}
