//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations and own
//! the transaction boundary: every state-changing operation runs inside
//! exactly one database transaction.

pub mod audit;
pub mod invoice;
pub mod purchase_order;
pub mod sales_order;
pub mod timesheet;
pub mod vendor_bill;

pub use audit::AuditRepository;
pub use invoice::{
    InvoiceFilter, InvoiceRepository, InvoiceWithLines, InvoicingError, TimesheetInvoiceResult,
};
pub use purchase_order::{
    CreatePurchaseOrderInput, PurchaseOrderError, PurchaseOrderFilter, PurchaseOrderRepository,
    PurchaseOrderWithLines,
};
pub use sales_order::{
    CreateSalesOrderInput, SalesOrderError, SalesOrderFilter, SalesOrderRepository,
    SalesOrderWithLines,
};
pub use timesheet::TimesheetRepository;
pub use vendor_bill::{VendorBillError, VendorBillRepository, VendorBillWithLines};

use oneflow_shared::AppError;
use sea_orm::{DbErr, SqlErr};

/// Maps a database error to the application taxonomy.
///
/// Unique-constraint violations (generated document numbers, the one-bill-
/// per-order index) surface as conflicts so callers can retry; everything
/// else is an infrastructure error.
pub(crate) fn map_db_err(err: &DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => AppError::Conflict(message),
        _ => AppError::Database(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oneflow_core::billing::BillError;
    use oneflow_core::invoice::InvoiceError;
    use uuid::Uuid;

    #[test]
    fn test_sales_order_not_found_is_validation_error() {
        let err: AppError = InvoicingError::SalesOrderNotFound(Uuid::new_v4()).into();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "Validation error: Sales Order not found");
    }

    #[test]
    fn test_purchase_order_not_found_is_validation_error() {
        let err: AppError = VendorBillError::PurchaseOrderNotFound(Uuid::new_v4()).into();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "Validation error: Purchase Order not found");
    }

    #[test]
    fn test_uninvoiceable_timesheet_is_validation_error() {
        let id = Uuid::new_v4();
        let err: AppError = InvoicingError::Derivation(InvoiceError::NotInvoiceable(id)).into();
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("not approved or already invoiced"));
    }

    #[test]
    fn test_timesheet_count_mismatch_is_validation_error() {
        let err: AppError = InvoicingError::Derivation(InvoiceError::TimesheetsNotFound {
            requested: 3,
            found: 1,
        })
        .into();
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("some timesheets not found"));
    }

    #[test]
    fn test_already_billed_is_conflict() {
        let err: AppError =
            VendorBillError::Billing(BillError::AlreadyBilled(Uuid::new_v4())).into();
        assert_eq!(err.status_code(), 409);
    }

    #[test]
    fn test_cancelled_po_is_business_rule_violation() {
        let err: AppError =
            VendorBillError::Billing(BillError::Cancelled(Uuid::new_v4())).into();
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn test_missing_document_reads_are_not_found() {
        let id = Uuid::new_v4();
        assert_eq!(AppError::from(SalesOrderError::NotFound(id)).status_code(), 404);
        assert_eq!(
            AppError::from(PurchaseOrderError::NotFound(id)).status_code(),
            404
        );
        assert_eq!(AppError::from(InvoicingError::NotFound(id)).status_code(), 404);
        assert_eq!(AppError::from(VendorBillError::NotFound(id)).status_code(), 404);
    }

    #[test]
    fn test_empty_timesheet_selection_is_validation_error() {
        let err: AppError = InvoicingError::EmptyTimesheetSelection.into();
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("timesheet_ids is required"));
    }
}
