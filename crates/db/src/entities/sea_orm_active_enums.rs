//! Database enum mappings for document statuses.
//!
//! Each document kind carries its own status enum naming every real business
//! state; the conversions keep these aligned with the pure domain enums in
//! `oneflow-core`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Timesheet workflow status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "timesheet_status")]
#[serde(rename_all = "lowercase")]
pub enum TimesheetStatus {
    /// Being entered by the team member.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Submitted for approval.
    #[sea_orm(string_value = "submitted")]
    Submitted,
    /// Approved and billable.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Rejected by the approver.
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Sales order lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "sales_order_status")]
#[serde(rename_all = "lowercase")]
pub enum SalesOrderStatus {
    /// Order is being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Order has been posted (confirmed or invoiced).
    #[sea_orm(string_value = "posted")]
    Posted,
    /// Order has been paid in full.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Order was cancelled.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Purchase order lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "purchase_order_status")]
#[serde(rename_all = "lowercase")]
pub enum PurchaseOrderStatus {
    /// Order is being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Order has been sent to the vendor.
    #[sea_orm(string_value = "posted")]
    Posted,
    /// Order has been derived into a vendor bill.
    #[sea_orm(string_value = "billed")]
    Billed,
    /// Order was cancelled.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Vendor bill lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "vendor_bill_status")]
#[serde(rename_all = "lowercase")]
pub enum VendorBillStatus {
    /// Bill is being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Bill has been posted for payment.
    #[sea_orm(string_value = "posted")]
    Posted,
    /// Bill has been paid in full.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Bill was cancelled.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Customer invoice lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "invoice_status")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Invoice is being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Invoice has been issued to the customer.
    #[sea_orm(string_value = "posted")]
    Posted,
    /// Invoice has been paid in full.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Invoice was cancelled.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl From<TimesheetStatus> for oneflow_core::invoice::TimesheetStatus {
    fn from(value: TimesheetStatus) -> Self {
        match value {
            TimesheetStatus::Draft => Self::Draft,
            TimesheetStatus::Submitted => Self::Submitted,
            TimesheetStatus::Approved => Self::Approved,
            TimesheetStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<oneflow_core::invoice::TimesheetStatus> for TimesheetStatus {
    fn from(value: oneflow_core::invoice::TimesheetStatus) -> Self {
        match value {
            oneflow_core::invoice::TimesheetStatus::Draft => Self::Draft,
            oneflow_core::invoice::TimesheetStatus::Submitted => Self::Submitted,
            oneflow_core::invoice::TimesheetStatus::Approved => Self::Approved,
            oneflow_core::invoice::TimesheetStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<SalesOrderStatus> for oneflow_core::order::SalesOrderStatus {
    fn from(value: SalesOrderStatus) -> Self {
        match value {
            SalesOrderStatus::Draft => Self::Draft,
            SalesOrderStatus::Posted => Self::Posted,
            SalesOrderStatus::Paid => Self::Paid,
            SalesOrderStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<oneflow_core::order::SalesOrderStatus> for SalesOrderStatus {
    fn from(value: oneflow_core::order::SalesOrderStatus) -> Self {
        match value {
            oneflow_core::order::SalesOrderStatus::Draft => Self::Draft,
            oneflow_core::order::SalesOrderStatus::Posted => Self::Posted,
            oneflow_core::order::SalesOrderStatus::Paid => Self::Paid,
            oneflow_core::order::SalesOrderStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<PurchaseOrderStatus> for oneflow_core::order::PurchaseOrderStatus {
    fn from(value: PurchaseOrderStatus) -> Self {
        match value {
            PurchaseOrderStatus::Draft => Self::Draft,
            PurchaseOrderStatus::Posted => Self::Posted,
            PurchaseOrderStatus::Billed => Self::Billed,
            PurchaseOrderStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<oneflow_core::order::PurchaseOrderStatus> for PurchaseOrderStatus {
    fn from(value: oneflow_core::order::PurchaseOrderStatus) -> Self {
        match value {
            oneflow_core::order::PurchaseOrderStatus::Draft => Self::Draft,
            oneflow_core::order::PurchaseOrderStatus::Posted => Self::Posted,
            oneflow_core::order::PurchaseOrderStatus::Billed => Self::Billed,
            oneflow_core::order::PurchaseOrderStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<VendorBillStatus> for oneflow_core::billing::VendorBillStatus {
    fn from(value: VendorBillStatus) -> Self {
        match value {
            VendorBillStatus::Draft => Self::Draft,
            VendorBillStatus::Posted => Self::Posted,
            VendorBillStatus::Paid => Self::Paid,
            VendorBillStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<oneflow_core::billing::VendorBillStatus> for VendorBillStatus {
    fn from(value: oneflow_core::billing::VendorBillStatus) -> Self {
        match value {
            oneflow_core::billing::VendorBillStatus::Draft => Self::Draft,
            oneflow_core::billing::VendorBillStatus::Posted => Self::Posted,
            oneflow_core::billing::VendorBillStatus::Paid => Self::Paid,
            oneflow_core::billing::VendorBillStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<InvoiceStatus> for oneflow_core::invoice::InvoiceStatus {
    fn from(value: InvoiceStatus) -> Self {
        match value {
            InvoiceStatus::Draft => Self::Draft,
            InvoiceStatus::Posted => Self::Posted,
            InvoiceStatus::Paid => Self::Paid,
            InvoiceStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<oneflow_core::invoice::InvoiceStatus> for InvoiceStatus {
    fn from(value: oneflow_core::invoice::InvoiceStatus) -> Self {
        match value {
            oneflow_core::invoice::InvoiceStatus::Draft => Self::Draft,
            oneflow_core::invoice::InvoiceStatus::Posted => Self::Posted,
            oneflow_core::invoice::InvoiceStatus::Paid => Self::Paid,
            oneflow_core::invoice::InvoiceStatus::Cancelled => Self::Cancelled,
        }
    }
}
