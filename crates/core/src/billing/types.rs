//! Vendor bill domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::order::PurchaseOrderStatus;

/// Vendor bill lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorBillStatus {
    /// Bill is being drafted.
    Draft,
    /// Bill has been posted for payment.
    Posted,
    /// Bill has been paid in full.
    Paid,
    /// Bill was cancelled.
    Cancelled,
}

impl VendorBillStatus {
    /// Returns the stored string form of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Posted => "posted",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }
}

/// A loaded purchase order header used as derivation input.
#[derive(Debug, Clone)]
pub struct SourcePurchaseOrder {
    /// Purchase order id.
    pub id: Uuid,
    /// Document number.
    pub number: String,
    /// Owning project, if any.
    pub project_id: Option<Uuid>,
    /// Vendor reference, if any.
    pub vendor_id: Option<Uuid>,
    /// Vendor display name.
    pub vendor_name: Option<String>,
    /// Lifecycle status.
    pub status: PurchaseOrderStatus,
    /// Stored order total.
    pub total_amount: Decimal,
    /// Currency tag.
    pub currency: String,
}

/// Caller-supplied options for deriving a vendor bill.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBillInput {
    /// Document number; generated when absent.
    pub number: Option<String>,
    /// Payment due date.
    pub due_date: Option<NaiveDate>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Currency override.
    pub currency: Option<String>,
}

/// A vendor bill header ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillDraft {
    /// Document number.
    pub number: String,
    /// Owning project, if any.
    pub project_id: Option<Uuid>,
    /// Source purchase order (traceability back-reference).
    pub source_po_id: Option<Uuid>,
    /// Vendor reference, if any.
    pub vendor_id: Option<Uuid>,
    /// Vendor display name.
    pub vendor_name: Option<String>,
    /// Lifecycle status.
    pub status: VendorBillStatus,
    /// Bill total, cent-rounded.
    pub total_amount: Decimal,
    /// Currency tag.
    pub currency: String,
    /// Payment due date.
    pub due_date: Option<NaiveDate>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// A vendor bill line ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillLineDraft {
    /// Line description.
    pub description: String,
    /// Quantity ordered.
    pub quantity: Decimal,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Line amount.
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_bill_status_strings() {
        assert_eq!(VendorBillStatus::Draft.as_str(), "draft");
        assert_eq!(VendorBillStatus::Posted.as_str(), "posted");
        assert_eq!(VendorBillStatus::Paid.as_str(), "paid");
        assert_eq!(VendorBillStatus::Cancelled.as_str(), "cancelled");
    }
}
