//! Order domain types shared by the sales and procurement sides.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use oneflow_shared::types::RawAmount;

/// Sales order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalesOrderStatus {
    /// Order is being drafted.
    Draft,
    /// Order has been posted (confirmed or invoiced).
    Posted,
    /// Order has been paid in full.
    Paid,
    /// Order was cancelled.
    Cancelled,
}

impl SalesOrderStatus {
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

/// Purchase order lifecycle status.
///
/// `Billed` is a dedicated state: a purchase order that has been derived
/// into a vendor bill, distinct from merely being posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseOrderStatus {
    /// Order is being drafted.
    Draft,
    /// Order has been sent to the vendor.
    Posted,
    /// Order has been derived into a vendor bill.
    Billed,
    /// Order was cancelled.
    Cancelled,
}

impl PurchaseOrderStatus {
    /// Returns the stored string form of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Posted => "posted",
            Self::Billed => "billed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if a vendor bill may still be derived from this order.
    #[must_use]
    pub fn can_be_billed(&self) -> bool {
        matches!(self, Self::Draft | Self::Posted)
    }
}

/// A raw order line as supplied by a caller.
///
/// Every field is optional; resolution fills in the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderLineInput {
    /// Line description (product name or free text).
    pub description: Option<String>,
    /// Quantity ordered.
    pub quantity: Option<RawAmount>,
    /// Price per unit.
    pub unit_price: Option<RawAmount>,
    /// Optional product reference.
    pub product_id: Option<Uuid>,
}

/// An order line after normalization, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedOrderLine {
    /// Line description.
    pub description: String,
    /// Quantity ordered.
    pub quantity: Decimal,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Line amount (quantity x unit price, cent-rounded).
    pub amount: Decimal,
    /// Optional product reference.
    pub product_id: Option<Uuid>,
}

/// A snapshot of a persisted order line, used as derivation input.
///
/// Derived documents copy these values verbatim; later changes to the
/// source order never retroactively alter the derived document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineSnapshot {
    /// Line description.
    pub description: String,
    /// Quantity ordered.
    pub quantity: Decimal,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Line amount as stored on the source line.
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sales_order_status_strings() {
        assert_eq!(SalesOrderStatus::Draft.as_str(), "draft");
        assert_eq!(SalesOrderStatus::Posted.as_str(), "posted");
        assert_eq!(SalesOrderStatus::Paid.as_str(), "paid");
        assert_eq!(SalesOrderStatus::Cancelled.as_str(), "cancelled");
    }

    #[test]
    fn test_purchase_order_status_strings() {
        assert_eq!(PurchaseOrderStatus::Draft.as_str(), "draft");
        assert_eq!(PurchaseOrderStatus::Posted.as_str(), "posted");
        assert_eq!(PurchaseOrderStatus::Billed.as_str(), "billed");
        assert_eq!(PurchaseOrderStatus::Cancelled.as_str(), "cancelled");
    }

    #[test]
    fn test_purchase_order_billable_states() {
        assert!(PurchaseOrderStatus::Draft.can_be_billed());
        assert!(PurchaseOrderStatus::Posted.can_be_billed());
        assert!(!PurchaseOrderStatus::Billed.can_be_billed());
        assert!(!PurchaseOrderStatus::Cancelled.can_be_billed());
    }
}
