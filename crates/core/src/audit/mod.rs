//! Audit trail actions and records.
//!
//! Every document-creation operation appends exactly one audit record inside
//! its own transaction. Audit rows are append-only; nothing in the system
//! updates or deletes them.

use uuid::Uuid;

/// Actions recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    /// A customer invoice was created.
    InvoiceCreated,
    /// A vendor bill was created.
    VendorBillCreated,
    /// A sales order was created.
    SalesOrderCreated,
    /// A purchase order was created.
    PurchaseOrderCreated,
}

impl AuditAction {
    /// Returns the stored string form of this action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvoiceCreated => "INVOICE_CREATED",
            Self::VendorBillCreated => "VENDOR_BILL_CREATED",
            Self::SalesOrderCreated => "SALES_ORDER_CREATED",
            Self::PurchaseOrderCreated => "PURCHASE_ORDER_CREATED",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity kinds referenced by audit records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditEntityType {
    /// A customer invoice.
    CustomerInvoice,
    /// A vendor bill.
    VendorBill,
    /// A sales order.
    SalesOrder,
    /// A purchase order.
    PurchaseOrder,
}

impl AuditEntityType {
    /// Returns the stored string form of this entity type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CustomerInvoice => "CUSTOMER_INVOICE",
            Self::VendorBill => "VENDOR_BILL",
            Self::SalesOrder => "SALES_ORDER",
            Self::PurchaseOrder => "PURCHASE_ORDER",
        }
    }
}

impl std::fmt::Display for AuditEntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An audit record ready to be appended.
#[derive(Debug, Clone)]
pub struct AuditRecord {
    /// The action that occurred.
    pub action: AuditAction,
    /// The kind of entity the action created.
    pub entity_type: AuditEntityType,
    /// The id of the created entity.
    pub entity_id: Uuid,
    /// Free-text details for the activity feed.
    pub details: String,
}

impl AuditRecord {
    /// Creates a new audit record.
    #[must_use]
    pub fn new(
        action: AuditAction,
        entity_type: AuditEntityType,
        entity_id: Uuid,
        details: impl Into<String>,
    ) -> Self {
        Self {
            action,
            entity_type,
            entity_id,
            details: details.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_string_forms() {
        assert_eq!(AuditAction::InvoiceCreated.as_str(), "INVOICE_CREATED");
        assert_eq!(
            AuditAction::VendorBillCreated.as_str(),
            "VENDOR_BILL_CREATED"
        );
        assert_eq!(
            AuditAction::SalesOrderCreated.as_str(),
            "SALES_ORDER_CREATED"
        );
        assert_eq!(
            AuditAction::PurchaseOrderCreated.as_str(),
            "PURCHASE_ORDER_CREATED"
        );
    }

    #[test]
    fn test_entity_type_string_forms() {
        assert_eq!(
            AuditEntityType::CustomerInvoice.as_str(),
            "CUSTOMER_INVOICE"
        );
        assert_eq!(AuditEntityType::VendorBill.as_str(), "VENDOR_BILL");
        assert_eq!(AuditEntityType::SalesOrder.as_str(), "SALES_ORDER");
        assert_eq!(AuditEntityType::PurchaseOrder.as_str(), "PURCHASE_ORDER");
    }

    #[test]
    fn test_record_construction() {
        let id = Uuid::new_v4();
        let record = AuditRecord::new(
            AuditAction::InvoiceCreated,
            AuditEntityType::CustomerInvoice,
            id,
            "Created invoice from 3 timesheets",
        );
        assert_eq!(record.entity_id, id);
        assert_eq!(record.details, "Created invoice from 3 timesheets");
        assert_eq!(record.action.to_string(), "INVOICE_CREATED");
    }
}
