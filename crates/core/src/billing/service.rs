//! Vendor bill derivation rules.
//!
//! Converts a purchase order snapshot into a vendor bill draft, copying
//! line values verbatim. The billing guard lives here; persistence and the
//! source status transition live in the ledger store layer.

use oneflow_shared::types::round_money;

use super::error::BillError;
use super::types::{BillDraft, BillLineDraft, CreateBillInput, SourcePurchaseOrder, VendorBillStatus};
use crate::invoice::currency_or_default;
use crate::order::{OrderLineSnapshot, PurchaseOrderStatus};

/// Vendor bill derivation service.
pub struct BillingService;

impl BillingService {
    /// Derives a vendor bill from a purchase order snapshot.
    ///
    /// Line values are copied verbatim (normalized, never recomputed). The
    /// caller-supplied number wins over the generated one; currency falls
    /// back from the request to the order to USD.
    ///
    /// # Errors
    ///
    /// Returns `BillError` if the order was already billed or cancelled.
    pub fn from_purchase_order(
        po: &SourcePurchaseOrder,
        po_lines: &[OrderLineSnapshot],
        input: &CreateBillInput,
        generated_number: String,
    ) -> Result<(BillDraft, Vec<BillLineDraft>), BillError> {
        if !po.status.can_be_billed() {
            return Err(match po.status {
                PurchaseOrderStatus::Cancelled => BillError::Cancelled(po.id),
                _ => BillError::AlreadyBilled(po.id),
            });
        }

        let number = input
            .number
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map_or(generated_number, String::from);

        let currency = input
            .currency
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map_or_else(
                || currency_or_default(Some(po.currency.as_str())),
                String::from,
            );

        let lines = po_lines
            .iter()
            .map(|line| BillLineDraft {
                description: line.description.clone(),
                quantity: line.quantity,
                unit_price: round_money(line.unit_price),
                amount: round_money(line.amount),
            })
            .collect();

        let draft = BillDraft {
            number,
            project_id: po.project_id,
            source_po_id: Some(po.id),
            vendor_id: po.vendor_id,
            vendor_name: po.vendor_name.clone(),
            status: VendorBillStatus::Draft,
            total_amount: round_money(po.total_amount),
            currency,
            due_date: input.due_date,
            notes: input.notes.clone(),
        };

        Ok((draft, lines))
    }

    /// Audit details line for a purchase-order-derived bill.
    #[must_use]
    pub fn audit_details(po_number: &str) -> String {
        format!("Created vendor bill from purchase order {po_number}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn posted_po() -> SourcePurchaseOrder {
        SourcePurchaseOrder {
            id: Uuid::new_v4(),
            number: "PO-1".to_string(),
            project_id: Some(Uuid::new_v4()),
            vendor_id: Some(Uuid::new_v4()),
            vendor_name: Some("Supplies Inc".to_string()),
            status: PurchaseOrderStatus::Posted,
            total_amount: dec!(320.00),
            currency: "USD".to_string(),
        }
    }

    fn po_lines() -> Vec<OrderLineSnapshot> {
        vec![
            OrderLineSnapshot {
                description: "Paper".to_string(),
                quantity: dec!(10),
                unit_price: dec!(12),
                amount: dec!(120),
            },
            OrderLineSnapshot {
                description: "Toner".to_string(),
                quantity: dec!(4),
                unit_price: dec!(50),
                amount: dec!(200),
            },
        ]
    }

    #[test]
    fn test_from_purchase_order_snapshot_copy() {
        let po = posted_po();
        let lines_in = po_lines();

        let (draft, lines) = BillingService::from_purchase_order(
            &po,
            &lines_in,
            &CreateBillInput::default(),
            "BILL-1".to_string(),
        )
        .unwrap();

        assert_eq!(draft.number, "BILL-1");
        assert_eq!(draft.source_po_id, Some(po.id));
        assert_eq!(draft.vendor_name.as_deref(), Some("Supplies Inc"));
        assert_eq!(draft.status, VendorBillStatus::Draft);
        assert_eq!(draft.total_amount, dec!(320.00));
        assert_eq!(lines.len(), 2);
        for (line, source) in lines.iter().zip(&lines_in) {
            assert_eq!(line.description, source.description);
            assert_eq!(line.quantity, source.quantity);
            assert_eq!(line.unit_price, source.unit_price);
            assert_eq!(line.amount, source.amount);
        }
    }

    #[test]
    fn test_caller_number_and_options_win() {
        let po = posted_po();
        let input = CreateBillInput {
            number: Some("BILL-CUSTOM".to_string()),
            due_date: Some(chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()),
            notes: Some("net 45".to_string()),
            currency: Some("EUR".to_string()),
        };

        let (draft, _) =
            BillingService::from_purchase_order(&po, &[], &input, "BILL-2".to_string()).unwrap();

        assert_eq!(draft.number, "BILL-CUSTOM");
        assert_eq!(draft.currency, "EUR");
        assert_eq!(draft.notes.as_deref(), Some("net 45"));
        assert_eq!(
            draft.due_date,
            Some(chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap())
        );
    }

    #[test]
    fn test_already_billed_is_rejected() {
        let mut po = posted_po();
        po.status = PurchaseOrderStatus::Billed;
        let po_id = po.id;

        let result = BillingService::from_purchase_order(
            &po,
            &[],
            &CreateBillInput::default(),
            "BILL-3".to_string(),
        );

        assert!(matches!(result, Err(BillError::AlreadyBilled(id)) if id == po_id));
    }

    #[test]
    fn test_cancelled_is_rejected() {
        let mut po = posted_po();
        po.status = PurchaseOrderStatus::Cancelled;

        let result = BillingService::from_purchase_order(
            &po,
            &[],
            &CreateBillInput::default(),
            "BILL-4".to_string(),
        );

        assert!(matches!(result, Err(BillError::Cancelled(_))));
    }

    #[test]
    fn test_draft_po_is_billable() {
        let mut po = posted_po();
        po.status = PurchaseOrderStatus::Draft;
        po.total_amount = Decimal::ZERO;

        let result = BillingService::from_purchase_order(
            &po,
            &[],
            &CreateBillInput::default(),
            "BILL-5".to_string(),
        );

        assert!(result.is_ok());
    }

    #[test]
    fn test_currency_falls_back_to_order() {
        let po = posted_po();
        let (draft, _) = BillingService::from_purchase_order(
            &po,
            &[],
            &CreateBillInput::default(),
            "BILL-6".to_string(),
        )
        .unwrap();
        assert_eq!(draft.currency, "USD");
    }

    #[test]
    fn test_audit_details() {
        assert_eq!(
            BillingService::audit_details("PO-7"),
            "Created vendor bill from purchase order PO-7"
        );
    }
}
