//! Invoice derivation rules.
//!
//! This module provides the pure business logic for deriving customer
//! invoices from approved timesheets, from sales orders, and from manual
//! payloads. The ledger store loads the source rows and persists the
//! resulting drafts; everything here operates on plain values so the rules
//! are testable in isolation.

use rust_decimal::Decimal;
use uuid::Uuid;

use oneflow_shared::types::{normalize, round_money};

use super::error::InvoiceError;
use super::types::{
    BillableTimesheet, InvoiceDraft, InvoiceLineDraft, InvoiceStatus, ManualInvoiceInput,
    SourceSalesOrder, TimesheetStatus,
};
use crate::order::OrderLineSnapshot;

/// Currency tag used when a document carries none.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Description used for timesheet lines with no linked task.
const FALLBACK_TASK_TITLE: &str = "Project Work";

/// Invoice derivation service.
///
/// All operations validate before building; a returned draft is always
/// internally consistent (total equals the sum of line amounts for the
/// timesheet path, snapshot values for the copy paths).
pub struct InvoiceService;

impl InvoiceService {
    /// Derives an invoice from a set of approved, uninvoiced timesheets.
    ///
    /// `loaded` must be the timesheets found for `requested` ids on the
    /// project. A count mismatch means unknown or cross-project ids were
    /// requested; any timesheet that is not approved, or was already
    /// invoiced, rejects the whole set.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError` if validation fails; no draft is produced.
    pub fn from_timesheets(
        project_id: Uuid,
        requested: &[Uuid],
        loaded: &[BillableTimesheet],
        number: String,
    ) -> Result<(InvoiceDraft, Vec<InvoiceLineDraft>), InvoiceError> {
        if loaded.len() != requested.len() {
            return Err(InvoiceError::TimesheetsNotFound {
                requested: requested.len(),
                found: loaded.len(),
            });
        }

        if let Some(blocked) = loaded
            .iter()
            .find(|ts| ts.status != TimesheetStatus::Approved || ts.invoiced)
        {
            return Err(InvoiceError::NotInvoiceable(blocked.id));
        }

        let total_amount =
            round_money(loaded.iter().map(|ts| round_money(ts.amount)).sum::<Decimal>());

        let lines = loaded
            .iter()
            .map(|ts| InvoiceLineDraft {
                description: Self::timesheet_line_description(
                    ts.task_title.as_deref(),
                    ts.notes.as_deref(),
                ),
                quantity: ts.duration_hours,
                unit_price: round_money(ts.hourly_rate),
                amount: round_money(ts.amount),
                timesheet_id: Some(ts.id),
                expense_id: None,
            })
            .collect();

        let draft = InvoiceDraft {
            number,
            project_id: Some(project_id),
            source_so_id: None,
            status: InvoiceStatus::Draft,
            total_amount,
            currency: DEFAULT_CURRENCY.to_string(),
            due_date: None,
            notes: None,
        };

        Ok((draft, lines))
    }

    /// Derives an invoice from a sales order snapshot.
    ///
    /// Line values are copied verbatim (normalized, never recomputed) so
    /// later changes to the order do not alter the invoice.
    #[must_use]
    pub fn from_sales_order(
        so: &SourceSalesOrder,
        so_lines: &[OrderLineSnapshot],
        number: String,
    ) -> (InvoiceDraft, Vec<InvoiceLineDraft>) {
        let lines = so_lines
            .iter()
            .map(|line| InvoiceLineDraft {
                description: line.description.clone(),
                quantity: line.quantity,
                unit_price: round_money(line.unit_price),
                amount: round_money(line.amount),
                timesheet_id: None,
                expense_id: None,
            })
            .collect();

        let draft = InvoiceDraft {
            number,
            project_id: so.project_id,
            source_so_id: Some(so.id),
            status: InvoiceStatus::Draft,
            total_amount: round_money(so.total_amount),
            currency: currency_or_default(Some(&so.currency)),
            due_date: None,
            notes: None,
        };

        (draft, lines)
    }

    /// Builds an invoice from a caller-supplied payload (manual path).
    ///
    /// Line values are trusted and copied verbatim; the total defaults to
    /// zero when absent. When the payload names a customer and carries no
    /// notes, the notes are synthesized from the customer name.
    #[must_use]
    pub fn manual(
        input: &ManualInvoiceInput,
        generated_number: String,
    ) -> (InvoiceDraft, Vec<InvoiceLineDraft>) {
        let number = input
            .number
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map_or(generated_number, String::from);

        let notes = input.notes.clone().or_else(|| {
            input
                .customer_name
                .as_ref()
                .map(|name| format!("Customer: {name}"))
        });

        let lines = input
            .lines
            .iter()
            .map(|line| InvoiceLineDraft {
                description: line.description.clone().unwrap_or_default(),
                quantity: normalize(line.quantity.as_ref()),
                unit_price: normalize(line.unit_price.as_ref()),
                amount: normalize(line.amount.as_ref()),
                timesheet_id: None,
                expense_id: None,
            })
            .collect();

        let draft = InvoiceDraft {
            number,
            project_id: input.project_id,
            source_so_id: input.source_so_id,
            status: InvoiceStatus::Draft,
            total_amount: normalize(input.total_amount.as_ref()),
            currency: currency_or_default(input.currency.as_deref()),
            due_date: input.due_date,
            notes,
        };

        (draft, lines)
    }

    /// Builds the line description for a timesheet-derived invoice line.
    #[must_use]
    pub fn timesheet_line_description(task_title: Option<&str>, notes: Option<&str>) -> String {
        let title = task_title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(FALLBACK_TASK_TITLE);

        match notes.map(str::trim).filter(|n| !n.is_empty()) {
            Some(notes) => format!("Time: {title} - {notes}"),
            None => format!("Time: {title}"),
        }
    }

    /// Audit details line for a timesheet-derived invoice.
    #[must_use]
    pub fn timesheets_audit_details(count: usize) -> String {
        format!("Created invoice from {count} timesheets")
    }

    /// Audit details line for a sales-order-derived invoice.
    #[must_use]
    pub fn sales_order_audit_details(so_number: &str) -> String {
        format!("Created invoice from sales order {so_number}")
    }
}

/// Returns the given currency tag, falling back to USD when blank.
#[must_use]
pub fn currency_or_default(currency: Option<&str>) -> String {
    currency
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CURRENCY)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::ManualInvoiceLine;
    use oneflow_shared::types::RawAmount;
    use rust_decimal_macros::dec;

    fn approved_timesheet(amount: Decimal) -> BillableTimesheet {
        BillableTimesheet {
            id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            status: TimesheetStatus::Approved,
            invoiced: false,
            duration_hours: dec!(4),
            hourly_rate: dec!(25),
            amount,
            task_title: None,
            notes: None,
        }
    }

    #[test]
    fn test_from_timesheets_totals_and_lines() {
        // Scenario: 100.00 + 250.50 -> 350.50, one line per timesheet
        let project_id = Uuid::new_v4();
        let ts1 = approved_timesheet(dec!(100.00));
        let ts2 = approved_timesheet(dec!(250.50));
        let requested = vec![ts1.id, ts2.id];

        let (draft, lines) = InvoiceService::from_timesheets(
            project_id,
            &requested,
            &[ts1.clone(), ts2.clone()],
            "INV-1".to_string(),
        )
        .unwrap();

        assert_eq!(draft.total_amount, dec!(350.50));
        assert_eq!(draft.status, InvoiceStatus::Draft);
        assert_eq!(draft.project_id, Some(project_id));
        assert_eq!(draft.currency, "USD");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].timesheet_id, Some(ts1.id));
        assert_eq!(lines[1].timesheet_id, Some(ts2.id));
        assert_eq!(lines[1].amount, dec!(250.50));
    }

    #[test]
    fn test_from_timesheets_count_mismatch() {
        let project_id = Uuid::new_v4();
        let ts = approved_timesheet(dec!(50));
        let requested = vec![ts.id, Uuid::new_v4()];

        let result =
            InvoiceService::from_timesheets(project_id, &requested, &[ts], "INV-1".to_string());

        assert!(matches!(
            result,
            Err(InvoiceError::TimesheetsNotFound {
                requested: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_from_timesheets_rejects_already_invoiced() {
        let project_id = Uuid::new_v4();
        let mut ts = approved_timesheet(dec!(50));
        ts.invoiced = true;
        let requested = vec![ts.id];
        let blocked_id = ts.id;

        let result =
            InvoiceService::from_timesheets(project_id, &requested, &[ts], "INV-1".to_string());

        assert!(matches!(
            result,
            Err(InvoiceError::NotInvoiceable(id)) if id == blocked_id
        ));
    }

    #[test]
    fn test_from_timesheets_rejects_unapproved() {
        let project_id = Uuid::new_v4();
        let mut ts = approved_timesheet(dec!(50));
        ts.status = TimesheetStatus::Submitted;
        let requested = vec![ts.id];

        let result =
            InvoiceService::from_timesheets(project_id, &requested, &[ts], "INV-1".to_string());

        assert!(matches!(result, Err(InvoiceError::NotInvoiceable(_))));
    }

    #[test]
    fn test_from_timesheets_line_carries_rate_and_hours() {
        let project_id = Uuid::new_v4();
        let mut ts = approved_timesheet(dec!(100.00));
        ts.duration_hours = dec!(2.5);
        ts.hourly_rate = dec!(40);
        ts.task_title = Some("API design".to_string());
        ts.notes = Some("pair session".to_string());
        let requested = vec![ts.id];

        let (_, lines) =
            InvoiceService::from_timesheets(project_id, &requested, &[ts], "INV-1".to_string())
                .unwrap();

        assert_eq!(lines[0].quantity, dec!(2.5));
        assert_eq!(lines[0].unit_price, dec!(40));
        assert_eq!(lines[0].description, "Time: API design - pair session");
    }

    #[test]
    fn test_line_description_fallbacks() {
        assert_eq!(
            InvoiceService::timesheet_line_description(None, None),
            "Time: Project Work"
        );
        assert_eq!(
            InvoiceService::timesheet_line_description(Some("Review"), None),
            "Time: Review"
        );
        assert_eq!(
            InvoiceService::timesheet_line_description(None, Some("standup")),
            "Time: Project Work - standup"
        );
        assert_eq!(
            InvoiceService::timesheet_line_description(Some(""), Some("")),
            "Time: Project Work"
        );
    }

    #[test]
    fn test_from_sales_order_snapshot_copy() {
        // Scenario: lines [2 x 50, 1 x 75] -> invoice total 175, lines match exactly
        let so = SourceSalesOrder {
            id: Uuid::new_v4(),
            number: "SO-1".to_string(),
            project_id: Some(Uuid::new_v4()),
            total_amount: dec!(175),
            currency: "USD".to_string(),
        };
        let so_lines = vec![
            OrderLineSnapshot {
                description: "Widget".to_string(),
                quantity: dec!(2),
                unit_price: dec!(50),
                amount: dec!(100),
            },
            OrderLineSnapshot {
                description: "Gadget".to_string(),
                quantity: dec!(1),
                unit_price: dec!(75),
                amount: dec!(75),
            },
        ];

        let (draft, lines) =
            InvoiceService::from_sales_order(&so, &so_lines, "INV-2".to_string());

        assert_eq!(draft.total_amount, dec!(175));
        assert_eq!(draft.source_so_id, Some(so.id));
        assert_eq!(lines.len(), 2);
        for (line, source) in lines.iter().zip(&so_lines) {
            assert_eq!(line.description, source.description);
            assert_eq!(line.quantity, source.quantity);
            assert_eq!(line.unit_price, source.unit_price);
            assert_eq!(line.amount, source.amount);
        }
    }

    #[test]
    fn test_from_sales_order_blank_currency_defaults() {
        let so = SourceSalesOrder {
            id: Uuid::new_v4(),
            number: "SO-1".to_string(),
            project_id: None,
            total_amount: dec!(10),
            currency: String::new(),
        };

        let (draft, _) = InvoiceService::from_sales_order(&so, &[], "INV-3".to_string());
        assert_eq!(draft.currency, "USD");
    }

    #[test]
    fn test_manual_defaults() {
        let input = ManualInvoiceInput::default();
        let (draft, lines) = InvoiceService::manual(&input, "INV-4".to_string());

        assert_eq!(draft.number, "INV-4");
        assert_eq!(draft.total_amount, Decimal::ZERO);
        assert_eq!(draft.currency, "USD");
        assert_eq!(draft.status, InvoiceStatus::Draft);
        assert!(draft.notes.is_none());
        assert!(lines.is_empty());
    }

    #[test]
    fn test_manual_keeps_caller_number_and_lines() {
        let input = ManualInvoiceInput {
            number: Some("INV-CUSTOM".to_string()),
            customer_name: Some("Acme".to_string()),
            total_amount: Some(RawAmount::Number(dec!(161.25))),
            lines: vec![ManualInvoiceLine {
                description: Some("Consulting".to_string()),
                quantity: Some(RawAmount::Number(dec!(1))),
                unit_price: Some(RawAmount::Number(dec!(150))),
                // caller applied 7.5% tax upstream
                amount: Some(RawAmount::Number(dec!(161.25))),
            }],
            ..ManualInvoiceInput::default()
        };

        let (draft, lines) = InvoiceService::manual(&input, "INV-5".to_string());

        assert_eq!(draft.number, "INV-CUSTOM");
        assert_eq!(draft.notes.as_deref(), Some("Customer: Acme"));
        assert_eq!(draft.total_amount, dec!(161.25));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].amount, dec!(161.25));
        assert_eq!(lines[0].unit_price, dec!(150));
    }

    #[test]
    fn test_manual_explicit_notes_win_over_customer_name() {
        let input = ManualInvoiceInput {
            customer_name: Some("Acme".to_string()),
            notes: Some("net 30".to_string()),
            ..ManualInvoiceInput::default()
        };

        let (draft, _) = InvoiceService::manual(&input, "INV-6".to_string());
        assert_eq!(draft.notes.as_deref(), Some("net 30"));
    }

    #[test]
    fn test_audit_details() {
        assert_eq!(
            InvoiceService::timesheets_audit_details(3),
            "Created invoice from 3 timesheets"
        );
        assert_eq!(
            InvoiceService::sales_order_audit_details("SO-9"),
            "Created invoice from sales order SO-9"
        );
    }
}
