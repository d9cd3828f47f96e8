//! Invoice domain types for derivation and validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use oneflow_shared::types::RawAmount;

/// Timesheet workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimesheetStatus {
    /// Being entered by the team member.
    Draft,
    /// Submitted for approval.
    Submitted,
    /// Approved and billable.
    Approved,
    /// Rejected by the approver.
    Rejected,
}

impl TimesheetStatus {
    /// Returns the stored string form of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Customer invoice lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Invoice is being drafted.
    Draft,
    /// Invoice has been issued to the customer.
    Posted,
    /// Invoice has been paid in full.
    Paid,
    /// Invoice was cancelled.
    Cancelled,
}

impl InvoiceStatus {
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

/// A loaded timesheet candidate for invoicing.
///
/// The ledger store loads and locks these rows; the derivation rules below
/// validate and convert them without touching the store.
#[derive(Debug, Clone)]
pub struct BillableTimesheet {
    /// Timesheet id.
    pub id: Uuid,
    /// Owning project.
    pub project_id: Uuid,
    /// Workflow status.
    pub status: TimesheetStatus,
    /// Whether this timesheet has already been invoiced.
    pub invoiced: bool,
    /// Hours worked.
    pub duration_hours: Decimal,
    /// Rate per hour.
    pub hourly_rate: Decimal,
    /// Precomputed amount (duration x rate), as stored.
    pub amount: Decimal,
    /// Title of the linked task, if any.
    pub task_title: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// A loaded sales order header used as derivation input.
#[derive(Debug, Clone)]
pub struct SourceSalesOrder {
    /// Sales order id.
    pub id: Uuid,
    /// Document number.
    pub number: String,
    /// Owning project, if any.
    pub project_id: Option<Uuid>,
    /// Stored order total.
    pub total_amount: Decimal,
    /// Currency tag.
    pub currency: String,
}

/// A customer invoice header ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDraft {
    /// Document number.
    pub number: String,
    /// Owning project, if any.
    pub project_id: Option<Uuid>,
    /// Source sales order, if derived from one.
    pub source_so_id: Option<Uuid>,
    /// Lifecycle status.
    pub status: InvoiceStatus,
    /// Invoice total, cent-rounded.
    pub total_amount: Decimal,
    /// Currency tag.
    pub currency: String,
    /// Payment due date.
    pub due_date: Option<NaiveDate>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// A customer invoice line ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceLineDraft {
    /// Line description.
    pub description: String,
    /// Quantity (hours for timesheet lines).
    pub quantity: Decimal,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Line amount.
    pub amount: Decimal,
    /// Source timesheet, if derived from one.
    pub timesheet_id: Option<Uuid>,
    /// Source expense, if derived from one.
    pub expense_id: Option<Uuid>,
}

/// Caller-supplied payload for the manual invoice path.
///
/// The caller is trusted to have computed correct line amounts (e.g. after
/// applying tax or discount upstream); values are normalized but never
/// recomputed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManualInvoiceInput {
    /// Document number; generated when absent.
    pub number: Option<String>,
    /// Owning project, if any.
    pub project_id: Option<Uuid>,
    /// Sales order to link and mark posted, if any.
    pub source_so_id: Option<Uuid>,
    /// Customer display name, folded into the invoice notes.
    pub customer_name: Option<String>,
    /// Invoice total; defaults to zero.
    pub total_amount: Option<RawAmount>,
    /// Currency tag; defaults to USD.
    pub currency: Option<String>,
    /// Payment due date.
    pub due_date: Option<NaiveDate>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Invoice lines, copied verbatim.
    #[serde(default)]
    pub lines: Vec<ManualInvoiceLine>,
}

/// A caller-supplied invoice line for the manual path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManualInvoiceLine {
    /// Line description.
    pub description: Option<String>,
    /// Quantity.
    pub quantity: Option<RawAmount>,
    /// Price per unit.
    pub unit_price: Option<RawAmount>,
    /// Line amount, as computed by the caller.
    pub amount: Option<RawAmount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timesheet_status_strings() {
        assert_eq!(TimesheetStatus::Draft.as_str(), "draft");
        assert_eq!(TimesheetStatus::Submitted.as_str(), "submitted");
        assert_eq!(TimesheetStatus::Approved.as_str(), "approved");
        assert_eq!(TimesheetStatus::Rejected.as_str(), "rejected");
    }

    #[test]
    fn test_invoice_status_strings() {
        assert_eq!(InvoiceStatus::Draft.as_str(), "draft");
        assert_eq!(InvoiceStatus::Posted.as_str(), "posted");
        assert_eq!(InvoiceStatus::Paid.as_str(), "paid");
        assert_eq!(InvoiceStatus::Cancelled.as_str(), "cancelled");
    }
}
