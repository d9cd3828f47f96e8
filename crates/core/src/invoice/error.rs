//! Invoice derivation error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors raised while deriving a customer invoice.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// Some requested timesheets were not found on the project.
    #[error("some timesheets not found")]
    TimesheetsNotFound {
        /// Number of timesheet ids requested.
        requested: usize,
        /// Number actually loaded for the project.
        found: usize,
    },

    /// A timesheet is not in an invoiceable state.
    ///
    /// This is the idempotency guard: re-submitting an already-invoiced
    /// timesheet always fails here.
    #[error("timesheet {0} is not approved or already invoiced")]
    NotInvoiceable(Uuid),
}
