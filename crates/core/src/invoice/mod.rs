//! Customer invoice derivation.
//!
//! This module implements the invoice derivation engine's pure rules:
//! - Timesheet validation (approval + idempotency guard) and conversion
//! - Sales order snapshot copy
//! - Manual payload handling
//! - Error types for derivation failures

pub mod error;
pub mod service;
pub mod types;

pub use error::InvoiceError;
pub use service::{DEFAULT_CURRENCY, InvoiceService, currency_or_default};
pub use types::{
    BillableTimesheet, InvoiceDraft, InvoiceLineDraft, InvoiceStatus, ManualInvoiceInput,
    ManualInvoiceLine, SourceSalesOrder, TimesheetStatus,
};
