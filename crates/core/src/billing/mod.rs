//! Vendor bill derivation.
//!
//! This module implements the vendor bill engine's pure rules:
//! - Purchase order snapshot copy into a bill draft
//! - The at-most-one-bill-per-order guard
//! - Error types for derivation failures

pub mod error;
pub mod service;
pub mod types;

pub use error::BillError;
pub use service::BillingService;
pub use types::{
    BillDraft, BillLineDraft, CreateBillInput, SourcePurchaseOrder, VendorBillStatus,
};
