//! Sales and purchase order logic.
//!
//! This module implements the order engines' pure rules:
//! - Raw line normalization with defaulting
//! - Line amount and order total computation
//! - Per-document status enums

pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use service::{OrderService, PURCHASE_LINE_FALLBACK, SALES_LINE_FALLBACK};
pub use types::{
    OrderLineInput, OrderLineSnapshot, PurchaseOrderStatus, ResolvedOrderLine, SalesOrderStatus,
};
