//! `SeaORM` entity definitions for the finance schema.

pub mod audit_logs;
pub mod bill_lines;
pub mod customer_invoices;
pub mod expenses;
pub mod invoice_lines;
pub mod projects;
pub mod purchase_order_lines;
pub mod purchase_orders;
pub mod sales_order_lines;
pub mod sales_orders;
pub mod sea_orm_active_enums;
pub mod tasks;
pub mod timesheets;
pub mod vendor_bills;
