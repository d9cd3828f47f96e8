//! Document number generation.
//!
//! Produces human-readable document numbers like `INV-1754300000000-9f3a`.
//! The millisecond timestamp keeps numbers roughly sortable; the UUID suffix
//! closes the collision window under concurrent creation. The database's
//! unique constraint on `number` remains the authoritative guard.

use chrono::Utc;
use uuid::Uuid;

/// Generates unique, human-readable document numbers.
pub struct DocumentNumbering;

impl DocumentNumbering {
    /// Prefix for sales order numbers.
    pub const SALES_ORDER: &'static str = "SO";
    /// Prefix for purchase order numbers.
    pub const PURCHASE_ORDER: &'static str = "PO";
    /// Prefix for vendor bill numbers.
    pub const VENDOR_BILL: &'static str = "BILL";
    /// Prefix for customer invoice numbers.
    pub const INVOICE: &'static str = "INV";

    /// Generates a document number of the form `<PREFIX>-<millis>-<suffix>`.
    #[must_use]
    pub fn generate(prefix: &str) -> String {
        let millis = Utc::now().timestamp_millis();
        let uuid = Uuid::new_v4().simple().to_string();
        format!("{prefix}-{millis}-{}", &uuid[..4])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_carries_prefix() {
        let number = DocumentNumbering::generate(DocumentNumbering::INVOICE);
        assert!(number.starts_with("INV-"));
    }

    #[test]
    fn test_generate_has_three_segments() {
        let number = DocumentNumbering::generate(DocumentNumbering::SALES_ORDER);
        let segments: Vec<&str> = number.split('-').collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], "SO");
        assert!(segments[1].parse::<i64>().is_ok());
        assert_eq!(segments[2].len(), 4);
    }

    #[test]
    fn test_generate_is_unique_across_calls() {
        let numbers: std::collections::HashSet<String> = (0..100)
            .map(|_| DocumentNumbering::generate(DocumentNumbering::VENDOR_BILL))
            .collect();
        assert_eq!(numbers.len(), 100);
    }
}
