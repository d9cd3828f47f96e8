//! Property-based tests for order line resolution.
//!
//! - Total consistency: the order total always equals the sum of line amounts
//! - Line amounts always equal quantity x unit price, to the cent

use proptest::prelude::*;
use rust_decimal::Decimal;

use oneflow_shared::types::{RawAmount, round_money};

use super::service::{OrderService, SALES_LINE_FALLBACK};
use super::types::OrderLineInput;

/// Strategy to generate cent-scaled quantities (0.00 to 1,000.00).
fn quantity() -> impl Strategy<Value = Decimal> {
    (0i64..100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate cent-scaled unit prices (0.00 to 10,000.00).
fn unit_price() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a raw order line.
fn raw_line() -> impl Strategy<Value = OrderLineInput> {
    (quantity(), unit_price()).prop_map(|(qty, price)| OrderLineInput {
        description: Some("Line".to_string()),
        quantity: Some(RawAmount::Number(qty)),
        unit_price: Some(RawAmount::Number(price)),
        product_id: None,
    })
}

proptest! {
    #[test]
    fn prop_total_equals_sum_of_line_amounts(lines in prop::collection::vec(raw_line(), 0..20)) {
        let resolved = OrderService::resolve_lines(&lines, SALES_LINE_FALLBACK);
        let expected: Decimal = resolved.iter().map(|l| l.amount).sum();
        prop_assert_eq!(OrderService::total_amount(&resolved), round_money(expected));
    }

    #[test]
    fn prop_line_amount_is_quantity_times_price(line in raw_line()) {
        let resolved = OrderService::resolve_lines(std::slice::from_ref(&line), SALES_LINE_FALLBACK);
        let expected = round_money(resolved[0].quantity * resolved[0].unit_price);
        prop_assert_eq!(resolved[0].amount, expected);
    }

    #[test]
    fn prop_resolution_preserves_line_count(lines in prop::collection::vec(raw_line(), 0..50)) {
        let resolved = OrderService::resolve_lines(&lines, SALES_LINE_FALLBACK);
        prop_assert_eq!(resolved.len(), lines.len());
    }
}
