//! Order line resolution and totals.
//!
//! Pure logic shared by the sales and purchase order engines: raw caller
//! lines are normalized into persisted line values, and the order total is
//! always the sum of its line amounts.

use rust_decimal::Decimal;

use oneflow_shared::types::{normalize, round_money};

use super::types::{OrderLineInput, ResolvedOrderLine};

/// Fallback description for sales order lines.
pub const SALES_LINE_FALLBACK: &str = "Unknown";

/// Fallback description for purchase order lines.
pub const PURCHASE_LINE_FALLBACK: &str = "Item";

/// Order resolution service.
///
/// Contains pure business logic with no database dependencies.
pub struct OrderService;

impl OrderService {
    /// Resolves raw caller lines into persisted line values.
    ///
    /// Quantity and unit price default to zero; the line amount is always
    /// recomputed as quantity x unit price, cent-rounded. An empty or
    /// missing description falls back to `fallback_description`.
    #[must_use]
    pub fn resolve_lines(
        lines: &[OrderLineInput],
        fallback_description: &str,
    ) -> Vec<ResolvedOrderLine> {
        lines
            .iter()
            .map(|line| {
                let quantity = normalize(line.quantity.as_ref());
                let unit_price = normalize(line.unit_price.as_ref());
                let description = line
                    .description
                    .as_deref()
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .unwrap_or(fallback_description)
                    .to_string();

                ResolvedOrderLine {
                    description,
                    quantity,
                    unit_price,
                    amount: round_money(quantity * unit_price),
                    product_id: line.product_id,
                }
            })
            .collect()
    }

    /// Computes the order total as the sum of resolved line amounts.
    #[must_use]
    pub fn total_amount(lines: &[ResolvedOrderLine]) -> Decimal {
        round_money(lines.iter().map(|line| line.amount).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oneflow_shared::types::RawAmount;
    use rust_decimal_macros::dec;

    fn line(description: Option<&str>, quantity: Decimal, unit_price: Decimal) -> OrderLineInput {
        OrderLineInput {
            description: description.map(String::from),
            quantity: Some(RawAmount::Number(quantity)),
            unit_price: Some(RawAmount::Number(unit_price)),
            product_id: None,
        }
    }

    #[test]
    fn test_resolve_computes_line_amounts() {
        let lines = [
            line(Some("Widget"), dec!(2), dec!(50)),
            line(Some("Gadget"), dec!(1), dec!(75)),
        ];
        let resolved = OrderService::resolve_lines(&lines, SALES_LINE_FALLBACK);

        assert_eq!(resolved[0].amount, dec!(100));
        assert_eq!(resolved[1].amount, dec!(75));
        assert_eq!(OrderService::total_amount(&resolved), dec!(175));
    }

    #[test]
    fn test_resolve_defaults_missing_values() {
        let lines = [OrderLineInput::default()];
        let resolved = OrderService::resolve_lines(&lines, PURCHASE_LINE_FALLBACK);

        assert_eq!(resolved[0].description, "Item");
        assert_eq!(resolved[0].quantity, Decimal::ZERO);
        assert_eq!(resolved[0].unit_price, Decimal::ZERO);
        assert_eq!(resolved[0].amount, Decimal::ZERO);
    }

    #[test]
    fn test_resolve_blank_description_falls_back() {
        let lines = [OrderLineInput {
            description: Some("   ".to_string()),
            ..OrderLineInput::default()
        }];
        let resolved = OrderService::resolve_lines(&lines, SALES_LINE_FALLBACK);
        assert_eq!(resolved[0].description, "Unknown");
    }

    #[test]
    fn test_resolve_unparsable_amounts_are_zero() {
        let lines = [OrderLineInput {
            description: Some("Widget".to_string()),
            quantity: Some(RawAmount::Text("three".to_string())),
            unit_price: Some(RawAmount::Number(dec!(10))),
            product_id: None,
        }];
        let resolved = OrderService::resolve_lines(&lines, SALES_LINE_FALLBACK);
        assert_eq!(resolved[0].quantity, Decimal::ZERO);
        assert_eq!(resolved[0].amount, Decimal::ZERO);
    }

    #[test]
    fn test_resolve_rounds_line_amount_to_cents() {
        // 3 x 0.333 = 0.999 -> 1.00
        let lines = [line(Some("Bulk"), dec!(3), dec!(0.333))];
        let resolved = OrderService::resolve_lines(&lines, SALES_LINE_FALLBACK);
        assert_eq!(resolved[0].unit_price, dec!(0.33));
        assert_eq!(resolved[0].amount, dec!(0.99));
    }

    #[test]
    fn test_total_of_empty_order_is_zero() {
        assert_eq!(OrderService::total_amount(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_scenario_order_with_single_line() {
        // createSalesOrder: 3 Widgets at 10 each -> total 30
        let lines = [line(Some("Widget"), dec!(3), dec!(10))];
        let resolved = OrderService::resolve_lines(&lines, SALES_LINE_FALLBACK);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].amount, dec!(30));
        assert_eq!(OrderService::total_amount(&resolved), dec!(30));
    }
}
