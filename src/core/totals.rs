//! Line display pass and invoice-level aggregation.

use rust_decimal::Decimal;
use serde::Serialize;

use super::tax::TaxCalculator;
use super::types::{Invoice, InvoiceTotals, Jurisdiction, LineItem, TaxResult, TaxType};
use crate::words::{WordScale, amount_in_words};

/// Sum net amounts and per-line tax across `items`.
///
/// Tax is recomputed here for every line, independently of any display pass.
pub fn aggregate(
    items: &[LineItem],
    jurisdiction: &Jurisdiction,
    calculator: &TaxCalculator,
) -> InvoiceTotals {
    let total_net_amount: Decimal = items.iter().map(LineItem::net_amount).sum();
    let total_tax_amount: Decimal = items
        .iter()
        .map(|item| {
            calculator
                .calculate(item.net_amount(), jurisdiction)
                .tax_amount
        })
        .sum();

    InvoiceTotals {
        total_net_amount,
        total_tax_amount,
        total_amount: total_net_amount + total_tax_amount,
    }
}

/// A line as shown on the invoice, with its computed tax.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    pub description: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub discount: Decimal,
    pub net_amount: Decimal,
    pub tax: TaxResult,
}

/// Everything derived from an invoice payload that the document shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub tax_type: TaxType,
    pub lines: Vec<InvoiceLine>,
    pub totals: InvoiceTotals,
    pub amount_in_words: String,
}

impl InvoiceSummary {
    /// Run the display pass, the aggregate pass and the words rendering.
    pub fn prepare(invoice: &Invoice, calculator: &TaxCalculator, scale: WordScale) -> Self {
        let jurisdiction = invoice.jurisdiction();

        let lines: Vec<InvoiceLine> = invoice
            .items
            .iter()
            .map(|item| {
                let net_amount = item.net_amount();
                InvoiceLine {
                    description: item.description.clone(),
                    unit_price: item.unit_price,
                    quantity: item.quantity,
                    discount: item.discount,
                    net_amount,
                    tax: calculator.calculate(net_amount, &jurisdiction),
                }
            })
            .collect();

        let totals = aggregate(&invoice.items, &jurisdiction, calculator);

        tracing::debug!(
            invoice_no = %invoice.invoice_details.invoice_no,
            lines = lines.len(),
            tax_type = %jurisdiction.tax_type(),
            total = %totals.total_amount,
            "invoice totals computed"
        );

        Self {
            tax_type: jurisdiction.tax_type(),
            lines,
            amount_in_words: amount_in_words(totals.total_amount, scale),
            totals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(price: Decimal, qty: u32, discount: Decimal) -> LineItem {
        LineItem {
            description: "Widget".into(),
            unit_price: price,
            quantity: qty,
            discount,
        }
    }

    #[test]
    fn sums_net_and_tax() {
        let items = vec![
            item(dec!(500), 2, dec!(100)),
            item(dec!(100), 1, dec!(0)),
        ];
        let totals = aggregate(
            &items,
            &Jurisdiction::new("MH", "DL"),
            &TaxCalculator::default(),
        );
        assert_eq!(totals.total_net_amount, dec!(1000));
        assert_eq!(totals.total_tax_amount, dec!(180));
        assert_eq!(totals.total_amount, dec!(1180));
    }

    #[test]
    fn intra_state_totals_add_one_component_per_line() {
        let items = vec![item(dec!(1000), 1, dec!(0))];
        let totals = aggregate(
            &items,
            &Jurisdiction::new("MH", "MH"),
            &TaxCalculator::default(),
        );
        assert_eq!(totals.total_tax_amount, dec!(90));
        assert_eq!(totals.total_amount, dec!(1090));
    }

    #[test]
    fn empty_items_give_zero_totals() {
        let totals = aggregate(&[], &Jurisdiction::new("KA", "KA"), &TaxCalculator::default());
        assert_eq!(totals, InvoiceTotals::default());
    }
}
