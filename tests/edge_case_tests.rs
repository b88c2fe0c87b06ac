//! Boundary behavior of the calculator, validation and payload parsing.

use bijak::core::*;
use bijak::words::{WordScale, amount_in_words};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn valid_invoice() -> Invoice {
    InvoiceBuilder::new("INV-EDGE-1", date(2024, 8, 15))
        .seller(
            PartyBuilder::new("Acme Traders", "12 MG Road, Pune")
                .pan("AAPFU0939F")
                .gst("27AAPFU0939F1ZV")
                .build(),
        )
        .billing(Contact::new("Asha Rao", "Pune"))
        .places("MH", "KA")
        .add_item(LineItemBuilder::new("Widget", dec!(100), 1).build())
        .build()
        .unwrap()
}

fn rules(errors: &[ValidationError]) -> Vec<&str> {
    errors.iter().filter_map(|e| e.rule.as_deref()).collect()
}

fn fields(errors: &[ValidationError]) -> Vec<&str> {
    errors.iter().map(|e| e.field.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Arithmetic boundaries
// ---------------------------------------------------------------------------

#[test]
fn zero_net_amount() {
    let result = TaxCalculator::default().calculate(Decimal::ZERO, &Jurisdiction::new("MH", "MH"));
    assert!(result.tax_amount.is_zero());
    assert!(result.total_amount.is_zero());
}

#[test]
fn zero_quantity_line() {
    let item = LineItemBuilder::new("Sample", dec!(250), 0).build();
    assert!(item.net_amount().is_zero());
}

#[test]
fn discount_on_zero_quantity_line_is_negative() {
    let mut inv = valid_invoice();
    inv.items = vec![
        LineItemBuilder::new("Sample", dec!(250), 0)
            .discount(dec!(50))
            .build(),
    ];
    assert!(validate_invoice(&inv).is_empty());

    let summary = InvoiceSummary::prepare(&inv, &TaxCalculator::default(), WordScale::International);
    assert_eq!(summary.lines[0].net_amount, dec!(-50));
    assert_eq!(summary.lines[0].tax.tax_amount, dec!(-9));
    assert_eq!(summary.lines[0].tax.total_amount, dec!(-59));
    assert_eq!(summary.totals.total_tax_amount, dec!(-9));
    assert_eq!(summary.totals.total_amount, dec!(-59));
    assert_eq!(summary.amount_in_words, "MINUS FIFTY-NINE ONLY");

    // Intra-state: each 9% component is -4.5; the aggregate adds one of them
    inv.place_of_delivery = "MH".into();
    let summary = InvoiceSummary::prepare(&inv, &TaxCalculator::default(), WordScale::International);
    assert_eq!(summary.lines[0].tax.tax_amount, dec!(-4.5));
    assert_eq!(summary.lines[0].tax.total_amount, dec!(-59));
    assert_eq!(summary.totals.total_amount, dec!(-54.5));
}

#[test]
fn discount_above_gross_gives_negative_totals() {
    let mut inv = valid_invoice();
    inv.items = vec![
        LineItemBuilder::new("Return credit", dec!(100), 1)
            .discount(dec!(200))
            .build(),
    ];

    // Accepted by validation; carried through arithmetic
    assert!(validate_invoice(&inv).is_empty());

    let summary = InvoiceSummary::prepare(&inv, &TaxCalculator::default(), WordScale::International);
    assert_eq!(summary.totals.total_net_amount, dec!(-100));
    assert_eq!(summary.totals.total_tax_amount, dec!(-18));
    assert_eq!(summary.totals.total_amount, dec!(-118));
    assert_eq!(
        summary.amount_in_words,
        "MINUS ONE HUNDRED EIGHTEEN ONLY"
    );
}

#[test]
fn sub_paisa_amounts_are_not_rounded() {
    let result = TaxCalculator::default().calculate(dec!(0.01), &Jurisdiction::new("MH", "DL"));
    assert_eq!(result.tax_amount, dec!(0.0018));
    assert_eq!(result.total_amount, dec!(0.0118));
}

#[test]
fn words_round_only_for_display() {
    assert_eq!(
        amount_in_words(dec!(0.0118), WordScale::International),
        "ZERO AND ONE PAISE ONLY"
    );
    assert_eq!(
        amount_in_words(dec!(0.004), WordScale::International),
        "ZERO ONLY"
    );
    // -0.004 rounds to zero; no sign is shown
    assert_eq!(
        amount_in_words(dec!(-0.004), WordScale::International),
        "ZERO ONLY"
    );
}

#[test]
fn large_quantity_and_price() {
    let item = LineItemBuilder::new("Bulk", dec!(99999999.99), u32::MAX).build();
    let result = TaxCalculator::default().calculate(item.net_amount(), &Jurisdiction::new("MH", "DL"));
    assert_eq!(result.total_amount, item.net_amount() + result.tax_amount);
}

#[test]
fn empty_item_list_aggregates_to_zero() {
    let totals = aggregate(&[], &Jurisdiction::new("MH", "MH"), &TaxCalculator::default());
    assert_eq!(totals, InvoiceTotals::default());
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn valid_invoice_has_no_errors() {
    assert!(validate_invoice(&valid_invoice()).is_empty());
}

#[test]
fn pan_and_gst_are_optional() {
    let mut inv = valid_invoice();
    inv.seller.pan = None;
    inv.seller.gst = Some("   ".into());
    assert!(validate_invoice(&inv).is_empty());
}

#[test]
fn collects_every_error() {
    let mut inv = valid_invoice();
    inv.seller.name = " ".into();
    inv.billing.address = String::new();
    inv.place_of_supply = String::new();
    inv.items[0].description = String::new();
    inv.items[0].unit_price = dec!(-1);
    inv.items[0].discount = dec!(-5);

    let errors = validate_invoice(&inv);

    assert_eq!(
        rules(&errors),
        ["GST-01", "GST-03", "GST-09", "GST-11", "GST-12", "GST-13"]
    );
    assert_eq!(
        fields(&errors),
        [
            "seller.name",
            "billing.address",
            "placeOfSupply",
            "items.0.description",
            "items.0.unitPrice",
            "items.0.discount",
        ]
    );
}

#[test]
fn malformed_pan_is_rejected() {
    let mut inv = valid_invoice();
    inv.seller.pan = Some("AAPFU0939".into());
    inv.seller.gst = None;
    assert_eq!(rules(&validate_invoice(&inv)), ["GST-05"]);
}

#[test]
fn gstin_checksum_is_enforced() {
    let mut inv = valid_invoice();
    inv.seller.gst = Some("27AAPFU0939F1ZW".into());
    let errors = validate_invoice(&inv);
    assert_eq!(rules(&errors), ["GST-06"]);
    assert!(errors[0].message.contains("check character"));
}

#[test]
fn gstin_must_embed_the_pan() {
    let mut inv = valid_invoice();
    inv.seller.gst = Some("29AAGCB7383J1Z4".into());
    let errors = validate_invoice(&inv);
    assert_eq!(rules(&errors), ["GST-06"]);
    assert!(errors[0].message.contains("PAN"));
}

#[test]
fn overlong_reference_is_rejected() {
    let mut inv = valid_invoice();
    inv.invoice_details.invoice_no = "X".repeat(MAX_REFERENCE_LEN + 1);
    assert_eq!(rules(&validate_invoice(&inv)), ["GST-08"]);
}

#[test]
fn too_many_lines_are_rejected() {
    let mut inv = valid_invoice();
    inv.items = vec![inv.items[0].clone(); MAX_LINE_ITEMS + 1];
    assert_eq!(rules(&validate_invoice(&inv)), ["GST-10"]);
}

#[test]
fn amounts_above_cap_are_rejected() {
    let mut inv = valid_invoice();
    inv.items[0].unit_price = MAX_AMOUNT + dec!(0.01);
    inv.items[0].discount = MAX_AMOUNT * dec!(2);
    inv.items[0].quantity = u32::MAX;
    assert_eq!(rules(&validate_invoice(&inv)), ["GST-12", "GST-13"]);

    // At the cap the arithmetic still fits
    inv.items[0].unit_price = MAX_AMOUNT;
    inv.items[0].discount = Decimal::ZERO;
    assert!(validate_invoice(&inv).is_empty());
    let summary = InvoiceSummary::prepare(&inv, &TaxCalculator::default(), WordScale::Indian);
    assert_eq!(
        summary.totals.total_amount,
        MAX_AMOUNT * Decimal::from(u32::MAX) * dec!(1.18)
    );
}

#[test]
fn unknown_place_codes_still_compute() {
    let mut inv = valid_invoice();
    inv.place_of_supply = "Somewhere".into();
    inv.place_of_delivery = "Somewhere".into();
    assert!(validate_invoice(&inv).is_empty());
    assert_eq!(inv.jurisdiction().tax_type(), TaxType::CgstSgst);
}

#[test]
fn validation_error_display() {
    let err = ValidationError::with_rule("items.0.unitPrice", "must not be negative", "GST-12");
    assert_eq!(err.to_string(), "[GST-12] items.0.unitPrice: must not be negative");

    let invoice_err = InvoiceError::Validation(vec![err]);
    assert!(invoice_err.to_string().contains("GST-12"));
}

// ---------------------------------------------------------------------------
// Payload parsing
// ---------------------------------------------------------------------------

fn payload_with_item(item: &str) -> String {
    format!(
        r#"{{
            "seller": {{"name": "Acme", "address": "Pune"}},
            "billing": {{"name": "Asha", "address": "Pune"}},
            "shipping": {{"name": "Asha", "address": "Pune"}},
            "orderDetails": {{"orderNo": "O-1", "orderDate": "2024-01-01"}},
            "invoiceDetails": {{"invoiceNo": "I-1", "invoiceDate": "2024-01-02"}},
            "items": [{item}],
            "placeOfSupply": "MH",
            "placeOfDelivery": "MH"
        }}"#
    )
}

#[test]
fn minimal_payload_parses() {
    let inv: Invoice = serde_json::from_str(&payload_with_item(
        r#"{"description": "Widget", "unitPrice": "10", "quantity": 3}"#,
    ))
    .unwrap();
    assert_eq!(inv.items[0].net_amount(), dec!(30));
    assert!(inv.seller.pan.is_none());
    assert!(!inv.reverse_charge);
}

#[test]
fn null_discount_is_zero() {
    let inv: Invoice = serde_json::from_str(&payload_with_item(
        r#"{"description": "Widget", "unitPrice": "10", "quantity": 2, "discount": null}"#,
    ))
    .unwrap();
    assert!(inv.items[0].discount.is_zero());
    assert_eq!(inv.items[0].net_amount(), dec!(20));
}

#[test]
fn numeric_discount_parses() {
    let inv: Invoice = serde_json::from_str(&payload_with_item(
        r#"{"description": "Widget", "unitPrice": "10", "quantity": 2, "discount": 5}"#,
    ))
    .unwrap();
    assert_eq!(inv.items[0].discount, dec!(5));
}

#[test]
fn non_numeric_price_is_rejected() {
    let result = serde_json::from_str::<Invoice>(&payload_with_item(
        r#"{"description": "Widget", "unitPrice": "abc", "quantity": 1}"#,
    ));
    assert!(result.is_err());
}

#[test]
fn fractional_quantity_is_rejected() {
    let result = serde_json::from_str::<Invoice>(&payload_with_item(
        r#"{"description": "Widget", "unitPrice": "10", "quantity": 1.5}"#,
    ));
    assert!(result.is_err());
}

#[test]
fn negative_quantity_is_rejected() {
    let result = serde_json::from_str::<Invoice>(&payload_with_item(
        r#"{"description": "Widget", "unitPrice": "10", "quantity": -2}"#,
    ));
    assert!(result.is_err());
}

#[test]
fn invalid_date_is_rejected() {
    let json = payload_with_item(r#"{"description": "Widget", "unitPrice": "10", "quantity": 1}"#)
        .replace("2024-01-02", "2024-02-30");
    assert!(serde_json::from_str::<Invoice>(&json).is_err());
}
