use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::ValidationError;
use super::states;
use super::types::*;

/// Upper bound on invoice lines.
pub const MAX_LINE_ITEMS: usize = 10_000;

/// Upper bound on order and invoice number length.
pub const MAX_REFERENCE_LEN: usize = 200;

/// Upper bound on a unit price or discount. Keeps line and invoice
/// arithmetic inside `Decimal`'s range for any quantity and line count.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

const GSTIN_CHARSET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Validate an invoice payload.
/// Returns all validation errors found (not just the first).
///
/// A line whose discount exceeds its gross value is accepted; the negative
/// net amount is carried into tax and totals.
pub fn validate_invoice(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    validate_seller(&invoice.seller, &mut errors);
    validate_contact(&invoice.billing, "billing", "GST-03", &mut errors);
    validate_contact(&invoice.shipping, "shipping", "GST-04", &mut errors);

    validate_reference(
        &invoice.order_details.order_no,
        "orderDetails.orderNo",
        "GST-07",
        &mut errors,
    );
    validate_reference(
        &invoice.invoice_details.invoice_no,
        "invoiceDetails.invoiceNo",
        "GST-08",
        &mut errors,
    );

    // GST-09: both jurisdiction codes are needed to select the regime
    if invoice.place_of_supply.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "placeOfSupply",
            "place of supply must not be empty",
            "GST-09",
        ));
    }
    if invoice.place_of_delivery.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "placeOfDelivery",
            "place of delivery must not be empty",
            "GST-09",
        ));
    }

    // GST-10: line count
    if invoice.items.is_empty() {
        errors.push(ValidationError::with_rule(
            "items",
            "invoice must have at least one line item",
            "GST-10",
        ));
    } else if invoice.items.len() > MAX_LINE_ITEMS {
        errors.push(ValidationError::with_rule(
            "items",
            format!("invoice cannot have more than {MAX_LINE_ITEMS} line items"),
            "GST-10",
        ));
    }

    for (i, item) in invoice.items.iter().enumerate() {
        validate_line(item, i, &mut errors);
    }

    errors
}

fn validate_seller(seller: &Party, errors: &mut Vec<ValidationError>) {
    if seller.name.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "seller.name",
            "seller name must not be empty",
            "GST-01",
        ));
    }
    if seller.address.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "seller.address",
            "seller address must not be empty",
            "GST-02",
        ));
    }

    let pan = seller.pan.as_deref().map(str::trim).filter(|p| !p.is_empty());
    let gstin = seller.gst.as_deref().map(str::trim).filter(|g| !g.is_empty());

    if let Some(pan) = pan {
        if !is_valid_pan(pan) {
            errors.push(ValidationError::with_rule(
                "seller.pan",
                format!("PAN '{pan}' must be five letters, four digits and a letter"),
                "GST-05",
            ));
        }
    }

    if let Some(gstin) = gstin {
        validate_gstin_format(gstin, "seller.gst", errors);

        if let Some(pan) = pan {
            if gstin.len() == 15 && gstin.get(2..12) != Some(pan) {
                errors.push(ValidationError::with_rule(
                    "seller.gst",
                    "GSTIN does not embed the seller's PAN",
                    "GST-06",
                ));
            }
        }
    }
}

fn validate_contact(
    contact: &Contact,
    prefix: &str,
    rule: &str,
    errors: &mut Vec<ValidationError>,
) {
    if contact.name.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.name"),
            "name must not be empty",
            rule,
        ));
    }
    if contact.address.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.address"),
            "address must not be empty",
            rule,
        ));
    }
}

fn validate_reference(value: &str, field: &str, rule: &str, errors: &mut Vec<ValidationError>) {
    if value.trim().is_empty() {
        errors.push(ValidationError::with_rule(field, "must not be empty", rule));
    } else if value.len() > MAX_REFERENCE_LEN {
        errors.push(ValidationError::with_rule(
            field,
            format!("cannot exceed {MAX_REFERENCE_LEN} characters"),
            rule,
        ));
    }
}

fn validate_line(item: &LineItem, index: usize, errors: &mut Vec<ValidationError>) {
    let prefix = format!("items.{index}");

    if item.description.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.description"),
            "description must not be empty",
            "GST-11",
        ));
    }

    if item.unit_price < Decimal::ZERO {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.unitPrice"),
            format!("unit price {} must not be negative", item.unit_price),
            "GST-12",
        ));
    } else if item.unit_price > MAX_AMOUNT {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.unitPrice"),
            format!("unit price cannot exceed {MAX_AMOUNT}"),
            "GST-12",
        ));
    }

    if item.discount < Decimal::ZERO {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.discount"),
            format!("discount {} must not be negative", item.discount),
            "GST-13",
        ));
    } else if item.discount > MAX_AMOUNT {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.discount"),
            format!("discount cannot exceed {MAX_AMOUNT}"),
            "GST-13",
        ));
    }
}

/// PAN layout: `AAAAA9999A`.
pub fn is_valid_pan(pan: &str) -> bool {
    let bytes = pan.as_bytes();
    bytes.len() == 10
        && bytes[..5].iter().all(u8::is_ascii_uppercase)
        && bytes[5..9].iter().all(u8::is_ascii_digit)
        && bytes[9].is_ascii_uppercase()
}

/// Check a GSTIN: state code, embedded PAN, entity code, `Z`, checksum.
pub fn is_valid_gstin(gstin: &str) -> bool {
    let mut errors = Vec::new();
    validate_gstin_format(gstin, "gstin", &mut errors);
    errors.is_empty()
}

fn validate_gstin_format(gstin: &str, field: &str, errors: &mut Vec<ValidationError>) {
    let bytes = gstin.as_bytes();

    if bytes.len() != 15 || !bytes.iter().all(|b| GSTIN_CHARSET.contains(b)) {
        errors.push(ValidationError::with_rule(
            field,
            format!("GSTIN '{gstin}' must be 15 uppercase alphanumeric characters"),
            "GST-06",
        ));
        return;
    }

    if states::find_state_numeric(&gstin[..2]).is_none() {
        errors.push(ValidationError::with_rule(
            field,
            format!("GSTIN state code '{}' is not a known GST state code", &gstin[..2]),
            "GST-06",
        ));
    }

    if !is_valid_pan(&gstin[2..12]) || bytes[12] == b'0' || bytes[13] != b'Z' {
        errors.push(ValidationError::with_rule(
            field,
            format!("GSTIN '{gstin}' is malformed"),
            "GST-06",
        ));
        return;
    }

    if gstin_check_char(&bytes[..14]) != bytes[14] {
        errors.push(ValidationError::with_rule(
            field,
            format!("GSTIN '{gstin}' has an invalid check character"),
            "GST-06",
        ));
    }
}

/// Mod-36 check character over the first 14 characters.
fn gstin_check_char(body: &[u8]) -> u8 {
    let sum: usize = body
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let value = GSTIN_CHARSET.iter().position(|c| c == b).unwrap_or(0);
            let product = value * if i % 2 == 0 { 1 } else { 2 };
            product / 36 + product % 36
        })
        .sum();
    GSTIN_CHARSET[(36 - sum % 36) % 36]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pan_format() {
        assert!(is_valid_pan("AAPFU0939F"));
        assert!(!is_valid_pan("AAPFU0939"));
        assert!(!is_valid_pan("aapfu0939f"));
        assert!(!is_valid_pan("AAPF10939F"));
    }

    #[test]
    fn gstin_checksum() {
        assert!(is_valid_gstin("27AAPFU0939F1ZV"));
        assert!(is_valid_gstin("29AAGCB7383J1Z4"));
        assert!(!is_valid_gstin("27AAPFU0939F1ZW"));
        assert!(!is_valid_gstin("27ABCDE1234F1Z5"));
    }

    #[test]
    fn gstin_structure() {
        // unknown state 25
        assert!(!is_valid_gstin("25AAPFU0939F1ZV"));
        // alpha state prefix with a matching check character
        let check = gstin_check_char(b"MHAAPFU0939F1Z") as char;
        assert!(!is_valid_gstin(&format!("MHAAPFU0939F1Z{check}")));
        // missing Z
        assert!(!is_valid_gstin("27AAPFU0939F1XV"));
        assert!(!is_valid_gstin("27AAPFU0939F1Z"));
        assert!(!is_valid_gstin("27aapfu0939f1zv"));
    }
}
