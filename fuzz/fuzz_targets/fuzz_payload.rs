#![no_main]

use bijak::core::{Invoice, InvoiceSummary, TaxCalculator, validate_invoice};
use bijak::words::WordScale;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Rejected payloads are fine; panics are bugs.
    let Ok(invoice) = serde_json::from_slice::<Invoice>(data) else {
        return;
    };
    if validate_invoice(&invoice).is_empty() {
        let _ = InvoiceSummary::prepare(&invoice, &TaxCalculator::default(), WordScale::Indian);
    }
});
