#![no_main]

use bijak::core::{Invoice, InvoiceSummary, TaxCalculator, validate_invoice};
use bijak::pdf::{RenderOptions, render_invoice};
use bijak::words::WordScale;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(invoice) = serde_json::from_slice::<Invoice>(data) else {
        return;
    };
    if invoice.items.len() > 200 || !validate_invoice(&invoice).is_empty() {
        return;
    }
    let summary = InvoiceSummary::prepare(&invoice, &TaxCalculator::default(), WordScale::International);
    let _ = render_invoice(&invoice, &summary, &RenderOptions::default());
});
