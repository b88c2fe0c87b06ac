//! # bijak
//!
//! GST tax invoices: CGST/SGST vs IGST computation, invoice totals,
//! amount-in-words rendering, PDF output and a small HTTP service that
//! turns an invoice form submission into a downloadable PDF.
//!
//! All monetary values use [`rust_decimal::Decimal`]. No currency rounding
//! is applied to computed amounts.
//!
//! ## Quick Start
//!
//! ```rust
//! use bijak::core::*;
//! use rust_decimal_macros::dec;
//!
//! let calculator = TaxCalculator::default();
//!
//! let same_state = calculator.calculate(dec!(1000), &Jurisdiction::new("MH", "MH"));
//! assert_eq!(same_state.tax_type, TaxType::CgstSgst);
//! assert_eq!(same_state.tax_amount, dec!(90));
//! assert_eq!(same_state.total_amount, dec!(1180));
//!
//! let interstate = calculator.calculate(dec!(1000), &Jurisdiction::new("MH", "DL"));
//! assert_eq!(interstate.tax_type, TaxType::Igst);
//! assert_eq!(interstate.tax_amount, dec!(180));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice types, tax calculator, totals, validation, amount in words |
//! | `pdf` | PDF rendering with `lopdf` |
//! | `server` | HTTP service (`axum`) and the `bijak` binary |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod words;

#[cfg(feature = "pdf")]
pub mod pdf;

#[cfg(feature = "server")]
pub mod server;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
