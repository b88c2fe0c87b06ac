//! Core invoice types, GST computation, totals and validation.
//!
//! This module provides the payload types for a GST tax invoice, the
//! CGST/SGST vs IGST calculator and the invoice-level aggregation.

mod builder;
mod error;
pub mod states;
mod tax;
mod totals;
mod types;
mod validation;

pub use builder::*;
pub use error::*;
pub use tax::*;
pub use totals::*;
pub use types::*;
pub use validation::*;
