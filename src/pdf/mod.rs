//! PDF rendering of tax invoices.
//!
//! Draws an A4 invoice with `lopdf` using the standard Helvetica fonts:
//! title block, seller, billing and shipping addresses, order details,
//! one entry per line with its tax, totals, amount in words and the
//! signature block. Logo and signature images must be JPEG.

mod image;
mod page;
mod render;

pub use image::{JpegImage, MAX_IMAGE_BYTES};
pub use page::{PAGE_HEIGHT, PAGE_WIDTH};
pub use render::{RenderOptions, render_invoice};
