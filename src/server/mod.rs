//! HTTP service: accepts invoice payloads, renders them to PDF and serves
//! the generated files.
//!
//! | Method | Path | |
//! |--------|------|-|
//! | `POST` | `/api/invoice` | validate, render, store; returns `{"url"}` |
//! | `POST` | `/api/invoice/preview` | computed lines, totals and words as JSON |
//! | `POST` | `/api/uploads` | multipart JPEG signature; returns `{"reference"}` |
//! | `GET` | `/invoices/<file>` | generated PDFs |
//! | `GET` | `/health` | liveness |

pub mod config;
pub mod error;
pub mod handlers;
pub mod startup;
pub mod storage;
pub mod telemetry;

pub use config::{AppConfig, LogFormat};
pub use error::AppError;
pub use startup::{AppState, Application, router};
pub use storage::{LocalStorage, Storage};
