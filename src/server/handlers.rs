use axum::{
    Json,
    extract::{Multipart, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use serde_json::json;

use super::error::AppError;
use super::startup::AppState;
use super::storage::unique_file_name;
use crate::core::{Invoice, InvoiceSummary, validate_invoice};
use crate::pdf::{JpegImage, RenderOptions, render_invoice};

#[derive(Debug, Serialize)]
pub struct InvoiceCreated {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct UploadCreated {
    pub reference: String,
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "bijak",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Validate the payload, render the PDF, store it and return its URL.
pub async fn create_invoice(
    State(state): State<AppState>,
    payload: Result<Json<Invoice>, JsonRejection>,
) -> Result<Json<InvoiceCreated>, AppError> {
    let Json(invoice) = payload?;
    ensure_valid(&invoice)?;

    let summary = InvoiceSummary::prepare(&invoice, &state.calculator, state.config.words.scale);
    let signature = load_signature(&state, &invoice).await?;
    let options = RenderOptions {
        logo: state.logo.as_deref().cloned(),
        signature,
    };

    let invoice_no = invoice.invoice_details.invoice_no.clone();
    let pdf = tokio::task::spawn_blocking(move || render_invoice(&invoice, &summary, &options))
        .await
        .map_err(|e| AppError::InternalError(format!("render task failed: {e}")))??;

    let file_name = unique_file_name("invoice", "pdf");
    state.invoices.upload(&file_name, pdf).await?;

    tracing::info!(%invoice_no, %file_name, "invoice generated");

    Ok(Json(InvoiceCreated {
        url: state.config.invoice_url(&file_name),
    }))
}

/// Computed lines, totals and words for a payload, without writing a PDF.
pub async fn preview_invoice(
    State(state): State<AppState>,
    payload: Result<Json<Invoice>, JsonRejection>,
) -> Result<Json<InvoiceSummary>, AppError> {
    let Json(invoice) = payload?;
    ensure_valid(&invoice)?;

    Ok(Json(InvoiceSummary::prepare(
        &invoice,
        &state.calculator,
        state.config.words.scale,
    )))
}

/// Store a signature image; the returned reference goes into `signatureImage`.
pub async fn upload_signature(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart field: {e}")))?
        .ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read file bytes: {e}")))?
        .to_vec();

    if data.len() > state.config.max_upload_bytes {
        return Err(AppError::BadRequest(format!(
            "File too large (max {} bytes)",
            state.config.max_upload_bytes
        )));
    }

    // Reject anything the renderer could not embed later
    JpegImage::decode(data.clone())?;

    let reference = unique_file_name("signature", "jpg");
    state.uploads.upload(&reference, data).await?;

    tracing::info!(%reference, "signature uploaded");

    Ok((StatusCode::CREATED, Json(UploadCreated { reference })))
}

fn ensure_valid(invoice: &Invoice) -> Result<(), AppError> {
    let errors = validate_invoice(invoice);
    if errors.is_empty() {
        Ok(())
    } else {
        tracing::info!(
            invoice_no = %invoice.invoice_details.invoice_no,
            errors = errors.len(),
            "invoice rejected"
        );
        Err(AppError::Validation(errors))
    }
}

async fn load_signature(state: &AppState, invoice: &Invoice) -> Result<Option<Vec<u8>>, AppError> {
    let Some(reference) = invoice
        .signature_image
        .as_deref()
        .filter(|r| !r.trim().is_empty())
    else {
        return Ok(None);
    };

    match state.uploads.download(reference).await {
        Ok(data) => Ok(Some(data)),
        Err(AppError::NotFound(_)) => Err(AppError::BadRequest(format!(
            "signature image '{reference}' was not uploaded"
        ))),
        Err(e) => Err(e),
    }
}
