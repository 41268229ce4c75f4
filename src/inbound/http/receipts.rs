//! Derived-artifact handlers: QR images and PDF receipts.
//!
//! ```text
//! GET  /documents/{id}/qr-code           PNG encoding the record
//! POST /documents/{id}/generate-receipt  Downloadable PDF receipt
//! ```

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, get, post, web};
use chrono::Utc;
use tracing::error;

use crate::domain::{Document, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::render::qr::QrEncodeError;
use crate::render::receipt::ReceiptError;
use crate::render::{qr, receipt};

use super::documents::{document_not_found, map_repository_error};

fn map_qr_error(err: QrEncodeError) -> Error {
    error!(error = %err, "QR encoding failed");
    Error::internal(format!("QR encoding failed: {err}"))
}

fn map_receipt_error(err: ReceiptError) -> Error {
    error!(error = %err, "receipt composition failed");
    Error::internal(format!("receipt composition failed: {err}"))
}

async fn fetch_document(state: &HttpState, id: i32) -> Result<Document, Error> {
    state
        .documents
        .get(id)
        .await
        .map_err(map_repository_error)?
        .ok_or_else(document_not_found)
}

/// Stream the record's QR code as a PNG.
#[utoipa::path(
    get,
    path = "/documents/{id}/qr-code",
    params(("id" = i32, Path, description = "Record id")),
    responses(
        (status = 200, description = "PNG image", body = Vec<u8>, content_type = "image/png"),
        (status = 404, description = "Unknown id", body = Error),
        (status = 500, description = "Encoding failure", body = Error)
    ),
    tags = ["artifacts"],
    operation_id = "documentQrCode"
)]
#[get("/documents/{id}/qr-code")]
pub async fn document_qr_code(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let document = fetch_document(&state, path.into_inner()).await?;
    let png = qr::encode(&document).map_err(map_qr_error)?;

    Ok(HttpResponse::Ok().content_type("image/png").body(png))
}

/// Compose and stream the PDF receipt as a downloadable attachment.
///
/// The filename embeds the record id and the composition timestamp, so
/// repeated generations never collide on disk.
#[utoipa::path(
    post,
    path = "/documents/{id}/generate-receipt",
    params(("id" = i32, Path, description = "Record id")),
    responses(
        (status = 200, description = "PDF receipt", body = Vec<u8>, content_type = "application/pdf"),
        (status = 404, description = "Unknown id", body = Error),
        (status = 500, description = "Rendering failure", body = Error)
    ),
    tags = ["artifacts"],
    operation_id = "generateReceipt"
)]
#[post("/documents/{id}/generate-receipt")]
pub async fn generate_receipt(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let document = fetch_document(&state, path.into_inner()).await?;

    let png = qr::encode(&document).map_err(map_qr_error)?;
    let pdf = receipt::compose(&document, &png).map_err(map_receipt_error)?;

    let filename = format!(
        "document_receipt_{}_{}.pdf",
        document.id,
        Utc::now().format("%Y%m%d_%H%M%S")
    );

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .body(pdf))
}

#[cfg(test)]
#[path = "receipts_tests.rs"]
mod tests;
