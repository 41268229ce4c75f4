//! QR encoding of document records.
//!
//! A record is serialised to a canonical flat JSON object (every present
//! field as a string, absent optionals as `null`) and rendered as a PNG at
//! error-correction level L. Scanning the image and parsing the text yields
//! the payload back unchanged.

use image::Luma;
use qrcode::{EcLevel, QrCode};
use serde::{Deserialize, Serialize};

use crate::domain::Document;

/// Module sizing for the rendered symbol.
///
/// Recognised but fixed: callers of the HTTP surface cannot override these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrConfig {
    /// Pixels per QR module.
    pub module_size: u32,
    /// Whether to surround the symbol with the standard 4-module border.
    pub quiet_zone: bool,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            module_size: 10,
            quiet_zone: true,
        }
    }
}

/// Failures while producing the PNG. Fatal for the request.
#[derive(Debug, thiserror::Error)]
pub enum QrEncodeError {
    #[error("failed to serialise document payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("failed to build QR symbol: {0}")]
    Symbol(#[from] qrcode::types::QrError),

    #[error("failed to encode PNG: {0}")]
    Png(#[from] image::ImageError),
}

/// The canonical QR payload: a flat object of strings.
///
/// Field order is fixed by this declaration; the timestamp is RFC 3339 and
/// the id a decimal string, so a scanner needs no schema beyond "read the
/// keys".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub department: Option<String>,
    pub owner_name: Option<String>,
    pub owner_contact: Option<String>,
    pub shelf_code: Option<String>,
    pub box_number: Option<String>,
    pub folder_number: Option<String>,
    pub date_registered: String,
}

impl QrPayload {
    /// Flatten a record into the payload.
    pub fn from_document(document: &Document) -> Self {
        Self {
            id: document.id.to_string(),
            title: document.title.clone(),
            description: document.description.clone(),
            department: document.department.clone(),
            owner_name: document.owner_name.clone(),
            owner_contact: document.owner_contact.clone(),
            shelf_code: document.shelf_code.clone(),
            box_number: document.box_number.clone(),
            folder_number: document.folder_number.clone(),
            date_registered: document.date_registered.to_rfc3339(),
        }
    }
}

/// Encode a record as a scannable PNG using the default sizing.
pub fn encode(document: &Document) -> Result<Vec<u8>, QrEncodeError> {
    encode_with(document, QrConfig::default())
}

/// Encode a record as a scannable PNG.
pub fn encode_with(document: &Document, config: QrConfig) -> Result<Vec<u8>, QrEncodeError> {
    let payload = serde_json::to_string(&QrPayload::from_document(document))?;
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::L)?;

    let symbol = code
        .render::<Luma<u8>>()
        .module_dimensions(config.module_size, config.module_size)
        .quiet_zone(config.quiet_zone)
        .build();

    let mut bytes = Vec::new();
    image::DynamicImage::ImageLuma8(symbol)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use rstest::rstest;

    fn sample_document() -> Document {
        Document {
            id: 42,
            title: "Report A".into(),
            description: None,
            department: Some("Finance".into()),
            owner_name: Some("Ada Lovelace".into()),
            owner_contact: None,
            shelf_code: Some("S3".into()),
            box_number: Some("B12".into()),
            folder_number: None,
            date_registered: DateTime::from_timestamp(1_754_000_000, 0).expect("valid timestamp"),
        }
    }

    #[rstest]
    fn payload_is_a_flat_object_with_string_values() {
        let value =
            serde_json::to_value(QrPayload::from_document(&sample_document())).expect("serialise");

        assert_eq!(value["id"], "42");
        assert_eq!(value["title"], "Report A");
        assert_eq!(value["department"], "Finance");
        // Absent optionals stay present as nulls.
        assert!(value["description"].is_null());
        assert!(value["folderNumber"].is_null());
        assert!(
            value["dateRegistered"]
                .as_str()
                .expect("timestamp is a string")
                .starts_with("2025-")
        );
    }

    #[rstest]
    fn encoded_png_has_the_png_signature() {
        let png = encode(&sample_document()).expect("encode");
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[rstest]
    fn scanning_the_png_round_trips_the_payload() {
        let document = sample_document();
        let png = encode(&document).expect("encode");

        let gray = image::load_from_memory(&png).expect("decode png").to_luma8();
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            gray.width() as usize,
            gray.height() as usize,
            |x, y| gray.get_pixel(x as u32, y as u32).0[0],
        );
        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1, "expected exactly one QR symbol");

        let (_meta, content) = grids[0].decode().expect("decode symbol");
        let decoded: QrPayload = serde_json::from_str(&content).expect("payload json");
        assert_eq!(decoded, QrPayload::from_document(&document));
    }
}
