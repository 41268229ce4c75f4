//! Printable PDF receipts.
//!
//! A receipt is an A4 document with a centred heading, the record's
//! non-empty fields in two labelled sections, the QR image at 2×2 inches,
//! and a generation timestamp. Content flows down the page and spills onto
//! further pages when it runs past the bottom margin.
//!
//! Section building is pure and separate from drawing so the display rules
//! (which lines appear, how values wrap) are testable without parsing PDF
//! output.

use chrono::Utc;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference,
};

use crate::domain::Document;

const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const MARGIN_LEFT: f64 = 25.4;
const MARGIN_RIGHT: f64 = 25.4;
const MARGIN_TOP: f64 = 25.4;
const MARGIN_BOTTOM: f64 = 12.7;
const CONTENT_WIDTH: f64 = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;

/// 2×2 inch QR image.
const QR_SIDE: f64 = 50.8;

const TITLE_SIZE: f64 = 24.0;
const HEADING_SIZE: f64 = 16.0;
const BODY_SIZE: f64 = 12.0;

const PT_TO_MM: f64 = 25.4 / 72.0;

/// Failures while composing the PDF. Fatal for the request.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptError {
    #[error("failed to assemble PDF: {0}")]
    Pdf(String),

    #[error("failed to read QR image: {0}")]
    QrImage(#[from] printpdf::image_crate::ImageError),
}

/// One "Label: value" line of a receipt section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReceiptLine {
    pub label: &'static str,
    pub value: String,
}

/// A headed group of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReceiptSection {
    pub heading: &'static str,
    pub lines: Vec<ReceiptLine>,
}

/// A value renders only when present, non-blank, and not the literal
/// placeholder "N/A". This is a display rule, not a data rule.
fn displayable(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty() && *v != "N/A")
}

fn push_line(lines: &mut Vec<ReceiptLine>, label: &'static str, value: Option<&str>) {
    if let Some(value) = displayable(value) {
        lines.push(ReceiptLine {
            label,
            value: value.to_owned(),
        });
    }
}

/// Build the two field sections of a receipt.
///
/// Headings always appear; lines are filtered by [`displayable`].
pub(crate) fn receipt_sections(document: &Document) -> Vec<ReceiptSection> {
    let id = document.id.to_string();
    let registered = document
        .date_registered
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string();

    let mut info = Vec::new();
    push_line(&mut info, "Document ID", Some(&id));
    push_line(&mut info, "Title", Some(&document.title));
    push_line(&mut info, "Description", document.description.as_deref());
    push_line(&mut info, "Department", document.department.as_deref());
    push_line(&mut info, "Owner Name", document.owner_name.as_deref());
    push_line(&mut info, "Owner Contact", document.owner_contact.as_deref());
    push_line(&mut info, "Date Registered", Some(&registered));

    let mut location = Vec::new();
    push_line(&mut location, "Shelf Code", document.shelf_code.as_deref());
    push_line(&mut location, "Box Number", document.box_number.as_deref());
    push_line(
        &mut location,
        "Folder Number",
        document.folder_number.as_deref(),
    );

    vec![
        ReceiptSection {
            heading: "Document Information",
            lines: info,
        },
        ReceiptSection {
            heading: "Storage Location",
            lines: location,
        },
    ]
}

/// Approximate rendered width of Helvetica text, in millimetres.
///
/// Built-in fonts carry no metrics through printpdf, so centring and label
/// offsets use an average glyph width of half the point size.
fn approx_text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * 0.5 * PT_TO_MM
}

/// Greedy word wrap; words longer than the limit are hard-split.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let split_at = word
                .char_indices()
                .nth(max_chars)
                .map_or(word.len(), |(idx, _)| idx);
            lines.push(word[..split_at].to_owned());
            word = &word[split_at..];
        }
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Downward-flowing layout cursor; opens a fresh page when a block would
/// cross the bottom margin.
struct PageCursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f64,
    pages: usize,
}

impl<'a> PageCursor<'a> {
    fn new(doc: &'a PdfDocumentReference, layer: PdfLayerReference) -> Self {
        Self {
            doc,
            layer,
            y: PAGE_HEIGHT - MARGIN_TOP,
            pages: 1,
        }
    }

    /// Reserve vertical room, paginating if necessary, and return the
    /// baseline y after advancing.
    fn block(&mut self, height: f64) -> f64 {
        if self.y - height < MARGIN_BOTTOM {
            let (page, layer) =
                self.doc
                    .add_page(Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "content");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN_TOP;
            self.pages += 1;
        }
        self.y -= height;
        self.y
    }

    fn text(&mut self, text: &str, size: f64, font: &IndirectFontRef, x: f64) {
        let y = self.block(size * PT_TO_MM * 1.4);
        self.layer
            .use_text(text, size as f32, Mm(x as f32), Mm(y as f32), font);
    }

    /// Bold label followed by a wrapped regular-weight value.
    fn field_line(
        &mut self,
        line: &ReceiptLine,
        bold: &IndirectFontRef,
        regular: &IndirectFontRef,
    ) {
        let label = format!("{}:", line.label);
        let offset = approx_text_width(&label, BODY_SIZE) + 2.0;
        let glyph = BODY_SIZE * 0.5 * PT_TO_MM;
        let max_chars = ((CONTENT_WIDTH - offset) / glyph) as usize;

        let mut first = true;
        for chunk in wrap(&line.value, max_chars) {
            let y = self.block(BODY_SIZE * PT_TO_MM * 1.4);
            if first {
                self.layer
                    .use_text(&label, BODY_SIZE as f32, Mm(MARGIN_LEFT as f32), Mm(y as f32), bold);
                first = false;
            }
            self.layer.use_text(
                chunk,
                BODY_SIZE as f32,
                Mm((MARGIN_LEFT + offset) as f32),
                Mm(y as f32),
                regular,
            );
        }
    }

    /// Vertical gap; the next block handles any resulting page break.
    fn space(&mut self, mm: f64) {
        self.y -= mm;
    }
}

/// Compose the receipt PDF for a record and its QR image.
pub fn compose(document: &Document, qr_png: &[u8]) -> Result<Vec<u8>, ReceiptError> {
    compose_inner(document, qr_png).map(|(bytes, _)| bytes)
}

fn compose_inner(document: &Document, qr_png: &[u8]) -> Result<(Vec<u8>, usize), ReceiptError> {
    let (doc, page, layer) = PdfDocument::new(
        "Document Archive Receipt",
        Mm(PAGE_WIDTH as f32),
        Mm(PAGE_HEIGHT as f32),
        "content",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| ReceiptError::Pdf(err.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|err| ReceiptError::Pdf(err.to_string()))?;

    let mut cursor = PageCursor::new(&doc, doc.get_page(page).get_layer(layer));

    let title = "DOCUMENT ARCHIVE RECEIPT";
    let title_x = ((PAGE_WIDTH - approx_text_width(title, TITLE_SIZE)) / 2.0).max(MARGIN_LEFT);
    cursor.text(title, TITLE_SIZE, &bold, title_x);
    cursor.space(8.0);

    for section in receipt_sections(document) {
        cursor.space(4.0);
        cursor.text(section.heading, HEADING_SIZE, &bold, MARGIN_LEFT);
        cursor.space(2.0);
        for line in &section.lines {
            cursor.field_line(line, &bold, &regular);
        }
    }

    cursor.space(6.0);
    cursor.text("QR Code", HEADING_SIZE, &bold, MARGIN_LEFT);
    cursor.space(2.0);
    cursor.text(
        "Scan this QR code to quickly access document information:",
        BODY_SIZE,
        &regular,
        MARGIN_LEFT,
    );
    cursor.space(2.0);

    let qr_image = printpdf::image_crate::load_from_memory(qr_png)?;
    // Pick the DPI that renders the bitmap at exactly QR_SIDE.
    let dpi = f64::from(qr_image.width()) / (QR_SIDE / 25.4);
    let y = cursor.block(QR_SIDE);
    Image::from_dynamic_image(&qr_image).add_to_layer(
        cursor.layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(MARGIN_LEFT as f32)),
            translate_y: Some(Mm(y as f32)),
            dpi: Some(dpi as f32),
            ..ImageTransform::default()
        },
    );

    cursor.space(6.0);
    let generated = format!("Generated on: {}", Utc::now().format("%Y-%m-%d %H:%M:%S"));
    cursor.text(&generated, BODY_SIZE, &regular, MARGIN_LEFT);

    let pages = cursor.pages;
    drop(cursor);
    let bytes = doc
        .save_to_bytes()
        .map_err(|err| ReceiptError::Pdf(err.to_string()))?;
    Ok((bytes, pages))
}
