use log::{debug, warn};
use lopdf::content::Content;
use lopdf::encryption::DecryptionError;
use lopdf::{Document, Object, ObjectId};

use crate::fonts::{decode_string, FontMap};
use crate::{ExtractionOutcome, Result, ViewError, ViewerConfig};

/// Message carried by the `Empty` outcome when a document parses but no text
/// can be recovered. Worded to suggest likely causes without claiming any.
pub(crate) const NO_TEXT_MESSAGE: &str =
    "No extractable text — possibly image-only or encrypted PDF";

// ── PdfTextExtractor ─────────────────────────────────────────────────────────

/// Parses an in-memory PDF and recovers its text in reading order.
///
/// The heavy structural work (cross-reference table, object graph, stream
/// decompression) is lopdf's. On top of that this type walks each page's
/// content stream: text-showing operators contribute characters decoded
/// through the active font (see the `fonts` module), line-advance operators
/// contribute line breaks, and pages are separated by a blank line.
///
/// Every call parses from scratch and owns its document handle for the
/// duration of the call only, so repeated and concurrent invocations are
/// safe.
///
/// # Example
///
/// ```no_run
/// use pdftextview::{ExtractionOutcome, PdfTextExtractor};
///
/// let bytes = std::fs::read("report.pdf").unwrap();
/// match PdfTextExtractor::extract(&bytes) {
///     ExtractionOutcome::Text(text) => println!("{text}"),
///     ExtractionOutcome::Empty(note) => println!("({note})"),
///     ExtractionOutcome::Failure(e) => eprintln!("{}", e.display_line()),
/// }
/// ```
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Extract text with the default configuration.
    pub fn extract(bytes: &[u8]) -> ExtractionOutcome {
        Self::extract_with_config(bytes, &ViewerConfig::default())
    }

    /// Extract text, honoring the configured decryption password.
    ///
    /// Never returns an error: unparseable input becomes
    /// [`ExtractionOutcome::Failure`], and a parseable document with no text
    /// becomes [`ExtractionOutcome::Empty`]. Calling twice on identical
    /// bytes yields an identical outcome.
    pub fn extract_with_config(bytes: &[u8], config: &ViewerConfig) -> ExtractionOutcome {
        match Self::document_text(bytes, config) {
            Ok(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    ExtractionOutcome::Empty(NO_TEXT_MESSAGE.to_string())
                } else {
                    ExtractionOutcome::Text(trimmed.to_string())
                }
            }
            Err(e) => ExtractionOutcome::Failure(e),
        }
    }

    // ── Document-level walk ───────────────────────────────────────────────────

    fn document_text(bytes: &[u8], config: &ViewerConfig) -> Result<String> {
        let mut document =
            Document::load_mem(bytes).map_err(|e| ViewError::InvalidPdf(e.to_string()))?;

        if document.is_encrypted() {
            Self::unlock(&mut document, config)?;
        }

        let pages = document.get_pages();
        debug!("extracting text from {} page(s)", pages.len());

        let mut text = String::new();
        for (page_number, page_id) in pages {
            // One broken page must not lose the rest of the document.
            match Self::page_text(&document, page_id) {
                Ok(page) => {
                    let page = page.trim();
                    if page.is_empty() {
                        continue;
                    }
                    if !text.is_empty() {
                        text.push_str("\n\n");
                    }
                    text.push_str(page);
                }
                Err(e) => warn!("skipping page {page_number}: {e}"),
            }
        }

        Ok(text)
    }

    /// Try the configured password first, then the empty user password.
    /// A document that rejects both needs credentials we do not have.
    fn unlock(document: &mut Document, config: &ViewerConfig) -> Result<()> {
        if let Some(password) = &config.password {
            if document.decrypt(password).is_ok() {
                return Ok(());
            }
        }

        match document.decrypt("") {
            Ok(()) => Ok(()),
            Err(lopdf::Error::Decryption(DecryptionError::IncorrectPassword)) => {
                Err(ViewError::EncryptionRequired(
                    "the empty user password was rejected".to_string(),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    // ── Page-level walk ───────────────────────────────────────────────────────

    /// Decode one page's content stream(s) into text.
    ///
    /// Reading order follows the operator sequence, which in practice is the
    /// order the producing application laid the text out. Line breaks come
    /// from the explicit line-advance operators (`T*`, `TD`, `'`, `"`, and
    /// `Td` with a vertical move) and from text-block ends.
    fn page_text(document: &Document, page_id: ObjectId) -> Result<String> {
        let fonts = FontMap::for_page(document, page_id);
        let content_data = document.get_page_content(page_id)?;
        let content = Content::decode(&content_data)?;

        let mut text = String::new();
        let mut active_font = None;

        for operation in &content.operations {
            match operation.operator.as_str() {
                "Tf" => {
                    active_font = operation
                        .operands
                        .first()
                        .and_then(|o| o.as_name().ok())
                        .and_then(|name| fonts.get(name));
                }
                "Tj" | "TJ" => {
                    Self::collect_text(&mut text, active_font, &operation.operands);
                }
                // Both quote operators move to the next line before showing
                // their string operand.
                "'" | "\"" => {
                    Self::break_line(&mut text);
                    Self::collect_text(&mut text, active_font, &operation.operands);
                }
                "T*" | "TD" => {
                    Self::break_line(&mut text);
                }
                "Td" => {
                    // A vertical move is a new line; a purely horizontal one
                    // is intra-line positioning.
                    if operation.operands.get(1).map(operand_f32).unwrap_or(0.0) != 0.0 {
                        Self::break_line(&mut text);
                    }
                }
                "ET" => {
                    Self::break_line(&mut text);
                }
                _ => {}
            }
        }

        Ok(text)
    }

    fn collect_text(
        text: &mut String,
        font: Option<&crate::fonts::PageFont>,
        operands: &[Object],
    ) {
        for operand in operands {
            match operand {
                Object::String(bytes, _) => text.push_str(&decode_string(font, bytes)),
                Object::Array(items) => {
                    for item in items {
                        match item {
                            Object::String(bytes, _) => {
                                text.push_str(&decode_string(font, bytes));
                            }
                            // Large negative kerning adjustments are how
                            // producers fake inter-word gaps.
                            Object::Integer(i) if *i < -100 => text.push(' '),
                            Object::Real(r) if *r < -100.0 => text.push(' '),
                            _ => {}
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn break_line(text: &mut String) {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
    }
}

/// Numeric operand as f32; content streams mix integers and reals freely.
fn operand_f32(object: &Object) -> f32 {
    match object {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r,
        _ => 0.0,
    }
}
