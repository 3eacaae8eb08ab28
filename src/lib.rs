//! # pdftextview
//!
//! A Rust library that turns PDF payloads, and ZIP archives of PDFs, into
//! plain text suitable for a read-only viewer.
//!
//! ## What this crate does
//!
//! 1. **Classify** — map a declared `Content-Type` value to PDF, ZIP, or
//!    unsupported. Classification never looks at the payload bytes.
//! 2. **Extract PDF text** — parse the document with lopdf and recover text
//!    runs in reading order, decoding character codes through each font's
//!    ToUnicode table where one is present.
//! 3. **Scan ZIP archives** — enumerate entries in stored order, decompress
//!    every `.pdf`-named entry, and extract each one. A broken entry is
//!    reported in place; it never aborts the scan.
//! 4. **Aggregate** — combine per-document outcomes into one display string
//!    with provenance headers and fallback messages.
//!
//! ## Quick example
//!
//! ```no_run
//! use pdftextview::{PdfTextViewer, ResponseViewer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let body = std::fs::read("report.pdf")?;
//! let viewer = PdfTextViewer::new();
//!
//! if viewer.is_relevant(Some("application/pdf")) {
//!     println!("{}", viewer.render_display_text(&body, Some("application/pdf")));
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

mod archive;
mod classifier;
mod extractor;
mod fonts;
mod outcome;
mod render;
mod viewer;

pub use archive::ArchiveScanner;
pub use classifier::{classify, content_type_header, ContentKind};
pub use extractor::PdfTextExtractor;
pub use outcome::ExtractionOutcome;
pub use render::{render, BLOCK_SEPARATOR, NO_PDFS_MESSAGE};
pub use viewer::{PdfTextViewer, ResponseViewer};
// The fonts module is intentionally *not* re-exported; content-stream
// decoding is an internal detail of PdfTextExtractor.

// ── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration for extraction and archive scanning.
#[derive(Debug, Clone, Default)]
pub struct ViewerConfig {
    /// Optional user password tried before the empty password when a
    /// document is encrypted. Most encrypted payloads seen in responses use
    /// the empty user password, which is always attempted.
    pub password: Option<String>,

    /// Upper bound on the decompressed size of a single archive entry.
    /// An entry over the limit yields an [`ExtractionOutcome::Failure`] for
    /// that entry; scanning continues with the rest of the archive.
    /// `None` means unbounded.
    pub max_entry_size: Option<usize>,
}

// ── Error type ───────────────────────────────────────────────────────────────

/// Every error that this crate can produce.
#[derive(Error, Debug)]
pub enum ViewError {
    /// A filesystem I/O error occurred. Only the CLI and demo load paths
    /// do I/O; the library itself never touches the filesystem.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The input bytes do not form a parseable PDF document.
    #[error("invalid PDF: {0}")]
    InvalidPdf(String),

    /// The underlying lopdf parser returned an error.
    #[error("PDF parse error: {0}")]
    ParseError(#[from] lopdf::Error),

    /// The document is encrypted and the empty user password (and the
    /// configured password, if any) was rejected.
    #[error("document requires a password to decrypt: {0}")]
    EncryptionRequired(String),

    /// The input bytes do not form a readable ZIP archive.
    #[error("invalid ZIP archive: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// A single archive entry failed to decompress or read.
    #[error("failed to read archive entry '{name}': {reason}")]
    EntryError { name: String, reason: String },

    /// An archive entry's decompressed content exceeds
    /// [`ViewerConfig::max_entry_size`].
    #[error("archive entry '{name}' exceeds the {limit}-byte size limit")]
    EntryTooLarge { name: String, limit: usize },
}

impl ViewError {
    /// Short stable label used in the rendered error line.
    pub fn kind(&self) -> &'static str {
        match self {
            ViewError::IoError(_) => "Io",
            ViewError::InvalidPdf(_) => "InvalidPdf",
            ViewError::ParseError(_) => "ParseError",
            ViewError::EncryptionRequired(_) => "EncryptionRequired",
            ViewError::ZipError(_) => "ZipError",
            ViewError::EntryError { .. } => "EntryError",
            ViewError::EntryTooLarge { .. } => "EntryTooLarge",
        }
    }

    /// The single-line form shown to the user: `Error: {kind}: {details}`.
    ///
    /// ```
    /// # use pdftextview::ViewError;
    /// let e = ViewError::InvalidPdf("missing trailer".into());
    /// assert_eq!(e.display_line(), "Error: InvalidPdf: invalid PDF: missing trailer");
    /// ```
    pub fn display_line(&self) -> String {
        format!("Error: {}: {}", self.kind(), self)
    }
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, ViewError>;
