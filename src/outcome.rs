use crate::ViewError;

// ── ExtractionOutcome ────────────────────────────────────────────────────────

/// The result of extracting text from one PDF document.
///
/// Produced once per document: the top-level payload, or each qualifying
/// archive entry. `Empty` is a *successful* outcome: the document parsed but
/// carried no recoverable text, which is normal for scanned pages. Only
/// `Failure` represents a document that could not be processed.
#[derive(Debug)]
pub enum ExtractionOutcome {
    /// Recovered text, trimmed of leading and trailing whitespace.
    Text(String),
    /// Parse succeeded but no text was recoverable; the string explains the
    /// likely cause.
    Empty(String),
    /// The document could not be processed at all.
    Failure(ViewError),
}

impl ExtractionOutcome {
    /// Returns `true` when text was recovered.
    pub fn is_text(&self) -> bool {
        matches!(self, ExtractionOutcome::Text(_))
    }

    /// Returns `true` when the document parsed but yielded no text.
    pub fn is_empty(&self) -> bool {
        matches!(self, ExtractionOutcome::Empty(_))
    }

    /// Returns `true` when the document could not be processed.
    pub fn is_failure(&self) -> bool {
        matches!(self, ExtractionOutcome::Failure(_))
    }

    /// The text shown to the user for this outcome.
    ///
    /// Every variant renders to a non-empty string: recovered text verbatim,
    /// the explanatory message for `Empty`, and a single
    /// `Error: {kind}: {details}` line for `Failure`.
    pub fn display_text(&self) -> String {
        match self {
            ExtractionOutcome::Text(text) => text.clone(),
            ExtractionOutcome::Empty(message) => message.clone(),
            ExtractionOutcome::Failure(error) => error.display_line(),
        }
    }
}
