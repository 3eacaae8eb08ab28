use crate::archive::ArchiveScanner;
use crate::classifier::{classify, ContentKind};
use crate::extractor::PdfTextExtractor;
use crate::render::render;
use crate::ViewerConfig;

// ── ResponseViewer ───────────────────────────────────────────────────────────

/// The narrow capability interface a host integrates against.
///
/// A host offers the viewer for a payload when [`is_relevant`] says so, then
/// calls [`render_display_text`] to obtain the text for its (read-only)
/// display. Implementations must never panic or propagate an error through
/// this boundary; every failure renders as text.
///
/// [`is_relevant`]: ResponseViewer::is_relevant
/// [`render_display_text`]: ResponseViewer::render_display_text
pub trait ResponseViewer {
    /// Label under which the host shows this viewer.
    fn caption(&self) -> &str {
        "PDF Text"
    }

    /// Cheap relevance check from the declared content type alone; no
    /// payload bytes are parsed.
    fn is_relevant(&self, content_type: Option<&str>) -> bool;

    /// The full display text for a payload. Infallible by contract:
    /// unprocessable input yields a single `Error: {kind}: {details}` line.
    fn render_display_text(&self, body: &[u8], content_type: Option<&str>) -> String;
}

// ── PdfTextViewer ────────────────────────────────────────────────────────────

/// The crate's [`ResponseViewer`]: classify, extract, aggregate.
///
/// Stateless apart from its configuration; calls are independent, so one
/// viewer instance may serve many payloads, including concurrently.
#[derive(Debug, Clone, Default)]
pub struct PdfTextViewer {
    config: ViewerConfig,
}

impl PdfTextViewer {
    /// A viewer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// A viewer honoring `config` for every payload it renders.
    pub fn with_config(config: ViewerConfig) -> Self {
        Self { config }
    }

    /// Returns a reference to the active [`ViewerConfig`].
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }
}

impl ResponseViewer for PdfTextViewer {
    fn is_relevant(&self, content_type: Option<&str>) -> bool {
        classify(content_type) != ContentKind::Unsupported
    }

    fn render_display_text(&self, body: &[u8], content_type: Option<&str>) -> String {
        match classify(content_type) {
            ContentKind::ZipArchive => {
                match ArchiveScanner::scan_with_config(body, &self.config) {
                    Ok(outcomes) => {
                        let named: Vec<_> = outcomes
                            .into_iter()
                            .map(|(name, outcome)| (Some(name), outcome))
                            .collect();
                        render(&named)
                    }
                    Err(e) => e.display_line(),
                }
            }
            // Anything not declared as ZIP goes down the PDF path; the
            // extractor itself reports unparseable input.
            ContentKind::Pdf | ContentKind::Unsupported => {
                let outcome = PdfTextExtractor::extract_with_config(body, &self.config);
                render(&[(None, outcome)])
            }
        }
    }
}
