//! Declared content-type classification.
//!
//! Classification is a pure function of the declared `Content-Type` value:
//! lowercase it, check for substring containment. Payload bytes are never
//! inspected here; a payload served with a misleading type simply goes down
//! the extraction path that its declaration selects.

/// What a declared content type says the payload is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// `application/pdf` or `application/x-pdf`.
    Pdf,
    /// `application/zip`.
    ZipArchive,
    /// Anything else, including an absent header.
    Unsupported,
}

/// Classify a raw `Content-Type` header value.
///
/// The value may carry parameters (`; charset=...`); matching is by
/// case-insensitive substring containment, so no parameter stripping is
/// needed. Total over every possible input, including the empty string.
///
/// ```
/// use pdftextview::{classify, ContentKind};
///
/// assert_eq!(classify(Some("Application/PDF; charset=binary")), ContentKind::Pdf);
/// assert_eq!(classify(Some("application/x-pdf")), ContentKind::Pdf);
/// assert_eq!(classify(Some("application/zip")), ContentKind::ZipArchive);
/// assert_eq!(classify(Some("text/html")), ContentKind::Unsupported);
/// assert_eq!(classify(None), ContentKind::Unsupported);
/// ```
pub fn classify(content_type: Option<&str>) -> ContentKind {
    let Some(value) = content_type else {
        return ContentKind::Unsupported;
    };

    let value = value.to_ascii_lowercase();
    if value.contains("application/pdf") || value.contains("application/x-pdf") {
        ContentKind::Pdf
    } else if value.contains("application/zip") {
        ContentKind::ZipArchive
    } else {
        ContentKind::Unsupported
    }
}

/// Find the `Content-Type` value in a `(name, value)` header list.
///
/// Header names are compared case-insensitively. Returns the first match, as
/// hosts holding raw response headers would expect.
///
/// ```
/// use pdftextview::content_type_header;
///
/// let headers = vec![
///     ("Server".to_string(), "nginx".to_string()),
///     ("content-type".to_string(), "application/pdf".to_string()),
/// ];
/// assert_eq!(content_type_header(&headers), Some("application/pdf"));
/// assert_eq!(content_type_header(&[]), None);
/// ```
pub fn content_type_header(headers: &[(String, String)]) -> Option<&str> {
    headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("Content-Type"))
        .map(|(_, value)| value.as_str())
}
