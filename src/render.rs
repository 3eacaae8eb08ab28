//! Pure formatting of extraction outcomes into display text.

use crate::ExtractionOutcome;

/// Shown when an archive contains no qualifying entries. Fixed sentinel so
/// the viewer never displays an empty string.
pub const NO_PDFS_MESSAGE: &str = "No PDFs found inside ZIP.";

/// Separator line placed between per-entry blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n-----\n\n";

/// Render an ordered sequence of outcomes into the final display string.
///
/// Two modes, chosen by the shape of the input:
///
/// - **Single document**: one outcome with no name. The outcome's text (or
///   message) alone, with no header or separator.
/// - **Archive**: zero or more named outcomes. Each becomes a
///   `=== {name} ===` block over its body, blocks joined by
///   [`BLOCK_SEPARATOR`] with no leading or trailing separator; an empty
///   sequence becomes [`NO_PDFS_MESSAGE`].
///
/// Every outcome renders to exactly one block; nothing is dropped.
pub fn render(outcomes: &[(Option<String>, ExtractionOutcome)]) -> String {
    if let [(None, outcome)] = outcomes {
        return outcome.display_text();
    }
    if outcomes.is_empty() {
        return NO_PDFS_MESSAGE.to_string();
    }

    let mut out = String::new();
    for (index, (name, outcome)) in outcomes.iter().enumerate() {
        if index > 0 {
            out.push_str(BLOCK_SEPARATOR);
        }
        if let Some(name) = name {
            out.push_str("=== ");
            out.push_str(name);
            out.push_str(" ===\n");
        }
        out.push_str(&outcome.display_text());
    }
    out
}
