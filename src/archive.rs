use std::io::{Cursor, Read};

use log::{debug, warn};
use zip::ZipArchive;

use crate::extractor::PdfTextExtractor;
use crate::{ExtractionOutcome, Result, ViewError, ViewerConfig};

// ── ArchiveScanner ───────────────────────────────────────────────────────────

/// Enumerates a ZIP archive held in memory and extracts every PDF it
/// contains.
///
/// Entries are visited in central-directory order and that order is
/// preserved in the result (no sorting, no deduplication). Directory
/// entries and entries whose names do not end in `.pdf` (case-insensitive)
/// are skipped before any outcome is produced. A qualifying entry is fully
/// decompressed into memory and handed to [`PdfTextExtractor`]; an entry
/// that fails to decompress is reported as a `Failure` outcome in its place
/// and never aborts the scan.
///
/// # Example
///
/// ```no_run
/// use pdftextview::ArchiveScanner;
///
/// let bytes = std::fs::read("bundle.zip").unwrap();
/// for (name, outcome) in ArchiveScanner::scan(&bytes).unwrap() {
///     println!("{name}: {}", outcome.display_text());
/// }
/// ```
pub struct ArchiveScanner;

impl ArchiveScanner {
    /// Scan with the default configuration.
    pub fn scan(bytes: &[u8]) -> Result<Vec<(String, ExtractionOutcome)>> {
        Self::scan_with_config(bytes, &ViewerConfig::default())
    }

    /// Scan, honoring [`ViewerConfig::max_entry_size`] and passing the
    /// configured password through to per-entry extraction.
    ///
    /// Returns `Err` only when the archive itself cannot be opened (bad
    /// central directory, truncated input). An archive with no qualifying
    /// entries yields an empty vec, which is not an error.
    pub fn scan_with_config(
        bytes: &[u8],
        config: &ViewerConfig,
    ) -> Result<Vec<(String, ExtractionOutcome)>> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        debug!("scanning ZIP archive with {} entries", archive.len());

        let mut outcomes = Vec::new();
        for index in 0..archive.len() {
            let entry = match archive.by_index(index) {
                Ok(entry) => entry,
                Err(e) => {
                    // Local header unreadable; the name is unknown, so the
                    // suffix filter cannot apply.
                    warn!("skipping unreadable archive entry #{index}: {e}");
                    continue;
                }
            };

            if entry.is_dir() {
                continue;
            }
            let name = entry.name().to_string();
            if !name.to_ascii_lowercase().ends_with(".pdf") {
                continue;
            }

            let outcome = match Self::read_entry(entry, &name, config) {
                Ok(data) => PdfTextExtractor::extract_with_config(&data, config),
                Err(e) => {
                    warn!("archive entry '{name}' failed: {e}");
                    ExtractionOutcome::Failure(e)
                }
            };
            outcomes.push((name, outcome));
        }

        Ok(outcomes)
    }

    /// Fully decompress one entry, bounding the read when a size limit is
    /// configured. The declared size is only a hint, so the bound is
    /// enforced on the actual decompressed byte count.
    fn read_entry<R: Read>(mut entry: R, name: &str, config: &ViewerConfig) -> Result<Vec<u8>> {
        let mut data = Vec::new();

        match config.max_entry_size {
            Some(limit) => {
                entry
                    .take(limit as u64 + 1)
                    .read_to_end(&mut data)
                    .map_err(|e| ViewError::EntryError {
                        name: name.to_string(),
                        reason: e.to_string(),
                    })?;
                if data.len() > limit {
                    return Err(ViewError::EntryTooLarge {
                        name: name.to_string(),
                        limit,
                    });
                }
            }
            None => {
                entry
                    .read_to_end(&mut data)
                    .map_err(|e| ViewError::EntryError {
                        name: name.to_string(),
                        reason: e.to_string(),
                    })?;
            }
        }

        Ok(data)
    }
}
