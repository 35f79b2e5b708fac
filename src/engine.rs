// src/engine.rs
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::config::ParserConfig;
use crate::document::models::{ParseResult, TransactionRecord};
use crate::document::source::{collect_text, PageTextSource, PdfDocument};
use crate::extractors::section::{ExtractedSection, SectionLocator};
use crate::extractors::text::{parse_lines, LineGrammar, ParsedLine};
use crate::extractors::ParseContext;
use crate::utils::error::AppError;
use crate::utils::text_debug;

/// Drives one document from raw pages to a `ParseResult`.
///
/// Nothing escapes this boundary: every error becomes a failure envelope.
pub struct StatementEngine {
    config: ParserConfig,
}

impl StatementEngine {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Opens the PDF at `path` and parses it.
    pub fn parse_path(&self, path: &Path) -> ParseResult {
        let filename = display_filename(path);
        tracing::info!("Processing {}", path.display());

        // The document (and its handle) is dropped before the result is returned
        guarded(&filename, || match PdfDocument::open(path) {
            Ok(document) => self.parse_source(&document, &filename),
            Err(e) => {
                tracing::error!("Failed to open {}: {}", path.display(), e);
                ParseResult::failure(filename.as_str(), e.to_string())
            }
        })
    }

    /// Parses any page source, stamping `filename` on every record.
    pub fn parse_source<S: PageTextSource + ?Sized>(&self, source: &S, filename: &str) -> ParseResult {
        guarded(filename, || {
            let outcome = collect_text(source)
                .map_err(AppError::from)
                .and_then(|all_text| self.parse_text(&all_text, filename));

            match outcome {
                Ok(records) => ParseResult::success(filename, records),
                Err(e) => {
                    tracing::error!("Failed to parse {}: {}", filename, e);
                    ParseResult::failure(filename, e.to_string())
                }
            }
        })
    }

    /// Locates the configured section in `all_text` and parses its lines.
    pub fn parse_text(&self, all_text: &str, filename: &str) -> Result<Vec<TransactionRecord>, AppError> {
        let spec = &self.config.section;
        let section = SectionLocator::new(spec).locate(all_text)?;
        tracing::info!(
            "Found {} section at line {}: {} lines",
            section.section_name,
            section.header_line + 1,
            section.lines.len()
        );
        if let Some(marker) = section.end_marker {
            tracing::debug!("Section ends at: '{}'", marker.trim());
        }

        let ctx = ParseContext::new(
            &self.config.keywords,
            filename,
            &self.config.default_exchange,
            &self.config.default_currency,
        );
        // Closed-position scans stop on their own at the next section header
        let stop_markers: &[String] = match spec.grammar {
            LineGrammar::ClosedPosition => &spec.end_markers,
            LineGrammar::Trade => &[],
        };
        let parsed = parse_lines(spec.grammar, &section.lines, stop_markers, &ctx);

        if let Some(dir) = &self.config.debug_dir {
            self.dump_section(dir, filename, &section, &parsed);
        }

        let records: Vec<TransactionRecord> = parsed
            .into_iter()
            .filter_map(|p| p.outcome.into_record())
            .collect();
        tracing::info!("Parsed {} transactions", records.len());
        Ok(records)
    }

    fn dump_section(&self, dir: &Path, filename: &str, section: &ExtractedSection<'_>, parsed: &[ParsedLine<'_>]) {
        let stem = Path::new(filename)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "statement".to_string());
        let path = dir.join(format!("{}_section.txt", stem));
        if let Err(e) = text_debug::save_debug_text(&path, &section.section_name, parsed) {
            tracing::warn!("Failed to write debug dump {}: {}", path.display(), e);
        }
    }
}

/// Runs `parse`, turning a panic anywhere below it into a failure envelope.
fn guarded(filename: &str, parse: impl FnOnce() -> ParseResult) -> ParseResult {
    panic::catch_unwind(AssertUnwindSafe(parse)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown cause".to_string());
        tracing::error!("Parser panicked on {}: {}", filename, message);
        ParseResult::failure(filename, format!("internal error: {}", message))
    })
}

/// Base name of the document, falling back to the path as given.
pub fn display_filename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
