// src/utils/text_debug.rs
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::extractors::outcome::RowOutcome;
use crate::extractors::text::ParsedLine;
use crate::utils::error::OutputError;

/// Writes every section line with a marker showing what the parser did with it:
/// `+` for an accepted record, `-` plus the reason for a skipped line.
pub fn save_debug_text(path: &Path, section_name: &str, parsed: &[ParsedLine<'_>]) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut out = BufWriter::new(File::create(path)?);

    let accepted = parsed.iter().filter(|p| p.outcome.is_accepted()).count();
    writeln!(out, "# {} ({} lines, {} accepted)", section_name, parsed.len(), accepted)?;

    for entry in parsed {
        match &entry.outcome {
            RowOutcome::Accepted(_) => writeln!(out, "+ {}", entry.line)?,
            RowOutcome::Skipped(reason) => writeln!(out, "- [{}] {}", reason, entry.line)?,
        }
    }
    out.flush()?;

    tracing::info!("Saved debug section dump to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::outcome::SkipReason;

    #[test]
    fn writes_one_marked_line_per_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dump.txt");
        let parsed = vec![
            ParsedLine { line: "", outcome: RowOutcome::Skipped(SkipReason::Blank) },
            ParsedLine { line: "Date AT Qty", outcome: RowOutcome::Skipped(SkipReason::NoMatch) },
        ];

        save_debug_text(&path, "Purchase and Sale Summary", &parsed).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "# Purchase and Sale Summary (2 lines, 0 accepted)");
        assert_eq!(lines[1], "- [blank] ");
        assert_eq!(lines[2], "- [no match] Date AT Qty");
    }
}
