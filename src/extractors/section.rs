// src/extractors/section.rs

// --- Imports ---
use crate::config::SectionSpec;
use crate::utils::error::ExtractError;

// --- Data Structures ---
/// The lines belonging to one named section of the statement text.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedSection<'a> {
    pub section_name: String,
    /// Index of the header line in the full text.
    pub header_line: usize,
    /// Line that ended the section, if a known end marker was hit.
    pub end_marker: Option<&'a str>,
    pub lines: Vec<&'a str>,
}

// --- Locator ---
pub struct SectionLocator<'s> {
    spec: &'s SectionSpec,
}

impl<'s> SectionLocator<'s> {
    pub fn new(spec: &'s SectionSpec) -> Self {
        Self { spec }
    }

    /// Slices out the lines after the first header line, up to (not including)
    /// the first line that carries one of the end markers.
    pub fn locate<'a>(&self, full_text: &'a str) -> Result<ExtractedSection<'a>, ExtractError> {
        let lines: Vec<&'a str> = full_text.split('\n').collect();

        let header_line = lines
            .iter()
            .position(|line| line.contains(self.spec.header.as_str()))
            .ok_or_else(|| ExtractError::SectionNotFound(self.spec.header.clone()))?;
        let start = header_line + 1;

        let end = lines[start..]
            .iter()
            .position(|line| self.is_end_marker(line))
            .map(|offset| start + offset)
            .unwrap_or(lines.len());

        tracing::debug!(
            "Section '{}' spans lines {}..{} of {}",
            self.spec.header,
            start,
            end,
            lines.len()
        );

        Ok(ExtractedSection {
            section_name: self.spec.header.clone(),
            header_line,
            end_marker: lines.get(end).copied(),
            lines: lines[start..end].to_vec(),
        })
    }

    fn is_end_marker(&self, line: &str) -> bool {
        self.spec.end_markers.iter().any(|marker| line.contains(marker.as_str()))
    }
}
