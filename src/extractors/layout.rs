// src/extractors/layout.rs
//! Column-count driven layout detection for extracted tables.
//!
//! Wide cells push later columns to the right and empty cells collapse them,
//! so the same logical row arrives with different widths. The field count
//! alone picks the mapping.
#![allow(dead_code)] // Table input arrives from an external extractor; not wired to the CLI

/// Rows narrower than this are never records.
pub const MIN_FIELDS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    MonthlyConfirmations,
    ConfirmationSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    Full,
    Compact,
    VeryCompact,
}

/// Returns the layout for a row of `field_count` cells, or `None` when the
/// row is too narrow to map.
pub fn classify(kind: TableKind, field_count: usize) -> Option<LayoutKind> {
    if field_count < MIN_FIELDS {
        return None;
    }
    let layout = match kind {
        TableKind::MonthlyConfirmations => match field_count {
            13.. => LayoutKind::Full,
            9..=12 => LayoutKind::Compact,
            _ => LayoutKind::VeryCompact,
        },
        TableKind::ConfirmationSummary => match field_count {
            17.. => LayoutKind::Full,
            10..=16 => LayoutKind::Compact,
            _ => LayoutKind::VeryCompact,
        },
    };
    Some(layout)
}
