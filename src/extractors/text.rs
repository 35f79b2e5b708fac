// src/extractors/text.rs
//! Line parsers for statement sections reconstructed as plain text.
//!
//! Both grammars read
//! `DATE AT QTY_LONG QTY_SHORT (YES|NO) SYMBOL EXCHANGE EXP_DATE NUMBER CURRENCY REST`
//! and differ only in how REST and NUMBER are interpreted.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::extractors::normalize::{normalize_date, normalize_float, normalize_int};
use crate::extractors::outcome::{RecordDraft, RowOutcome, SkipReason};
use crate::extractors::ParseContext;
use crate::utils::error::ExtractError;

const CLOSED_POSITION_TRADE_TYPE: &str = "Closed Position";

// REST = trade type (shortest run) + description
static TRADE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?P<date>\d{4}-\d{2}-\d{2})\s+(?P<at>\w+)\s+(?P<long>\d+)\s+(?P<short>\d+)\s+",
        r"(?P<subtype>YES|NO)\s+(?P<symbol>\S+)\s+(?P<exchange>\w+)\s+(?P<exp>\d{4}-\d{2}-\d{2})\s+",
        r"(?P<number>[\d.E-]+)\s+(?P<currency>\w+)\s+(?P<trade_type>.*?)\s+(?P<description>.+)$",
    ))
    .expect("Failed to compile TRADE_LINE_RE")
});

// REST = description only
static CLOSED_POSITION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?P<date>\d{4}-\d{2}-\d{2})\s+(?P<at>\w+)\s+(?P<long>\d+)\s+(?P<short>\d+)\s+",
        r"(?P<subtype>YES|NO)\s+(?P<symbol>\S+)\s+(?P<exchange>\w+)\s+(?P<exp>\d{4}-\d{2}-\d{2})\s+",
        r"(?P<number>[-\d.E]+)\s+(?P<currency>\w+)\s+(?P<description>.+)$",
    ))
    .expect("Failed to compile CLOSED_POSITION_RE")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineGrammar {
    /// Monthly trade confirmation lines; NUMBER is the unit price.
    Trade,
    /// Purchase and sale summary lines; NUMBER is the gross P&L and the
    /// trade type is always "Closed Position".
    ClosedPosition,
}

/// One input line and what became of it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine<'a> {
    pub line: &'a str,
    pub outcome: RowOutcome,
}

/// Parses `lines` with `grammar`.
///
/// Scanning stops (exclusive) at the first line containing one of
/// `stop_markers`; pass an empty slice to scan everything.
pub fn parse_lines<'a>(
    grammar: LineGrammar,
    lines: &[&'a str],
    stop_markers: &[String],
    ctx: &ParseContext<'_>,
) -> Vec<ParsedLine<'a>> {
    scan_lines(lines, stop_markers, |line| parse_line(grammar, line, ctx))
}

// A line whose parse fails is recorded as malformed and the scan carries on.
fn scan_lines<'a, F>(lines: &[&'a str], stop_markers: &[String], mut parse: F) -> Vec<ParsedLine<'a>>
where
    F: FnMut(&str) -> Result<RowOutcome, ExtractError>,
{
    let mut parsed = Vec::with_capacity(lines.len());

    for &raw in lines {
        let line = raw.trim();
        if line.is_empty() {
            parsed.push(ParsedLine { line: raw, outcome: RowOutcome::Skipped(SkipReason::Blank) });
            continue;
        }
        if stop_markers.iter().any(|marker| line.contains(marker.as_str())) {
            tracing::debug!("Stopping at section boundary: '{}'", line);
            break;
        }

        let outcome = match parse(line) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Error parsing line: {} ({})", e, line);
                RowOutcome::Skipped(SkipReason::Malformed(e.to_string()))
            }
        };
        if let RowOutcome::Skipped(reason) = &outcome {
            tracing::trace!("Skipped line ({}): '{}'", reason, line);
        }
        parsed.push(ParsedLine { line: raw, outcome });
    }

    parsed
}

/// Matches a single trimmed line against `grammar`.
pub fn parse_line(
    grammar: LineGrammar,
    line: &str,
    ctx: &ParseContext<'_>,
) -> Result<RowOutcome, ExtractError> {
    let pattern = match grammar {
        LineGrammar::Trade => &*TRADE_LINE_RE,
        LineGrammar::ClosedPosition => &*CLOSED_POSITION_RE,
    };
    let Some(caps) = pattern.captures(line) else {
        return Ok(RowOutcome::Skipped(SkipReason::NoMatch));
    };

    let (trade_type, description) = match grammar {
        LineGrammar::Trade => (
            group(&caps, "trade_type")?.trim().to_string(),
            group(&caps, "description")?.trim().to_string(),
        ),
        LineGrammar::ClosedPosition => (
            CLOSED_POSITION_TRADE_TYPE.to_string(),
            group(&caps, "description")?.trim().to_string(),
        ),
    };

    let draft = RecordDraft {
        trade_date: normalize_date(group(&caps, "date")?),
        asset_type: Some(group(&caps, "at")?.to_string()),
        qty_long: normalize_int(group(&caps, "long")?),
        qty_short: normalize_int(group(&caps, "short")?),
        subtype: Some(group(&caps, "subtype")?.to_string()),
        symbol: Some(group(&caps, "symbol")?.to_string()),
        description,
        exchange: group(&caps, "exchange")?.to_string(),
        exp_date: normalize_date(group(&caps, "exp")?),
        trade_price: normalize_float(group(&caps, "number")?),
        trade_type,
        commission: 0.0,
        exchange_fees: 0.0,
        nfa_fees: 0.0,
        total_fees: 0.0,
        currency: group(&caps, "currency")?.to_string(),
    };
    Ok(draft.finish(&ctx.tagger, ctx.source_file))
}

fn group<'t>(caps: &Captures<'t>, name: &'static str) -> Result<&'t str, ExtractError> {
    caps.name(name)
        .map(|m| m.as_str())
        .ok_or(ExtractError::MissingGroup(name))
}
