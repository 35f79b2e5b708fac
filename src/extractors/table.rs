// src/extractors/table.rs
//! Parsers for rows that an upstream table extractor already split into cells.
#![allow(dead_code)] // Table input arrives from an external extractor; not wired to the CLI

use crate::extractors::layout::{classify, LayoutKind, TableKind};
use crate::extractors::normalize::{normalize_date, normalize_float, normalize_int, normalize_text};
use crate::extractors::outcome::{RecordDraft, RowOutcome, SkipReason};
use crate::extractors::ParseContext;

/// A table as rows of optional cell text. Row 0 is the header.
pub type Table = [Vec<Option<String>>];

const DEFAULT_TRADE_TYPE: &str = "Trade";

fn cell(row: &[Option<String>], index: usize) -> Option<&str> {
    row.get(index).and_then(|c| c.as_deref())
}

// Dates and numbers read the raw cell so a wrapped value keeps its newline
// for the normalizer to resolve.
fn raw(row: &[Option<String>], index: usize) -> &str {
    cell(row, index).unwrap_or("")
}

fn text(row: &[Option<String>], index: usize) -> Option<String> {
    normalize_text(cell(row, index))
}

/// Parses every data row of a table of `kind`, one outcome per row.
pub fn parse_table(kind: TableKind, table: &Table, ctx: &ParseContext<'_>) -> Vec<RowOutcome> {
    if table.len() < 2 {
        return Vec::new();
    }
    let outcomes: Vec<RowOutcome> = table[1..]
        .iter()
        .map(|row| match kind {
            TableKind::MonthlyConfirmations => parse_monthly_row(row, ctx),
            TableKind::ConfirmationSummary => parse_summary_row(row, ctx),
        })
        .collect();

    tracing::debug!(
        "{:?}: {} of {} rows accepted",
        kind,
        outcomes.iter().filter(|o| o.is_accepted()).count(),
        outcomes.len()
    );
    outcomes
}

/// Monthly trade confirmations. `trade_price` is the unit price.
pub fn parse_monthly_row(row: &[Option<String>], ctx: &ParseContext<'_>) -> RowOutcome {
    let Some(layout) = classify(TableKind::MonthlyConfirmations, row.len()) else {
        return RowOutcome::Skipped(SkipReason::TooFewFields(row.len()));
    };

    let mut draft = common_prefix(row, ctx);
    match layout {
        LayoutKind::Full => {
            draft.symbol = text(row, 5);
            draft.exp_date = normalize_date(raw(row, 8));
            draft.trade_price = normalize_float(raw(row, 9));
            if let Some(currency) = text(row, 10) {
                draft.currency = currency;
            }
            if let Some(trade_type) = text(row, 11) {
                draft.trade_type = trade_type;
            }
            draft.description = text(row, 12).unwrap_or_default();
        }
        LayoutKind::Compact | LayoutKind::VeryCompact => {
            draft.trade_price = normalize_float(raw(row, 5));
            draft.symbol = text(row, 7);
            if layout == LayoutKind::Compact {
                draft.description = text(row, 8).unwrap_or_default();
            }
        }
    }
    draft.finish(&ctx.tagger, ctx.source_file)
}

/// Trade confirmation summary. `trade_price` is the average long price; only
/// the full layout carries fees.
pub fn parse_summary_row(row: &[Option<String>], ctx: &ParseContext<'_>) -> RowOutcome {
    let Some(layout) = classify(TableKind::ConfirmationSummary, row.len()) else {
        return RowOutcome::Skipped(SkipReason::TooFewFields(row.len()));
    };

    let mut draft = common_prefix(row, ctx);
    draft.trade_price = normalize_float(raw(row, 5));
    match layout {
        LayoutKind::Full => {
            draft.symbol = text(row, 7);
            draft.description = text(row, 8).unwrap_or_default();
            draft.exp_date = normalize_date(raw(row, 11));
            draft.commission = normalize_float(raw(row, 12));
            draft.exchange_fees = normalize_float(raw(row, 13));
            draft.nfa_fees = normalize_float(raw(row, 14));
            draft.total_fees = normalize_float(raw(row, 15));
            if let Some(currency) = text(row, 16) {
                draft.currency = currency;
            }
        }
        LayoutKind::Compact => {
            draft.symbol = text(row, 7);
            draft.description = text(row, 8).unwrap_or_default();
        }
        LayoutKind::VeryCompact => {
            draft.symbol = text(row, 6);
            draft.description = text(row, 7).unwrap_or_default();
        }
    }
    draft.finish(&ctx.tagger, ctx.source_file)
}

// Columns 0..=4 never move between layouts.
fn common_prefix(row: &[Option<String>], ctx: &ParseContext<'_>) -> RecordDraft {
    RecordDraft {
        trade_date: normalize_date(raw(row, 0)),
        asset_type: text(row, 1),
        qty_long: normalize_int(raw(row, 2)),
        qty_short: normalize_int(raw(row, 3)),
        subtype: text(row, 4),
        symbol: None,
        description: String::new(),
        exchange: ctx.default_exchange.to_string(),
        exp_date: None,
        trade_price: 0.0,
        trade_type: DEFAULT_TRADE_TYPE.to_string(),
        commission: 0.0,
        exchange_fees: 0.0,
        nfa_fees: 0.0,
        total_fees: 0.0,
        currency: ctx.default_currency.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::tags::KeywordTable;

    fn row(cells: &[&str]) -> Vec<Option<String>> {
        cells
            .iter()
            .map(|c| if *c == "~" { None } else { Some(c.to_string()) })
            .collect()
    }

    fn header() -> Vec<Option<String>> {
        row(&["Trade Date", "AT", "Qty Long", "Qty Short", "Subtype", "Symbol"])
    }

    fn records(outcomes: Vec<RowOutcome>) -> Vec<crate::document::models::TransactionRecord> {
        outcomes.into_iter().filter_map(RowOutcome::into_record).collect()
    }

    #[test]
    fn monthly_full_layout_maps_every_column() {
        let table = KeywordTable::sports();
        let ctx = ParseContext::new(&table, "stmt.pdf", "Kalshi", "USD");
        let cells = row(&[
            "2025-09\n01", "SW", "20", "0", "YES", "KXNFLGAME-25SEP07", "~", "~",
            "2025-09-07", "0.55", "USD", "Buy", "Chiefs\nwin",
        ]);
        let record = parse_monthly_row(&cells, &ctx).into_record().expect("accepted");

        assert_eq!(record.trade_date.to_string(), "2025-09-01 00:00:00");
        assert_eq!(record.symbol, "KXNFLGAME-25SEP07");
        assert_eq!(record.exp_date.map(|d| d.to_string()), Some("2025-09-07 00:00:00".to_string()));
        assert_eq!(record.trade_price, 0.55);
        assert_eq!(record.trade_type, "Buy");
        assert_eq!(record.description, "Chiefs win");
        assert_eq!(record.exchange, "Kalshi");
        assert_eq!(record.tags, vec!["NFL", "Chiefs win"]);
    }

    #[test]
    fn monthly_compact_and_very_compact_layouts() {
        let table = KeywordTable::sports();
        let ctx = ParseContext::new(&table, "stmt.pdf", "Kalshi", "USD");

        let compact = row(&["2025-09-02", "SW", "5", "0", "NO", "0.31", "~", "KXMLB-A", "Yankees", "x"]);
        let record = parse_monthly_row(&compact, &ctx).into_record().expect("accepted");
        assert_eq!(record.trade_price, 0.31);
        assert_eq!(record.symbol, "KXMLB-A");
        assert_eq!(record.description, "Yankees");
        assert_eq!(record.exp_date, None);
        assert_eq!(record.trade_type, "Trade");
        assert_eq!(record.currency, "USD");

        let very_compact = row(&["2025-09-02", "SW", "5", "0", "NO", "0.31", "~", "KXMLB-A"]);
        let record = parse_monthly_row(&very_compact, &ctx).into_record().expect("accepted");
        assert_eq!(record.description, "");
        assert_eq!(record.tags, vec!["MLB"]);
    }

    #[test]
    fn summary_full_layout_carries_fees() {
        let table = KeywordTable::sports();
        let ctx = ParseContext::new(&table, "stmt.pdf", "Kalshi", "USD");
        let cells = row(&[
            "2025-09-03", "SW", "10", "0", "YES", "0.62", "~", "KXNHL-B", "Rangers", "~", "~",
            "2025-09-20", "0.10", "0.05", "1E-8", "0.15", "USD",
        ]);
        let record = parse_summary_row(&cells, &ctx).into_record().expect("accepted");
        assert_eq!(record.trade_price, 0.62);
        assert_eq!(record.commission, 0.10);
        assert_eq!(record.exchange_fees, 0.05);
        assert_eq!(record.nfa_fees, 0.0);
        assert_eq!(record.total_fees, 0.15);
        assert!(record.exp_date.is_some());
        assert_eq!(record.trade_type, "Trade");
    }

    #[test]
    fn summary_very_compact_shifts_symbol_left() {
        let table = KeywordTable::sports();
        let ctx = ParseContext::new(&table, "stmt.pdf", "Kalshi", "USD");
        let cells = row(&["2025-09-03", "SW", "10", "0", "YES", "0.62", "KXSOCCER-C", "Derby", "~"]);
        let record = parse_summary_row(&cells, &ctx).into_record().expect("accepted");
        assert_eq!(record.symbol, "KXSOCCER-C");
        assert_eq!(record.description, "Derby");
        assert_eq!(record.commission, 0.0);
        assert_eq!(record.tags, vec!["Soccer", "Derby"]);
    }

    #[test]
    fn narrow_rows_and_missing_fields_are_skipped_without_affecting_siblings() {
        let table = KeywordTable::sports();
        let ctx = ParseContext::new(&table, "stmt.pdf", "Kalshi", "USD");
        let rows = vec![
            header(),
            row(&["2025-09-01", "SW", "1", "0", "YES", "0.1", "~", "A"]),
            row(&["2025-09-01", "SW", "1"]),
            row(&["not a date", "SW", "1", "0", "YES", "0.1", "~", "B"]),
            row(&["2025-09-01", "SW", "1", "0", "YES", "0.1", "~", "None"]),
            row(&["2025-09-02", "SW", "1", "0", "YES", "0.1", "~", "C"]),
        ];
        let outcomes = parse_table(TableKind::MonthlyConfirmations, &rows, &ctx);
        assert_eq!(outcomes.len(), 5);
        assert_eq!(outcomes[1], RowOutcome::Skipped(SkipReason::TooFewFields(3)));
        assert_eq!(outcomes[2], RowOutcome::Skipped(SkipReason::MissingDate));
        assert_eq!(outcomes[3], RowOutcome::Skipped(SkipReason::MissingSymbol));

        let symbols: Vec<String> = records(outcomes).into_iter().map(|r| r.symbol).collect();
        assert_eq!(symbols, vec!["A", "C"]);
    }

    #[test]
    fn header_only_table_yields_nothing() {
        let table = KeywordTable::sports();
        let ctx = ParseContext::new(&table, "stmt.pdf", "Kalshi", "USD");
        assert!(parse_table(TableKind::ConfirmationSummary, &[header()], &ctx).is_empty());
        assert!(parse_table(TableKind::ConfirmationSummary, &[], &ctx).is_empty());
    }
}
