// src/extractors/outcome.rs
use std::fmt;

use chrono::NaiveDateTime;

use crate::document::models::TransactionRecord;
use crate::extractors::tags::TagExtractor;

/// Why a candidate row or line produced no record.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    Blank,
    NoMatch,
    TooFewFields(usize),
    MissingDate,
    MissingSymbol,
    Malformed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Blank => write!(f, "blank"),
            SkipReason::NoMatch => write!(f, "no match"),
            SkipReason::TooFewFields(n) => write!(f, "too few fields ({})", n),
            SkipReason::MissingDate => write!(f, "missing trade date"),
            SkipReason::MissingSymbol => write!(f, "missing symbol"),
            SkipReason::Malformed(msg) => write!(f, "malformed: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Accepted(TransactionRecord),
    Skipped(SkipReason),
}

impl RowOutcome {
    pub fn into_record(self) -> Option<TransactionRecord> {
        match self {
            RowOutcome::Accepted(record) => Some(record),
            RowOutcome::Skipped(_) => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, RowOutcome::Accepted(_))
    }
}

/// Field values gathered by a parser before the mandatory checks run.
#[derive(Debug, Clone)]
pub struct RecordDraft {
    pub trade_date: Option<NaiveDateTime>,
    pub asset_type: Option<String>,
    pub qty_long: u64,
    pub qty_short: u64,
    pub subtype: Option<String>,
    pub symbol: Option<String>,
    pub description: String,
    pub exchange: String,
    pub exp_date: Option<NaiveDateTime>,
    pub trade_price: f64,
    pub trade_type: String,
    pub commission: f64,
    pub exchange_fees: f64,
    pub nfa_fees: f64,
    pub total_fees: f64,
    pub currency: String,
}

impl RecordDraft {
    /// Drops the draft unless it has both a trade date and a symbol, then
    /// stamps tags and the source file.
    pub fn finish(self, tagger: &TagExtractor<'_>, source_file: &str) -> RowOutcome {
        let Some(trade_date) = self.trade_date else {
            return RowOutcome::Skipped(SkipReason::MissingDate);
        };
        let symbol = match self.symbol {
            Some(symbol) if !symbol.is_empty() => symbol,
            _ => return RowOutcome::Skipped(SkipReason::MissingSymbol),
        };

        let tags = tagger.extract(&self.description, &symbol);
        RowOutcome::Accepted(TransactionRecord {
            trade_date,
            asset_type: self.asset_type,
            qty_long: self.qty_long,
            qty_short: self.qty_short,
            subtype: self.subtype,
            symbol,
            description: self.description,
            exchange: self.exchange,
            exp_date: self.exp_date,
            trade_price: self.trade_price,
            trade_type: self.trade_type,
            commission: self.commission,
            exchange_fees: self.exchange_fees,
            nfa_fees: self.nfa_fees,
            total_fees: self.total_fees,
            currency: self.currency,
            source_file: source_file.to_string(),
            tags,
        })
    }
}
