// src/config.rs
use std::path::PathBuf;

use clap::ValueEnum;

use crate::extractors::tags::KeywordTable;
use crate::extractors::text::LineGrammar;

pub const DEFAULT_EXCHANGE: &str = "Kalshi";
pub const DEFAULT_CURRENCY: &str = "USD";

const CLOSED_POSITIONS_HEADER: &str = "Purchase and Sale Summary";
const CLOSED_POSITIONS_END: &[&str] = &["Journal Entries", "Open Positions", "Account Summary"];

const TRADE_CONFIRMATIONS_HEADER: &str = "Monthly Trade Confirmations";
const TRADE_CONFIRMATIONS_END: &[&str] = &[
    "Purchase and Sale Summary",
    "Journal Entries",
    "Open Positions",
    "Account Summary",
];

/// Statement sections the engine knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SectionKind {
    /// "Purchase and Sale Summary": one line per closed leg, gross P&L.
    ClosedPositions,
    /// "Monthly Trade Confirmations": one line per fill, unit price.
    TradeConfirmations,
}

impl SectionKind {
    pub fn spec(self) -> SectionSpec {
        let (header, end_markers) = match self {
            SectionKind::ClosedPositions => (CLOSED_POSITIONS_HEADER, CLOSED_POSITIONS_END),
            SectionKind::TradeConfirmations => (TRADE_CONFIRMATIONS_HEADER, TRADE_CONFIRMATIONS_END),
        };
        SectionSpec {
            header: header.to_string(),
            end_markers: end_markers.iter().map(|m| m.to_string()).collect(),
            grammar: match self {
                SectionKind::ClosedPositions => LineGrammar::ClosedPosition,
                SectionKind::TradeConfirmations => LineGrammar::Trade,
            },
        }
    }
}

/// Header phrase, following-section markers and line grammar of a section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpec {
    pub header: String,
    pub end_markers: Vec<String>,
    pub grammar: LineGrammar,
}

/// Immutable settings for one run, shared by reference with every component.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    pub default_exchange: String,
    pub default_currency: String,
    pub section: SectionSpec,
    pub keywords: KeywordTable,
    /// Where to write the per-line debug dump, if anywhere.
    pub debug_dir: Option<PathBuf>,
}

impl ParserConfig {
    pub fn for_section(kind: SectionKind) -> Self {
        Self {
            section: kind.spec(),
            ..Self::default()
        }
    }

    pub fn with_debug_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.debug_dir = dir;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            default_exchange: DEFAULT_EXCHANGE.to_string(),
            default_currency: DEFAULT_CURRENCY.to_string(),
            section: SectionKind::ClosedPositions.spec(),
            keywords: KeywordTable::default(),
            debug_dir: None,
        }
    }
}
