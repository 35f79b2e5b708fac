// src/document/models.rs
use chrono::NaiveDateTime;
use serde::Serialize;

/// One canonical trade row pulled out of a statement.
///
/// `trade_price` is format dependent: closed-position lines carry the gross
/// P&L, trade lines and monthly confirmation tables carry the unit price and
/// confirmation summary tables carry the average long price.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub trade_date: NaiveDateTime,
    pub asset_type: Option<String>,
    pub qty_long: u64,
    pub qty_short: u64,
    pub subtype: Option<String>,
    pub symbol: String,
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
    pub source_file: String,
    pub tags: Vec<String>,
}

/// Envelope returned for every document, success or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub success: bool,
    pub filename: String,
    pub transaction_count: usize,
    pub transactions: Vec<TransactionRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ParseResult {
    pub fn success(filename: impl Into<String>, transactions: Vec<TransactionRecord>) -> Self {
        Self {
            success: true,
            filename: filename.into(),
            transaction_count: transactions.len(),
            transactions,
            error: None,
        }
    }

    /// Failed documents never carry partial results.
    pub fn failure(filename: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            filename: filename.into(),
            transaction_count: 0,
            transactions: Vec::new(),
            error: Some(error.into()),
        }
    }
}
