// src/extractors/mod.rs
pub mod layout;
pub mod normalize;
pub mod outcome;
pub mod section;
pub mod table;
pub mod tags;
pub mod text;

use crate::extractors::tags::{KeywordTable, TagExtractor};

/// Per-document values every parser stamps onto its records.
pub struct ParseContext<'a> {
    pub tagger: TagExtractor<'a>,
    pub source_file: &'a str,
    pub default_exchange: &'a str,
    pub default_currency: &'a str,
}

impl<'a> ParseContext<'a> {
    pub fn new(
        keywords: &'a KeywordTable,
        source_file: &'a str,
        default_exchange: &'a str,
        default_currency: &'a str,
    ) -> Self {
        Self {
            tagger: TagExtractor::new(keywords),
            source_file,
            default_exchange,
            default_currency,
        }
    }
}
