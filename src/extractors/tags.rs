// src/extractors/tags.rs

const SPORTS: &[(&str, &[&str])] = &[
    ("NFL", &["NFL"]),
    ("NBA", &["NBA"]),
    ("EPL", &["EPL", "EPLGAME"]),
    ("Premier League", &["PREMIERLEAGUE"]),
    ("MLB", &["MLB"]),
    ("NHL", &["NHL"]),
    ("Soccer", &["SOCCER"]),
    ("Football", &["FOOTBALL"]),
];

/// Ordered (label, keywords) pairs. Order matters: the first label whose
/// keywords hit wins.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordTable {
    entries: Vec<(String, Vec<String>)>,
}

impl KeywordTable {
    pub fn new(entries: Vec<(String, Vec<String>)>) -> Self {
        Self { entries }
    }

    /// League/sport labels seen on event-contract statements.
    pub fn sports() -> Self {
        Self::new(
            SPORTS
                .iter()
                .map(|(label, keywords)| {
                    (label.to_string(), keywords.iter().map(|k| k.to_string()).collect())
                })
                .collect(),
        )
    }

    fn first_match(&self, haystack: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| haystack.contains(k.as_str())))
            .map(|(label, _)| label.as_str())
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::sports()
    }
}

/// Derives classification tags for a record.
pub struct TagExtractor<'a> {
    table: &'a KeywordTable,
}

impl<'a> TagExtractor<'a> {
    pub fn new(table: &'a KeywordTable) -> Self {
        Self { table }
    }

    /// At most one league tag (first match), followed by the trimmed
    /// description when there is one.
    pub fn extract(&self, description: &str, symbol: &str) -> Vec<String> {
        let mut tags = Vec::new();
        let haystack = format!("{} {}", description, symbol).to_uppercase();

        if let Some(label) = self.table.first_match(&haystack) {
            tags.push(label.to_string());
        }

        let description = description.trim();
        if !description.is_empty() {
            tags.push(description.to_string());
        }
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn league_from_symbol_then_description() {
        let table = KeywordTable::sports();
        let tags = TagExtractor::new(&table).extract("Manchester City", "KXEPLGAME-25SEP14MCIMUN-MCI");
        assert_eq!(tags, vec!["EPL", "Manchester City"]);
    }

    #[test]
    fn first_match_wins() {
        let table = KeywordTable::sports();
        // Both NBA and NFL appear; NFL is earlier in the table
        let tags = TagExtractor::new(&table).extract("nba vs nfl", "X");
        assert_eq!(tags, vec!["NFL", "nba vs nfl"]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let table = KeywordTable::sports();
        let tags = TagExtractor::new(&table).extract("premierleague final", "SYM");
        assert_eq!(tags[0], "Premier League");
    }

    #[test]
    fn no_league_and_blank_description_gives_no_tags() {
        let table = KeywordTable::sports();
        assert!(TagExtractor::new(&table).extract("   ", "KXBTC-25DEC").is_empty());
    }

    #[test]
    fn description_only_when_no_league() {
        let table = KeywordTable::sports();
        let tags = TagExtractor::new(&table).extract(" Bitcoin above 100k ", "KXBTC-25DEC");
        assert_eq!(tags, vec!["Bitcoin above 100k"]);
    }

    #[test]
    fn custom_table_is_respected() {
        let table = KeywordTable::new(vec![("Crypto".to_string(), vec!["BTC".to_string()])]);
        let tags = TagExtractor::new(&table).extract("", "KXBTC-25DEC");
        assert_eq!(tags, vec!["Crypto"]);
    }
}
