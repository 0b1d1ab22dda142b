//! SQL detection.
//!
//! Two independent signal classes: statement-shape patterns (anchored so
//! that prose using words like "select" or "where" does not match) and a
//! count of distinct SQL keywords. Votes for the `Code` bucket.

use std::collections::HashSet;
use std::sync::OnceLock;

use clipsense_config::DetectorsConfig;
use regex::Regex;

use crate::classifier::registry::DetectorRegistry;
use crate::classifier::traits::ContentDetector;
use crate::classifier::types::{ContentType, Kind};

use super::SQL_PRIORITY;

const MAX_CONFIDENCE: f64 = 0.9;
const PATTERN_WEIGHT: f64 = 0.3;
const KEYWORD_WEIGHT: f64 = 0.1;
const MIN_KEYWORDS: usize = 3;

/// SQL keywords that rarely show up in ordinary English prose.
const KEYWORDS: &[&str] = &[
    "select",
    "insert",
    "update",
    "delete",
    "create",
    "alter",
    "drop",
    "truncate",
    "from",
    "where",
    "join",
    "values",
    "having",
    "distinct",
    "limit",
    "offset",
    "union",
    "varchar",
    "integer",
    "primary",
    "foreign",
    "references",
    "constraint",
    "autoincrement",
    "coalesce",
];

fn statement_patterns() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        [
            // SELECT <projection> FROM <table>
            r"(?im)^\s*select\s+(?:distinct\s+)?(?:\*|[\w.]+(?:\s*\([^)]*\))?)[\s\S]*?\bfrom\s+[\w.`\x22\[]",
            r"(?i)\binsert\s+into\s+[\w.`\x22\[]",
            r"(?i)\bupdate\s+[\w.`\x22\[]+\s+set\s+\w+\s*=",
            r"(?i)\bdelete\s+from\s+[\w.`\x22\[]",
            r"(?i)\b(?:create|alter|drop)\s+(?:temporary\s+|unique\s+)?(?:table|index|view|database|schema|trigger|procedure|function)\b",
            // WHERE col <op>
            r"(?i)\bwhere\s+[\w.]+\s*(?:=|<>|!=|<=|>=|<|>|\bin\s*\(|\blike\b|\bis\s+(?:not\s+)?null\b|\bbetween\b)",
            // JOIN t ON a.x = b.y
            r"(?i)\bjoin\s+[\w.]+(?:\s+(?:as\s+)?\w+)?\s+on\s+[\w.]+\s*=",
            r"(?i)\bgroup\s+by\s+[\w.]+\s*(?:,|;|$|\)|\bhaving\b|\border\b|\blimit\b)",
            r"(?i)\border\s+by\s+[\w.]+(?:\s+(?:asc|desc))?\s*(?:,|;|$|\)|\blimit\b)",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("sql statement pattern is valid and should always compile"))
        .collect()
    })
}

fn re_keyword() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(r"(?i)\b(?:{})\b", KEYWORDS.join("|"));
        Regex::new(&pattern).expect("re_keyword: pattern is valid and should always compile")
    })
}

/// Measurements the SQL vote is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SqlSignals {
    /// Statement-shape patterns matched.
    pub patterns: usize,
    /// Distinct keywords present.
    pub keywords: usize,
}

impl SqlSignals {
    pub(crate) fn measure(text: &str) -> Self {
        let keywords: HashSet<String> = re_keyword()
            .find_iter(text)
            .map(|m| m.as_str().to_ascii_lowercase())
            .collect();
        Self {
            patterns: statement_patterns()
                .iter()
                .filter(|re| re.is_match(text))
                .count(),
            keywords: keywords.len(),
        }
    }

    pub(crate) fn votes(&self) -> bool {
        self.patterns >= 1 || self.keywords >= MIN_KEYWORDS
    }

    pub(crate) fn confidence(&self) -> f64 {
        (self.patterns as f64 * PATTERN_WEIGHT + self.keywords as f64 * KEYWORD_WEIGHT)
            .min(MAX_CONFIDENCE)
    }
}

/// Score `text` as SQL (reported as `Code`).
pub fn detect_sql(text: &str) -> Option<ContentType> {
    let signals = SqlSignals::measure(text);
    if !signals.votes() {
        return None;
    }
    Some(ContentType::new(Kind::Sql.visible(), signals.confidence()))
}

/// Detects SQL statements and scripts.
pub struct SqlDetector;

impl ContentDetector for SqlDetector {
    fn format_id(&self) -> &str {
        "sql"
    }

    fn display_name(&self) -> &str {
        "SQL"
    }

    fn kind(&self) -> Kind {
        Kind::Sql.visible()
    }

    fn detect(&self, text: &str) -> Option<ContentType> {
        detect_sql(text)
    }
}

/// Register the SQL detector with the registry.
pub fn register_sql(registry: &mut DetectorRegistry, config: &DetectorsConfig) {
    if config.sql.enabled {
        registry.register_detector(SQL_PRIORITY, Box::new(SqlDetector));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_select() {
        let text = "SELECT * FROM users WHERE id = 1";
        let signals = SqlSignals::measure(text);
        assert_eq!(signals.patterns, 2);
        assert_eq!(signals.keywords, 3);
        let result = detect_sql(text).unwrap();
        assert_eq!(result.kind, Kind::Code);
        assert!(result.confidence >= 0.3);
    }

    #[test]
    fn test_statement_shapes() {
        for text in [
            "insert into logs (id, msg) values (1, 'x')",
            "UPDATE accounts SET balance = 0",
            "DELETE FROM sessions",
            "CREATE TABLE t (id INTEGER PRIMARY KEY)",
            "drop index idx_users_email",
        ] {
            assert!(SqlSignals::measure(text).patterns >= 1, "no pattern for {text:?}");
        }
    }

    #[test]
    fn test_join_and_grouping() {
        let text = "SELECT u.name, COUNT(o.id)\nFROM users u\nJOIN orders o ON o.user_id = u.id\nGROUP BY u.name\nORDER BY u.name DESC;";
        let signals = SqlSignals::measure(text);
        // select-from, join-on, group by, order by
        assert_eq!(signals.patterns, 4);
        assert_eq!(detect_sql(text).unwrap().confidence, MAX_CONFIDENCE);
    }

    #[test]
    fn test_prose_with_sql_words_stays_below_acceptance() {
        let text = "Please select a seat from the list where you feel comfortable.";
        let signals = SqlSignals::measure(text);
        assert_eq!(signals.patterns, 0);
        assert_eq!(signals.keywords, 3);
        assert!(signals.confidence() <= 0.5);
    }

    #[test]
    fn test_keywords_alone() {
        // No statement shape, but three distinct keywords.
        let signals = SqlSignals::measure("varchar primary foreign");
        assert_eq!(signals.patterns, 0);
        assert!(signals.votes());
        assert!((signals.confidence() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_repeated_keyword_counts_once() {
        assert_eq!(SqlSignals::measure("select SELECT Select").keywords, 1);
    }
}
