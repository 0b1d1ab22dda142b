//! Content formatting.
//!
//! Deterministic pretty-printing keyed on the resolved kind. JSON is
//! re-serialized with two-space indentation; SQL hiding in the `Code` bucket
//! gets one clause per line. Every other kind passes through unchanged, and
//! no input makes the formatter fail.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::json_repair;
use super::probe;
use super::types::{DetectedContent, Kind};

fn re_sql_break() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\s*\b((?:(?:left|right|inner|outer|full|cross)\s+)*join|group\s+by|order\s+by|select|from|where|limit|and|or)\b",
        )
        .expect("re_sql_break: pattern is valid and should always compile")
    })
}

/// Format a classified record.
pub fn format_content(detected: &DetectedContent) -> String {
    format_as(&detected.original, detected.kind())
}

/// Format `text` as if it had been classified as `kind`.
pub fn format_as(text: &str, kind: Kind) -> String {
    match kind {
        Kind::Json => format_json(text),
        Kind::Sql => format_sql(text),
        Kind::Code if probe::original_kind(text) == Some(Kind::Sql) => format_sql(text),
        _ => text.to_string(),
    }
}

/// Pretty-print JSON, repairing it first if needed. Returns the input
/// unchanged when it cannot be parsed either way.
pub fn format_json(text: &str) -> String {
    let Some(value) = json_repair::parse_lenient(text.trim()) else {
        crate::debug_log!("CLASSIFY", "format_json: unparseable, passing through");
        return text.to_string();
    };
    match serde_json::to_string_pretty(&value) {
        Ok(pretty) => pretty,
        Err(e) => {
            crate::debug_error!("CLASSIFY", "format_json: serialization failed: {}", e);
            text.to_string()
        }
    }
}

/// Put each major SQL clause on its own line, indenting `AND`/`OR`.
///
/// Keywords keep their original case. Quoted literals and identifiers are
/// copied through untouched.
pub fn format_sql(text: &str) -> String {
    let mut broken = String::with_capacity(text.len() + 16);
    for (quoted, span) in quoted_spans(text) {
        if quoted {
            broken.push_str(span);
        } else {
            broken.push_str(&re_sql_break().replace_all(span, break_clause));
        }
    }
    broken.trim_start().to_string()
}

fn break_clause(caps: &Captures<'_>) -> String {
    let keyword = &caps[1];
    if keyword.eq_ignore_ascii_case("and") || keyword.eq_ignore_ascii_case("or") {
        format!("\n  {keyword}")
    } else {
        format!("\n{keyword}")
    }
}

/// Split `text` into `(quoted, span)` pieces. Quoted spans keep their
/// delimiters (`'`, `"` or a backtick); an unterminated literal runs to the end.
fn quoted_spans(text: &str) -> Vec<(bool, &str)> {
    let mut spans = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        match quote {
            None => {
                if matches!(c, '\'' | '"' | '`') {
                    if i > start {
                        spans.push((false, &text[start..i]));
                    }
                    start = i;
                    quote = Some(c);
                }
            }
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(q) if c == q => {
                let end = i + c.len_utf8();
                spans.push((true, &text[start..end]));
                start = end;
                quote = None;
            }
            Some(_) => {}
        }
    }
    if start < text.len() {
        spans.push((quote.is_some(), &text[start..]));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_json_pretty() {
        let formatted = format_json(r#"{"a": 1, "b": [2,3]}"#);
        assert_eq!(
            formatted,
            "{\n  \"a\": 1,\n  \"b\": [\n    2,\n    3\n  ]\n}"
        );
    }

    #[test]
    fn test_json_keeps_key_order() {
        let formatted = format_json(r#"{"z": 1, "a": 2}"#);
        assert!(formatted.find("\"z\"").unwrap() < formatted.find("\"a\"").unwrap());
    }

    #[test]
    fn test_json_repaired() {
        let formatted = format_json("{name: 'x', tags: ['a', 'b',],}");
        let value: Value = serde_json::from_str(&formatted).unwrap();
        assert_eq!(value["name"], "x");
        assert_eq!(value["tags"][1], "b");
    }

    #[test]
    fn test_json_unparseable_passes_through() {
        assert_eq!(format_json("{oops"), "{oops");
        assert_eq!(format_json(""), "");
    }

    #[test]
    fn test_json_idempotent() {
        let once = format_json(r#"[{"id":1,"ok":true},{"id":2,"ok":false}]"#);
        assert_eq!(format_json(&once), once);
    }

    #[test]
    fn test_sql_breaks() {
        let formatted = format_sql("SELECT id, name FROM users WHERE active = 1 AND age > 30 ORDER BY name LIMIT 10");
        assert_eq!(
            formatted,
            "SELECT id, name\nFROM users\nWHERE active = 1\n  AND age > 30\nORDER BY name\nLIMIT 10"
        );
    }

    #[test]
    fn test_sql_preserves_case_and_join_prefix() {
        let formatted = format_sql("select a from t left join u on t.id = u.id or t.x = 2");
        assert_eq!(
            formatted,
            "select a\nfrom t\nleft join u on t.id = u.id\n  or t.x = 2"
        );
    }

    #[test]
    fn test_sql_idempotent() {
        let once = format_sql("SELECT * FROM a JOIN b ON a.id = b.id WHERE x = 1 OR y = 2 GROUP BY a.id");
        assert_eq!(format_sql(&once), once);
    }

    #[test]
    fn test_sql_literals_untouched() {
        let formatted = format_sql(
            "SELECT * FROM people WHERE name = 'Tom and Jerry' OR nick = \"from\"",
        );
        assert_eq!(
            formatted,
            "SELECT *\nFROM people\nWHERE name = 'Tom and Jerry'\n  OR nick = \"from\""
        );
    }

    #[test]
    fn test_sql_escaped_and_unterminated_literals() {
        assert_eq!(
            format_sql(r"SELECT 'O\'Brien or not' FROM t"),
            "SELECT 'O\\'Brien or not'\nFROM t"
        );
        assert_eq!(format_sql("SELECT 'it and where"), "SELECT 'it and where");
        assert_eq!(
            quoted_spans("a 'b' c"),
            vec![(false, "a "), (true, "'b'"), (false, " c")]
        );
    }

    #[test]
    fn test_words_containing_keywords_untouched() {
        assert_eq!(format_sql("SELECT orders FROM fromage"), "SELECT orders\nFROM fromage");
    }

    #[test]
    fn test_dispatch() {
        assert_eq!(
            format_as("SELECT * FROM t WHERE id = 1", Kind::Code),
            "SELECT *\nFROM t\nWHERE id = 1"
        );
        // Code that is not SQL passes through.
        assert_eq!(format_as("let x = 1;", Kind::Code), "let x = 1;");
        // Markdown rendering is delegated.
        assert_eq!(format_as("# Title\n\nfrom here", Kind::Markdown), "# Title\n\nfrom here");
        assert_eq!(format_as("{\"a\":1}", Kind::Text), "{\"a\":1}");
    }
}
