//! Highlight-language mapping.
//!
//! Picks the grammar name handed to an external syntax highlighter. Never
//! fails closed: every input maps to some grammar.

use super::probe;
use super::types::{DetectedContent, Kind};

/// Grammar used when nothing more specific applies.
pub const GENERAL_GRAMMAR: &str = "javascript";

/// Grammar for a classified record.
pub fn highlight_language(detected: &DetectedContent) -> &'static str {
    grammar_for(detected.kind(), &detected.original)
}

/// Grammar for `text` classified as `kind`.
///
/// `Code` is re-probed for its original sub-type (SQL, HTML or XML).
pub fn grammar_for(kind: Kind, text: &str) -> &'static str {
    match kind {
        Kind::Json => "json",
        Kind::Markdown => "markdown",
        Kind::Sql | Kind::Html => kind.as_str(),
        Kind::Code => probe::original_kind(text).map_or(GENERAL_GRAMMAR, Kind::as_str),
        Kind::Xml | Kind::Url | Kind::Email | Kind::Text => GENERAL_GRAMMAR,
    }
}
