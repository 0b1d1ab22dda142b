//! Core traits for the classification engine.

use super::types::{ContentType, Kind};

/// Guesses whether a text is of one specific format.
///
/// Implementations must be pure and `Send + Sync`: the same input always
/// yields the same vote, and detectors are shared across threads.
pub trait ContentDetector: Send + Sync {
    /// Fine-grained identifier (e.g. "json", "sql", "html").
    fn format_id(&self) -> &str;

    /// Human-readable name for listings.
    fn display_name(&self) -> &str;

    /// The kind this detector votes for in a primary classification.
    fn kind(&self) -> Kind;

    /// Score the text. `None` means "no vote", never an error.
    fn detect(&self, text: &str) -> Option<ContentType>;
}

/// A language guess from a lexical auto-detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoDetection {
    /// Grammar name of the best-matching registered language.
    pub language: String,
    /// Unnormalized relevance score; higher is a stronger match.
    pub relevance: u32,
}

/// Picks the best-matching language from a restricted registered set.
///
/// Any engine offering this contract can back the code detector.
pub trait LanguageAutoDetector: Send + Sync {
    /// Best match, or `None` when no registered language scores at all.
    fn detect(&self, text: &str) -> Option<AutoDetection>;

    /// Names of the registered languages, in registration order.
    fn languages(&self) -> Vec<&str>;
}

/// Adapts a plain function into a [`ContentDetector`].
pub struct FnDetector {
    format_id: &'static str,
    display_name: &'static str,
    kind: Kind,
    detect_fn: fn(&str) -> Option<ContentType>,
}

impl FnDetector {
    pub fn new(
        format_id: &'static str,
        display_name: &'static str,
        kind: Kind,
        detect_fn: fn(&str) -> Option<ContentType>,
    ) -> Self {
        Self {
            format_id,
            display_name,
            kind,
            detect_fn,
        }
    }
}

impl ContentDetector for FnDetector {
    fn format_id(&self) -> &str {
        self.format_id
    }

    fn display_name(&self) -> &str {
        self.display_name
    }

    fn kind(&self) -> Kind {
        self.kind
    }

    fn detect(&self, text: &str) -> Option<ContentType> {
        (self.detect_fn)(text)
    }
}
