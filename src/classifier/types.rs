//! Core data types for the classification engine.
//!
//! `Kind` is the closed set of content categories, `ContentType` pairs a kind
//! with a heuristic confidence score, and `DetectedContent` is the immutable
//! record handed to rendering collaborators.

use std::fmt;

use serde::Serialize;

/// Minimum confidence (exclusive) a detector vote needs to be accepted.
pub const ACCEPTANCE_THRESHOLD: f64 = 0.5;

/// Number of characters kept in `DetectedContent::preview`.
pub const PREVIEW_CHARS: usize = 200;

/// Appended to a truncated preview.
pub const PREVIEW_ELLIPSIS: &str = "...";

/// Content categories the classifier can emit.
///
/// `Sql` and `Html` are fine-grained sub-types. Their detectors vote for the
/// externally visible `Code` bucket; the sub-type is recovered only by
/// [`probe::original_kind`](super::probe::original_kind) for formatting and
/// highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Json,
    Xml,
    Sql,
    Html,
    Markdown,
    Url,
    Email,
    Code,
    Text,
}

impl Kind {
    /// Every kind, in detector priority order with `Text` last.
    pub fn all() -> &'static [Kind] {
        &[
            Kind::Json,
            Kind::Xml,
            Kind::Sql,
            Kind::Html,
            Kind::Markdown,
            Kind::Url,
            Kind::Email,
            Kind::Code,
            Kind::Text,
        ]
    }

    /// Lowercase identifier used in logs, JSON output and the CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Json => "json",
            Kind::Xml => "xml",
            Kind::Sql => "sql",
            Kind::Html => "html",
            Kind::Markdown => "markdown",
            Kind::Url => "url",
            Kind::Email => "email",
            Kind::Code => "code",
            Kind::Text => "text",
        }
    }

    /// The bucket this kind is reported under in a primary classification.
    pub fn visible(self) -> Kind {
        match self {
            Kind::Sql | Kind::Html => Kind::Code,
            other => other,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A kind paired with a detector-local confidence score in `[0, 1]`.
///
/// The score is only meaningful relative to other detectors' scores and the
/// fixed acceptance threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContentType {
    pub kind: Kind,
    pub confidence: f64,
}

impl ContentType {
    /// Create a content type, clamping the confidence into `[0, 1]`.
    ///
    /// NaN collapses to 0.0 so a broken score can never win.
    pub fn new(kind: Kind, confidence: f64) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self { kind, confidence }
    }

    /// The plain-text fallback (`Text`, confidence 1.0).
    pub fn text() -> Self {
        Self::new(Kind::Text, 1.0)
    }

    /// Whether this score clears the acceptance threshold.
    pub fn is_accepted(&self) -> bool {
        self.confidence > ACCEPTANCE_THRESHOLD
    }

    /// Whether a renderer should flag this classification as uncertain,
    /// given the configured `rendering.low_confidence_threshold`.
    pub fn is_low_confidence(&self, threshold: f64) -> bool {
        self.confidence < threshold
    }
}

/// The result of classifying one text snapshot.
///
/// Cheap to discard and recompute; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedContent {
    pub original: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub preview: String,
}

impl DetectedContent {
    pub fn new(original: impl Into<String>, content_type: ContentType) -> Self {
        let original = original.into();
        let preview = make_preview(&original);
        Self {
            original,
            content_type,
            preview,
        }
    }

    pub fn kind(&self) -> Kind {
        self.content_type.kind
    }

    pub fn confidence(&self) -> f64 {
        self.content_type.confidence
    }
}

/// First [`PREVIEW_CHARS`] characters of `text`, with an ellipsis when cut.
pub fn make_preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => {
            let mut preview = String::with_capacity(cut + PREVIEW_ELLIPSIS.len());
            preview.push_str(&text[..cut]);
            preview.push_str(PREVIEW_ELLIPSIS);
            preview
        }
        None => text.to_string(),
    }
}
