//! Markdown detection.
//!
//! Twelve independent block and inline features. Headers carry extra weight
//! because they are the most reliable single signal.

use std::sync::OnceLock;

use clipsense_config::DetectorsConfig;
use regex::Regex;

use crate::classifier::registry::DetectorRegistry;
use crate::classifier::traits::ContentDetector;
use crate::classifier::types::{ContentType, Kind};

use super::MARKDOWN_PRIORITY;

const MAX_CONFIDENCE: f64 = 0.85;
const FEATURE_WEIGHT: f64 = 0.15;
const HEADER_BONUS: f64 = 0.2;
const MIN_FEATURES: usize = 3;

/// Markdown features, in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Header,
    Bold,
    Italic,
    InlineCode,
    CodeFence,
    UnorderedList,
    OrderedList,
    Blockquote,
    Link,
    Image,
    Table,
    HorizontalRule,
}

fn feature_patterns() -> &'static [(Feature, Regex)] {
    static RE: OnceLock<Vec<(Feature, Regex)>> = OnceLock::new();
    RE.get_or_init(|| {
        [
            (Feature::Header, r"(?m)^#{1,6}\s+\S"),
            (Feature::Bold, r"\*\*[^*\n]+\*\*|__[^_\n]+__"),
            (
                Feature::Italic,
                r"(?m)(?:^|[\s(])(?:\*[^*\s][^*\n]*\*|_[^_\s][^_\n]*_)(?:[\s).,;:!?]|$)",
            ),
            (Feature::InlineCode, r"`[^`\n]+`"),
            (Feature::CodeFence, r"(?m)^\s*(?:```|~~~)"),
            (Feature::UnorderedList, r"(?m)^\s*[-*+]\s+\S"),
            (Feature::OrderedList, r"(?m)^\s*\d+[.)]\s+\S"),
            (Feature::Blockquote, r"(?m)^\s*>\s?\S"),
            (Feature::Link, r"(?:^|[^!])\[[^\]\n]+\]\([^)\s]+\)"),
            (Feature::Image, r"!\[[^\]\n]*\]\([^)\s]+\)"),
            (
                Feature::Table,
                r"(?m)^\s*\|?\s*:?-{3,}:?\s*(?:\|\s*:?-{3,}:?\s*)+\|?\s*$",
            ),
            (Feature::HorizontalRule, r"(?m)^\s*(?:-{3,}|\*{3,}|_{3,})\s*$"),
        ]
        .into_iter()
        .map(|(feature, p)| {
            (
                feature,
                Regex::new(p).expect("markdown feature pattern is valid and should always compile"),
            )
        })
        .collect()
    })
}

/// The Markdown features present in `text`.
pub fn features(text: &str) -> Vec<Feature> {
    feature_patterns()
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(feature, _)| *feature)
        .collect()
}

/// Score `text` as Markdown.
pub fn detect_markdown(text: &str) -> Option<ContentType> {
    let found = features(text);
    let has = |f: Feature| found.contains(&f);
    let headers = has(Feature::Header);
    let structured = has(Feature::CodeFence)
        || has(Feature::Link)
        || has(Feature::UnorderedList)
        || has(Feature::OrderedList);

    if found.len() < MIN_FEATURES && !(headers && structured) {
        return None;
    }

    let mut confidence = found.len() as f64 * FEATURE_WEIGHT;
    if headers {
        confidence += HEADER_BONUS;
    }
    Some(ContentType::new(
        Kind::Markdown,
        confidence.min(MAX_CONFIDENCE),
    ))
}

/// Detects Markdown documents.
pub struct MarkdownDetector;

impl ContentDetector for MarkdownDetector {
    fn format_id(&self) -> &str {
        "markdown"
    }

    fn display_name(&self) -> &str {
        "Markdown"
    }

    fn kind(&self) -> Kind {
        Kind::Markdown
    }

    fn detect(&self, text: &str) -> Option<ContentType> {
        detect_markdown(text)
    }
}

/// Register the Markdown detector with the registry.
pub fn register_markdown(registry: &mut DetectorRegistry, config: &DetectorsConfig) {
    if config.markdown.enabled {
        registry.register_detector(MARKDOWN_PRIORITY, Box::new(MarkdownDetector));
    }
}
