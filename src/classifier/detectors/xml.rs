//! XML detection.
//!
//! Signals: an `<?xml version=...?>` declaration, balanced open/close tag
//! counts, tag density and auxiliary features (namespaces, CDATA,
//! self-closing tags, comments).

use std::sync::OnceLock;

use clipsense_config::DetectorsConfig;
use regex::Regex;

use crate::classifier::registry::DetectorRegistry;
use crate::classifier::text_stats::ratio;
use crate::classifier::traits::ContentDetector;
use crate::classifier::types::{ContentType, Kind};

use super::XML_PRIORITY;

const BASE_CONFIDENCE: f64 = 0.6;
const DECLARATION_BONUS: f64 = 0.3;
const FEATURES_BONUS: f64 = 0.2;
const BALANCED_BONUS: f64 = 0.1;
const MAX_CONFIDENCE: f64 = 0.9;
const MIN_TAGS: usize = 2;
/// Without a declaration, tags must make up this share of the text.
const MIN_DENSITY: f64 = 0.3;

fn re_declaration() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<\?xml\s+version\s*=\s*["'][^"']*["'][^>]*\?>"#)
            .expect("re_declaration: pattern is valid and should always compile")
    })
}

/// Any markup tag: element, closing tag, declaration, comment or doctype.
pub(crate) fn re_any_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"<[A-Za-z_!?/][^<>]*>")
            .expect("re_any_tag: pattern is valid and should always compile")
    })
}

fn re_open_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"<[A-Za-z_][\w:.-]*(?:\s[^<>]*)?>")
            .expect("re_open_tag: pattern is valid and should always compile")
    })
}

fn re_close_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"</[A-Za-z_][\w:.-]*\s*>")
            .expect("re_close_tag: pattern is valid and should always compile")
    })
}

fn auxiliary_patterns() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        [
            // namespace declaration
            r"\bxmlns(?::[\w.-]+)?\s*=",
            // CDATA section
            r"<!\[CDATA\[",
            // self-closing element
            r"<[A-Za-z_][\w:.-]*(?:\s[^<>]*)?/>",
            // comment
            r"<!--[\s\S]*?-->",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("xml feature pattern is valid and should always compile"))
        .collect()
    })
}

/// Measurements the XML vote is computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct XmlSignals {
    pub declaration: bool,
    pub tags: usize,
    pub balanced: bool,
    pub density: f64,
    pub features: usize,
}

impl XmlSignals {
    pub(crate) fn measure(text: &str) -> Self {
        let mut tags = 0usize;
        let mut tag_bytes = 0usize;
        for m in re_any_tag().find_iter(text) {
            tags += 1;
            tag_bytes += m.len();
        }
        let open = re_open_tag()
            .find_iter(text)
            .filter(|m| !m.as_str().ends_with("/>"))
            .count();
        let close = re_close_tag().find_iter(text).count();
        Self {
            declaration: re_declaration().is_match(text),
            tags,
            balanced: open.abs_diff(close) <= 1,
            density: ratio(tag_bytes, text.len()),
            features: auxiliary_patterns()
                .iter()
                .filter(|re| re.is_match(text))
                .count(),
        }
    }

    /// Whether these signals are strong enough to call the text XML.
    pub(crate) fn votes(&self) -> bool {
        self.tags >= MIN_TAGS && (self.declaration || (self.balanced && self.density > MIN_DENSITY))
    }

    pub(crate) fn confidence(&self) -> f64 {
        let mut confidence = BASE_CONFIDENCE;
        if self.declaration {
            confidence += DECLARATION_BONUS;
        }
        if self.features >= 2 {
            confidence += FEATURES_BONUS;
        }
        if self.balanced {
            confidence += BALANCED_BONUS;
        }
        confidence.min(MAX_CONFIDENCE)
    }
}

/// Score `text` as XML.
pub fn detect_xml(text: &str) -> Option<ContentType> {
    let signals = XmlSignals::measure(text);
    if !signals.votes() {
        return None;
    }
    Some(ContentType::new(Kind::Xml, signals.confidence()))
}

/// Detects XML documents and fragments.
pub struct XmlDetector;

impl ContentDetector for XmlDetector {
    fn format_id(&self) -> &str {
        "xml"
    }

    fn display_name(&self) -> &str {
        "XML"
    }

    fn kind(&self) -> Kind {
        Kind::Xml
    }

    fn detect(&self, text: &str) -> Option<ContentType> {
        detect_xml(text)
    }
}

/// Register the XML detector with the registry.
pub fn register_xml(registry: &mut DetectorRegistry, config: &DetectorsConfig) {
    if config.xml.enabled {
        registry.register_detector(XML_PRIORITY, Box::new(XmlDetector));
    }
}
