//! HTML detection.
//!
//! Scores document-level markers (`<!DOCTYPE html>`, `<html>`, `<head>`,
//! `<body>`, `<title>`), overall tag density, and how many of a small set of
//! common tags appear. Votes for the `Code` bucket; the HTML sub-type is
//! recovered later by the original-type probe.

use std::collections::HashSet;
use std::sync::OnceLock;

use clipsense_config::DetectorsConfig;
use regex::Regex;

use crate::classifier::registry::DetectorRegistry;
use crate::classifier::text_stats::ratio;
use crate::classifier::traits::ContentDetector;
use crate::classifier::types::{ContentType, Kind};

use super::HTML_PRIORITY;

const MAX_CONFIDENCE: f64 = 0.9;
const DOC_FEATURE_WEIGHT: f64 = 0.2;
const DENSITY_WEIGHT: f64 = 10.0;
const COMMON_TAG_WEIGHT: f64 = 0.1;
const MIN_DENSITY: f64 = 0.05;

fn document_patterns() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        [
            r"(?i)<!doctype\s+html",
            r"(?i)<html[\s>]",
            r"(?i)<head[\s>]",
            r"(?i)<body[\s>]",
            r"(?i)<title[\s>]",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("html document pattern is valid and should always compile"))
        .collect()
    })
}

fn re_element_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"</?[A-Za-z][A-Za-z0-9-]*(?:\s[^<>]*)?/?>")
            .expect("re_element_tag: pattern is valid and should always compile")
    })
}

fn re_common_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)<(div|span|p|a|img|ul|li|table|tr|td)[\s>/]")
            .expect("re_common_tag: pattern is valid and should always compile")
    })
}

/// Tag names that only make sense in HTML. Only the sub-type probe uses
/// this; the detector vote does not.
fn re_html_vocabulary() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)</?(?:html|head|body|title|meta|link|script|style|div|span|p|a|img|ul|ol|li|table|thead|tbody|tr|th|td|h[1-6]|br|hr|em|strong|b|i|u|form|input|button|label|select|option|textarea|section|article|nav|header|footer|main|pre|code|iframe)[\s>/]",
        )
        .expect("re_html_vocabulary: pattern is valid and should always compile")
    })
}

/// Measurements the HTML vote is computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct HtmlSignals {
    pub doc_features: usize,
    pub tags: usize,
    pub density: f64,
    pub common_tags: usize,
    pub vocabulary: bool,
}

impl HtmlSignals {
    pub(crate) fn measure(text: &str) -> Self {
        let mut tags = 0usize;
        let mut tag_bytes = 0usize;
        for m in re_element_tag().find_iter(text) {
            tags += 1;
            tag_bytes += m.len();
        }
        let common: HashSet<String> = re_common_tag()
            .captures_iter(text)
            .map(|c| c[1].to_ascii_lowercase())
            .collect();
        Self {
            doc_features: document_patterns()
                .iter()
                .filter(|re| re.is_match(text))
                .count(),
            tags,
            density: ratio(tag_bytes, text.len()),
            common_tags: common.len(),
            vocabulary: re_html_vocabulary().is_match(text),
        }
    }

    pub(crate) fn votes(&self) -> bool {
        self.doc_features >= 2
            || self.density > MIN_DENSITY
            || (self.tags >= 3 && self.common_tags >= 2)
    }

    /// Stricter check used when telling HTML apart from XML inside the
    /// `Code` bucket: dense markup counts only with an HTML tag name.
    pub(crate) fn is_html_markup(&self) -> bool {
        self.doc_features >= 1
            || (self.density > MIN_DENSITY && self.vocabulary)
            || (self.tags >= 3 && self.common_tags >= 2)
    }

    pub(crate) fn confidence(&self) -> f64 {
        (self.doc_features as f64 * DOC_FEATURE_WEIGHT
            + self.density * DENSITY_WEIGHT
            + self.common_tags as f64 * COMMON_TAG_WEIGHT)
            .min(MAX_CONFIDENCE)
    }
}

/// Score `text` as HTML (reported as `Code`).
pub fn detect_html(text: &str) -> Option<ContentType> {
    let signals = HtmlSignals::measure(text);
    if !signals.votes() {
        return None;
    }
    Some(ContentType::new(Kind::Html.visible(), signals.confidence()))
}

/// Detects HTML documents and markup fragments.
pub struct HtmlDetector;

impl ContentDetector for HtmlDetector {
    fn format_id(&self) -> &str {
        "html"
    }

    fn display_name(&self) -> &str {
        "HTML"
    }

    fn kind(&self) -> Kind {
        Kind::Html.visible()
    }

    fn detect(&self, text: &str) -> Option<ContentType> {
        detect_html(text)
    }
}

/// Register the HTML detector with the registry.
pub fn register_html(registry: &mut DetectorRegistry, config: &DetectorsConfig) {
    if config.html.enabled {
        registry.register_detector(HTML_PRIORITY, Box::new(HtmlDetector));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document() {
        let text = "<!DOCTYPE html>\n<html>\n<head><title>T</title></head>\n<body><div><p>Hello</p></div></body>\n</html>";
        let result = detect_html(text).unwrap();
        assert_eq!(result.kind, Kind::Code);
        assert_eq!(result.confidence, MAX_CONFIDENCE);
        assert_eq!(HtmlSignals::measure(text).doc_features, 5);
    }

    #[test]
    fn test_fragment_with_common_tags() {
        let text = "Some intro text before the list, written as a normal sentence.\n<ul>\n<li>one</li>\n<li>two</li>\n</ul>\nAnd a closing remark after it.";
        let signals = HtmlSignals::measure(text);
        assert_eq!(signals.common_tags, 2);
        assert!(signals.votes());
    }

    #[test]
    fn test_common_tag_is_not_prefix_match() {
        let signals = HtmlSignals::measure("<pre>x</pre><abbr>y</abbr>");
        assert_eq!(signals.common_tags, 0);
    }

    #[test]
    fn test_dense_markup_votes_on_density_alone() {
        let text = "<note><to>Tove</to><from>Jani</from></note>";
        let signals = HtmlSignals::measure(text);
        assert!(!signals.vocabulary);
        assert!(signals.density > MIN_DENSITY);
        let result = detect_html(text).unwrap();
        assert_eq!(result.kind, Kind::Code);
        assert_eq!(result.confidence, MAX_CONFIDENCE);
        assert!(!signals.is_html_markup());
    }

    #[test]
    fn test_html_markup_check() {
        assert!(HtmlSignals::measure("<!doctype html><p>x</p>").is_html_markup());
        assert!(HtmlSignals::measure("<div><span>x</span></div>").is_html_markup());
        assert!(!HtmlSignals::measure("<config><entry/></config>").is_html_markup());
    }

    #[test]
    fn test_plain_text() {
        assert!(detect_html("no markup here, just x < y and y > z").is_none());
    }
}
