//! JSON detection.
//!
//! Hard gate: the trimmed text must open with `{`/`[` and close with the
//! matching bracket. Six structural feature patterns then decide whether a
//! parse is worth attempting; at least two must match.

use std::sync::OnceLock;

use clipsense_config::DetectorsConfig;
use regex::Regex;

use crate::classifier::json_repair;
use crate::classifier::registry::DetectorRegistry;
use crate::classifier::traits::ContentDetector;
use crate::classifier::types::{ContentType, Kind};

use super::JSON_PRIORITY;

/// Confidence for text that parses as-is.
const STRICT_CONFIDENCE: f64 = 0.95;
/// Confidence for text that parses only after repair.
const REPAIRED_CONFIDENCE: f64 = 0.8;
const MIN_FEATURES: usize = 2;

fn feature_patterns() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        [
            // "key":
            r#""[^"\n]*"\s*:"#,
            // : "string"
            r#":\s*""#,
            // : 42
            r":\s*-?\d",
            // : true / false / null
            r":\s*(?:true|false|null)\b",
            // [ {
            r"\[\s*\{",
            // }, {
            r"\}\s*,\s*\{",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("json feature pattern is valid and should always compile"))
        .collect()
    })
}

/// Whether the trimmed text is wrapped in a matching bracket pair.
pub(crate) fn has_json_shape(trimmed: &str) -> bool {
    (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'))
}

/// Number of structural JSON features present.
pub(crate) fn feature_count(text: &str) -> usize {
    feature_patterns()
        .iter()
        .filter(|re| re.is_match(text))
        .count()
}

/// Score `text` as JSON.
pub fn detect_json(text: &str) -> Option<ContentType> {
    let trimmed = text.trim();
    if !has_json_shape(trimmed) || feature_count(trimmed) < MIN_FEATURES {
        return None;
    }
    if json_repair::parse_strict(trimmed).is_some() {
        return Some(ContentType::new(Kind::Json, STRICT_CONFIDENCE));
    }
    if json_repair::parse_repaired(trimmed).is_some() {
        return Some(ContentType::new(Kind::Json, REPAIRED_CONFIDENCE));
    }
    None
}

/// Detects JSON objects and arrays, including repairable near-JSON.
pub struct JsonDetector;

impl ContentDetector for JsonDetector {
    fn format_id(&self) -> &str {
        "json"
    }

    fn display_name(&self) -> &str {
        "JSON"
    }

    fn kind(&self) -> Kind {
        Kind::Json
    }

    fn detect(&self, text: &str) -> Option<ContentType> {
        detect_json(text)
    }
}

/// Register the JSON detector with the registry.
pub fn register_json(registry: &mut DetectorRegistry, config: &DetectorsConfig) {
    if config.json.enabled {
        registry.register_detector(JSON_PRIORITY, Box::new(JsonDetector));
    }
}
