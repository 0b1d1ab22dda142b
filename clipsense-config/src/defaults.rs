//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes so a config
//! file that omits a field picks up the same value as `Default::default()`.

use crate::types::AutoDetectLanguage;

pub fn bool_true() -> bool {
    true
}

/// Content above this size skips syntax highlighting at the rendering boundary.
pub fn highlight_max_bytes() -> usize {
    50 * 1024
}

/// Confidence below which the rendering layer shows a low-confidence badge.
pub fn low_confidence_threshold() -> f64 {
    0.8
}

/// Languages registered with the lexical auto-detector.
pub fn auto_detect_languages() -> Vec<AutoDetectLanguage> {
    vec![
        AutoDetectLanguage::JavaScript,
        AutoDetectLanguage::TypeScript,
        AutoDetectLanguage::Python,
        AutoDetectLanguage::Json,
        AutoDetectLanguage::Sql,
        AutoDetectLanguage::Xml,
    ]
}
