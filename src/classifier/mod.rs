//! Content classification engine.
//!
//! Inspects arbitrary text and decides how it should be displayed (JSON,
//! XML, SQL, HTML, Markdown, URL list, email list, source code or plain
//! text), with a confidence score and a type-specific formatting and
//! highlighting strategy.
//!
//! # Module Structure
//!
//! ## Detection Layer
//! - [`detectors`]: one [`traits::ContentDetector`] per format.
//! - [`autodetect`]: keyword-table language guesser backing the code detector.
//! - [`json_repair`]: best-effort fixes for near-valid JSON.
//! - [`text_stats`]: shared measurements (symbol density, sampling).
//!
//! ## Orchestration
//! - [`registry`]: `DetectorRegistry`, priority-ordered detectors and winner
//!   resolution.
//! - [`config_bridge`]: builds a registry from `clipsense-config` settings.
//!
//! ## Output
//! - [`formatter`]: pretty-printing per kind.
//! - [`probe`]: recovers SQL/HTML/XML inside the `Code` bucket.
//! - [`highlight`]: grammar names for external highlighters.
//! - [`render_plan`]: everything a renderer needs, bundled.
//!
//! Classification is pure and synchronous; a [`ContentClassifier`] can be
//! shared across threads freely.

use std::sync::OnceLock;

use clipsense_config::ClassifierConfig;

pub mod autodetect;
pub mod config_bridge;
pub mod detectors;
pub mod formatter;
pub mod highlight;
pub mod json_repair;
pub mod probe;
pub mod registry;
pub mod render_plan;
pub mod text_stats;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use formatter::{format_as, format_content};
pub use highlight::{GENERAL_GRAMMAR, grammar_for, highlight_language};
pub use registry::{Detection, DetectorRegistry};
pub use render_plan::RenderPlan;
pub use traits::{AutoDetection, ContentDetector, FnDetector, LanguageAutoDetector};
pub use types::{ContentType, DetectedContent, Kind};

/// Classifies text using a registry of detectors.
pub struct ContentClassifier {
    registry: DetectorRegistry,
}

impl ContentClassifier {
    pub fn new(registry: DetectorRegistry) -> Self {
        Self { registry }
    }

    /// Classifier with every detector enabled and the default language set.
    pub fn from_config(config: &ClassifierConfig) -> Self {
        config_bridge::create_classifier_from_config(config)
    }

    /// Classify one text snapshot.
    ///
    /// Total: always returns a result, falling back to `Text` with
    /// confidence 1.0 when no detector clears the acceptance threshold.
    pub fn classify(&self, text: &str) -> DetectedContent {
        if text.is_empty() {
            return DetectedContent::new(text, ContentType::text());
        }
        let content_type = self
            .registry
            .detect(text)
            .map(|d| d.content_type)
            .unwrap_or_else(ContentType::text);
        DetectedContent::new(text, content_type)
    }

    /// Every detector vote for `text`, highest confidence first.
    pub fn candidates(&self, text: &str) -> Vec<Detection> {
        self.registry.candidates(text)
    }

    pub fn registry(&self) -> &DetectorRegistry {
        &self.registry
    }
}

impl Default for ContentClassifier {
    fn default() -> Self {
        Self::from_config(&ClassifierConfig::default())
    }
}

/// Process-wide classifier built from the default configuration.
pub fn default_classifier() -> &'static ContentClassifier {
    static CLASSIFIER: OnceLock<ContentClassifier> = OnceLock::new();
    CLASSIFIER.get_or_init(ContentClassifier::default)
}

/// Classify `text` with the default classifier.
pub fn classify(text: &str) -> DetectedContent {
    default_classifier().classify(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::testing::{FixedDetector, prose_paragraph};

    #[test]
    fn test_empty_string() {
        let detected = classify("");
        assert_eq!(detected.kind(), Kind::Text);
        assert_eq!(detected.confidence(), 1.0);
        assert_eq!(detected.preview, "");
    }

    #[test]
    fn test_json_scenario() {
        let detected = classify(r#"{"a": 1, "b": [2,3]}"#);
        assert_eq!(detected.kind(), Kind::Json);
        assert!(detected.confidence() >= 0.9);
    }

    #[test]
    fn test_prose_is_text() {
        let detected = classify(prose_paragraph());
        assert_eq!(detected.kind(), Kind::Text);
        assert_eq!(detected.confidence(), 1.0);
    }

    #[test]
    fn test_below_threshold_falls_back_to_text() {
        let mut registry = DetectorRegistry::default();
        registry.register_detector(10, Box::new(FixedDetector::new("weak", Kind::Code, 0.5)));
        let detected = ContentClassifier::new(registry).classify("anything");
        assert_eq!(detected.content_type, ContentType::text());
    }

    #[test]
    fn test_empty_registry_gives_text() {
        let classifier = ContentClassifier::new(DetectorRegistry::default());
        assert_eq!(classifier.classify("{\"a\": 1}").kind(), Kind::Text);
    }

    #[test]
    fn test_classifier_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ContentClassifier>();
    }
}
