//! Bridges between YAML configuration types and the runtime classifier.
//!
//! Builds a [`DetectorRegistry`] from a [`ClassifierConfig`]: every enabled
//! detector is registered at its fixed priority, and the code detector gets
//! an auto-detector restricted to the configured language set.

use clipsense_config::ClassifierConfig;

use super::ContentClassifier;
use super::detectors;
use super::registry::DetectorRegistry;
use super::types::ACCEPTANCE_THRESHOLD;

/// Build a [`DetectorRegistry`] populated with all enabled built-in detectors.
pub fn build_default_registry(config: &ClassifierConfig) -> DetectorRegistry {
    let mut registry = DetectorRegistry::new(ACCEPTANCE_THRESHOLD);

    // Each register_* checks its own enabled flag.
    detectors::json::register_json(&mut registry, &config.detectors);
    detectors::xml::register_xml(&mut registry, &config.detectors);
    detectors::sql::register_sql(&mut registry, &config.detectors);
    detectors::html::register_html(&mut registry, &config.detectors);
    detectors::markdown::register_markdown(&mut registry, &config.detectors);
    detectors::links::register_url(&mut registry, &config.detectors);
    detectors::links::register_email(&mut registry, &config.detectors);
    detectors::code::register_code(&mut registry, &config.detectors, &config.auto_detect);

    log::debug!(
        "Built detector registry with {} detectors: {:?}",
        registry.detector_count(),
        registry
            .registered_formats()
            .iter()
            .map(|(id, _)| *id)
            .collect::<Vec<_>>()
    );
    registry
}

/// Create a [`ContentClassifier`] from configuration.
pub fn create_classifier_from_config(config: &ClassifierConfig) -> ContentClassifier {
    ContentClassifier::new(build_default_registry(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registers_all_in_priority_order() {
        let registry = build_default_registry(&ClassifierConfig::default());
        let ids: Vec<&str> = registry
            .registered_formats()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(
            ids,
            vec!["json", "xml", "sql", "html", "markdown", "url", "email", "code"]
        );
        assert_eq!(registry.acceptance_threshold(), ACCEPTANCE_THRESHOLD);
    }

    #[test]
    fn test_disabled_detectors_skipped() {
        let mut config = ClassifierConfig::default();
        config.detectors.markdown.enabled = false;
        config.detectors.code.enabled = false;
        let registry = build_default_registry(&config);
        assert_eq!(registry.detector_count(), 6);
        assert!(
            !registry
                .registered_formats()
                .iter()
                .any(|(id, _)| *id == "markdown" || *id == "code")
        );
    }

    #[test]
    fn test_classifier_from_config() {
        let mut config = ClassifierConfig::default();
        config.detectors.json.enabled = false;
        let classifier = create_classifier_from_config(&config);
        let detected = classifier.classify(r#"{"a": 1, "b": [2,3]}"#);
        assert_ne!(detected.kind(), crate::classifier::types::Kind::Json);
    }
}
