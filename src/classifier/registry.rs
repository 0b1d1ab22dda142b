//! Detector registry and classification orchestrator.
//!
//! `DetectorRegistry` holds all registered `ContentDetector`s in priority
//! order, runs every detector against a text, and resolves the winner.

use serde::Serialize;

use super::traits::ContentDetector;
use super::types::{ACCEPTANCE_THRESHOLD, ContentType};

/// A single detector's vote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    /// `format_id` of the detector that produced the vote.
    pub format_id: String,
    #[serde(flatten)]
    pub content_type: ContentType,
}

/// Central registry for content detectors.
///
/// Detectors are stored in priority-descending order. Detection runs each
/// detector in order, keeping the result with the highest confidence.
pub struct DetectorRegistry {
    /// Detectors sorted by priority (highest first). Each entry is (priority, detector).
    detectors: Vec<(i32, Box<dyn ContentDetector>)>,
    /// A winning vote must score strictly above this.
    acceptance_threshold: f64,
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        Self::new(ACCEPTANCE_THRESHOLD)
    }
}

impl DetectorRegistry {
    /// Create an empty registry with the given acceptance threshold.
    pub fn new(acceptance_threshold: f64) -> Self {
        Self {
            detectors: Vec::new(),
            acceptance_threshold,
        }
    }

    /// Register a detector at the given priority (higher = checked first).
    ///
    /// Within the same priority, detectors are checked in registration order
    /// and the earlier one wins on equal confidence.
    pub fn register_detector(&mut self, priority: i32, detector: Box<dyn ContentDetector>) {
        let idx = self.detectors.partition_point(|(p, _)| *p >= priority);
        self.detectors.insert(idx, (priority, detector));
    }

    /// Every vote for `text`, highest confidence first.
    ///
    /// The sort is stable, so equal confidences keep detector order.
    pub fn candidates(&self, text: &str) -> Vec<Detection> {
        let mut votes: Vec<Detection> = self
            .detectors
            .iter()
            .filter_map(|(_, detector)| {
                detector.detect(text).map(|content_type| Detection {
                    format_id: detector.format_id().to_string(),
                    content_type,
                })
            })
            .collect();
        votes.sort_by(|a, b| {
            b.content_type
                .confidence
                .total_cmp(&a.content_type.confidence)
        });
        votes
    }

    /// Run all detectors and return the accepted winner, if any.
    ///
    /// The best vote replaces the current one only on strictly greater
    /// confidence, so ties go to the detector checked first. The winner is
    /// returned only when its confidence exceeds the acceptance threshold.
    pub fn detect(&self, text: &str) -> Option<Detection> {
        let mut best: Option<Detection> = None;

        crate::debug_log!(
            "CLASSIFY",
            "registry::detect: running {} detectors against {} bytes",
            self.detectors.len(),
            text.len()
        );

        for (priority, detector) in &self.detectors {
            match detector.detect(text) {
                Some(content_type) => {
                    crate::debug_log!(
                        "CLASSIFY",
                        "registry::detect: {} (priority={}) voted {} confidence={:.3}",
                        detector.format_id(),
                        priority,
                        content_type.kind,
                        content_type.confidence
                    );
                    let dominated = match &best {
                        Some(current) => {
                            content_type.confidence > current.content_type.confidence
                        }
                        None => true,
                    };
                    if dominated {
                        best = Some(Detection {
                            format_id: detector.format_id().to_string(),
                            content_type,
                        });
                    }
                }
                None => {
                    crate::debug_trace!(
                        "CLASSIFY",
                        "registry::detect: {} (priority={}) abstained",
                        detector.format_id(),
                        priority
                    );
                }
            }
        }

        let result = best.filter(|d| d.content_type.confidence > self.acceptance_threshold);
        match &result {
            Some(d) => {
                crate::debug_info!(
                    "CLASSIFY",
                    "registry::detect: WINNER format={}, kind={}, confidence={:.3}",
                    d.format_id,
                    d.content_type.kind,
                    d.content_type.confidence
                );
            }
            None => {
                crate::debug_log!(
                    "CLASSIFY",
                    "registry::detect: no vote above threshold {:.3}",
                    self.acceptance_threshold
                );
            }
        }
        result
    }

    /// Get the acceptance threshold.
    pub fn acceptance_threshold(&self) -> f64 {
        self.acceptance_threshold
    }

    /// Number of registered detectors.
    pub fn detector_count(&self) -> usize {
        self.detectors.len()
    }

    /// `(format_id, display_name)` pairs in check order.
    pub fn registered_formats(&self) -> Vec<(&str, &str)> {
        self.detectors
            .iter()
            .map(|(_, d)| (d.format_id(), d.display_name()))
            .collect()
    }
}
