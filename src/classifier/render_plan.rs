//! What the rendering layer needs to display one record.
//!
//! Combines the formatter, the highlight mapper and the rendering-boundary
//! policy from [`RenderingConfig`]: content above the highlight size limit is
//! shown as plain preformatted text, and scores under the low-confidence
//! threshold are flagged.

use clipsense_config::RenderingConfig;
use serde::Serialize;

use super::formatter;
use super::highlight;
use super::types::{DetectedContent, Kind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan {
    pub kind: Kind,
    pub confidence: f64,
    /// Show an uncertainty indicator.
    pub low_confidence: bool,
    /// Grammar for the highlighter; `None` means render as plain text.
    pub grammar: Option<&'static str>,
    pub formatted: String,
    pub preview: String,
}

impl RenderPlan {
    pub fn build(detected: &DetectedContent, config: &RenderingConfig) -> Self {
        let too_large = detected.original.len() > config.highlight_max_bytes;
        if too_large {
            log::debug!(
                "Skipping highlighting: {} bytes exceeds limit of {}",
                detected.original.len(),
                config.highlight_max_bytes
            );
        }
        Self {
            kind: detected.kind(),
            confidence: detected.confidence(),
            low_confidence: detected
                .content_type
                .is_low_confidence(config.low_confidence_threshold),
            grammar: (!too_large).then(|| highlight::highlight_language(detected)),
            formatted: formatter::format_content(detected),
            preview: detected.preview.clone(),
        }
    }
}
