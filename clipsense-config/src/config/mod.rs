//! Configuration structures for the clipsense classifier.
//!
//! Maps to `config.yaml` in the clipsense config directory. Every field has a
//! serde default, so partial files are valid.

mod persistence;

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::types::{AutoDetectLanguage, LogLevel};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level classifier configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Per-detector enable/disable.
    #[serde(default)]
    pub detectors: DetectorsConfig,

    /// Lexical auto-detector language registration.
    #[serde(default)]
    pub auto_detect: AutoDetectConfig,

    /// Rendering-boundary policy.
    #[serde(default)]
    pub rendering: RenderingConfig,

    /// Log level used when no `--log-level` flag or `RUST_LOG` is given.
    #[serde(default)]
    pub log_level: LogLevel,
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Enable/disable for a detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectorToggle {
    /// Whether this detector is registered.
    #[serde(default = "defaults::bool_true")]
    pub enabled: bool,
}

impl Default for DetectorToggle {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Toggles for every built-in detector.
///
/// Detection order is fixed (json, xml, sql, html, markdown, url, email, code)
/// and deliberately not part of the configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectorsConfig {
    #[serde(default)]
    pub json: DetectorToggle,
    #[serde(default)]
    pub xml: DetectorToggle,
    #[serde(default)]
    pub sql: DetectorToggle,
    #[serde(default)]
    pub html: DetectorToggle,
    #[serde(default)]
    pub markdown: DetectorToggle,
    #[serde(default)]
    pub url: DetectorToggle,
    #[serde(default)]
    pub email: DetectorToggle,
    #[serde(default)]
    pub code: DetectorToggle,
}

/// The grammar set registered with the lexical auto-detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AutoDetectConfig {
    #[serde(default = "defaults::auto_detect_languages")]
    pub languages: Vec<AutoDetectLanguage>,
}

impl Default for AutoDetectConfig {
    fn default() -> Self {
        Self {
            languages: defaults::auto_detect_languages(),
        }
    }
}

/// Policy applied where classified content is handed to renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderingConfig {
    /// Content larger than this (bytes) is shown as plain preformatted text.
    #[serde(default = "defaults::highlight_max_bytes")]
    pub highlight_max_bytes: usize,

    /// Confidence below this shows a low-confidence indicator.
    #[serde(default = "defaults::low_confidence_threshold")]
    pub low_confidence_threshold: f64,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            highlight_max_bytes: defaults::highlight_max_bytes(),
            low_confidence_threshold: defaults::low_confidence_threshold(),
        }
    }
}
