//! Configuration system for the clipsense content classifier.
//!
//! This crate provides configuration loading, saving, and default values
//! for the classifier. It includes:
//!
//! - Per-detector enable/disable toggles
//! - The language set registered with the lexical auto-detector
//! - Rendering-boundary policy (highlight size cutoff, low-confidence badge)
//! - Log level selection

pub mod config;
pub mod defaults;
pub mod error;
mod types;

// Re-export main types for convenience
pub use config::{
    AutoDetectConfig, ClassifierConfig, DetectorToggle, DetectorsConfig, RenderingConfig,
};
pub use error::ConfigError;
pub use types::{AutoDetectLanguage, LogLevel};
