// Library exports for testing and potential library use
//
// Classification is pure and synchronous. The only shared mutable state is
// the debug log file, guarded by a `parking_lot::Mutex` in `debug`.

/// Crate version, for `--version` output and log headers.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod classifier;
pub mod cli;

pub use classifier::{
    ContentClassifier, ContentType, DetectedContent, Kind, RenderPlan, classify, format_content,
    highlight_language,
};
pub use clipsense_config::ClassifierConfig;
