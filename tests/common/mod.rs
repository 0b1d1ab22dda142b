//! Shared integration test helpers for clipsense.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{prose_paragraph, TestContext};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a subset
//! of helpers are used per file.

#![allow(dead_code)]

use clipsense::ClassifierConfig;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A plain English paragraph of roughly fifty words with no code punctuation.
pub fn prose_paragraph() -> &'static str {
    "We walked along the river after lunch and talked about the garden, the \
     new neighbors and the long summer ahead of us. My sister wanted to plant \
     tomatoes again, although last year most of them were eaten by birds \
     before anyone could pick them, which made everybody laugh about it"
}

/// Three bare URLs, one per line.
pub fn url_lines() -> &'static str {
    "https://a.com\nhttps://b.com\nhttps://c.com"
}

/// Builds a text of `n` ASCII characters.
pub fn text_of_len(n: usize) -> String {
    "abcdefghij".chars().cycle().take(n).collect()
}

/// Provides test isolation with automatic resource cleanup.
///
/// Wraps a `TempDir` and a `ClassifierConfig`; the directory is removed when
/// the context is dropped.
pub struct TestContext {
    /// Temporary directory, kept alive for the lifetime of the context.
    pub dir: TempDir,
    /// Config instance for the test.
    pub config: ClassifierConfig,
}

impl TestContext {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            dir,
            config: ClassifierConfig::default(),
        }
    }

    /// Path of `config.yaml` inside the temp dir.
    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.yaml")
    }

    /// Write raw YAML to `config.yaml` and return its path.
    pub fn write_config(&self, yaml: &str) -> PathBuf {
        let path = self.config_path();
        fs::write(&path, yaml).expect("Failed to write config");
        path
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
