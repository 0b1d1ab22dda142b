//! Shared test helpers for classifier tests.
//!
//! This module is gated with `#[cfg(test)]` and provides canonical fixtures
//! used across detector and registry test files. Import with:
//!
//! ```ignore
//! use crate::classifier::testing::{FixedDetector, prose_paragraph};
//! ```

use super::traits::ContentDetector;
use super::types::{ContentType, Kind};

/// A detector that always returns the same vote, for registry tests.
#[cfg(test)]
#[allow(dead_code)]
pub struct FixedDetector {
    id: String,
    vote: Option<ContentType>,
}

#[cfg(test)]
#[allow(dead_code)]
impl FixedDetector {
    pub fn new(id: &str, kind: Kind, confidence: f64) -> Self {
        Self {
            id: id.to_string(),
            vote: Some(ContentType::new(kind, confidence)),
        }
    }

    /// A detector that never votes.
    pub fn abstaining(id: &str) -> Self {
        Self {
            id: id.to_string(),
            vote: None,
        }
    }
}

#[cfg(test)]
impl ContentDetector for FixedDetector {
    fn format_id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> Kind {
        self.vote.map(|v| v.kind).unwrap_or(Kind::Text)
    }

    fn detect(&self, _text: &str) -> Option<ContentType> {
        self.vote
    }
}

/// A 50-word English paragraph with no code punctuation.
#[cfg(test)]
#[allow(dead_code)]
pub fn prose_paragraph() -> &'static str {
    "The morning train was late again, so most of the people on the platform \
     stood quietly with their coffee and watched the rain move across the hills. \
     Nobody seemed to mind very much, because the station cafe was warm and the \
     conductor kept everyone informed about the delay with a calm and friendly voice"
}

/// Small JavaScript function used by code detector tests.
#[cfg(test)]
#[allow(dead_code)]
pub fn js_snippet() -> &'static str {
    "function greet(name) {\n  const message = `Hello ${name}`;\n  console.log(message);\n  return message;\n}\n"
}

/// Small Python function used by code detector tests.
#[cfg(test)]
#[allow(dead_code)]
pub fn python_snippet() -> &'static str {
    "import os\n\ndef list_files(path):\n    if not os.path.isdir(path):\n        return None\n    return sorted(os.listdir(path))\n"
}
