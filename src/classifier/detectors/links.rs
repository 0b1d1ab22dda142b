//! URL and email list detection.
//!
//! Both detectors share one shape: a text that is exactly one address scores
//! 0.95, and a text that is mostly a list of addresses (at least two matches
//! covering 70% of its non-blank lines) scores 0.85.

use std::sync::OnceLock;

use clipsense_config::DetectorsConfig;
use regex::Regex;

use crate::classifier::registry::DetectorRegistry;
use crate::classifier::text_stats::{non_blank_lines, ratio};
use crate::classifier::traits::ContentDetector;
use crate::classifier::types::{ContentType, Kind};

use super::{EMAIL_PRIORITY, URL_PRIORITY};

const SINGLE_CONFIDENCE: f64 = 0.95;
const LIST_CONFIDENCE: f64 = 0.85;
const MIN_LIST_MATCHES: usize = 2;
const MIN_LINE_COVERAGE: f64 = 0.7;

fn re_url_exact() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:https?|ftp)://[^\s/$.?#][^\s]*$|^www\.[^\s.]+\.[^\s]+$")
            .expect("re_url_exact: pattern is valid and should always compile")
    })
}

fn re_url() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?:https?|ftp)://[^\s/$.?#][^\s<>"']*|\bwww\.[^\s.<>"']+\.[^\s<>"']+"#)
            .expect("re_url: pattern is valid and should always compile")
    })
}

fn re_email_exact() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
            .expect("re_email_exact: pattern is valid and should always compile")
    })
}

fn re_email() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
            .expect("re_email: pattern is valid and should always compile")
    })
}

/// Shared scoring for single-address and address-list text.
fn score_links(text: &str, exact: &Regex, any: &Regex, kind: Kind) -> Option<ContentType> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if exact.is_match(trimmed) {
        return Some(ContentType::new(kind, SINGLE_CONFIDENCE));
    }

    let matches = any.find_iter(trimmed).count();
    let lines = non_blank_lines(trimmed).count();
    if matches >= MIN_LIST_MATCHES && ratio(matches, lines) >= MIN_LINE_COVERAGE {
        return Some(ContentType::new(kind, LIST_CONFIDENCE));
    }
    None
}

/// Score `text` as a URL or URL list.
pub fn detect_url(text: &str) -> Option<ContentType> {
    score_links(text, re_url_exact(), re_url(), Kind::Url)
}

/// Score `text` as an email address or address list.
pub fn detect_email(text: &str) -> Option<ContentType> {
    score_links(text, re_email_exact(), re_email(), Kind::Email)
}

/// Detects a URL or a list of URLs.
pub struct UrlDetector;

impl ContentDetector for UrlDetector {
    fn format_id(&self) -> &str {
        "url"
    }

    fn display_name(&self) -> &str {
        "URL"
    }

    fn kind(&self) -> Kind {
        Kind::Url
    }

    fn detect(&self, text: &str) -> Option<ContentType> {
        detect_url(text)
    }
}

/// Detects an email address or a list of addresses.
pub struct EmailDetector;

impl ContentDetector for EmailDetector {
    fn format_id(&self) -> &str {
        "email"
    }

    fn display_name(&self) -> &str {
        "Email"
    }

    fn kind(&self) -> Kind {
        Kind::Email
    }

    fn detect(&self, text: &str) -> Option<ContentType> {
        detect_email(text)
    }
}

/// Register the URL detector with the registry.
pub fn register_url(registry: &mut DetectorRegistry, config: &DetectorsConfig) {
    if config.url.enabled {
        registry.register_detector(URL_PRIORITY, Box::new(UrlDetector));
    }
}

/// Register the email detector with the registry.
pub fn register_email(registry: &mut DetectorRegistry, config: &DetectorsConfig) {
    if config.email.enabled {
        registry.register_detector(EMAIL_PRIORITY, Box::new(EmailDetector));
    }
}
