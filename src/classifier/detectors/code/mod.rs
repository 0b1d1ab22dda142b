//! Generic source-code detection.
//!
//! Three stages, combined by taking the strongest:
//! 1. A lexical auto-detector guesses a language; a high enough relevance is
//!    accepted directly.
//! 2. A keyword/indentation/symbol heuristic that works without any grammar.
//! 3. For weak auto-detector hits, a check for common code constructs.
//!
//! Prose is filtered out before any stage runs: text that reads like
//! sentences and has almost no code punctuation never votes.

use std::collections::HashSet;
use std::sync::OnceLock;

use clipsense_config::{AutoDetectConfig, DetectorsConfig};
use regex::Regex;

use crate::classifier::autodetect::KeywordAutoDetector;
use crate::classifier::registry::DetectorRegistry;
use crate::classifier::text_stats::{is_very_long, non_blank_lines, ratio, symbol_density};
use crate::classifier::traits::{ContentDetector, LanguageAutoDetector};
use crate::classifier::types::{ContentType, Kind};

use super::CODE_PRIORITY;

/// Shorter texts never classify as code.
const MIN_CHARS: usize = 10;

// Stage 1
const RELEVANCE_BAR: u32 = 5;
const VERY_LONG_RELEVANCE_BAR: u32 = 8;
const AUTO_MAX_CONFIDENCE: f64 = 0.9;

// Stage 2
const MAX_KEYWORD_SCORE: usize = 5;
const MIN_HEURISTIC_SCORE: usize = 4;
const INDENT_RATIO: f64 = 0.3;
const HIGH_DENSITY: f64 = 0.05;
const LOW_DENSITY: f64 = 0.02;
const HEURISTIC_CONFIDENCE: f64 = 0.75;
const VERY_LONG_HEURISTIC_CONFIDENCE: f64 = 0.6;
const AGREEMENT_RELEVANCE: u32 = 3;
const AGREEMENT_BONUS: f64 = 0.15;
const HEURISTIC_MAX_CONFIDENCE: f64 = 0.85;

// Stage 3
const MIN_PATTERN_RELEVANCE: u32 = 2;
const MIN_PATTERNS: usize = 2;
const PATTERN_MAX_CONFIDENCE: f64 = 0.8;

// Prose filter
const PROSE_MAX_DENSITY: f64 = 0.005;
const MIN_STOPWORDS: usize = 3;

fn re_keyword() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\b(?:function|const|let|var|return|if|else|for|while|class|import|export|async|await|def|elif|lambda|public|private|static|void|struct|fn|impl|try|catch|throw|switch|case|interface|package|new)\b",
        )
        .expect("re_keyword: pattern is valid and should always compile")
    })
}

fn re_function_call() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b[A-Za-z_]\w*\(")
            .expect("re_function_call: pattern is valid and should always compile")
    })
}

fn re_comment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)(?:^|\s)//|/\*|\*/|^\s*#\s|^\s*--\s")
            .expect("re_comment: pattern is valid and should always compile")
    })
}

fn re_sentence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[.!?]\s+[A-Z]")
            .expect("re_sentence: pattern is valid and should always compile")
    })
}

fn re_long_word() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b[A-Za-z]{15,}\b")
            .expect("re_long_word: pattern is valid and should always compile")
    })
}

fn re_stopword() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(?:the|and|is|are|was|were|of|to|in|that|with|for|this|it|on|be|as|at|by|have|has|but|you|we|they|he|she|very|because)\b",
        )
        .expect("re_stopword: pattern is valid and should always compile")
    })
}

/// Common code constructs checked in stage 3.
fn construct_patterns() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        [
            // function declaration
            r"(?:\bfunction\b|\bdef\s+\w+|\bfn\s+\w+)\s*\(|\)\s*=>",
            // variable declaration
            r"\b(?:const|let|var)\s+\w+\s*=",
            // conditional
            r"(?m)\bif\s*\(|^\s*(?:if|elif)\s.+:\s*$",
            // import
            r"(?m)^\s*(?:import\s|from\s+\S+\s+import\s|#include\b|using\s)|\brequire\s*\(",
            // class declaration
            r"\bclass\s+[A-Z]\w*",
            // method call
            r"\w\.\w+\s*\(",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("code construct pattern is valid and should always compile"))
        .collect()
    })
}

/// Whether `text` reads like natural language.
pub(crate) fn looks_like_prose(text: &str) -> bool {
    if re_sentence().is_match(text) || re_long_word().is_match(text) {
        return true;
    }
    let stopwords: HashSet<String> = re_stopword()
        .find_iter(text)
        .map(|m| m.as_str().to_ascii_lowercase())
        .collect();
    stopwords.len() >= MIN_STOPWORDS
}

/// Stage 2 measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct HeuristicScore {
    pub keywords: usize,
    pub indented: bool,
    pub density: f64,
    pub function_call: bool,
    pub comment: bool,
}

impl HeuristicScore {
    pub(crate) fn measure(text: &str, density: f64) -> Self {
        let keywords: HashSet<&str> = re_keyword().find_iter(text).map(|m| m.as_str()).collect();
        let mut lines = 0usize;
        let mut indented = 0usize;
        for line in non_blank_lines(text) {
            lines += 1;
            if line.starts_with("  ") || line.starts_with('\t') {
                indented += 1;
            }
        }
        Self {
            keywords: keywords.len(),
            indented: ratio(indented, lines) > INDENT_RATIO,
            density,
            function_call: re_function_call().is_match(text),
            comment: re_comment().is_match(text),
        }
    }

    pub(crate) fn score(&self) -> usize {
        let mut score = self.keywords.min(MAX_KEYWORD_SCORE);
        if self.indented {
            score += 2;
        }
        if self.density > HIGH_DENSITY {
            score += 2;
        } else if self.density > LOW_DENSITY {
            score += 1;
        }
        if self.function_call {
            score += 1;
        }
        if self.comment {
            score += 1;
        }
        score
    }

    /// Layout or punctuation that ordinary sentences lack.
    pub(crate) fn has_structure(&self) -> bool {
        self.indented || self.density > LOW_DENSITY || self.function_call || self.comment
    }

    /// Keywords alone never fire: `if`, `for` and `new` are English words too.
    pub(crate) fn fires(&self) -> bool {
        self.score() >= MIN_HEURISTIC_SCORE
            && self.has_structure()
            && (self.keywords >= 1 || self.density > HIGH_DENSITY)
    }
}

fn construct_count(text: &str) -> usize {
    construct_patterns()
        .iter()
        .filter(|re| re.is_match(text))
        .count()
}

/// Score `text` as source code using `auto_detector` for stage 1.
pub fn detect_code(text: &str, auto_detector: &dyn LanguageAutoDetector) -> Option<ContentType> {
    if text.trim().chars().nth(MIN_CHARS - 1).is_none() {
        return None;
    }

    let density = symbol_density(text);
    if density < PROSE_MAX_DENSITY && looks_like_prose(text) {
        crate::debug_trace!("CLASSIFY", "code: prose filter, density={:.4}", density);
        return None;
    }

    let very_long = is_very_long(text);
    let detection = auto_detector.detect(text);
    let relevance = detection.as_ref().map_or(0, |d| d.relevance);
    let bar = if very_long {
        VERY_LONG_RELEVANCE_BAR
    } else {
        RELEVANCE_BAR
    };

    let mut best: Option<f64> = None;
    let mut consider = |confidence: f64| {
        if best.is_none_or(|b| confidence > b) {
            best = Some(confidence);
        }
    };

    if relevance >= bar {
        consider((f64::from(relevance) / 10.0).min(AUTO_MAX_CONFIDENCE));
    }

    let heuristic = HeuristicScore::measure(text, density);
    if heuristic.fires() {
        let base = if very_long {
            VERY_LONG_HEURISTIC_CONFIDENCE
        } else {
            HEURISTIC_CONFIDENCE
        };
        let bonus = if relevance >= AGREEMENT_RELEVANCE {
            AGREEMENT_BONUS
        } else {
            0.0
        };
        consider((base + bonus).min(HEURISTIC_MAX_CONFIDENCE));
    }

    if (MIN_PATTERN_RELEVANCE..bar).contains(&relevance) {
        let constructs = construct_count(text);
        if constructs >= MIN_PATTERNS {
            consider(
                (0.5 + constructs as f64 * 0.1 + f64::from(relevance) / 20.0)
                    .min(PATTERN_MAX_CONFIDENCE),
            );
        }
    }

    crate::debug_trace!(
        "CLASSIFY",
        "code: language={:?} relevance={} heuristic={} result={:?}",
        detection.as_ref().map(|d| d.language.as_str()),
        relevance,
        heuristic.score(),
        best
    );

    best.map(|confidence| ContentType::new(Kind::Code, confidence))
}

/// Detects generic source code.
pub struct CodeDetector {
    auto_detector: Box<dyn LanguageAutoDetector>,
}

impl CodeDetector {
    pub fn new(auto_detector: Box<dyn LanguageAutoDetector>) -> Self {
        Self { auto_detector }
    }

    /// Language guesses come from the configured keyword grammars.
    pub fn from_config(config: &AutoDetectConfig) -> Self {
        Self::new(Box::new(KeywordAutoDetector::new(&config.languages)))
    }

    pub fn auto_detector(&self) -> &dyn LanguageAutoDetector {
        self.auto_detector.as_ref()
    }
}

impl ContentDetector for CodeDetector {
    fn format_id(&self) -> &str {
        "code"
    }

    fn display_name(&self) -> &str {
        "Source code"
    }

    fn kind(&self) -> Kind {
        Kind::Code
    }

    fn detect(&self, text: &str) -> Option<ContentType> {
        detect_code(text, self.auto_detector.as_ref())
    }
}

/// Register the code detector with the registry.
pub fn register_code(
    registry: &mut DetectorRegistry,
    config: &DetectorsConfig,
    auto_detect: &AutoDetectConfig,
) {
    if config.code.enabled {
        registry.register_detector(CODE_PRIORITY, Box::new(CodeDetector::from_config(auto_detect)));
    }
}
