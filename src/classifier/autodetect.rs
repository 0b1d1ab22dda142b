//! Lexical language auto-detection.
//!
//! `KeywordAutoDetector` scores a text against weighted grammar tables for a
//! configured set of languages and reports the best match. Relevance is the
//! sum of `occurrences × weight` over a grammar's keywords and markers.
//! Words common in English prose carry no weight so that ordinary text stays
//! near zero.

use std::collections::HashMap;
use std::sync::OnceLock;

use clipsense_config::AutoDetectLanguage;
use regex::Regex;

use super::text_stats::utf8_prefix;
use super::traits::{AutoDetection, LanguageAutoDetector};

/// Only the first 64 KiB of a text is scored.
const SAMPLE_MAX_BYTES: usize = 64 * 1024;

const JS_KEYWORDS: &[(&str, u32)] = &[
    ("function", 2),
    ("const", 2),
    ("var", 1),
    ("let", 1),
    ("return", 1),
    ("typeof", 2),
    ("instanceof", 2),
    ("undefined", 2),
    ("null", 1),
    ("async", 1),
    ("await", 1),
    ("yield", 1),
    ("export", 2),
    ("require", 2),
    ("console", 2),
    ("document", 1),
    ("window", 1),
    ("prototype", 2),
    ("extends", 1),
    ("class", 1),
    ("import", 1),
    ("else", 1),
    ("switch", 1),
    ("break", 1),
    ("continue", 1),
    ("throw", 1),
    ("catch", 1),
    ("finally", 1),
];

const JS_MARKERS: &[(&str, u32)] = &[
    (r"=>", 2),
    (r"===|!==", 2),
    (r"(?m);\s*$", 1),
    (r"\bconsole\.\w+\s*\(", 3),
    (r"\$\{", 1),
    (r"\bfunction\s*\w*\s*\(", 2),
    (r"(?m)^\s*//", 1),
];

const TS_KEYWORDS: &[(&str, u32)] = &[
    ("interface", 2),
    ("enum", 2),
    ("implements", 2),
    ("readonly", 2),
    ("namespace", 2),
    ("declare", 1),
    ("keyof", 3),
    ("private", 1),
    ("public", 1),
    ("protected", 1),
    ("abstract", 1),
];

const TS_MARKERS: &[(&str, u32)] = &[
    (r":\s*(?:string|number|boolean|void|any|unknown|never)\b", 3),
    (r"\bas\s+const\b", 2),
];

const PYTHON_KEYWORDS: &[(&str, u32)] = &[
    ("def", 3),
    ("elif", 3),
    ("lambda", 2),
    ("None", 2),
    ("True", 1),
    ("False", 1),
    ("self", 2),
    ("import", 1),
    ("pass", 1),
    ("yield", 1),
    ("except", 2),
    ("raise", 2),
    ("nonlocal", 3),
    ("async", 1),
    ("await", 1),
    ("print", 1),
    ("return", 1),
];

const PYTHON_MARKERS: &[(&str, u32)] = &[
    (r"(?m)^\s*def\s+\w+\s*\(.*\)\s*(?:->\s*[^:]+)?:\s*$", 3),
    (
        r"(?m)^\s*(?:if|elif|else|for|while|try|except|with|class)\b.*:\s*$",
        2,
    ),
    (r"(?m)^\s*from\s+[\w.]+\s+import\s", 3),
    (r"\b__\w+__\b", 2),
];

const JSON_KEYWORDS: &[(&str, u32)] = &[("true", 1), ("false", 1), ("null", 1)];

const JSON_MARKERS: &[(&str, u32)] = &[(r#""[^"\n]*"\s*:"#, 1), (r"^\s*[\[{]", 1)];

const SQL_KEYWORDS: &[(&str, u32)] = &[
    ("select", 1),
    ("insert", 2),
    ("join", 1),
    ("having", 1),
    ("varchar", 3),
    ("distinct", 1),
    ("truncate", 2),
];

const SQL_MARKERS: &[(&str, u32)] = &[
    (r"(?i)\bselect\s+(?:\*|[\w.,\s()]+?)\s+from\s", 3),
    (r"(?i)\binsert\s+into\b", 2),
    (r"(?i)\bdelete\s+from\b", 2),
    (r"(?i)\bcreate\s+table\b", 3),
    (r"(?i)\bwhere\s+[\w.]+\s*=", 2),
    (r"(?i)\bgroup\s+by\b", 2),
    (r"(?i)\border\s+by\b", 2),
];

const XML_MARKERS: &[(&str, u32)] = &[
    (r"<\?xml", 5),
    (r"\bxmlns\b", 2),
    (r"<!\[CDATA\[", 3),
    (r"(?i)<!doctype", 3),
    (r"<!--", 1),
];

/// Compiled scoring table for one language.
struct Grammar {
    language: AutoDetectLanguage,
    case_insensitive: bool,
    keyword_weights: HashMap<&'static str, u32>,
    keyword_re: Option<Regex>,
    markers: Vec<(Regex, u32)>,
}

impl Grammar {
    fn new(
        language: AutoDetectLanguage,
        case_insensitive: bool,
        keyword_tables: &[&[(&'static str, u32)]],
        marker_tables: &[&[(&'static str, u32)]],
    ) -> Self {
        let keyword_weights: HashMap<&'static str, u32> =
            keyword_tables.iter().flat_map(|t| t.iter().copied()).collect();
        let keyword_re = if keyword_weights.is_empty() {
            None
        } else {
            let mut words: Vec<&str> = keyword_weights.keys().copied().collect();
            words.sort_unstable();
            let flags = if case_insensitive { "(?i)" } else { "" };
            let pattern = format!(r"{flags}\b(?:{})\b", words.join("|"));
            Some(Regex::new(&pattern).expect("grammar keyword pattern is valid and should always compile"))
        };
        let markers = marker_tables
            .iter()
            .flat_map(|t| t.iter())
            .map(|(p, w)| {
                (
                    Regex::new(p).expect("grammar marker pattern is valid and should always compile"),
                    *w,
                )
            })
            .collect();
        Self {
            language,
            case_insensitive,
            keyword_weights,
            keyword_re,
            markers,
        }
    }

    fn relevance(&self, sample: &str) -> u32 {
        let mut relevance = 0u32;
        if let Some(re) = &self.keyword_re {
            for m in re.find_iter(sample) {
                let weight = if self.case_insensitive {
                    self.keyword_weights
                        .get(m.as_str().to_ascii_lowercase().as_str())
                        .copied()
                } else {
                    self.keyword_weights.get(m.as_str()).copied()
                };
                relevance = relevance.saturating_add(weight.unwrap_or(0));
            }
        }
        for (re, weight) in &self.markers {
            let hits = u32::try_from(re.find_iter(sample).count()).unwrap_or(u32::MAX);
            relevance = relevance.saturating_add(hits.saturating_mul(*weight));
        }
        relevance
    }
}

fn build_grammar(language: AutoDetectLanguage) -> Grammar {
    use AutoDetectLanguage as L;
    match language {
        L::JavaScript => Grammar::new(language, false, &[JS_KEYWORDS], &[JS_MARKERS]),
        L::TypeScript => Grammar::new(
            language,
            false,
            &[JS_KEYWORDS, TS_KEYWORDS],
            &[JS_MARKERS, TS_MARKERS],
        ),
        L::Python => Grammar::new(language, false, &[PYTHON_KEYWORDS], &[PYTHON_MARKERS]),
        L::Json => Grammar::new(language, false, &[JSON_KEYWORDS], &[JSON_MARKERS]),
        L::Sql => Grammar::new(language, true, &[SQL_KEYWORDS], &[SQL_MARKERS]),
        L::Xml => Grammar::new(language, false, &[], &[XML_MARKERS]),
    }
}

/// Every grammar, compiled once per process.
fn grammars() -> &'static HashMap<AutoDetectLanguage, Grammar> {
    static GRAMMARS: OnceLock<HashMap<AutoDetectLanguage, Grammar>> = OnceLock::new();
    GRAMMARS.get_or_init(|| {
        AutoDetectLanguage::all()
            .iter()
            .map(|&language| (language, build_grammar(language)))
            .collect()
    })
}

/// Keyword-table auto-detector restricted to a registered language set.
///
/// The language set is explicit configuration; nothing is registered
/// globally.
pub struct KeywordAutoDetector {
    languages: Vec<AutoDetectLanguage>,
}

impl KeywordAutoDetector {
    /// Create a detector for `languages`. Duplicates keep their first position.
    pub fn new(languages: &[AutoDetectLanguage]) -> Self {
        let mut registered: Vec<AutoDetectLanguage> = Vec::with_capacity(languages.len());
        for language in languages {
            if !registered.contains(language) {
                registered.push(*language);
            }
        }
        Self {
            languages: registered,
        }
    }

    /// Relevance of every registered language, in registration order.
    pub fn scores(&self, text: &str) -> Vec<(AutoDetectLanguage, u32)> {
        let sample = utf8_prefix(text, SAMPLE_MAX_BYTES);
        let table = grammars();
        self.languages
            .iter()
            .filter_map(|language| table.get(language))
            .map(|grammar| (grammar.language, grammar.relevance(sample)))
            .collect()
    }
}

impl Default for KeywordAutoDetector {
    fn default() -> Self {
        Self::new(&clipsense_config::defaults::auto_detect_languages())
    }
}

impl LanguageAutoDetector for KeywordAutoDetector {
    fn detect(&self, text: &str) -> Option<AutoDetection> {
        let mut best: Option<(AutoDetectLanguage, u32)> = None;
        for (language, relevance) in self.scores(text) {
            // Strictly greater: ties go to the earlier registered language.
            if relevance > best.map_or(0, |(_, r)| r) {
                best = Some((language, relevance));
            }
        }
        best.map(|(language, relevance)| AutoDetection {
            language: language.name().to_string(),
            relevance,
        })
    }

    fn languages(&self) -> Vec<&str> {
        self.languages.iter().map(|l| l.name()).collect()
    }
}
