//! Best-effort repair of near-valid JSON.
//!
//! Handles the mistakes clipboard JSON most often carries: `//` and `/* */`
//! comments, single-quoted strings, unquoted object keys, trailing commas and
//! Python literals (`True`, `False`, `None`). Every pass is string-aware, so
//! text inside double-quoted strings is never touched.

use serde_json::Value;

/// Apply all repairs and return the rewritten text.
///
/// The result is not guaranteed to parse; callers re-run the strict parser.
pub fn repair(input: &str) -> String {
    let text = normalize_lexical(input);
    let text = fix_bare_words(&text);
    remove_trailing_commas(&text)
}

/// Parse `input` strictly, without any repair.
pub fn parse_strict(input: &str) -> Option<Value> {
    serde_json::from_str(input).ok()
}

/// Repair `input` and parse the result.
pub fn parse_repaired(input: &str) -> Option<Value> {
    let repaired = repair(input);
    match serde_json::from_str(&repaired) {
        Ok(value) => Some(value),
        Err(e) => {
            crate::debug_trace!("CLASSIFY", "json repair did not produce valid JSON: {}", e);
            None
        }
    }
}

/// Strict parse, falling back to a repaired parse.
pub fn parse_lenient(input: &str) -> Option<Value> {
    parse_strict(input).or_else(|| parse_repaired(input))
}

/// Strip comments and convert single-quoted strings to double-quoted ones.
///
/// Done in one pass because each depends on knowing where strings are.
fn normalize_lexical(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let n = chars.len();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    while i < n {
        match chars[i] {
            '"' => i = copy_string(&chars, i, &mut out),
            '\'' => i = convert_single_quoted(&chars, i, &mut out),
            '/' if chars.get(i + 1) == Some(&'/') => {
                while i < n && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                i += 2;
                while i < n && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                i = (i + 2).min(n);
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

/// Quote bare object keys and map Python literals to JSON ones.
fn fix_bare_words(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let n = chars.len();
    let mut out = String::with_capacity(input.len() + 16);
    let mut i = 0;
    while i < n {
        let c = chars[i];
        if c == '"' {
            i = copy_string(&chars, i, &mut out);
            continue;
        }
        if is_word_start(c) && !follows_digit(&out) {
            let start = i;
            while i < n && is_word_char(chars[i]) {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let is_key = next_non_ws(&chars, i) == Some(':')
                && out.trim_end().ends_with(['{', ',']);
            if is_key {
                out.push('"');
                out.push_str(&word);
                out.push('"');
            } else {
                out.push_str(match word.as_str() {
                    "True" => "true",
                    "False" => "false",
                    "None" => "null",
                    other => other,
                });
            }
            continue;
        }
        out.push(c);
        i += 1;
    }
    out
}

/// Drop commas that directly precede a closing `}` or `]`.
fn remove_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let n = chars.len();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    while i < n {
        let c = chars[i];
        if c == '"' {
            i = copy_string(&chars, i, &mut out);
            continue;
        }
        if c == ',' && matches!(next_non_ws(&chars, i + 1), Some('}' | ']')) {
            i += 1;
            continue;
        }
        out.push(c);
        i += 1;
    }
    out
}

/// Copy a double-quoted string starting at `start` verbatim.
///
/// Returns the index just past the closing quote (or the end of input when
/// the string is unterminated).
fn copy_string(chars: &[char], start: usize, out: &mut String) -> usize {
    out.push('"');
    let mut i = start + 1;
    while i < chars.len() {
        let c = chars[i];
        out.push(c);
        i += 1;
        if c == '\\' {
            if let Some(&escaped) = chars.get(i) {
                out.push(escaped);
                i += 1;
            }
        } else if c == '"' {
            break;
        }
    }
    i
}

/// Rewrite a single-quoted string starting at `start` as a double-quoted one.
fn convert_single_quoted(chars: &[char], start: usize, out: &mut String) -> usize {
    out.push('"');
    let mut i = start + 1;
    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '\\' => match chars.get(i) {
                Some('\'') => {
                    out.push('\'');
                    i += 1;
                }
                Some(&escaped) => {
                    out.push('\\');
                    out.push(escaped);
                    i += 1;
                }
                None => out.push('\\'),
            },
            '"' => out.push_str("\\\""),
            '\'' => {
                out.push('"');
                return i;
            }
            other => out.push(other),
        }
    }
    i
}

fn next_non_ws(chars: &[char], from: usize) -> Option<char> {
    chars[from.min(chars.len())..]
        .iter()
        .copied()
        .find(|c| !c.is_whitespace())
}

fn is_word_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Exponents and hex digits (`1e5`, `0x1F`) are part of a number, not words.
fn follows_digit(out: &str) -> bool {
    out.chars().last().is_some_and(|c| c.is_ascii_digit() || c == '.')
}
