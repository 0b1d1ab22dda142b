//! Shared text measurements used by several detectors.

/// Inputs longer than this (chars) count as very long text.
pub const VERY_LONG_CHARS: usize = 1000;

/// Inputs with more lines than this count as very long text.
pub const VERY_LONG_LINES: usize = 20;

/// Characters counted by [`symbol_density`].
const CODE_SYMBOLS: &[char] = &['{', '}', ';', '=', '(', ')', '[', ']'];

/// Longest prefix of `content` that fits in `max_bytes` without splitting a
/// UTF-8 sequence.
pub fn utf8_prefix(content: &str, max_bytes: usize) -> &str {
    if content.len() <= max_bytes {
        return content;
    }
    let mut end = max_bytes;
    while end > 0 && !content.is_char_boundary(end) {
        end = end.saturating_sub(1);
    }
    &content[..end]
}

/// Whether the text is long enough for the stricter code thresholds.
pub fn is_very_long(text: &str) -> bool {
    text.lines().count() > VERY_LONG_LINES || text.chars().nth(VERY_LONG_CHARS).is_some()
}

/// Lines containing something other than whitespace.
pub fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|l| !l.trim().is_empty())
}

/// Code punctuation (`{};=()[]`) per character.
pub fn symbol_density(text: &str) -> f64 {
    let mut total = 0usize;
    let mut symbols = 0usize;
    for c in text.chars() {
        total += 1;
        if CODE_SYMBOLS.contains(&c) {
            symbols += 1;
        }
    }
    ratio(symbols, total)
}

/// `part / whole` as f64, 0.0 for an empty whole.
pub fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_prefix_respects_boundaries() {
        assert_eq!(utf8_prefix("hello", 10), "hello");
        assert_eq!(utf8_prefix("hello", 3), "hel");
        // "é" is two bytes; cutting at 1 must back off to 0.
        assert_eq!(utf8_prefix("é", 1), "");
    }

    #[test]
    fn test_very_long() {
        assert!(!is_very_long("short"));
        assert!(is_very_long(&"a".repeat(VERY_LONG_CHARS + 1)));
        assert!(!is_very_long(&"a".repeat(VERY_LONG_CHARS)));
        assert!(is_very_long(&"x\n".repeat(VERY_LONG_LINES + 1)));
    }

    #[test]
    fn test_symbol_density() {
        assert_eq!(symbol_density(""), 0.0);
        assert_eq!(symbol_density("ab"), 0.0);
        assert!((symbol_density("f();") - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_non_blank_lines() {
        let lines: Vec<&str> = non_blank_lines("a\n\n  \nb\n").collect();
        assert_eq!(lines, vec!["a", "b"]);
    }
}
