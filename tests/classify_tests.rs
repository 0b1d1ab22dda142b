//! End-to-end classification scenarios and invariants.

mod common;

use clipsense::classifier::types::{ACCEPTANCE_THRESHOLD, PREVIEW_CHARS};
use clipsense::classifier::{DetectorRegistry, FnDetector};
use clipsense::{ContentClassifier, ContentType, Kind, classify, highlight_language};
use common::{prose_paragraph, text_of_len, url_lines};

#[test]
fn test_json_object() {
    let detected = classify(r#"{"a": 1, "b": [2,3]}"#);
    assert_eq!(detected.kind(), Kind::Json);
    assert!(detected.confidence() >= 0.9);
}

#[test]
fn test_simple_sql_is_code_with_sql_grammar() {
    let detected = classify("SELECT * FROM users WHERE id = 1");
    assert_eq!(detected.kind(), Kind::Code);
    assert!(detected.confidence() >= 0.3);
    assert_eq!(highlight_language(&detected), "sql");
}

#[test]
fn test_url_lines() {
    let detected = classify(url_lines());
    assert_eq!(detected.kind(), Kind::Url);
    assert_eq!(detected.confidence(), 0.85);
}

#[test]
fn test_single_url() {
    let detected = classify("  https://example.com/path?q=1  ");
    assert_eq!(detected.kind(), Kind::Url);
    assert_eq!(detected.confidence(), 0.95);
}

#[test]
fn test_email_lines() {
    let detected = classify("alice@example.com\nbob@example.org");
    assert_eq!(detected.kind(), Kind::Email);
    assert_eq!(detected.confidence(), 0.85);
}

#[test]
fn test_prose_paragraph_is_text() {
    let detected = classify(prose_paragraph());
    assert_eq!(detected.kind(), Kind::Text);
    assert_eq!(detected.confidence(), 1.0);
}

#[test]
fn test_empty_string() {
    let detected = classify("");
    assert_eq!(detected.kind(), Kind::Text);
    assert_eq!(detected.confidence(), 1.0);
    assert_eq!(detected.preview, "");
    assert_eq!(detected.original, "");
}

#[test]
fn test_xml_document() {
    let text = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<config>\n  <entry key=\"a\">1</entry>\n  <entry key=\"b\">2</entry>\n</config>";
    let detected = classify(text);
    assert_eq!(detected.kind(), Kind::Xml);
    assert!(detected.confidence() > 0.8);
}

#[test]
fn test_html_document_is_code_with_html_grammar() {
    let text = "<!DOCTYPE html>\n<html>\n<head><title>Hi</title></head>\n<body><div class=\"x\"><p>Hello</p></div></body>\n</html>";
    let detected = classify(text);
    assert_eq!(detected.kind(), Kind::Code);
    assert_eq!(highlight_language(&detected), "html");
}

#[test]
fn test_dense_markup_without_declaration_is_code() {
    let detected = classify("<note><to>Tove</to><from>Jani</from></note>");
    assert_eq!(detected.kind(), Kind::Code);
    assert_eq!(detected.confidence(), 0.9);
    assert_eq!(highlight_language(&detected), "xml");
}

#[test]
fn test_sentences_with_parentheses_are_text() {
    for text in [
        "We should meet again soon (maybe next week) and decide what to do if the weather is bad, or else try the new place for lunch.",
        "If you are free, let me know (I can try to come early). For the new class we will return on Monday, while the others stay home.",
    ] {
        let detected = classify(text);
        assert_eq!(detected.kind(), Kind::Text, "{text:?}");
        assert_eq!(detected.confidence(), 1.0);
    }
}

#[test]
fn test_markdown_document() {
    let text = "# Release notes\n\n## Added\n\n- Faster startup\n- A **bold** new option\n\nSee [the docs](https://example.com/docs) for details.\n";
    assert_eq!(classify(text).kind(), Kind::Markdown);
}

#[test]
fn test_python_source() {
    let text = "import os\n\ndef list_files(path):\n    if not os.path.isdir(path):\n        return None\n    return sorted(os.listdir(path))\n";
    assert_eq!(classify(text).kind(), Kind::Code);
}

#[test]
fn test_classification_is_total() {
    let inputs = [
        "{",
        "}",
        "[",
        "{not json at all",
        "{'a': }",
        "<",
        "<<<>>>",
        "<?xml",
        "```",
        "#",
        "SELECT",
        "@",
        "http://",
        "\0\0\0",
        "\u{feff}{\"a\": 1}",
        "日本語のテキストです。",
        "🦀🦀🦀🦀🦀🦀🦀🦀🦀🦀🦀🦀",
        "   \n\t\n   ",
    ];
    for input in inputs {
        let detected = classify(input);
        let confidence = detected.confidence();
        assert!(
            (0.0..=1.0).contains(&confidence),
            "confidence {confidence} out of range for {input:?}"
        );
        assert_eq!(detected.original, input);
    }
}

#[test]
fn test_classification_is_deterministic() {
    let text = "const x = require('fs');\nx.readFileSync('a');";
    assert_eq!(classify(text), classify(text));
}

fn exactly_at_threshold(_: &str) -> Option<ContentType> {
    Some(ContentType::new(Kind::Json, ACCEPTANCE_THRESHOLD))
}

fn just_above_threshold(_: &str) -> Option<ContentType> {
    Some(ContentType::new(Kind::Markdown, 0.51))
}

#[test]
fn test_threshold_is_exclusive() {
    let mut registry = DetectorRegistry::default();
    registry.register_detector(
        10,
        Box::new(FnDetector::new("edge", "Edge", Kind::Json, exactly_at_threshold)),
    );
    let classifier = ContentClassifier::new(registry);
    let detected = classifier.classify("anything at all");
    assert_eq!(detected.kind(), Kind::Text);
    assert_eq!(detected.confidence(), 1.0);
}

#[test]
fn test_above_threshold_is_accepted() {
    let mut registry = DetectorRegistry::default();
    registry.register_detector(
        10,
        Box::new(FnDetector::new("edge", "Edge", Kind::Markdown, just_above_threshold)),
    );
    let detected = ContentClassifier::new(registry).classify("anything at all");
    assert_eq!(detected.kind(), Kind::Markdown);
    assert_eq!(detected.confidence(), 0.51);
}

#[test]
fn test_preview_truncation() {
    let short = text_of_len(PREVIEW_CHARS);
    assert_eq!(classify(&short).preview, short);

    let long = text_of_len(PREVIEW_CHARS + 1);
    let preview = classify(&long).preview;
    assert_eq!(preview, format!("{}...", &long[..PREVIEW_CHARS]));
}

#[test]
fn test_preview_keeps_multibyte_chars_whole() {
    let long: String = "é".repeat(PREVIEW_CHARS + 10);
    let preview = classify(&long).preview;
    assert_eq!(preview.chars().count(), PREVIEW_CHARS + 3);
    assert!(preview.ends_with("..."));
}

#[test]
fn test_candidates_include_runner_up() {
    let classifier = ContentClassifier::default();
    let votes = classifier.candidates("SELECT * FROM users WHERE id = 1");
    assert!(votes.iter().any(|v| v.format_id == "sql"));
    assert!(
        votes
            .windows(2)
            .all(|w| w[0].content_type.confidence >= w[1].content_type.confidence)
    );
}

#[test]
fn test_shared_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| classify(url_lines()).kind()))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Kind::Url);
    }
}
