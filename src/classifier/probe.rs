//! Original sub-type probe for the generic `Code` bucket.
//!
//! SQL and HTML both classify as `Code`. Formatting and highlighting need
//! the finer distinction, so they re-run the same signal tables the primary
//! detectors use, in a fixed order: SQL, then HTML, then XML.

use super::detectors::html::HtmlSignals;
use super::detectors::sql::SqlSignals;
use super::detectors::xml::XmlSignals;
use super::types::Kind;

/// `Kind::Sql`, `Kind::Html` or `Kind::Xml` when the text carries that
/// sub-type's signals, else `None`.
pub fn original_kind(text: &str) -> Option<Kind> {
    if text.trim().is_empty() {
        return None;
    }
    if SqlSignals::measure(text).votes() {
        return Some(Kind::Sql);
    }
    if HtmlSignals::measure(text).is_html_markup() {
        return Some(Kind::Html);
    }
    if XmlSignals::measure(text).votes() {
        return Some(Kind::Xml);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::testing::js_snippet;

    #[test]
    fn test_sql() {
        assert_eq!(
            original_kind("SELECT * FROM users WHERE id = 1"),
            Some(Kind::Sql)
        );
    }

    #[test]
    fn test_html() {
        assert_eq!(
            original_kind("<html><body><div>hi</div></body></html>"),
            Some(Kind::Html)
        );
    }

    #[test]
    fn test_xml() {
        assert_eq!(
            original_kind("<?xml version=\"1.0\"?><root><item/></root>"),
            Some(Kind::Xml)
        );
    }

    #[test]
    fn test_sql_checked_before_markup() {
        let text = "<query>SELECT id FROM t WHERE x = 1</query>";
        assert_eq!(original_kind(text), Some(Kind::Sql));
    }

    #[test]
    fn test_dense_generic_markup_is_xml() {
        let text = "<note><to>Tove</to><from>Jani</from></note>";
        assert_eq!(original_kind(text), Some(Kind::Xml));
    }

    #[test]
    fn test_plain_code() {
        assert_eq!(original_kind(js_snippet()), None);
        assert_eq!(original_kind(""), None);
    }
}
