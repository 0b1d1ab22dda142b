//! Small enum types shared by the configuration structs.

use serde::{Deserialize, Serialize};

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    #[default]
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// All available levels, least to most verbose
    pub fn all() -> &'static [LogLevel] {
        &[
            LogLevel::Off,
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ]
    }

    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }

    /// Parse a case-insensitive level name (as accepted on the command line).
    pub fn parse(name: &str) -> Option<LogLevel> {
        match name.trim().to_ascii_lowercase().as_str() {
            "off" => Some(LogLevel::Off),
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// A grammar that can be registered with the lexical auto-detector.
///
/// The auto-detector only ever guesses among the registered set, which keeps
/// exotic grammars from claiming ordinary text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoDetectLanguage {
    #[serde(alias = "js")]
    JavaScript,
    #[serde(alias = "ts")]
    TypeScript,
    #[serde(alias = "py")]
    Python,
    Json,
    Sql,
    /// HTML and XML share one markup grammar.
    #[serde(alias = "html")]
    Xml,
}

impl AutoDetectLanguage {
    pub fn all() -> &'static [AutoDetectLanguage] {
        &[
            AutoDetectLanguage::JavaScript,
            AutoDetectLanguage::TypeScript,
            AutoDetectLanguage::Python,
            AutoDetectLanguage::Json,
            AutoDetectLanguage::Sql,
            AutoDetectLanguage::Xml,
        ]
    }

    /// Grammar name handed to highlighters for this language.
    pub fn name(self) -> &'static str {
        match self {
            AutoDetectLanguage::JavaScript => "javascript",
            AutoDetectLanguage::TypeScript => "typescript",
            AutoDetectLanguage::Python => "python",
            AutoDetectLanguage::Json => "json",
            AutoDetectLanguage::Sql => "sql",
            AutoDetectLanguage::Xml => "xml",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse(" warning "), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("loud"), None);
        for level in LogLevel::all() {
            let yaml = serde_yaml_ng::to_string(level).unwrap();
            assert_eq!(LogLevel::parse(yaml.trim()), Some(*level));
        }
    }

    #[test]
    fn test_auto_detect_language_aliases() {
        let langs: Vec<AutoDetectLanguage> =
            serde_yaml_ng::from_str("[js, ts, py, json, sql, html, xml]").unwrap();
        assert_eq!(
            langs,
            vec![
                AutoDetectLanguage::JavaScript,
                AutoDetectLanguage::TypeScript,
                AutoDetectLanguage::Python,
                AutoDetectLanguage::Json,
                AutoDetectLanguage::Sql,
                AutoDetectLanguage::Xml,
                AutoDetectLanguage::Xml,
            ]
        );
        assert_eq!(AutoDetectLanguage::TypeScript.name(), "typescript");
    }
}
