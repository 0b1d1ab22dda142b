//! Typed error variants for the clipsense-config crate.
//!
//! Callers that only need a message can rely on `Display`; callers that want
//! to react to a specific failure mode can match on the variant.

use thiserror::Error;

/// Errors that can occur when loading, validating or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file contained invalid YAML that could not be parsed.
    #[error("YAML parse error in config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string names the offending field and the reason.
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = ConfigError::Validation("rendering.highlight_max_bytes must be > 0".into());
        assert_eq!(
            err.to_string(),
            "Config validation error: rendering.highlight_max_bytes must be > 0"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ConfigError = io.into();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().starts_with("I/O error reading config"));
    }

    #[test]
    fn test_parse_error_conversion() {
        let parse = serde_yaml_ng::from_str::<u32>("not: [a number").unwrap_err();
        let err: ConfigError = parse.into();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
