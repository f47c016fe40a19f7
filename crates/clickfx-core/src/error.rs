//! Error types for clickfx

use thiserror::Error;

/// The main error type for clickfx operations
#[derive(Debug, Error)]
pub enum FxError {
    /// The host lacks a drawing surface or event registration.
    /// Hosts log this and skip installation instead of failing.
    #[error("Unsupported environment: {0}")]
    UnsupportedEnvironment(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Script error: {0}")]
    ScriptError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

/// Result type alias for clickfx operations
pub type Result<T> = std::result::Result<T, FxError>;

impl From<toml::de::Error> for FxError {
    fn from(err: toml::de::Error) -> Self {
        FxError::TomlParseError(err.to_string())
    }
}

impl FxError {
    /// Whether a host should treat this as "do not install" rather than a failure
    pub fn is_unsupported(&self) -> bool {
        matches!(self, FxError::UnsupportedEnvironment(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = FxError::ValueOutOfRange {
            field: "click.damping".into(),
            min: 0.0,
            max: 1.0,
            value: 1.5,
        };
        assert_eq!(
            err.to_string(),
            "Value out of range: click.damping must be between 0 and 1, got 1.5"
        );
    }

    #[test]
    fn test_toml_error_conversion() {
        let parsed: std::result::Result<toml::value::Table, _> = toml::from_str("a = ");
        let err: FxError = parsed.unwrap_err().into();
        assert!(matches!(err, FxError::TomlParseError(_)));
        assert!(!err.is_unsupported());
    }

    #[test]
    fn test_unsupported_flag() {
        let err = FxError::UnsupportedEnvironment("no 2d context".into());
        assert!(err.is_unsupported());
    }
}
