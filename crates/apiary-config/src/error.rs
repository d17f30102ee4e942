//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required configuration file does not exist.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file
        path: PathBuf,
    },

    /// A configuration file exists but could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    ReadError {
        /// Path to the file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file extension or format name is neither TOML nor JSON.
    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// TOML parsing failed.
    #[error("failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parsing failed.
    #[error("failed to parse JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A `.env` file exists but could not be loaded.
    #[error("failed to load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    /// An override variable holds a value of the wrong type.
    #[error("failed to parse environment variable {var}: {reason}")]
    EnvParse {
        /// Variable name
        var: String,
        /// What was expected
        reason: String,
    },

    /// A loaded value is out of range or malformed.
    #[error("invalid configuration value for {field}: {reason}")]
    InvalidValue {
        /// Dotted field path, e.g. `server.http_addr`
        field: String,
        /// Why the value was rejected
        reason: String,
    },
}

impl ConfigError {
    /// Creates an environment parse error.
    pub fn env_parse(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EnvParse {
            var: var.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ConfigError::FileNotFound {
            path: PathBuf::from("/etc/apiary.toml"),
        };
        assert_eq!(err.to_string(), "configuration file not found: /etc/apiary.toml");

        let err = ConfigError::env_parse("APIARY__SERVER__MAX_BODY_BYTES", "expected integer");
        assert_eq!(
            err.to_string(),
            "failed to parse environment variable APIARY__SERVER__MAX_BODY_BYTES: expected integer"
        );

        let err = ConfigError::invalid_value("server.http_addr", "not a socket address");
        assert!(err.to_string().contains("server.http_addr"));
    }
}
