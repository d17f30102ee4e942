//! Layered configuration loading.

use std::env;
use std::fs;
use std::path::Path;

use apiary_telemetry::LogFormat;

use crate::{ApiaryConfig, ConfigError};

/// Builds an [`ApiaryConfig`] from layered sources.
///
/// Later layers override earlier ones:
///
/// 1. defaults (or a preset)
/// 2. a TOML or JSON file, or an inline string
/// 3. `PREFIX__SECTION__KEY` environment variables, optionally seeded from
///    a `.env` file
///
/// ```no_run
/// use apiary_config::ConfigLoader;
///
/// # fn main() -> Result<(), apiary_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_optional_file("apiary.toml")?
///     .with_dotenv()?
///     .with_env_prefix("APIARY")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config: ApiaryConfig,
    env_prefix: Option<String>,
}

impl ConfigLoader {
    /// Starts from the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from [`ApiaryConfig::development`].
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = ApiaryConfig::development();
        self
    }

    /// Starts from [`ApiaryConfig::production`].
    #[must_use]
    pub fn with_production(mut self) -> Self {
        self.config = ApiaryConfig::production();
        self
    }

    /// Loads a file, choosing TOML or JSON by extension.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing, unreadable, of another format, or does
    /// not match the schema.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;

        self.config = parse(&content, format)?;
        Ok(self)
    }

    /// Like [`with_file`](Self::with_file), but a missing file is skipped.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be loaded.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Loads configuration text in the named format (`"toml"` or `"json"`).
    ///
    /// ```
    /// use apiary_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(r#"{"logging": {"format": "pretty"}}"#, "json")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.logging.format, apiary_telemetry::LogFormat::Pretty);
    /// ```
    ///
    /// # Errors
    ///
    /// Fails on an unknown format or a schema mismatch.
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = parse(content, format)?;
        Ok(self)
    }

    /// Loads `.env` from the working directory into the process
    /// environment, if present. Existing variables win.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but is malformed.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if e.not_found() => Ok(self),
            Err(e) => Err(e.into()),
        }
    }

    /// Loads a specific env file into the process environment.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing or malformed.
    pub fn with_dotenv_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        dotenvy::from_path(path.as_ref())?;
        Ok(self)
    }

    /// Enables `PREFIX__SECTION__KEY` overrides, applied by [`load`](Self::load).
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Applies environment overrides and validates.
    ///
    /// # Errors
    ///
    /// Fails if an override cannot be parsed or validation fails.
    pub fn load(mut self) -> Result<ApiaryConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;
        }
        self.config.validate()?;
        Ok(self.config)
    }

    /// Returns the configuration without overrides or validation.
    #[must_use]
    pub fn load_unvalidated(self) -> ApiaryConfig {
        self.config
    }

    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        let marker = format!("{prefix}__");
        let mut vars: Vec<(String, String)> = env::vars()
            .filter(|(key, _)| key.starts_with(&marker))
            .collect();
        vars.sort();

        for (key, value) in vars {
            let path = &key[marker.len()..];
            self.apply_env_var(&key, path, &value)?;
        }
        Ok(())
    }

    fn apply_env_var(&mut self, var: &str, path: &str, value: &str) -> Result<(), ConfigError> {
        let server = &mut self.config.server;
        let logging = &mut self.config.logging;

        match path.split("__").collect::<Vec<_>>().as_slice() {
            ["SERVER", "HTTP_ADDR"] => server.http_addr = value.to_string(),
            ["SERVER", "SHUTDOWN_TIMEOUT_SECS"] => {
                server.shutdown_timeout_secs = parse_number(var, value)?;
            }
            ["SERVER", "REQUEST_TIMEOUT_MS"] => {
                server.request_timeout_ms = parse_number(var, value)?;
            }
            ["SERVER", "MAX_BODY_BYTES"] => server.max_body_bytes = parse_number(var, value)?,
            ["LOGGING", "ENABLED"] => {
                logging.enabled =
                    parse_bool(value).ok_or_else(|| ConfigError::env_parse(var, "expected boolean"))?;
            }
            ["LOGGING", "LEVEL"] => logging.level = value.to_string(),
            ["LOGGING", "FORMAT"] => {
                logging.format = value
                    .parse::<LogFormat>()
                    .map_err(|reason| ConfigError::env_parse(var, reason))?;
            }
            ["LOGGING", "SERVICE_NAME"] => logging.service_name = value.to_string(),
            // Not ours; other tools may share the prefix.
            _ => {}
        }
        Ok(())
    }
}

fn parse(content: &str, format: &str) -> Result<ApiaryConfig, ConfigError> {
    match format.to_ascii_lowercase().as_str() {
        "toml" => Ok(toml::from_str(content)?),
        "json" => Ok(serde_json::from_str(content)?),
        other => Err(ConfigError::UnsupportedFormat(other.to_string())),
    }
}

fn parse_number<T: std::str::FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::env_parse(var, "expected a non-negative integer"))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config, ApiaryConfig::default());
    }

    #[test]
    fn test_presets() {
        let config = ConfigLoader::new().with_development().load().unwrap();
        assert_eq!(config.logging.level, "debug");

        let config = ConfigLoader::new().with_production().load().unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_with_string_toml() {
        let config = ConfigLoader::new()
            .with_string("[server]\nmax_body_bytes = 1024\n", "TOML")
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(config.server.max_body_bytes, 1024);
        assert_eq!(config.server.http_addr, "127.0.0.1:8080");
    }

    #[test]
    fn test_unsupported_format() {
        let err = ConfigLoader::new().with_string("a: 1", "yaml").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ref f) if f == "yaml"));
    }

    #[test]
    fn test_missing_required_file() {
        let err = ConfigLoader::new()
            .with_file("/nonexistent/apiary.toml")
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_missing_optional_file() {
        assert!(ConfigLoader::new()
            .with_optional_file("/nonexistent/apiary.toml")
            .is_ok());
    }

    #[test]
    fn test_env_overrides() {
        env::set_var("APIARY_UNIT_ENV__SERVER__HTTP_ADDR", "127.0.0.1:9999");
        env::set_var("APIARY_UNIT_ENV__LOGGING__FORMAT", "pretty");
        env::set_var("APIARY_UNIT_ENV__LOGGING__ENABLED", "off");
        env::set_var("APIARY_UNIT_ENV__METRICS__ADDR", "ignored");

        let config = ConfigLoader::new()
            .with_env_prefix("apiary_unit_env")
            .load()
            .unwrap();

        assert_eq!(config.server.http_addr, "127.0.0.1:9999");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(!config.logging.enabled);
    }

    #[test]
    fn test_env_parse_error() {
        env::set_var("APIARY_UNIT_BAD__SERVER__MAX_BODY_BYTES", "lots");
        let err = ConfigLoader::new()
            .with_env_prefix("APIARY_UNIT_BAD")
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvParse { ref var, .. } if var == "APIARY_UNIT_BAD__SERVER__MAX_BODY_BYTES"));
    }

    #[test]
    fn test_load_validates() {
        let err = ConfigLoader::new()
            .with_string(r#"{"server": {"http_addr": "nowhere"}}"#, "json")
            .unwrap()
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
