//! Layered configuration loading.
//!
//! This module provides the [`ConfigLoader`] for loading configuration from
//! defaults, files, strings and environment variables.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::schema::LogFormat;
use crate::{ConfigError, TollwayConfig};

/// Configuration loader with a layered approach.
///
/// Layers are applied in order, later ones overriding earlier ones:
/// 1. Default values (or a preset)
/// 2. Configuration files and strings, merged key by key
/// 3. Environment variables
///
/// Each file or string layer is checked against the configuration shape as
/// soon as it is added, so unknown keys fail at the call that introduced them.
///
/// # Example
///
/// ```no_run
/// use tollway_config::ConfigLoader;
///
/// # fn main() -> Result<(), tollway_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_defaults()
///     .with_file("tollway.toml")?
///     .with_env_prefix("TOLLWAY")
///     .with_dotenv()?
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    base: TollwayConfig,
    layers: Map<String, Value>,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader starting from defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: TollwayConfig::default(),
            layers: Map::new(),
            env_prefix: None,
        }
    }

    /// Start from default configuration values.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.base = TollwayConfig::default();
        self
    }

    /// Start from the development preset.
    ///
    /// # Example
    ///
    /// ```
    /// use tollway_config::{ConfigLoader, LogFormat};
    ///
    /// let config = ConfigLoader::new().with_development().load().unwrap();
    /// assert_eq!(config.logging.format, LogFormat::Pretty);
    /// ```
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.base = TollwayConfig::development();
        self
    }

    /// Start from the production preset.
    #[must_use]
    pub fn with_production(mut self) -> Self {
        self.base = TollwayConfig::production();
        self
    }

    /// Merge a configuration file.
    ///
    /// The format is chosen by extension: `.toml` or `.json`.
    pub fn with_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;

        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;

        self.with_string(&content, &format)
    }

    /// Merge a configuration file if it exists.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Merge configuration from a string in `"toml"` or `"json"` format.
    ///
    /// # Example
    ///
    /// ```
    /// use tollway_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string("[app]\ntitle = \"Items\"", "toml")
    ///     .unwrap()
    ///     .with_string(r#"{"app": {"max_body_bytes": 512}}"#, "json")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.app.title, "Items");
    /// assert_eq!(config.app.max_body_bytes, 512);
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        let layer: Value = match format.to_lowercase().as_str() {
            "toml" => serde_json::to_value(toml::from_str::<toml::Table>(content)?)?,
            "json" => serde_json::from_str(content)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };

        serde_json::from_value::<TollwayConfig>(layer.clone())?;

        if let Value::Object(layer) = layer {
            merge(&mut self.layers, layer);
        }
        Ok(self)
    }

    /// Apply `PREFIX__SECTION__KEY` environment variables in [`load`](Self::load).
    ///
    /// For example, with prefix "TOLLWAY":
    /// - `TOLLWAY__APP__MAX_BODY_BYTES=2048`
    /// - `TOLLWAY__LOGGING__FORMAT=pretty`
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Load variables from a `.env` file in the current directory or its
    /// parents. A missing file is not an error; existing variables win.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if e.not_found() => Ok(self),
            Err(e) => Err(e.into()),
        }
    }

    /// Load variables from a specific `.env` file. Existing variables win.
    pub fn with_dotenv_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        dotenvy::from_path(path.as_ref())?;
        Ok(self)
    }

    /// Finalize: merge layers over the base, apply environment overrides and
    /// validate.
    pub fn load(self) -> Result<TollwayConfig, ConfigError> {
        let prefix = self.env_prefix.clone();
        let mut config = self.load_unvalidated()?;

        if let Some(prefix) = prefix {
            let vars: BTreeMap<String, String> = env::vars()
                .filter(|(k, _)| k.starts_with(&format!("{prefix}__")))
                .collect();
            for (key, value) in &vars {
                apply_env_var(&mut config, key, value, &prefix)?;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Merge layers over the base without environment overrides or validation.
    pub fn load_unvalidated(self) -> Result<TollwayConfig, ConfigError> {
        let Value::Object(mut merged) = serde_json::to_value(&self.base)? else {
            return Ok(self.base);
        };
        merge(&mut merged, self.layers);
        Ok(serde_json::from_value(Value::Object(merged))?)
    }
}

/// Deep-merges `layer` into `target`; tables merge, everything else replaces.
fn merge(target: &mut Map<String, Value>, layer: Map<String, Value>) {
    for (key, value) in layer {
        match (target.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => merge(existing, incoming),
            (_, value) => {
                target.insert(key, value);
            }
        }
    }
}

fn apply_env_var(
    config: &mut TollwayConfig,
    key: &str,
    value: &str,
    prefix: &str,
) -> Result<(), ConfigError> {
    let key_without_prefix = key
        .strip_prefix(prefix)
        .and_then(|k| k.strip_prefix("__"))
        .ok_or_else(|| ConfigError::env_parse_error(key, "invalid key format"))?;

    let parts: Vec<&str> = key_without_prefix.split("__").collect();

    match parts.as_slice() {
        ["APP", "TITLE"] => {
            config.app.title = value.to_string();
        }
        ["APP", "MAX_BODY_BYTES"] => {
            config.app.max_body_bytes = value
                .parse()
                .map_err(|_| ConfigError::env_parse_error(key, "expected integer"))?;
        }
        ["APP", "VALIDATE_RESPONSES"] => {
            config.app.validate_responses = parse_bool(value)
                .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
        }

        ["LOGGING", "ENABLED"] => {
            config.logging.enabled = parse_bool(value)
                .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
        }
        ["LOGGING", "LEVEL"] => {
            config.logging.level = value.to_string();
        }
        ["LOGGING", "FORMAT"] => {
            config.logging.format = match value.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" => LogFormat::Pretty,
                _ => {
                    return Err(ConfigError::env_parse_error(
                        key,
                        "expected 'json' or 'pretty'",
                    ))
                }
            };
        }
        ["LOGGING", "FILE_LINE_INFO"] => {
            config.logging.file_line_info = parse_bool(value)
                .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
        }

        ["METRICS", "ENABLED"] => {
            config.metrics.enabled = parse_bool(value)
                .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
        }

        _ => {}
    }

    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
