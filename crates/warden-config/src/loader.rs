// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration loading and processing.
//!
//! # Loading Pipeline
//!
//! 1. Parse YAML/TOML/JSON file into [`WardenConfig`]
//! 2. Apply environment variable overrides
//! 3. Validate configuration
//!
//! # Environment Variable Override
//!
//! Gate scalars can be overridden without touching the file:
//!
//! ```text
//! WARDEN_LOGIN_PATH=/auth/signin
//! WARDEN_FALLBACK_PATH=/home
//! WARDEN_ORACLE_TIMEOUT_MS=2000
//! ```

use std::env;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};
use crate::schema::WardenConfig;

// =============================================================================
// ConfigFormat
// =============================================================================

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (`.yaml`, `.yml`).
    Yaml,
    /// TOML format (`.toml`).
    Toml,
    /// JSON format (`.json`).
    Json,
}

impl ConfigFormat {
    /// Determines the format from a file extension.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        match extension {
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::unsupported_format(other)),
        }
    }
}

// =============================================================================
// ConfigLoader
// =============================================================================

/// Configuration loader.
///
/// Loads configuration from YAML, TOML, or JSON files, with environment
/// variable overrides for the gate scalars.
///
/// # Examples
///
/// ```no_run
/// use warden_config::ConfigLoader;
///
/// let loader = ConfigLoader::new();
/// let config = loader.load("warden.yaml").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Environment variable prefix.
    env_prefix: String,

    /// Whether to apply environment variable overrides.
    resolve_env_vars: bool,
}

impl ConfigLoader {
    /// Creates a new configuration loader with default settings.
    pub fn new() -> Self {
        Self {
            env_prefix: "WARDEN".to_string(),
            resolve_env_vars: true,
        }
    }

    /// Sets the environment variable prefix.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Enables or disables environment variable overrides.
    pub fn with_env_vars(mut self, enabled: bool) -> Self {
        self.resolve_env_vars = enabled;
        self
    }

    /// Loads configuration from a file.
    ///
    /// The file format is determined by the file extension:
    /// - `.yaml` or `.yml` - YAML format
    /// - `.toml` - TOML format
    /// - `.json` - JSON format
    pub fn load(&self, path: impl AsRef<Path>) -> ConfigResult<WardenConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let format = ConfigFormat::from_path(path)?;

        let mut config = self
            .parse_str(&content, format)
            .map_err(|message| ConfigError::parse(path, message))?;

        if self.resolve_env_vars {
            self.apply_env_overrides(&mut config)?;
        }

        config.validate()?;

        info!("Configuration loaded successfully");
        debug!(
            "Loaded {} route rules, {} protected prefixes",
            config.routes.len(),
            config.gate.protected.len()
        );

        Ok(config)
    }

    /// Loads configuration from a string.
    pub fn load_from_str(
        &self,
        content: &str,
        format: ConfigFormat,
    ) -> ConfigResult<WardenConfig> {
        let mut config = self
            .parse_str(content, format)
            .map_err(|message| ConfigError::parse("<inline>", message))?;

        if self.resolve_env_vars {
            self.apply_env_overrides(&mut config)?;
        }

        config.validate()?;
        Ok(config)
    }

    fn parse_str(&self, content: &str, format: ConfigFormat) -> Result<WardenConfig, String> {
        match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        }
    }

    /// Applies environment variable overrides to gate scalars.
    fn apply_env_overrides(&self, config: &mut WardenConfig) -> ConfigResult<()> {
        if let Ok(value) = env::var(format!("{}_LOGIN_PATH", self.env_prefix)) {
            config.gate.login_path = value;
        }
        if let Ok(value) = env::var(format!("{}_FALLBACK_PATH", self.env_prefix)) {
            config.gate.fallback_path = value;
        }
        if let Ok(value) = env::var(format!("{}_ORACLE_TIMEOUT_MS", self.env_prefix)) {
            config.gate.oracle_timeout_ms = value.parse().map_err(|_| {
                ConfigError::invalid_env_var(
                    format!("{}_ORACLE_TIMEOUT_MS", self.env_prefix),
                    "expected a number of milliseconds",
                )
            })?;
        }
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Loads and validates configuration from a file with default settings.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<WardenConfig> {
    ConfigLoader::new().load(path)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const YAML: &str = r#"
gate:
  oracle_timeout_ms: 1500
  protected:
    - /mypage/*
routes:
  - pattern: /admin/*
    admin_only: true
"#;

    const TOML: &str = r#"
[gate]
oracle_timeout_ms = 1500
protected = ["/mypage/*"]

[[routes]]
pattern = "/admin/*"
admin_only = true
"#;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("temp file");
        file.write_all(content.as_bytes()).expect("write");
        file
    }

    // Env overrides read process globals, so loaders in tests disable them.
    fn loader() -> ConfigLoader {
        ConfigLoader::new().with_env_vars(false)
    }

    #[test]
    fn test_load_yaml_file() {
        let file = write_temp(".yaml", YAML);
        let config = loader().load(file.path()).unwrap();
        assert_eq!(config.gate.oracle_timeout_ms, 1500);
        assert_eq!(config.routes.len(), 1);
    }

    #[test]
    fn test_load_toml_file() {
        let file = write_temp(".toml", TOML);
        let config = loader().load(file.path()).unwrap();
        assert_eq!(config.gate.oracle_timeout_ms, 1500);
        assert_eq!(config.gate.protected, vec!["/mypage/*".to_string()]);
    }

    #[test]
    fn test_yaml_and_toml_agree() {
        let from_yaml = loader().load_from_str(YAML, ConfigFormat::Yaml).unwrap();
        let from_toml = loader().load_from_str(TOML, ConfigFormat::Toml).unwrap();
        assert_eq!(from_yaml, from_toml);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_temp(".ini", "whatever");
        assert!(matches!(
            loader().load(file.path()),
            Err(ConfigError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            loader().load("/nonexistent/warden.yaml"),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_invalid_content_is_parse_error() {
        let file = write_temp(".yaml", "gate: [not, a, mapping]");
        assert!(matches!(
            loader().load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_validation_runs_on_load() {
        let file = write_temp(".yaml", "gate:\n  oracle_timeout_ms: 0\n");
        assert!(matches!(
            loader().load(file.path()),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn test_env_override_applied() {
        let prefix = "WARDEN_LOADER_TEST";
        env::set_var(format!("{}_ORACLE_TIMEOUT_MS", prefix), "250");

        let config = ConfigLoader::new()
            .with_env_prefix(prefix)
            .load_from_str(YAML, ConfigFormat::Yaml)
            .unwrap();
        assert_eq!(config.gate.oracle_timeout_ms, 250);

        env::remove_var(format!("{}_ORACLE_TIMEOUT_MS", prefix));
    }

    #[test]
    fn test_invalid_env_override_rejected() {
        let prefix = "WARDEN_LOADER_BAD";
        env::set_var(format!("{}_ORACLE_TIMEOUT_MS", prefix), "soon");

        let result = ConfigLoader::new()
            .with_env_prefix(prefix)
            .load_from_str(YAML, ConfigFormat::Yaml);
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));

        env::remove_var(format!("{}_ORACLE_TIMEOUT_MS", prefix));
    }
}
