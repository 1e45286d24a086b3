//! CLI configuration management
//!
//! Handles loading and saving CLI-specific configuration.

use anyhow::{Context, Result};
use ans_core::{FieldSet, Fields};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::format::{Currency, OutputFormat};

/// Environment variables read by [`ConfigBuilder::with_env_overrides`]
pub const ENV_API_URL: &str = "ANS_API_URL";
pub const ENV_API_KEY: &str = "ANS_API_KEY";
pub const ENV_FORMAT: &str = "ANS_FORMAT";
pub const ENV_CURRENCY: &str = "ANS_CURRENCY";
pub const ENV_VERBOSE: &str = "ANS_VERBOSE";
pub const ENV_TIMEOUT: &str = "ANS_TIMEOUT";

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CliConfig {
    /// Base URL of the API
    pub api_url: String,

    /// API key sent in the Authorization header
    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_key: String,

    /// Default output format
    pub output_format: String,

    /// Currency used for monetary columns
    pub currency: String,

    /// Fail on unknown `--property` names
    pub strict_properties: bool,

    /// Enable verbose logging by default
    pub verbose: bool,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.ukfast.io".to_string(),
            api_key: String::new(),
            output_format: "table".to_string(),
            currency: "GBP".to_string(),
            strict_properties: false,
            verbose: false,
            timeout: 30,
        }
    }
}

impl CliConfig {
    /// Load configuration from `path`, or the default location.
    ///
    /// A missing file yields the defaults; nothing is written.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(&config_path).context("Failed to read CLI config file")?;
        toml::from_str(&content).context("Failed to parse CLI config file")
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize CLI config")?;
        std::fs::write(path, content).context("Failed to write CLI config file")?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine config directory"))?;
        Ok(config_dir.join("ans").join("cli.toml"))
    }

    /// Parsed output format; the value is validated when the config is built.
    pub fn format(&self) -> OutputFormat {
        self.output_format.parse().unwrap_or(OutputFormat::Table)
    }

    /// Parsed currency; the value is validated when the config is built.
    pub fn currency(&self) -> Currency {
        self.currency.parse().unwrap_or_default()
    }

    /// Update a single key, validating the value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_url" => {
                ConfigBuilder::validate_url(value)?;
                self.api_url = value.to_string();
            }
            "api_key" => self.api_key = value.to_string(),
            "output_format" => {
                ConfigBuilder::validate_output_format(value)?;
                self.output_format = value.to_string();
            }
            "currency" => {
                ConfigBuilder::validate_currency(value)?;
                self.currency = value.to_ascii_uppercase();
            }
            "strict_properties" => self.strict_properties = parse_bool(value),
            "verbose" => self.verbose = parse_bool(value),
            "timeout" => {
                let timeout = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid timeout value. Must be a number"))?;
                ConfigBuilder::validate_timeout(timeout)?;
                self.timeout = timeout;
            }
            _ => return Err(anyhow::anyhow!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    /// Create a new builder for constructing configuration
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

impl Fields for CliConfig {
    const DEFAULT_COLUMNS: &'static [&'static str] = &[
        "api_url",
        "api_key",
        "output_format",
        "currency",
        "strict_properties",
        "verbose",
        "timeout",
    ];

    fn fields(&self) -> FieldSet {
        let mut set = FieldSet::new();
        set.add("api_url", &self.api_url)
            .add("api_key", &self.api_key)
            .add("output_format", &self.output_format)
            .add("currency", &self.currency)
            .add("strict_properties", self.strict_properties)
            .add("verbose", self.verbose)
            .add("timeout", format!("{}s", self.timeout));
        set
    }
}

fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

/// Builder for CLI configuration with validation and priority chain support
///
/// Priority chain (lowest to highest):
/// 1. Defaults
/// 2. Config file
/// 3. Environment variables
/// 4. CLI arguments
///
/// Sources are applied highest first; each only fills values still unset.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    api_url: Option<String>,
    api_key: Option<String>,
    output_format: Option<String>,
    currency: Option<String>,
    strict_properties: Option<bool>,
    verbose: Option<bool>,
    timeout: Option<u64>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set API URL (with validation)
    pub fn with_api_url(mut self, url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        Self::validate_url(&url)?;
        self.api_url = Some(url);
        Ok(self)
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set output format (with validation)
    pub fn with_output_format(mut self, format: impl Into<String>) -> Result<Self> {
        let format = format.into();
        Self::validate_output_format(&format)?;
        self.output_format = Some(format);
        Ok(self)
    }

    /// Set currency (with validation)
    pub fn with_currency(mut self, currency: impl Into<String>) -> Result<Self> {
        let currency = currency.into();
        Self::validate_currency(&currency)?;
        self.currency = Some(currency.to_ascii_uppercase());
        Ok(self)
    }

    pub fn with_strict_properties(mut self, strict: bool) -> Self {
        self.strict_properties = Some(strict);
        self
    }

    /// Set verbose flag
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Set timeout (with validation)
    pub fn with_timeout(mut self, timeout: u64) -> Result<Self> {
        Self::validate_timeout(timeout)?;
        self.timeout = Some(timeout);
        Ok(self)
    }

    /// Fill unset values from the config file.
    ///
    /// An unreadable default file is skipped; an explicitly named one must load.
    pub fn with_config_file(self, load_file: bool, path: Option<&Path>) -> Result<Self> {
        if !load_file {
            return Ok(self);
        }

        let config = match CliConfig::load(path) {
            Ok(config) => config,
            Err(e) if path.is_some() => return Err(e),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring unreadable config file");
                return Ok(self);
            }
        };

        Ok(Self {
            api_url: self.api_url.or(Some(config.api_url)),
            api_key: self
                .api_key
                .or_else(|| Some(config.api_key).filter(|k| !k.is_empty())),
            output_format: self.output_format.or(Some(config.output_format)),
            currency: self.currency.or(Some(config.currency)),
            strict_properties: self.strict_properties.or(Some(config.strict_properties)),
            verbose: self.verbose.or(Some(config.verbose)),
            timeout: self.timeout.or(Some(config.timeout)),
        })
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(mut self) -> Self {
        // Only apply env vars if values weren't already set (preserving priority)
        if self.api_url.is_none() {
            if let Ok(url) = std::env::var(ENV_API_URL) {
                if Self::validate_url(&url).is_ok() {
                    self.api_url = Some(url);
                }
            }
        }

        if self.api_key.is_none() {
            if let Ok(key) = std::env::var(ENV_API_KEY) {
                if !key.is_empty() {
                    self.api_key = Some(key);
                }
            }
        }

        if self.output_format.is_none() {
            if let Ok(format) = std::env::var(ENV_FORMAT) {
                if Self::validate_output_format(&format).is_ok() {
                    self.output_format = Some(format);
                }
            }
        }

        if self.currency.is_none() {
            if let Ok(currency) = std::env::var(ENV_CURRENCY) {
                if Self::validate_currency(&currency).is_ok() {
                    self.currency = Some(currency.to_ascii_uppercase());
                }
            }
        }

        if self.verbose.is_none() {
            if let Ok(verbose) = std::env::var(ENV_VERBOSE) {
                self.verbose = Some(parse_bool(&verbose));
            }
        }

        if self.timeout.is_none() {
            if let Ok(timeout) = std::env::var(ENV_TIMEOUT) {
                if let Ok(timeout) = timeout.parse() {
                    if Self::validate_timeout(timeout).is_ok() {
                        self.timeout = Some(timeout);
                    }
                }
            }
        }

        self
    }

    /// Build the final configuration with validation
    pub fn build(self) -> Result<CliConfig> {
        let defaults = CliConfig::default();

        let api_url = self.api_url.unwrap_or(defaults.api_url);
        let output_format = self.output_format.unwrap_or(defaults.output_format);
        let currency = self.currency.unwrap_or(defaults.currency);
        let timeout = self.timeout.unwrap_or(defaults.timeout);

        // Validate final values
        Self::validate_url(&api_url)?;
        Self::validate_output_format(&output_format)?;
        Self::validate_currency(&currency)?;
        Self::validate_timeout(timeout)?;

        Ok(CliConfig {
            api_url,
            api_key: self.api_key.unwrap_or(defaults.api_key),
            output_format,
            currency,
            strict_properties: self.strict_properties.unwrap_or(defaults.strict_properties),
            verbose: self.verbose.unwrap_or(defaults.verbose),
            timeout,
        })
    }

    /// Validate URL format
    fn validate_url(url: &str) -> Result<()> {
        if url.is_empty() {
            return Err(anyhow::anyhow!("API URL cannot be empty"));
        }

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(anyhow::anyhow!("API URL must start with http:// or https://"));
        }

        Ok(())
    }

    /// Validate output format
    fn validate_output_format(format: &str) -> Result<()> {
        format.parse::<OutputFormat>()?;
        Ok(())
    }

    fn validate_currency(currency: &str) -> Result<()> {
        currency.parse::<Currency>()?;
        Ok(())
    }

    /// Validate timeout value
    fn validate_timeout(timeout: u64) -> Result<()> {
        if timeout == 0 {
            return Err(anyhow::anyhow!("Timeout must be greater than 0"));
        }

        if timeout > 300 {
            return Err(anyhow::anyhow!(
                "Timeout must be less than or equal to 300 seconds"
            ));
        }

        Ok(())
    }
}
