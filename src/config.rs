use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use validator::Validate;

use crate::catalog::{Catalog, CatalogError};
use crate::query_chain::SanitizationRules;
use crate::result_shaper::ShapeMode;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Query builder configuration with validation
#[derive(Clone, Debug, Validate, Serialize, Deserialize)]
pub struct GluiConfig {
    /// YAML entity catalog; the built-in school catalog when absent
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// YAML sanitization rules, merged over the built-in rules
    #[serde(default)]
    pub sanitizer_rules_path: Option<PathBuf>,

    /// Result shape used when a session starts
    #[serde(default)]
    pub default_mode: ShapeMode,

    /// Maximum number of hops in a chain (1-64)
    #[validate(range(
        min = 1,
        max = 64,
        message = "Max chain length must be between 1 and 64"
    ))]
    #[serde(default = "default_max_chain_length")]
    pub max_chain_length: usize,
}

fn default_max_chain_length() -> usize {
    16
}

impl Default for GluiConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            sanitizer_rules_path: None,
            default_mode: ShapeMode::default(),
            max_chain_length: default_max_chain_length(),
        }
    }
}

impl GluiConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            catalog_path: env::var("GLUI_CATALOG").ok().map(PathBuf::from),
            sanitizer_rules_path: env::var("GLUI_SANITIZER_RULES").ok().map(PathBuf::from),
            default_mode: parse_env_var("GLUI_MODE", "nested")?,
            max_chain_length: parse_env_var("GLUI_MAX_CHAIN_LENGTH", "16")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from CLI arguments with validation
    pub fn from_cli(cli: CliConfig) -> Result<Self, ConfigError> {
        let config = Self {
            catalog_path: cli.catalog_path,
            sanitizer_rules_path: cli.sanitizer_rules_path,
            default_mode: cli.default_mode,
            max_chain_length: cli.max_chain_length,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Overlay the settings the CLI actually provided.
    pub fn merge(&mut self, other: CliConfig) {
        if other.catalog_path.is_some() {
            self.catalog_path = other.catalog_path;
        }
        if other.sanitizer_rules_path.is_some() {
            self.sanitizer_rules_path = other.sanitizer_rules_path;
        }
        self.default_mode = other.default_mode;
        self.max_chain_length = other.max_chain_length;
    }

    pub fn load_catalog(&self) -> Result<Catalog, ConfigError> {
        match &self.catalog_path {
            Some(path) => Ok(Catalog::from_yaml_file(path)?),
            None => Ok(Catalog::default()),
        }
    }

    pub fn load_rules(&self) -> Result<SanitizationRules, ConfigError> {
        let mut rules = SanitizationRules::default();
        if let Some(path) = &self.sanitizer_rules_path {
            rules.extend(SanitizationRules::from_yaml_file(path)?);
        }
        Ok(rules)
    }
}

/// CLI configuration (parsed from command line arguments)
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub catalog_path: Option<PathBuf>,
    pub sanitizer_rules_path: Option<PathBuf>,
    pub default_mode: ShapeMode,
    pub max_chain_length: usize,
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
