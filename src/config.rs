//! Importer configuration file support
//!
//! Handles parsing of `.ellie-importer.toml` configuration files and
//! environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::model::TableSelection;
use crate::models::DuplicatePolicy;

/// Default configuration filename
pub const CONFIG_FILENAME: &str = ".ellie-importer.toml";

/// Environment variable for the API subdomain slug
pub const ENV_SLUG: &str = "ELLIE_SLUG";

/// Environment variable for the API key
pub const ENV_API_KEY: &str = "ELLIE_API_KEY";

/// Environment variable for the duplicate handling policy
pub const ENV_DUPLICATE_HANDLING: &str = "ELLIE_DUPLICATE_HANDLING";

/// Default name for created models
pub const DEFAULT_MODEL_NAME: &str = "Sample Model Name";

/// Default progress status for created models
pub const DEFAULT_PROGRESS_STATUS: &str = "Work in Progress";

/// Error reading or writing configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Configuration error: {0}")]
    ParseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Connection configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConnectionSection {
    /// Subdomain of the modeling service (`https://{slug}.ellie.ai`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// API key sent as the `token` query parameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Import configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSection {
    #[serde(default)]
    pub duplicate_handling: DuplicatePolicy,

    /// Include every constraint flag and descriptions in DOT diagrams
    #[serde(default)]
    pub full_metadata: bool,

    /// Entities to export; absent means all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<String>>,

    #[serde(default = "default_model_name")]
    pub model_name: String,

    #[serde(default = "default_progress_status")]
    pub progress_status: String,

    /// Target folder name for `publish`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
}

fn default_model_name() -> String {
    DEFAULT_MODEL_NAME.to_string()
}

fn default_progress_status() -> String {
    DEFAULT_PROGRESS_STATUS.to_string()
}

impl Default for ImportSection {
    fn default() -> Self {
        Self {
            duplicate_handling: DuplicatePolicy::default(),
            full_metadata: false,
            tables: None,
            model_name: default_model_name(),
            progress_status: default_progress_status(),
            folder: None,
        }
    }
}

impl ImportSection {
    pub fn selection(&self) -> TableSelection {
        TableSelection::from_option(self.tables.clone())
    }
}

/// Main configuration structure
///
/// Represents the `.ellie-importer.toml` configuration file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ImporterConfig {
    #[serde(default)]
    pub connection: ConnectionSection,

    #[serde(default)]
    pub import: ImportSection,
}

impl ImporterConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a directory
    ///
    /// Looks for `.ellie-importer.toml` in the directory.
    /// Falls back to defaults if not found.
    pub fn load(dir: &Path) -> ConfigResult<Self> {
        let mut config = Self::load_file(dir)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a directory without environment overrides
    pub fn load_file(dir: &Path) -> ConfigResult<Self> {
        let config_path = dir.join(CONFIG_FILENAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| ConfigError::IoError(format!("Failed to read config: {}", e)))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> ConfigResult<Self> {
        toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a directory
    pub fn save(&self, dir: &Path) -> ConfigResult<()> {
        let content = self.to_toml()?;
        std::fs::write(dir.join(CONFIG_FILENAME), content)
            .map_err(|e| ConfigError::IoError(format!("Failed to write config: {}", e)))
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize config: {}", e))
        })
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides read through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(slug) = lookup(ENV_SLUG) {
            self.connection.slug = Some(slug);
        }

        if let Some(key) = lookup(ENV_API_KEY) {
            self.connection.api_key = Some(key);
        }

        // Unknown policy names leave the file value in place
        if let Some(policy) = lookup(ENV_DUPLICATE_HANDLING)
            && let Ok(policy) = policy.parse()
        {
            self.import.duplicate_handling = policy;
        }
    }

    /// Check if configuration exists in a directory
    pub fn exists(dir: &Path) -> bool {
        dir.join(CONFIG_FILENAME).exists()
    }
}

/// Generate a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# Ellie Importer Configuration

[connection]
# Subdomain of your Ellie instance (https://<slug>.ellie.ai)
# slug = "acme"
# api_key = "..."

[import]
# "ignore-duplicates", "add-postfix" (default) or "combine-attributes"
duplicate_handling = "add-postfix"

# Show every constraint flag and descriptions in DOT diagrams
full_metadata = false

# Entities to export (all when omitted)
# tables = ["Orders", "Customers"]

model_name = "Sample Model Name"

# "Work in Progress", "Waiting for Approval", "Approved" or "In Production"
progress_status = "Work in Progress"

# Folder to publish into
# folder = "Sales"
"#
}
