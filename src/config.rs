//! Configuration management for dscgen
//!
//! Settings are loaded from environment variables with defaults and can be overridden by
//! command-line flags before validation.
//!
//! # Environment Variables
//!
//! - `DSCGEN_STRATEGY`: Extraction strategy (annotations|doclets, case-insensitive) - default: "annotations"
//! - `DSCGEN_SOURCE`: Descriptor tree (JSON or YAML) - default: "descriptors.json"
//! - `DSCGEN_COMPONENT_FILE`: Generated document path - default: "component.xml"
//! - `DSCGEN_INPUT_FILE`: Pre-existing component document - optional
//! - `DSCGEN_COMPONENT_ID`: Component id, overrides the prior document - optional
//! - `DSCGEN_COMPONENT_VERSION`: Component version, overrides the prior document - optional
//! - `DSCGEN_COMPONENT_CATEGORY`: Auto-deploy category for services without one - optional
//! - `DSCGEN_LOG_LEVEL`: Logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use dscgen::GeneratorConfig;
//!
//! let config = GeneratorConfig::default();
//! config.validate().expect("Invalid configuration");
//! let strategy = config.strategy_kind().unwrap().create(config.category.clone());
//! ```

use crate::output::schema::Component;
use crate::strategy::StrategyKind;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_STRATEGY: &str = "annotations";
const DEFAULT_SOURCE: &str = "descriptors.json";
const DEFAULT_COMPONENT_FILE: &str = "component.xml";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown extraction strategy name
    #[error("Invalid extraction strategy: {0}. Valid options: annotations, doclets")]
    InvalidStrategy(String),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Extraction strategy name, parsed by [`GeneratorConfig::strategy_kind`]
    pub strategy: String,

    /// Descriptor tree produced by source introspection
    pub source: PathBuf,

    /// Where the generated document is written
    pub component_file: PathBuf,

    /// Pre-existing component document whose scalars are kept
    pub input_file: Option<PathBuf>,

    pub component_id: Option<String>,

    pub component_version: Option<String>,

    /// Auto-deploy category used when a service does not name one
    pub category: Option<String>,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

fn non_blank_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Default for GeneratorConfig {
    /// Loads configuration from `DSCGEN_*` environment variables with defaults
    fn default() -> Self {
        let strategy = non_blank_var("DSCGEN_STRATEGY").unwrap_or_else(|| DEFAULT_STRATEGY.to_string());

        let source = non_blank_var("DSCGEN_SOURCE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE));

        let component_file = non_blank_var("DSCGEN_COMPONENT_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_COMPONENT_FILE));

        let input_file = non_blank_var("DSCGEN_INPUT_FILE").map(PathBuf::from);

        let log_level = non_blank_var("DSCGEN_LOG_LEVEL")
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            strategy,
            source,
            component_file,
            input_file,
            component_id: non_blank_var("DSCGEN_COMPONENT_ID"),
            component_version: non_blank_var("DSCGEN_COMPONENT_VERSION"),
            category: non_blank_var("DSCGEN_COMPONENT_CATEGORY"),
            log_level,
        }
    }
}

impl GeneratorConfig {
    pub fn strategy_kind(&self) -> Result<StrategyKind, ConfigError> {
        self.strategy.parse()
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown strategy, an unknown log level, or an output path
    /// that is the same as the input document.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.strategy_kind()?;

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        if self.component_file.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Component file path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Applies the configured id and version on top of the prior document's values
    pub fn apply_overrides(&self, component: &mut Component) {
        if let Some(id) = &self.component_id {
            component.id = Some(id.clone());
        }
        if let Some(version) = &self.component_version {
            component.version = Some(version.clone());
        }
    }

    /// Converts configuration to a display map for output formatting
    pub fn to_display_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert("strategy".to_string(), self.strategy.clone());
        map.insert("source".to_string(), self.source.display().to_string());
        map.insert(
            "component_file".to_string(),
            self.component_file.display().to_string(),
        );
        if let Some(ref input) = self.input_file {
            map.insert("input_file".to_string(), input.display().to_string());
        }
        if let Some(ref id) = self.component_id {
            map.insert("component_id".to_string(), id.clone());
        }
        if let Some(ref version) = self.component_version {
            map.insert("component_version".to_string(), version.clone());
        }
        if let Some(ref category) = self.category {
            map.insert("category".to_string(), category.clone());
        }
        map.insert("log_level".to_string(), self.log_level.clone());

        map
    }
}

impl fmt::Display for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generator Configuration:")?;
        writeln!(f, "  Strategy: {}", self.strategy)?;
        writeln!(f, "  Source: {}", self.source.display())?;
        writeln!(f, "  Component File: {}", self.component_file.display())?;
        if let Some(ref input) = self.input_file {
            writeln!(f, "  Input File: {}", input.display())?;
        }
        if let Some(ref id) = self.component_id {
            writeln!(f, "  Component Id: {}", id)?;
        }
        if let Some(ref version) = self.component_version {
            writeln!(f, "  Component Version: {}", version)?;
        }
        if let Some(ref category) = self.category {
            writeln!(f, "  Category: {}", category)?;
        }
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
