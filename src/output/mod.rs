//! Component document model, serializers and prior-document loading

pub mod loader;
pub mod schema;
pub mod xml;

pub use loader::load_prior_document;
pub use schema::Component;

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Serialization format of the generated document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// LiveCycle `component.xml`
    #[default]
    Xml,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Xml => "xml",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }

    pub fn render(&self, component: &Component) -> Result<String> {
        match self {
            OutputFormat::Xml => Ok(xml::render_component(component)),
            OutputFormat::Json => serde_json::to_string_pretty(component)
                .context("Failed to serialize component to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(component).context("Failed to serialize component to YAML")
            }
        }
    }

    /// Renders the component and writes it, creating parent directories as needed
    pub fn write(&self, component: &Component, path: &Path) -> Result<()> {
        let rendered = self.render(component)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, rendered)
            .with_context(|| format!("Failed to write component document {}", path.display()))?;
        info!(path = %path.display(), format = self.as_str(), "Wrote component document");
        Ok(())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xml" => Ok(OutputFormat::Xml),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
