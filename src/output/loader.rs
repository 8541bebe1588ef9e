//! Pre-existing component document loading
//!
//! Only component-level scalars are read back; services are always regenerated.

use super::schema::Component;
use crate::error::DocumentError;
use roxmltree::Document;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loads the scalars of a prior document, choosing the format from the file extension
///
/// XML is assumed for anything that is not `.json`, `.yaml` or `.yml`.
pub fn load_prior_document(path: &Path) -> Result<Component, DocumentError> {
    let content = fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let component = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str::<Component>(&content).map_err(|e| DocumentError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?,
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str::<Component>(&content).map_err(|e| DocumentError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        }
        _ => parse_component_xml(&content, path)?,
    };

    debug!(
        path = %path.display(),
        id = component.id.as_deref().unwrap_or("<none>"),
        "Loaded prior component document"
    );
    Ok(component.scalars_only())
}

/// Reads the component scalars of a `component.xml`
pub fn parse_component_xml(content: &str, path: &Path) -> Result<Component, DocumentError> {
    let doc = Document::parse(content).map_err(|e| DocumentError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let root = doc.root_element();
    if !root.has_tag_name("component") {
        return Err(DocumentError::UnexpectedRoot {
            path: path.to_path_buf(),
            found: root.tag_name().name().to_string(),
        });
    }

    let mut component = Component::new();
    for child in root.children().filter(|n| n.is_element()) {
        let text = child
            .text()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        match child.tag_name().name() {
            "component-id" => component.id = text,
            "version" => component.version = text,
            "bootstrap-class" => component.bootstrap_class = text,
            "lifecycle-class" => component.lifecycle_class = text,
            "class-path" => component.class_path = text,
            _ => {}
        }
    }
    Ok(component)
}
