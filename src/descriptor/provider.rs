//! Source descriptor providers
//!
//! The generator only queries a provider; it never inspects source text itself. [`SourceTree`]
//! is the in-memory provider backed by a descriptor file (JSON or YAML) produced by an
//! upstream source introspection step.

use super::{ClassDescriptor, MemberDescriptor};
use crate::error::ProviderError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

pub trait DescriptorProvider {
    /// All classes that may become services, ordered by qualified name
    fn list_service_candidates(&self) -> Vec<&ClassDescriptor>;

    /// Members of a class in declaration order
    fn list_members<'a>(&'a self, class: &'a ClassDescriptor) -> &'a [MemberDescriptor] {
        &class.members
    }

    /// First class (by qualified name) implementing the given interface
    fn lookup_type_implementing(&self, marker: &str) -> Option<&ClassDescriptor> {
        self.list_service_candidates()
            .into_iter()
            .find(|class| class.implements(marker))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceTree {
    #[serde(default)]
    classes: Vec<ClassDescriptor>,
}

impl SourceTree {
    pub fn new(mut classes: Vec<ClassDescriptor>) -> Self {
        classes.sort_by(|a, b| a.qualified_name.cmp(&b.qualified_name));
        Self { classes }
    }

    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        let tree: SourceTree = serde_json::from_str(content)?;
        Ok(Self::new(tree.classes))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        let tree: SourceTree = serde_yaml::from_str(content)?;
        Ok(Self::new(tree.classes))
    }

    /// Loads a descriptor tree, choosing the format from the file extension
    pub fn load(path: &Path) -> Result<Self, ProviderError> {
        if !path.exists() {
            return Err(ProviderError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| ProviderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let parsed = if is_yaml {
            Self::from_yaml_str(&content).map_err(|e| e.to_string())
        } else {
            Self::from_json_str(&content).map_err(|e| e.to_string())
        };

        let tree = parsed.map_err(|message| ProviderError::Parse {
            path: path.to_path_buf(),
            message,
        })?;
        debug!(
            path = %path.display(),
            classes = tree.classes.len(),
            "Loaded descriptor tree"
        );
        Ok(tree)
    }

    pub fn classes(&self) -> &[ClassDescriptor] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl DescriptorProvider for SourceTree {
    fn list_service_candidates(&self) -> Vec<&ClassDescriptor> {
        self.classes.iter().collect()
    }
}
