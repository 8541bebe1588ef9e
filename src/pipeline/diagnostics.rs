//! Non-fatal metadata warnings collected during a generation run

use thiserror::Error;
use tracing::warn;

/// Malformed metadata that degrades to an omitted field instead of failing the run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataWarning {
    #[error("{field} version of service {class} should be an integer, but was \"{value}\"; the field is omitted")]
    MalformedVersion {
        class: String,
        field: String,
        value: String,
    },

    #[error("@{tag} tag \"{value}\" on {class}.{member} has no comment after its key and is ignored")]
    MalformedTagComment {
        class: String,
        member: String,
        tag: String,
        value: String,
    },

    #[error("Class {class} has more than one factory method; {used} is used and {ignored} is ignored")]
    MultipleFactoryMethods {
        class: String,
        used: String,
        ignored: String,
    },

    #[error("Unknown request processing strategy \"{value}\" on service {class}; the field is omitted")]
    UnknownRequestStrategy { class: String, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    warnings: Vec<MetadataWarning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs the warning and keeps it for the run report
    pub fn record(&mut self, warning: MetadataWarning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[MetadataWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<MetadataWarning> {
        self.warnings
    }
}
