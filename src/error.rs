//! Error types for component generation
//!
//! Every variant of [`GenerationError`] is fatal: the run aborts and no document is handed
//! to the serializer. Non-fatal conditions are [`crate::pipeline::MetadataWarning`]s.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// A class carries a service marker but cannot be a service
    #[error(
        "Class {class} is marked as a service but {reason}. Only public non-abstract classes \
         are supported (exceptions excluded)"
    )]
    ServiceEligibility { class: String, reason: String },

    /// Operation name disambiguation could not produce a unique name
    #[error(
        "Could not generate a unique operation name for method {method} in class {class}, \
         please specify a unique operation name"
    )]
    AmbiguousName { method: String, class: String },

    /// The designated factory method does not have a factory shape
    #[error("Method {method} in class {class} is not a valid factory method: {reason}")]
    InvalidFactoryMethod {
        method: String,
        class: String,
        reason: String,
    },
}

/// Errors raised while loading a descriptor tree
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Descriptor source not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read descriptor source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse descriptor source {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Errors raised while loading a pre-existing component document
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read component document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse component document {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Component document {path} has unexpected root element <{found}>")]
    UnexpectedRoot { path: PathBuf, found: String },
}
