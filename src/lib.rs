//! dscgen - component descriptor generator for LiveCycle DSC services
//!
//! Reads class and member descriptors produced by source introspection and assembles the
//! `component.xml` document that declares a component's services, operations and
//! configuration parameters.
//!
//! # Core Concepts
//!
//! - **Descriptor Provider**: read-only view of the source tree ([`DescriptorProvider`],
//!   implemented by [`SourceTree`])
//! - **Extraction Strategy**: decides which classes and members take part and fills the
//!   document nodes, either from annotation markers or from doclet tags
//! - **Component Assembly**: walks services and operations, keeps operation names unique
//!   and merges the component-level values of an existing document
//!
//! # Example Usage
//!
//! ```no_run
//! use dscgen::{ComponentAssembler, SourceTree, StrategyKind};
//! use dscgen::output::OutputFormat;
//! use std::path::Path;
//!
//! fn generate() -> anyhow::Result<()> {
//!     let tree = SourceTree::load(Path::new("target/descriptors.json"))?;
//!     let strategy = StrategyKind::Doclets.create(None);
//!
//!     let report = ComponentAssembler::new(None).generate(None, strategy.as_ref(), &tree)?;
//!     for warning in &report.warnings {
//!         eprintln!("warning: {}", warning);
//!     }
//!
//!     OutputFormat::Xml.write(&report.component, Path::new("component.xml"))
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`descriptor`]: source descriptors and providers
//! - [`strategy`]: annotation and doclet extraction strategies
//! - [`pipeline`]: component assembly and warning collection
//! - [`output`]: document model, `component.xml` rendering and prior-document loading

pub mod cli;
pub mod config;
pub mod descriptor;
pub mod disambiguation;
pub mod error;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod strategy;
pub mod util;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{ConfigError, GeneratorConfig};
pub use descriptor::{ClassDescriptor, DescriptorProvider, MemberDescriptor, SourceTree};
pub use error::{DocumentError, GenerationError, ProviderError};
pub use output::schema::Component;
pub use pipeline::{ComponentAssembler, Diagnostics, GenerationReport, MetadataWarning};
pub use strategy::{ExtractionStrategy, StrategyKind};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
