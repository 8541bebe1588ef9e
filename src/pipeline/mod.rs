//! Component assembly pipeline

pub mod diagnostics;
pub mod orchestrator;

pub use diagnostics::{Diagnostics, MetadataWarning};
pub use orchestrator::{ComponentAssembler, GenerationReport};
