//! Command handlers
//!
//! Each handler returns the process exit code; fatal errors are printed with their full
//! context chain.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

use super::commands::GenerateArgs;
use super::output::{format_strategies, format_summary};
use crate::config::GeneratorConfig;
use crate::descriptor::SourceTree;
use crate::output::{load_prior_document, Component, OutputFormat};
use crate::pipeline::{ComponentAssembler, GenerationReport};
use crate::progress::LoggingHandler;
use crate::validation::Validator;

pub fn handle_generate(args: &GenerateArgs, quiet: bool) -> i32 {
    let config = config_from_args(args);
    let format = OutputFormat::from(args.format);

    match run_generate(&config, format, args.stdout) {
        Ok(report) => {
            if !quiet {
                let destination = if args.stdout {
                    None
                } else {
                    Some(config.component_file.display().to_string())
                };
                eprint!("{}", format_summary(&report, destination.as_deref()));
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

pub fn handle_strategies() -> i32 {
    print!("{}", format_strategies());
    0
}

/// Environment configuration with command-line flags layered on top
pub fn config_from_args(args: &GenerateArgs) -> GeneratorConfig {
    let mut config = GeneratorConfig::default();
    if let Some(strategy) = &args.strategy {
        config.strategy = strategy.clone();
    }
    if let Some(source) = &args.source {
        config.source = source.clone();
    }
    if let Some(output) = &args.output {
        config.component_file = output.clone();
    }
    if args.input.is_some() {
        config.input_file = args.input.clone();
    }
    if args.component_id.is_some() {
        config.component_id = args.component_id.clone();
    }
    if args.component_version.is_some() {
        config.component_version = args.component_version.clone();
    }
    if args.category.is_some() {
        config.category = args.category.clone();
    }
    config
}

/// Runs one generation: load, assemble, validate, write
pub fn run_generate(
    config: &GeneratorConfig,
    format: OutputFormat,
    to_stdout: bool,
) -> Result<GenerationReport> {
    config.validate().context("Invalid configuration")?;
    debug!("{}", config);

    let kind = config.strategy_kind()?;
    let strategy = kind.create(config.category.clone());
    let tree = SourceTree::load(&config.source).context("Failed to load source descriptors")?;
    info!(
        source = %config.source.display(),
        classes = tree.len(),
        strategy = %kind,
        "Loaded source descriptors"
    );

    let mut prior = match &config.input_file {
        Some(path) => load_prior(path)?,
        None => Component::new(),
    };
    config.apply_overrides(&mut prior);

    let report = ComponentAssembler::new(Some(LoggingHandler))
        .generate(Some(&prior), strategy.as_ref(), &tree)
        .context("Component generation failed")?;

    Validator::new()
        .validate(&report.component)
        .context("Generated component is invalid")?;

    if to_stdout {
        print!("{}", format.render(&report.component)?);
    } else {
        format.write(&report.component, &config.component_file)?;
    }
    Ok(report)
}

fn load_prior(path: &Path) -> Result<Component> {
    if !path.exists() {
        debug!(path = %path.display(), "No existing component document");
        return Ok(Component::new());
    }
    load_prior_document(path)
        .with_context(|| format!("Failed to load existing component document {}", path.display()))
}
