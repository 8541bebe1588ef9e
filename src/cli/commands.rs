use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Component descriptor generator for LiveCycle DSC services
#[derive(Parser, Debug)]
#[command(
    name = "dscgen",
    about = "Generates LiveCycle DSC component descriptors from source metadata",
    version,
    author,
    long_about = "dscgen reads a descriptor tree produced by source introspection and \
                  assembles a component document (component.xml) describing its services, \
                  operations and configuration parameters. Services are detected either \
                  from annotation markers or from javadoc-style doclet tags."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug output")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        help = "Quiet mode - suppress non-error output (overrides -v)"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Generate a component document",
        long_about = "Assembles the component document from a descriptor tree. Component-level \
                      values of an existing document are kept; services are always rebuilt.\n\n\
                      Examples:\n  \
                      dscgen generate --source target/descriptors.json\n  \
                      dscgen generate --strategy doclets --input component.xml\n  \
                      dscgen generate --format json --stdout"
    )]
    Generate(GenerateArgs),

    #[command(about = "List the available extraction strategies")]
    Strategies,
}

#[derive(Parser, Debug, Clone, Default)]
pub struct GenerateArgs {
    #[arg(
        short = 's',
        long,
        value_name = "STRATEGY",
        help = "Extraction strategy (annotations, doclets) [env: DSCGEN_STRATEGY]"
    )]
    pub strategy: Option<String>,

    #[arg(
        long,
        value_name = "PATH",
        help = "Descriptor tree, JSON or YAML [env: DSCGEN_SOURCE]"
    )]
    pub source: Option<PathBuf>,

    #[arg(
        short = 'i',
        long,
        value_name = "FILE",
        help = "Existing component document whose component-level values are kept"
    )]
    pub input: Option<PathBuf>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Where to write the generated document [env: DSCGEN_COMPONENT_FILE]"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, value_name = "ID", help = "Component id, overrides the existing document")]
    pub component_id: Option<String>,

    #[arg(
        long,
        value_name = "VERSION",
        help = "Component version, overrides the existing document"
    )]
    pub component_version: Option<String>,

    #[arg(
        long,
        value_name = "CATEGORY",
        help = "Auto-deploy category for services that do not name one"
    )]
    pub category: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "xml",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(long, help = "Print the document to stdout instead of writing a file")]
    pub stdout: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormatArg {
    #[default]
    Xml,
    Json,
    Yaml,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Xml => OutputFormat::Xml,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}
