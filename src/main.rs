use dscgen::cli::commands::{CliArgs, Commands};
use dscgen::cli::handlers::{handle_generate, handle_strategies};
use dscgen::util::logging::{init_logging, LoggingConfig};
use dscgen::VERSION;

use clap::Parser;
use std::env;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();

    let env_level = env::var("DSCGEN_LOG_LEVEL").ok();
    let level = args.log_level.as_deref().or(env_level.as_deref());
    init_logging(LoggingConfig::from_flags(level, args.verbose, args.quiet));

    debug!("dscgen v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Generate(generate_args) => handle_generate(generate_args, args.quiet),
        Commands::Strategies => handle_strategies(),
    };

    std::process::exit(exit_code);
}
