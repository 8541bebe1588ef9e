pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, GenerateArgs, OutputFormatArg};
pub use handlers::{handle_generate, handle_strategies};
