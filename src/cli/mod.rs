// CLI module
// Command-line and environment configuration

mod args;

pub use args::CliArgs;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// Every flag can also come from the environment (`DB_PATH`, `BIND_ADDR`,
/// `MAX_UPLOAD_BYTES`, `DB_MAX_CONNECTIONS`). On invalid arguments or
/// `--help`, clap prints a message and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
