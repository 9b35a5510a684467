//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use caravan_cli::CliError;

fn main() -> eyre::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    match caravan_cli::run() {
        Ok(()) => Ok(()),
        // Help, version and usage errors print through clap with its exit code.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(other) => Err(other.into()),
    }
}
