//! Command-line interface for the Caravan itinerary engine.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod ingest;
mod plan;

pub use error::CliError;

use ingest::{IngestArgs, run_ingest};
use plan::{Output, PlanArgs, run_plan};

const ARG_PLAN_REQUEST: &str = "request";
const ARG_PLAN_CATALOG: &str = "catalog";
const ARG_PLAN_GENERATOR_URL: &str = "generator-url";
const ARG_PLAN_GENERATOR_MODEL: &str = "generator-model";
const ARG_PLAN_GENERATOR_TIMEOUT: &str = "generator-timeout-secs";
const ARG_PLAN_SEED: &str = "seed";
const ENV_PLAN_REQUEST: &str = "CARAVAN_CMDS_PLAN_REQUEST_PATH";
const ENV_PLAN_CATALOG: &str = "CARAVAN_CMDS_PLAN_CATALOG";

const ARG_INGEST_CATALOG_JSON: &str = "catalog-json";
const ARG_INGEST_OUTPUT: &str = "output";
const ENV_INGEST_CATALOG_JSON: &str = "CARAVAN_CMDS_INGEST_CATALOG_JSON";

/// Run the Caravan CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when argument parsing, configuration layering or the
/// selected command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args, Output::Plans),
        Command::Probe(args) => run_plan(args, Output::Probe),
        Command::Ingest(args) => run_ingest(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "caravan",
    about = "Plan multi-city trips at three budget tiers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build premium, standard and economy itineraries for a trip request.
    Plan(PlanArgs),
    /// Report which budget tiers a trip request can afford.
    Probe(PlanArgs),
    /// Convert a JSON reference catalog into a SQLite database.
    Ingest(IngestArgs),
}

#[cfg(test)]
mod tests;
