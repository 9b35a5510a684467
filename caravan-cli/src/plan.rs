//! `plan` and `probe` command implementation for the Caravan CLI.

use std::io::{BufReader, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use caravan_core::{
    ActivityGenerator, PlanError, PlanResult, Planner, ReferenceCatalog, ReferenceData,
    TripRequest,
};
use caravan_data::fs::{file_is_file, open_utf8_file};
use caravan_data::{HttpActivityGenerator, HttpActivityGeneratorConfig, load_catalog_json};
use caravan_planner::{ProbeReport, TripPlanner};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_PLAN_CATALOG, ARG_PLAN_GENERATOR_MODEL, ARG_PLAN_GENERATOR_TIMEOUT, ARG_PLAN_GENERATOR_URL,
    ARG_PLAN_REQUEST, ARG_PLAN_SEED, CliError, ENV_PLAN_CATALOG, ENV_PLAN_REQUEST,
};

/// CLI arguments shared by the `plan` and `probe` subcommands.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a trip described by a JSON-encoded TripRequest. Hotels, \
                 activities and distances come from a reference catalog (JSON, \
                 or SQLite when the file ends in .db or .sqlite); extra \
                 activities are proposed by an Ollama-compatible service."
)]
#[ortho_config(prefix = "CARAVAN")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a TripRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to the reference catalog (JSON or SQLite).
    #[arg(long = ARG_PLAN_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Base URL of the generation API (e.g. "http://localhost:11434/api").
    #[arg(long = ARG_PLAN_GENERATOR_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) generator_url: Option<String>,
    /// Model tag sent to the generation service.
    #[arg(long = ARG_PLAN_GENERATOR_MODEL, value_name = "name")]
    #[serde(default)]
    pub(crate) generator_model: Option<String>,
    /// Seconds to wait for each generation request.
    #[arg(long = ARG_PLAN_GENERATOR_TIMEOUT, value_name = "secs")]
    #[serde(default)]
    pub(crate) generator_timeout_secs: Option<u64>,
    /// Seed overriding the one in the request file.
    #[arg(long = ARG_PLAN_SEED, value_name = "n")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan`/`probe` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Path to the reference catalog.
    pub(crate) catalog: Utf8PathBuf,
    /// Generation service settings.
    pub(crate) generator: HttpActivityGeneratorConfig,
    /// Seed override.
    pub(crate) seed: Option<u64>,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_PLAN_REQUEST)?;
        require_existing(&self.catalog, ARG_PLAN_CATALOG)?;
        Ok(())
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;
        let catalog = args.catalog.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_CATALOG,
            env: ENV_PLAN_CATALOG,
        })?;

        let mut generator = HttpActivityGeneratorConfig::default();
        if let Some(base_url) = args.generator_url {
            generator.base_url = base_url;
        }
        if let Some(model) = args.generator_model {
            generator.model = model;
        }
        if let Some(secs) = args.generator_timeout_secs {
            generator.timeout = Duration::from_secs(secs);
        }

        Ok(Self {
            request_path,
            catalog,
            generator,
            seed: args.seed,
        })
    }
}

pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// What the command prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Output {
    /// The three tiered plans.
    Plans,
    /// The per-tier feasibility report.
    Probe,
}

/// Planning operations the CLI needs, independent of collaborator types.
pub(crate) trait TripPlanning {
    fn plans(&self, request: &TripRequest) -> Result<Vec<PlanResult>, PlanError>;
    fn probe(&self, request: &TripRequest) -> Result<ProbeReport, PlanError>;
}

impl<D, G> TripPlanning for TripPlanner<D, G>
where
    D: ReferenceData,
    G: ActivityGenerator,
{
    fn plans(&self, request: &TripRequest) -> Result<Vec<PlanResult>, PlanError> {
        self.generate_plans(request)
    }

    fn probe(&self, request: &TripRequest) -> Result<ProbeReport, PlanError> {
        TripPlanner::probe(self, request)
    }
}

/// Builds a planner for the current invocation.
pub(crate) trait PlannerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn TripPlanning>, CliError>;
}

pub(crate) struct DefaultPlannerBuilder;

impl PlannerBuilder for DefaultPlannerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn TripPlanning>, CliError> {
        let catalog = load_reference_catalog(&config.catalog)?;
        let generator =
            HttpActivityGenerator::with_config(config.generator.clone()).map_err(|source| {
                CliError::BuildActivityGenerator {
                    base_url: config.generator.base_url.clone(),
                    source,
                }
            })?;
        Ok(Box::new(TripPlanner::new(catalog, generator)))
    }
}

/// Load a catalog, choosing SQLite for `.db`/`.sqlite` files and JSON
/// otherwise.
pub(crate) fn load_reference_catalog(path: &Utf8Path) -> Result<ReferenceCatalog, CliError> {
    if is_sqlite_path(path) {
        return open_sqlite_catalog(path);
    }
    Ok(load_catalog_json(path)?)
}

fn is_sqlite_path(path: &Utf8Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("db") || ext.eq_ignore_ascii_case("sqlite"))
}

#[cfg(feature = "store-sqlite")]
fn open_sqlite_catalog(path: &Utf8Path) -> Result<ReferenceCatalog, CliError> {
    let store = caravan_core::SqliteReferenceStore::open(path.as_std_path())?;
    Ok(store.into_catalog())
}

#[cfg(not(feature = "store-sqlite"))]
fn open_sqlite_catalog(_path: &Utf8Path) -> Result<ReferenceCatalog, CliError> {
    Err(CliError::MissingFeature {
        feature: "store-sqlite",
        action: "reading a SQLite catalog",
    })
}

pub(crate) fn run_plan(args: PlanArgs, output: Output) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, output, &DefaultPlannerBuilder, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    output: Output,
    builder: &dyn PlannerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let mut request = load_trip_request(&config.request_path)?;
    if config.seed.is_some() {
        request.seed = config.seed;
    }
    let planner = builder.build(&config)?;
    match output {
        Output::Plans => {
            let plans = planner
                .plans(&request)
                .map_err(|source| CliError::Plan { source })?;
            log::info!("generated {} plans for {}", plans.len(), request.departure);
            write_json(writer, &plans)
        }
        Output::Probe => {
            let report = planner
                .probe(&request)
                .map_err(|source| CliError::Plan { source })?;
            write_json(writer, &report)
        }
    }
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`TripRequest`] from disk.
pub(crate) fn load_trip_request(path: &Utf8Path) -> Result<TripRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenTripRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseTripRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
