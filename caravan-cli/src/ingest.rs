//! `ingest` command: convert a JSON catalog into the SQLite layout.

use camino::Utf8PathBuf;
use caravan_data::{load_catalog_json, persist_catalog_to_sqlite};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::plan::require_existing;
use crate::{ARG_INGEST_CATALOG_JSON, ARG_INGEST_OUTPUT, CliError, ENV_INGEST_CATALOG_JSON};

/// Database written when `--output` is not given.
const DEFAULT_OUTPUT: &str = "catalog.db";

/// CLI arguments for the `ingest` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Validate a JSON reference catalog and write it into a SQLite \
                 database that `plan --catalog` can open. Paths can come from \
                 CLI flags, configuration files, or environment variables."
)]
#[ortho_config(prefix = "CARAVAN")]
pub(crate) struct IngestArgs {
    /// Path to the JSON catalog.
    #[arg(long = ARG_INGEST_CATALOG_JSON, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_json: Option<Utf8PathBuf>,
    /// Destination SQLite database (defaults to `catalog.db`).
    #[arg(long = ARG_INGEST_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl IngestArgs {
    fn into_config(self) -> Result<IngestConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        IngestConfig::try_from(merged)
    }
}

/// Resolved `ingest` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IngestConfig {
    pub(crate) catalog_json: Utf8PathBuf,
    pub(crate) output: Utf8PathBuf,
}

impl TryFrom<IngestArgs> for IngestConfig {
    type Error = CliError;

    fn try_from(args: IngestArgs) -> Result<Self, Self::Error> {
        let catalog_json = args.catalog_json.ok_or(CliError::MissingArgument {
            field: ARG_INGEST_CATALOG_JSON,
            env: ENV_INGEST_CATALOG_JSON,
        })?;
        let output = args
            .output
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT));
        Ok(Self {
            catalog_json,
            output,
        })
    }
}

pub(crate) fn run_ingest(args: IngestArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_ingest(&config)
}

pub(crate) fn execute_ingest(config: &IngestConfig) -> Result<(), CliError> {
    require_existing(&config.catalog_json, ARG_INGEST_CATALOG_JSON)?;
    let catalog = load_catalog_json(&config.catalog_json)?;
    persist_catalog_to_sqlite(&config.output, &catalog).map_err(|source| {
        CliError::PersistCatalog {
            path: config.output.clone(),
            source,
        }
    })?;
    log::info!("ingested {} into {}", config.catalog_json, config.output);
    Ok(())
}
