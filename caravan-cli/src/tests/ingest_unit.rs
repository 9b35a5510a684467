//! Focused unit tests covering the ingest command.

use super::helpers::{utf8_tempdir, write_triangle_catalog, write_utf8};
use super::*;
use camino::Utf8PathBuf;
use caravan_data::CatalogError;
use rstest::rstest;

#[rstest]
fn converting_without_catalog_json_errors() {
    let err = IngestConfig::try_from(IngestArgs::default()).expect_err("missing catalog");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_INGEST_CATALOG_JSON);
            assert_eq!(env, ENV_INGEST_CATALOG_JSON);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn output_defaults_to_catalog_db() {
    let args = IngestArgs {
        catalog_json: Some(Utf8PathBuf::from("catalog.json")),
        output: None,
    };

    let config = IngestConfig::try_from(args).expect("config should build");

    assert_eq!(config.output, Utf8PathBuf::from("catalog.db"));
}

#[rstest]
fn ingest_writes_a_loadable_database() {
    let (_tmp, root) = utf8_tempdir();
    let catalog_json = root.join("catalog.json");
    write_triangle_catalog(&catalog_json);
    let config = IngestConfig {
        catalog_json,
        output: root.join("artefacts/catalog.db"),
    };

    execute_ingest(&config).expect("ingest should succeed");

    let catalog = load_reference_catalog(&config.output).expect("database should load");
    assert_eq!(
        catalog,
        load_reference_catalog(&config.catalog_json).expect("json should load")
    );
}

#[rstest]
fn ingest_reports_missing_source() {
    let (_tmp, root) = utf8_tempdir();
    let config = IngestConfig {
        catalog_json: root.join("absent.json"),
        output: root.join("catalog.db"),
    };

    let err = execute_ingest(&config).expect_err("missing source");

    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_INGEST_CATALOG_JSON),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
    assert!(!config.output.exists());
}

#[rstest]
fn ingest_surfaces_catalog_errors() {
    let (_tmp, root) = utf8_tempdir();
    let catalog_json = root.join("catalog.json");
    write_utf8(
        &catalog_json,
        br#"{"hotels": [{"city": "", "name": "Nowhere Inn", "price": 10}]}"#,
    );
    let config = IngestConfig {
        catalog_json,
        output: root.join("catalog.db"),
    };

    let err = execute_ingest(&config).expect_err("blank city");

    assert!(
        matches!(err, CliError::LoadCatalog(CatalogError::BlankName { .. })),
        "{err:?}"
    );
}
