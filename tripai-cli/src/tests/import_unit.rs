//! Focused unit tests covering import CLI configuration and persistence.

use super::helpers::{IMAGES_JSON, Workspace, write_utf8};
use super::*;
use crate::import::{ImportArgs, ImportConfig, import_images, run_import_with};
use camino::Utf8PathBuf;
use rstest::rstest;
use tripai_core::{ImageStore, LabelSet};
use tripai_store::SqliteImageStore;

#[rstest]
fn converting_import_without_source_errors() {
    let args = ImportArgs {
        source_path: None,
        ..ImportArgs::default()
    };

    let err = ImportConfig::try_from(args).expect_err("missing source should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_IMPORT_SOURCE);
            assert_eq!(env, ENV_IMPORT_SOURCE);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn import_config_defaults_database_path() {
    let args = ImportArgs {
        source_path: Some(Utf8PathBuf::from("images.json")),
        images_db: None,
    };

    let config = ImportConfig::try_from(args).expect("config should build");
    assert_eq!(config.images_db, Utf8PathBuf::from(DEFAULT_IMAGES_DB));
}

#[rstest]
fn validate_sources_reports_missing_source() {
    let workspace = Workspace::new();
    let config = ImportConfig {
        source_path: workspace.path("absent.json"),
        images_db: workspace.path("images.db"),
    };

    let err = config.validate_sources().expect_err("expected failure");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_IMPORT_SOURCE),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn import_images_persists_every_entry() {
    let workspace = Workspace::new();
    let source_path = workspace.path("images.json");
    write_utf8(&source_path, IMAGES_JSON.as_bytes());
    let config = ImportConfig {
        source_path,
        images_db: workspace.path("artefacts/images.db"),
    };

    let outcome = import_images(&config).expect("import should succeed");

    assert_eq!(outcome.image_count, 3);
    let store = SqliteImageStore::open(outcome.images_db.as_std_path()).expect("open store");
    let labels: LabelSet = ["beach"].into_iter().collect();
    let ids: Vec<u64> = store
        .lookup_by_any_label(&labels)
        .map(|image| image.id)
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[rstest]
fn import_images_rejects_invalid_json() {
    let workspace = Workspace::new();
    let source_path = workspace.path("images.json");
    write_utf8(&source_path, b"[{ not valid json");
    let config = ImportConfig {
        source_path: source_path.clone(),
        images_db: workspace.path("images.db"),
    };

    let err = import_images(&config).expect_err("invalid json should error");
    match err {
        CliError::ParseInput { field, path, .. } => {
            assert_eq!(field, ARG_IMPORT_SOURCE);
            assert_eq!(path, source_path);
        }
        other => panic!("expected ParseInput, found {other:?}"),
    }
}

#[rstest]
fn run_import_reports_summary() {
    let workspace = Workspace::new();
    let source_path = workspace.path("images.json");
    let images_db = workspace.path("images.db");
    write_utf8(&source_path, IMAGES_JSON.as_bytes());
    let args = ImportArgs {
        source_path: Some(source_path),
        images_db: Some(images_db.clone()),
    };
    let mut output = Vec::new();

    let outcome = run_import_with(args, &mut output).expect("import should succeed");

    assert_eq!(outcome.images_db, images_db);
    let printed = String::from_utf8(output).expect("utf-8 output");
    assert_eq!(printed, format!("imported 3 images into {images_db}\n"));
}
