//! Import command implementation for the Tripai CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tripai_core::CandidateImage;
use tripai_store::persist_images_to_sqlite;

use crate::{
    ARG_IMAGES_DB, ARG_IMPORT_SOURCE, CliError, DEFAULT_IMAGES_DB, ENV_IMPORT_SOURCE, load_json,
    require_existing,
};

/// CLI arguments for the `import` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Persist destination images into the SQLite image store. \
                 The source is a JSON array of images, each with an id, url, \
                 place, labels and RGB colours. Existing images with the same \
                 id are replaced.",
    about = "Import destination images from JSON"
)]
#[ortho_config(prefix = "TRIPAI")]
pub(crate) struct ImportArgs {
    /// Path to a JSON file containing an array of images.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) source_path: Option<Utf8PathBuf>,
    /// Path to the SQLite image store (`images.db`).
    #[arg(long = ARG_IMAGES_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) images_db: Option<Utf8PathBuf>,
}

impl ImportArgs {
    pub(crate) fn into_config(self) -> Result<ImportConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ImportConfig::try_from(merged)
    }
}

/// Resolved `import` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImportConfig {
    /// Path to the JSON image array.
    pub(crate) source_path: Utf8PathBuf,
    /// Destination SQLite database.
    pub(crate) images_db: Utf8PathBuf,
}

impl ImportConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.source_path, ARG_IMPORT_SOURCE)
    }
}

impl TryFrom<ImportArgs> for ImportConfig {
    type Error = CliError;

    fn try_from(args: ImportArgs) -> Result<Self, Self::Error> {
        let source_path = args.source_path.ok_or(CliError::MissingArgument {
            field: ARG_IMPORT_SOURCE,
            env: ENV_IMPORT_SOURCE,
        })?;
        let images_db = args
            .images_db
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_IMAGES_DB));
        Ok(Self {
            source_path,
            images_db,
        })
    }
}

/// Summary of a completed import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImportOutcome {
    /// Database the images were written to.
    pub(crate) images_db: Utf8PathBuf,
    /// Number of images written.
    pub(crate) image_count: usize,
}

pub(crate) fn run_import_with(
    args: ImportArgs,
    writer: &mut dyn Write,
) -> Result<ImportOutcome, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let outcome = import_images(&config)?;
    writeln!(
        writer,
        "imported {} images into {}",
        outcome.image_count, outcome.images_db
    )
    .map_err(CliError::WriteOutput)?;
    Ok(outcome)
}

pub(crate) fn import_images(config: &ImportConfig) -> Result<ImportOutcome, CliError> {
    let images: Vec<CandidateImage> = load_json(&config.source_path, ARG_IMPORT_SOURCE)?;
    debug!(
        "importing {} images from {}",
        images.len(),
        config.source_path
    );
    persist_images_to_sqlite(&config.images_db, &images).map_err(|source| {
        CliError::PersistImages {
            path: config.images_db.clone(),
            source,
        }
    })?;
    Ok(ImportOutcome {
        images_db: config.images_db.clone(),
        image_count: images.len(),
    })
}
