//! Command-line interface for importing and searching Tripai destination
//! images.
#![forbid(unsafe_code)]

use std::io::BufReader;

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tripai_store::fs::{file_is_file, open_utf8_file};

mod error;
mod import;
mod search;

pub use error::CliError;

use import::ImportArgs;
use search::SearchArgs;

const ARG_IMPORT_SOURCE: &str = "source";
const ARG_SEARCH_REQUEST: &str = "request";
const ARG_IMAGES_DB: &str = "images-db";
const ARG_LABEL_WEIGHT: &str = "label-weight";
const ARG_COLOR_WEIGHT: &str = "color-weight";
const ENV_IMPORT_SOURCE: &str = "TRIPAI_CMDS_IMPORT_SOURCE_PATH";
const ENV_SEARCH_REQUEST: &str = "TRIPAI_CMDS_SEARCH_REQUEST_PATH";
const DEFAULT_IMAGES_DB: &str = "images.db";

/// Run the Tripai CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration, import or
/// search fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Import(args) => import::run_import_with(args, &mut stdout).map(|_| ()),
        Command::Search(args) => {
            search::run_search_with(args, &search::SqliteStoreBuilder, &mut stdout)
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "tripai",
    about = "Import destination images and rank them by label and colour similarity",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Persist images from a JSON file into the SQLite image store.
    Import(ImportArgs),
    /// Rank stored images against a JSON search request.
    Search(SearchArgs),
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
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

/// Decode a JSON document from `path`, naming `field` in errors.
fn load_json<T>(path: &Utf8Path, field: &'static str) -> Result<T, CliError>
where
    T: DeserializeOwned,
{
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInput {
        field,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseInput {
        field,
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests;
