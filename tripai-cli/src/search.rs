//! Search command implementation for the Tripai CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tripai_core::{DataResponse, ImageSearchRequest, ImageStore, RankedResult};
use tripai_ranker::{ImageSearchService, ScoreWeights, SimilarityRanker};
use tripai_store::SqliteImageStore;

use crate::{
    ARG_COLOR_WEIGHT, ARG_IMAGES_DB, ARG_LABEL_WEIGHT, ARG_SEARCH_REQUEST, CliError,
    DEFAULT_IMAGES_DB, ENV_SEARCH_REQUEST, load_json, require_existing,
};

/// CLI arguments for the `search` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank stored destination images against a search request. \
                 The request is a JSON object with a `labelList` array and a \
                 `color` string of `r,g,b` entries separated by `|`. The \
                 response envelope is printed as JSON.",
    about = "Search for similar destination images"
)]
#[ortho_config(prefix = "TRIPAI")]
pub(crate) struct SearchArgs {
    /// Path to a JSON file containing an image search request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to the SQLite image store (`images.db`).
    #[arg(long = ARG_IMAGES_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) images_db: Option<Utf8PathBuf>,
    /// Multiplier applied to each shared label.
    #[arg(long = ARG_LABEL_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) label_weight: Option<f64>,
    /// Multiplier applied to the averaged colour similarity.
    #[arg(long = ARG_COLOR_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) color_weight: Option<f64>,
}

impl SearchArgs {
    pub(crate) fn into_config(self) -> Result<SearchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SearchConfig::try_from(merged)
    }
}

/// Resolved `search` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SearchConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Path to the SQLite image store.
    pub(crate) images_db: Utf8PathBuf,
    /// Validated score weights.
    pub(crate) weights: ScoreWeights,
}

impl SearchConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_SEARCH_REQUEST)?;
        require_existing(&self.images_db, ARG_IMAGES_DB)?;
        Ok(())
    }
}

impl TryFrom<SearchArgs> for SearchConfig {
    type Error = CliError;

    fn try_from(args: SearchArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_SEARCH_REQUEST,
            env: ENV_SEARCH_REQUEST,
        })?;
        let images_db = args
            .images_db
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_IMAGES_DB));
        let weights = ScoreWeights {
            label: args.label_weight.unwrap_or(ScoreWeights::DEFAULT_LABEL),
            color: args.color_weight.unwrap_or(ScoreWeights::DEFAULT_COLOR),
        }
        .validate()?;

        Ok(Self {
            request_path,
            images_db,
            weights,
        })
    }
}

/// Opens the image store for the current search invocation.
pub(crate) trait SearchStoreBuilder {
    fn build(&self, config: &SearchConfig) -> Result<Box<dyn ImageStore>, CliError>;
}

pub(crate) struct SqliteStoreBuilder;

impl SearchStoreBuilder for SqliteStoreBuilder {
    fn build(&self, config: &SearchConfig) -> Result<Box<dyn ImageStore>, CliError> {
        let store = SqliteImageStore::open(config.images_db.as_std_path())?;
        Ok(Box::new(store))
    }
}

/// Run a search and write the response envelope to `writer`.
///
/// Rejected requests still write their error envelope before returning
/// [`CliError::RejectedRequest`].
pub(crate) fn run_search_with(
    args: SearchArgs,
    builder: &dyn SearchStoreBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_search_config(args)?;
    let request: ImageSearchRequest = load_json(&config.request_path, ARG_SEARCH_REQUEST)?;
    let store = builder.build(&config)?;
    let ranker = SimilarityRanker::with_weights(config.weights)?;
    let service = ImageSearchService::new(store, ranker);

    match service.search(&request) {
        Ok(response) => write_response(writer, &response),
        Err(err) => {
            write_response(writer, &DataResponse::<RankedResult>::error(err.result()))?;
            Err(CliError::RejectedRequest(err))
        }
    }
}

fn resolve_search_config(args: SearchArgs) -> Result<SearchConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn write_response(
    writer: &mut dyn Write,
    response: &DataResponse<RankedResult>,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(response).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SearchConfig, CliError> {
    let merged = SearchArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SearchConfig::try_from(merged)
}
