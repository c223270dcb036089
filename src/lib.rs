//! Facade crate for the Tripai image similarity engine.
//!
//! This crate re-exports the core domain types and the similarity ranker, and
//! exposes the SQLite image store behind a feature flag.

#![forbid(unsafe_code)]

pub use tripai_core::{
    CandidateImage, Color, ColorParseError, DataResponse, ImageQuery, ImageResult,
    ImageSearchRequest, ImageStore, LabelSet, RankedResult, Ranker, RecommendedImage,
    SearchRequestError, parse_colors,
};

pub use tripai_ranker::{
    ImageSearchService, RankerError, ScoreBreakdown, ScoreWeights, SimilarityRanker,
};

#[cfg(feature = "store-sqlite")]
pub use tripai_store::{
    PersistImagesError, SqliteImageStore, SqliteImageStoreError, persist_images_to_sqlite,
};
