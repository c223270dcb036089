//! Similarity ranking for Tripai destination images.
//!
//! The crate provides two complementary capabilities:
//! - **Scoring**: [`SimilarityRanker`] implements the
//!   [`Ranker`](tripai_core::Ranker) trait. It counts labels shared between
//!   the query and each candidate and adds a weighted colour similarity
//!   derived from Euclidean RGB distance. [`ScoreWeights`] keeps the label
//!   component dominant so colour only reorders images with the same number
//!   of label matches.
//! - **Search**: [`ImageSearchService`] validates an
//!   [`ImageSearchRequest`](tripai_core::ImageSearchRequest), asks an
//!   [`ImageStore`](tripai_core::ImageStore) for label matches and wraps the
//!   ranking in a [`DataResponse`](tripai_core::DataResponse).
//!
//! Ranking is a pure computation; rankers hold only their weights and can be
//! shared across threads.

#![forbid(unsafe_code)]

mod color;
mod error;
mod search;
mod similarity;
mod weights;

pub use color::{
    best_match_similarity, color_similarity, palette_similarity, similarity_from_distance_squared,
};
pub use error::RankerError;
pub use search::ImageSearchService;
pub use similarity::{ScoreBreakdown, SimilarityRanker};
pub use weights::ScoreWeights;

#[expect(
    clippy::cast_precision_loss,
    reason = "label and colour counts stay far below 2^52"
)]
pub(crate) const fn count_to_f64(count: usize) -> f64 {
    count as f64
}
