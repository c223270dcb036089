//! Rank candidate images for a query.
//!
//! The [`Ranker`] trait assigns a composite score to each
//! [`CandidateImage`](crate::CandidateImage) and orders them into a
//! [`RankedResult`].

use serde::{Deserialize, Serialize};

use crate::{CandidateImage, ImageQuery};

/// A recommended image as returned to the caller. The ranking score is not
/// exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedImage {
    /// Identifier of the stored image.
    pub id: u64,
    /// Location of the image file.
    pub url: String,
    /// Destination shown in the image.
    pub place: String,
}

impl From<CandidateImage> for RecommendedImage {
    fn from(image: CandidateImage) -> Self {
        Self {
            id: image.id,
            url: image.url,
            place: image.place,
        }
    }
}

/// Ordered recommendations with their count.
///
/// `recommend_count` always equals the length of `recommend_list`.
///
/// # Examples
/// ```
/// use tripai_core::RankedResult;
///
/// let result = RankedResult::empty();
/// assert_eq!(result.recommend_count(), 0);
/// assert!(result.recommend_list().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    recommend_count: usize,
    recommend_list: Vec<RecommendedImage>,
}

impl RankedResult {
    /// Wrap an already ordered list.
    #[must_use]
    pub fn new(recommend_list: Vec<RecommendedImage>) -> Self {
        Self {
            recommend_count: recommend_list.len(),
            recommend_list,
        }
    }

    /// A result with no recommendations.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            recommend_count: 0,
            recommend_list: Vec::new(),
        }
    }

    /// Number of recommendations.
    #[must_use]
    pub const fn recommend_count(&self) -> usize {
        self.recommend_count
    }

    /// Recommendations, best first.
    #[must_use]
    pub fn recommend_list(&self) -> &[RecommendedImage] {
        &self.recommend_list
    }

    /// Identifiers of the recommendations, best first.
    #[must_use]
    pub fn ids(&self) -> Vec<u64> {
        self.recommend_list.iter().map(|image| image.id).collect()
    }

    /// Consume the result and return the ordered list.
    #[must_use]
    pub fn into_list(self) -> Vec<RecommendedImage> {
        self.recommend_list
    }
}

struct ScoredCandidate {
    candidate: CandidateImage,
    score: f64,
}

/// Clamp a raw score for sorting.
///
/// Non-finite and non-positive values become `0.0`, so every score compares
/// consistently under [`f64::total_cmp`].
#[must_use]
pub const fn sanitise_score(score: f64) -> f64 {
    if score.is_finite() && score > 0.0 {
        score
    } else {
        0.0
    }
}

/// Score and order candidate images for a query.
///
/// Implementations must be thread-safe (`Send` + `Sync`) and pure: the score
/// depends only on the query and the candidate. Higher scores rank first.
///
/// # Examples
///
/// ```rust
/// use tripai_core::{CandidateImage, ImageQuery, Ranker};
///
/// struct IdRanker;
///
/// impl Ranker for IdRanker {
///     fn score(&self, _query: &ImageQuery, candidate: &CandidateImage) -> f64 {
///         candidate.id as f64
///     }
/// }
///
/// let query = ImageQuery::new(["beach"], Vec::new());
/// let candidates = vec![CandidateImage::new(1, "a", "A"), CandidateImage::new(2, "b", "B")];
/// let ranked = IdRanker.rank(&query, candidates);
/// assert_eq!(ranked.ids(), vec![2, 1]);
/// ```
pub trait Ranker: Send + Sync {
    /// Return the composite score for `candidate` under `query`.
    fn score(&self, query: &ImageQuery, candidate: &CandidateImage) -> f64;

    /// Score every candidate and sort by descending score.
    ///
    /// Equal scores keep their input order.
    fn rank(&self, query: &ImageQuery, candidates: Vec<CandidateImage>) -> RankedResult {
        let mut scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            .map(|candidate| ScoredCandidate {
                score: sanitise_score(self.score(query, &candidate)),
                candidate,
            })
            .collect();
        // `sort_by` is stable.
        scored.sort_by(|left, right| right.score.total_cmp(&left.score));
        RankedResult::new(
            scored
                .into_iter()
                .map(|entry| RecommendedImage::from(entry.candidate))
                .collect(),
        )
    }
}
