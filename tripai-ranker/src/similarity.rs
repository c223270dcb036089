//! Label and colour similarity ranking.
#![forbid(unsafe_code)]

use tripai_core::{CandidateImage, ImageQuery, Ranker};

use crate::{RankerError, ScoreWeights, count_to_f64, palette_similarity};

/// Per-component view of a candidate's score.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// Number of labels shared with the query.
    pub label_matches: usize,
    /// Averaged colour similarity in `0.0..=1.0`.
    pub color_similarity: f64,
    /// Weighted composite used for ordering.
    pub composite: f64,
}

/// Ranker combining shared-label counts with colour similarity.
///
/// The composite score is
/// `label_weight × |query.labels ∩ image.labels| + color_weight × colour`,
/// where the colour term averages, over each query colour, the similarity of
/// the closest image colour.
///
/// # Examples
/// ```
/// use tripai_core::{CandidateImage, Color, ImageQuery, Ranker};
/// use tripai_ranker::SimilarityRanker;
///
/// let query = ImageQuery::new(["beach", "sunset"], vec![Color::new(255, 0, 0)]);
/// let candidates = vec![
///     CandidateImage::new(1, "u1", "Jeju")
///         .with_labels(["beach"])
///         .with_colors([Color::new(250, 10, 10)]),
///     CandidateImage::new(2, "u2", "Busan")
///         .with_labels(["beach", "sunset"])
///         .with_colors([Color::new(0, 0, 255)]),
/// ];
///
/// let ranked = SimilarityRanker::default().rank(&query, candidates);
/// assert_eq!(ranked.recommend_count(), 2);
/// assert_eq!(ranked.ids(), vec![2, 1]);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct SimilarityRanker {
    weights: ScoreWeights,
}

impl SimilarityRanker {
    /// Construct a ranker with validated weights.
    ///
    /// # Errors
    /// Returns [`RankerError`] when the weights fail
    /// [`ScoreWeights::validate`].
    pub fn with_weights(weights: ScoreWeights) -> Result<Self, RankerError> {
        Ok(Self {
            weights: weights.validate()?,
        })
    }

    /// Weights in use.
    #[must_use]
    pub const fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Score `candidate` and report each component.
    #[must_use]
    pub fn breakdown(&self, query: &ImageQuery, candidate: &CandidateImage) -> ScoreBreakdown {
        let label_matches = query.labels().overlap(candidate.labels.iter());
        let color_similarity = palette_similarity(query.colors(), &candidate.colors);
        ScoreBreakdown {
            label_matches,
            color_similarity,
            composite: self
                .weights
                .combine(count_to_f64(label_matches), color_similarity),
        }
    }
}

impl Ranker for SimilarityRanker {
    fn score(&self, query: &ImageQuery, candidate: &CandidateImage) -> f64 {
        self.breakdown(query, candidate).composite
    }
}
