//! Relative weighting between label matches and colour similarity.
#![forbid(unsafe_code)]

use crate::RankerError;

/// Multipliers applied to the label and colour components of a score.
///
/// The colour component lies in `0.0..=1.0`, so requiring
/// `label > color` guarantees that one additional shared label always
/// outranks any colour advantage.
///
/// # Examples
/// ```
/// use tripai_ranker::ScoreWeights;
///
/// let weights = ScoreWeights::default().validate().expect("defaults are valid");
/// assert_eq!(weights.combine(2.0, 1.0), 2.5);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScoreWeights {
    /// Multiplier applied to the number of shared labels.
    pub label: f64,
    /// Multiplier applied to the averaged colour similarity.
    pub color: f64,
}

impl ScoreWeights {
    /// Default label multiplier.
    pub const DEFAULT_LABEL: f64 = 1.0;
    /// Default colour multiplier.
    pub const DEFAULT_COLOR: f64 = 0.5;

    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`RankerError`] when either value is not finite, either value
    /// is negative, or the label weight does not exceed the colour weight.
    pub const fn validate(self) -> Result<Self, RankerError> {
        let Self { label, color } = self;
        if !label.is_finite() || !color.is_finite() {
            return Err(RankerError::NonFiniteWeight { label, color });
        }
        if label < 0.0 || color < 0.0 {
            return Err(RankerError::NegativeWeight { label, color });
        }
        if label <= color {
            return Err(RankerError::ColorNotDominated { label, color });
        }
        Ok(self)
    }

    /// Blend a label count and a colour similarity into a composite score.
    #[expect(
        clippy::float_arithmetic,
        reason = "composite scores are weighted sums"
    )]
    #[must_use]
    pub const fn combine(self, label_score: f64, color_score: f64) -> f64 {
        self.label * label_score + self.color * color_score
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            label: Self::DEFAULT_LABEL,
            color: Self::DEFAULT_COLOR,
        }
    }
}
