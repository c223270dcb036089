//! Colour similarity between a query palette and an image palette.
#![forbid(unsafe_code)]

use tripai_core::{Color, MAX_DISTANCE_SQUARED};

/// Similarity derived from a squared RGB distance.
///
/// Returns `1.0` for identical colours and `0.0` for opposite corners of the
/// RGB cube; the scale is linear in Euclidean distance.
#[expect(
    clippy::float_arithmetic,
    reason = "distance to similarity conversion is a ratio"
)]
#[must_use]
pub fn similarity_from_distance_squared(distance_squared: u32) -> f64 {
    let ratio = f64::from(distance_squared.min(MAX_DISTANCE_SQUARED)) / f64::from(MAX_DISTANCE_SQUARED);
    1.0 - ratio.sqrt()
}

/// Similarity between two colours in `0.0..=1.0`.
///
/// # Examples
/// ```
/// use tripai_core::Color;
/// use tripai_ranker::color_similarity;
///
/// assert_eq!(color_similarity(Color::new(9, 9, 9), Color::new(9, 9, 9)), 1.0);
/// assert_eq!(color_similarity(Color::new(0, 0, 0), Color::new(255, 255, 255)), 0.0);
/// ```
#[must_use]
pub fn color_similarity(left: Color, right: Color) -> f64 {
    similarity_from_distance_squared(left.distance_squared(right))
}

/// Similarity of `query` to its nearest colour in `palette`.
///
/// An empty palette yields `0.0`.
#[must_use]
pub fn best_match_similarity(query: Color, palette: &[Color]) -> f64 {
    palette
        .iter()
        .map(|candidate| query.distance_squared(*candidate))
        .min()
        .map_or(0.0, similarity_from_distance_squared)
}

/// Average best-match similarity of each query colour, in `0.0..=1.0`.
///
/// An empty query palette yields `0.0`.
#[expect(
    clippy::float_arithmetic,
    reason = "colour score averages per-colour similarities"
)]
#[must_use]
pub fn palette_similarity(query: &[Color], palette: &[Color]) -> f64 {
    if query.is_empty() {
        return 0.0;
    }
    let total: f64 = query
        .iter()
        .map(|color| best_match_similarity(*color, palette))
        .sum();
    total / crate::count_to_f64(query.len())
}
