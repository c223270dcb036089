//! Property-based tests for the similarity ranker.
//!
//! # Invariants tested
//!
//! - **Count:** `recommend_count` equals the number of candidates.
//! - **Label dominance:** an image sharing more labels never ranks below one
//!   sharing fewer.
//! - **Stability:** identical candidates keep their input order.
//! - **Bounds:** colour similarity stays within `0.0..=1.0`.

use proptest::prelude::*;
use tripai_core::{CandidateImage, Color, ImageQuery, Ranker};
use tripai_ranker::{SimilarityRanker, palette_similarity};

const LABELS: [&str; 5] = ["beach", "sunset", "forest", "city", "snow"];

fn color_strategy() -> impl Strategy<Value = Color> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Color::new(r, g, b))
}

fn label_subset_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::sample::subsequence(LABELS.to_vec(), 0..=LABELS.len())
}

fn candidate_strategy() -> impl Strategy<Value = (Vec<&'static str>, Vec<Color>)> {
    (
        label_subset_strategy(),
        proptest::collection::vec(color_strategy(), 0..4),
    )
}

fn build_candidates(specs: Vec<(Vec<&'static str>, Vec<Color>)>) -> Vec<CandidateImage> {
    specs
        .into_iter()
        .zip(1_u64..)
        .map(|((labels, colors), id)| {
            CandidateImage::new(id, format!("https://img.example/{id}.jpg"), "place")
                .with_labels(labels)
                .with_colors(colors)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: ranking neither drops nor duplicates candidates.
    #[test]
    fn ranking_preserves_every_candidate(
        query_labels in label_subset_strategy(),
        query_colors in proptest::collection::vec(color_strategy(), 0..4),
        specs in proptest::collection::vec(candidate_strategy(), 0..12),
    ) {
        let query = ImageQuery::new(query_labels, query_colors);
        let candidates = build_candidates(specs);
        let mut expected: Vec<u64> = candidates.iter().map(|image| image.id).collect();

        let ranked = SimilarityRanker::default().rank(&query, candidates);

        prop_assert_eq!(ranked.recommend_count(), expected.len());
        let mut ids = ranked.ids();
        ids.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(ids, expected);
    }

    /// Property: shared label count never decreases down the ranking.
    #[test]
    fn more_shared_labels_rank_first(
        query_labels in label_subset_strategy(),
        query_colors in proptest::collection::vec(color_strategy(), 0..4),
        specs in proptest::collection::vec(candidate_strategy(), 0..12),
    ) {
        let query = ImageQuery::new(query_labels, query_colors);
        let candidates = build_candidates(specs);
        let overlaps: std::collections::HashMap<u64, usize> = candidates
            .iter()
            .map(|image| (image.id, query.labels().overlap(image.labels.iter())))
            .collect();

        let ranked = SimilarityRanker::default().rank(&query, candidates);

        let ordered: Vec<usize> = ranked
            .ids()
            .iter()
            .map(|id| overlaps.get(id).copied().unwrap_or_default())
            .collect();
        prop_assert!(ordered.windows(2).all(|pair| matches!(pair, [left, right] if left >= right)));
    }

    /// Property: candidates with identical content keep their input order.
    #[test]
    fn identical_candidates_keep_input_order(
        labels in label_subset_strategy(),
        colors in proptest::collection::vec(color_strategy(), 0..4),
        count in 1_usize..8,
    ) {
        let query = ImageQuery::new(labels.clone(), colors.clone());
        let candidates = build_candidates(vec![(labels, colors); count]);
        let expected: Vec<u64> = candidates.iter().map(|image| image.id).collect();

        let ranked = SimilarityRanker::default().rank(&query, candidates);

        prop_assert_eq!(ranked.ids(), expected);
    }

    /// Property: palette similarity is bounded by the unit interval.
    #[test]
    fn palette_similarity_is_bounded(
        query in proptest::collection::vec(color_strategy(), 0..6),
        palette in proptest::collection::vec(color_strategy(), 0..6),
    ) {
        let score = palette_similarity(&query, &palette);
        prop_assert!(score.is_finite());
        prop_assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
    }
}
