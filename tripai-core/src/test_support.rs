//! In-memory `ImageStore` and a label-only `Ranker` used by unit and
//! behaviour tests.

use crate::{CandidateImage, ImageQuery, ImageStore, LabelSet, Ranker};

/// In-memory `ImageStore` implementation used in tests.
///
/// The store performs a linear scan and yields matches in insertion order.
#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    images: Vec<CandidateImage>,
}

impl MemoryStore {
    /// Create a store containing a single image.
    #[must_use]
    pub fn with_image(image: CandidateImage) -> Self {
        Self::with_images(std::iter::once(image))
    }

    /// Create a store from a collection of images.
    #[must_use]
    pub fn with_images<I>(images: I) -> Self
    where
        I: IntoIterator<Item = CandidateImage>,
    {
        Self {
            images: images.into_iter().collect(),
        }
    }
}

impl ImageStore for MemoryStore {
    fn lookup_by_any_label(
        &self,
        labels: &LabelSet,
    ) -> Box<dyn Iterator<Item = CandidateImage> + Send + '_> {
        let labels = labels.clone();
        Box::new(
            self.images
                .iter()
                .filter(move |image| image.has_any_label(&labels))
                .cloned(),
        )
    }
}

/// Test `Ranker` scoring only the number of shared labels.
#[derive(Debug, Copy, Clone, Default)]
pub struct LabelOverlapRanker;

impl Ranker for LabelOverlapRanker {
    #[expect(
        clippy::cast_precision_loss,
        reason = "label counts in tests are tiny"
    )]
    fn score(&self, query: &ImageQuery, candidate: &CandidateImage) -> f64 {
        query.labels().overlap(candidate.labels.iter()) as f64
    }
}
