//! Data access trait for stored images.
//!
//! The `ImageStore` trait defines a read-only lookup returning every
//! [`CandidateImage`] that shares a label with a query.

use crate::{CandidateImage, LabelSet};

/// Read-only access to persisted images.
///
/// # Examples
///
/// ```rust
/// use tripai_core::{CandidateImage, ImageStore, LabelSet};
///
/// struct VecStore {
///     images: Vec<CandidateImage>,
/// }
///
/// impl ImageStore for VecStore {
///     fn lookup_by_any_label(
///         &self,
///         labels: &LabelSet,
///     ) -> Box<dyn Iterator<Item = CandidateImage> + Send + '_> {
///         let labels = labels.clone();
///         Box::new(
///             self.images
///                 .iter()
///                 .filter(move |image| image.has_any_label(&labels))
///                 .cloned(),
///         )
///     }
/// }
///
/// let image = CandidateImage::new(1, "u", "Jeju").with_labels(["beach"]);
/// let store = VecStore { images: vec![image.clone()] };
/// let labels: LabelSet = ["beach", "snow"].into_iter().collect();
///
/// let found: Vec<_> = store.lookup_by_any_label(&labels).collect();
/// assert_eq!(found, vec![image]);
/// ```
pub trait ImageStore {
    /// Return every image sharing at least one label with `labels`.
    ///
    /// `labels` are expected to be normalised. An empty set matches nothing.
    /// Implementations must yield images in a deterministic order because
    /// ranking preserves that order for equal scores; persisted stores use
    /// ascending image id.
    fn lookup_by_any_label(
        &self,
        labels: &LabelSet,
    ) -> Box<dyn Iterator<Item = CandidateImage> + Send + '_>;
}

impl<S> ImageStore for Box<S>
where
    S: ImageStore + ?Sized,
{
    fn lookup_by_any_label(
        &self,
        labels: &LabelSet,
    ) -> Box<dyn Iterator<Item = CandidateImage> + Send + '_> {
        (**self).lookup_by_any_label(labels)
    }
}
