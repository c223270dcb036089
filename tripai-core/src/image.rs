use serde::{Deserialize, Serialize};

use crate::{Color, LabelSet};

/// A stored destination image eligible for recommendation.
///
/// # Examples
/// ```
/// use tripai_core::{CandidateImage, Color};
///
/// let image = CandidateImage::new(7, "https://img.example/jeju.jpg", "Jeju")
///     .with_labels(["Beach", "sunset"])
///     .with_colors([Color::new(250, 10, 10)]);
///
/// assert!(image.labels.contains("beach"));
/// assert_eq!(image.colors.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateImage {
    /// Unique identifier.
    pub id: u64,
    /// Location of the image file.
    pub url: String,
    /// Destination shown in the image.
    pub place: String,
    /// Content labels.
    #[serde(default)]
    pub labels: LabelSet,
    /// Dominant colours, most prominent first.
    #[serde(default)]
    pub colors: Vec<Color>,
}

impl CandidateImage {
    /// Construct an image without labels or colours.
    #[must_use]
    pub fn new(id: u64, url: impl Into<String>, place: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            place: place.into(),
            labels: LabelSet::new(),
            colors: Vec::new(),
        }
    }

    /// Add labels while returning `self` for chaining.
    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.labels.extend(labels);
        self
    }

    /// Append colours while returning `self` for chaining.
    #[must_use]
    pub fn with_colors<I>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = Color>,
    {
        self.colors.extend(colors);
        self
    }

    /// Report whether the image carries at least one of `labels`.
    #[must_use]
    pub fn has_any_label(&self, labels: &LabelSet) -> bool {
        self.labels.iter().any(|label| labels.contains(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_normalised() {
        let image = CandidateImage::new(1, "u", "p").with_labels([" Mountain "]);
        assert!(image.labels.contains("mountain"));
    }

    #[test]
    fn any_label_match() {
        let image = CandidateImage::new(1, "u", "p").with_labels(["beach", "palm"]);
        let hit: LabelSet = ["palm"].into_iter().collect();
        let miss: LabelSet = ["snow"].into_iter().collect();
        assert!(image.has_any_label(&hit));
        assert!(!image.has_any_label(&miss));
        assert!(!image.has_any_label(&LabelSet::new()));
    }
}
