//! Label sets used for matching images against queries.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Normalise a raw label: trim surrounding whitespace and lowercase it.
///
/// Returns `None` for blank input.
///
/// # Examples
/// ```
/// use tripai_core::normalise_label;
///
/// assert_eq!(normalise_label("  Beach "), Some("beach".to_owned()));
/// assert_eq!(normalise_label("   "), None);
/// ```
#[must_use]
pub fn normalise_label(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// A set of normalised labels with hashed membership checks.
///
/// # Examples
/// ```
/// use tripai_core::LabelSet;
///
/// let labels: LabelSet = ["Beach", "sunset", "beach", ""].into_iter().collect();
/// assert_eq!(labels.len(), 2);
/// assert!(labels.contains("beach"));
/// ```
///
/// Serialised as a sorted JSON array; deserialised labels are normalised.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct LabelSet {
    labels: HashSet<String>,
}

impl LabelSet {
    /// Construct an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a label after normalisation. Blank labels are ignored.
    ///
    /// Returns `true` when the label was not already present.
    pub fn insert(&mut self, raw: &str) -> bool {
        normalise_label(raw).is_some_and(|label| self.labels.insert(label))
    }

    /// Report whether `label` is present. The argument must already be
    /// normalised.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// Count the labels from `other` that also appear in this set.
    ///
    /// # Examples
    /// ```
    /// use tripai_core::LabelSet;
    ///
    /// let query: LabelSet = ["beach", "sunset"].into_iter().collect();
    /// assert_eq!(query.overlap(["beach", "forest"].iter().copied()), 1);
    /// ```
    #[must_use]
    pub fn overlap<'a, I>(&self, other: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        other
            .into_iter()
            .filter(|label| self.labels.contains(*label))
            .count()
    }

    /// Number of labels in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Report whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate over the labels in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Return the labels in ascending order.
    #[must_use]
    pub fn sorted(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.iter().collect();
        labels.sort_unstable();
        labels
    }
}

impl<S: AsRef<str>> FromIterator<S> for LabelSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut set = Self::new();
        for raw in iter {
            set.insert(raw.as_ref());
        }
        set
    }
}

impl From<Vec<String>> for LabelSet {
    fn from(labels: Vec<String>) -> Self {
        labels.into_iter().collect()
    }
}

impl From<LabelSet> for Vec<String> {
    fn from(set: LabelSet) -> Self {
        let mut labels: Self = set.labels.into_iter().collect();
        labels.sort_unstable();
        labels
    }
}

impl<S: AsRef<str>> Extend<S> for LabelSet {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        for raw in iter {
            self.insert(raw.as_ref());
        }
    }
}
