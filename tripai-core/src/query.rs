//! Search requests and the validated queries built from them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Color, ColorParseError, ImageResult, LabelSet, parse_colors};

/// Labels and colours requested by a visitor.
///
/// Labels are normalised on construction and the query is immutable
/// afterwards.
///
/// # Examples
/// ```
/// use tripai_core::{Color, ImageQuery};
///
/// let query = ImageQuery::new(["Beach", "sunset"], vec![Color::new(255, 0, 0)]);
/// assert!(query.labels().contains("beach"));
/// assert_eq!(query.colors(), &[Color::new(255, 0, 0)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageQuery {
    labels: LabelSet,
    colors: Vec<Color>,
}

impl ImageQuery {
    /// Build a query from raw labels and parsed colours.
    #[must_use]
    pub fn new<I, S>(labels: I, colors: Vec<Color>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            labels: labels.into_iter().collect(),
            colors,
        }
    }

    /// Requested labels.
    #[must_use]
    pub const fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Requested colours in request order.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

/// Inbound search payload.
///
/// `color` holds `|`-separated `r,g,b` entries, e.g. `"255,0,0|0,0,255"`.
///
/// # Examples
/// ```
/// use tripai_core::ImageSearchRequest;
///
/// let request: ImageSearchRequest =
///     serde_json::from_str(r#"{"labelList":["beach"],"color":"255,0,0"}"#).unwrap();
/// let query = request.to_query().expect("valid request");
/// assert_eq!(query.colors().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSearchRequest {
    /// Requested labels.
    #[serde(default)]
    pub label_list: Vec<String>,
    /// Delimited colour string.
    #[serde(default)]
    pub color: String,
}

/// Errors raised while turning a request into a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchRequestError {
    /// No non-blank labels were supplied.
    #[error("request must include at least one label")]
    EmptyLabelList,
    /// The colour string was malformed.
    #[error("invalid colour string: {0}")]
    InvalidColor(#[from] ColorParseError),
}

impl SearchRequestError {
    /// Catalogue entry reported to the caller.
    #[must_use]
    pub const fn result(&self) -> ImageResult {
        match self {
            Self::EmptyLabelList => ImageResult::EmptyLabelList,
            Self::InvalidColor(_) => ImageResult::InvalidColor,
        }
    }
}

impl ImageSearchRequest {
    /// Validate the request and build an [`ImageQuery`].
    ///
    /// # Errors
    /// Returns [`SearchRequestError::EmptyLabelList`] when every label is
    /// blank and [`SearchRequestError::InvalidColor`] when the colour string
    /// is malformed.
    pub fn to_query(&self) -> Result<ImageQuery, SearchRequestError> {
        let labels: LabelSet = self.label_list.iter().collect();
        if labels.is_empty() {
            return Err(SearchRequestError::EmptyLabelList);
        }
        let colors = parse_colors(&self.color)?;
        Ok(ImageQuery { labels, colors })
    }
}
