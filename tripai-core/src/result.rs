//! Result catalogue and the response envelope returned to callers.
//!
//! Each [`ImageResult`] pairs an application code with the HTTP status a
//! transport layer should use and a human-readable message.

use serde::Serialize;

/// Outcomes of an image similarity search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageResult {
    /// The search completed; the payload may still be empty.
    OkImageSearch,
    /// The colour string could not be parsed.
    InvalidColor,
    /// The request carried no usable labels.
    EmptyLabelList,
}

impl ImageResult {
    /// Application-level result code.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::OkImageSearch => 200,
            Self::InvalidColor => 410,
            Self::EmptyLabelList => 420,
        }
    }

    /// HTTP status code associated with the result.
    #[must_use]
    pub const fn status(self) -> u16 {
        match self {
            Self::OkImageSearch => 200,
            Self::InvalidColor | Self::EmptyLabelList => 400,
        }
    }

    /// Message describing the result.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::OkImageSearch => "similar image search succeeded",
            Self::InvalidColor => "invalid color format",
            Self::EmptyLabelList => "label list is empty",
        }
    }

    /// Report whether the result denotes success.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::OkImageSearch)
    }
}

/// Envelope carrying a result code, message and optional payload.
///
/// # Examples
/// ```
/// use tripai_core::{DataResponse, ImageResult};
///
/// let response = DataResponse::create(3_u32);
/// assert_eq!(response.code(), 200);
/// assert_eq!(response.data(), Some(&3));
///
/// let rejected = DataResponse::<u32>::error(ImageResult::InvalidColor);
/// assert_eq!(rejected.code(), 410);
/// assert!(rejected.data().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataResponse<T> {
    code: u16,
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip)]
    result: ImageResult,
}

impl<T> DataResponse<T> {
    /// Wrap a successful payload.
    #[must_use]
    pub const fn create(data: T) -> Self {
        Self::with_result(ImageResult::OkImageSearch, Some(data))
    }

    /// Build a payload-free response describing a failure.
    #[must_use]
    pub const fn error(result: ImageResult) -> Self {
        Self::with_result(result, None)
    }

    const fn with_result(result: ImageResult, data: Option<T>) -> Self {
        Self {
            code: result.code(),
            message: result.message(),
            data,
            result,
        }
    }

    /// Catalogue entry behind this response.
    #[must_use]
    pub const fn result(&self) -> ImageResult {
        self.result
    }

    /// Application-level result code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        self.code
    }

    /// Message describing the result.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.message
    }

    /// Borrow the payload, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Consume the envelope and return the payload.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}
