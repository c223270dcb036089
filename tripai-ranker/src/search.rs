//! Request-to-response pipeline for similar image searches.
#![forbid(unsafe_code)]

use log::{debug, warn};
use tripai_core::{
    CandidateImage, DataResponse, ImageQuery, ImageSearchRequest, ImageStore, RankedResult, Ranker,
    SearchRequestError,
};

/// Search pipeline composed of an image store and a ranker.
///
/// The service is generic over the engine boundaries so callers can swap the
/// store or the scoring strategy.
///
/// # Examples
/// ```
/// use tripai_core::{CandidateImage, ImageSearchRequest, test_support::MemoryStore};
/// use tripai_ranker::{ImageSearchService, SimilarityRanker};
///
/// let store = MemoryStore::with_image(
///     CandidateImage::new(1, "u1", "Jeju").with_labels(["beach"]),
/// );
/// let service = ImageSearchService::new(store, SimilarityRanker::default());
/// let request = ImageSearchRequest {
///     label_list: vec!["beach".to_owned()],
///     color: String::new(),
/// };
///
/// let response = service.search(&request).expect("valid request");
/// assert_eq!(response.code(), 200);
/// ```
#[derive(Debug, Clone)]
pub struct ImageSearchService<S, R>
where
    S: ImageStore,
    R: Ranker,
{
    store: S,
    ranker: R,
}

impl<S, R> ImageSearchService<S, R>
where
    S: ImageStore,
    R: Ranker,
{
    /// Compose a service from a store and a ranker.
    #[must_use]
    pub const fn new(store: S, ranker: R) -> Self {
        Self { store, ranker }
    }

    /// Validate `request`, look up label matches and rank them.
    ///
    /// An empty lookup is a success with no recommendations.
    ///
    /// # Errors
    /// Returns [`SearchRequestError`] when the request carries no labels or a
    /// malformed colour string.
    pub fn search(
        &self,
        request: &ImageSearchRequest,
    ) -> Result<DataResponse<RankedResult>, SearchRequestError> {
        let query = request.to_query().inspect_err(|err| {
            warn!("rejected image search request: {err}");
        })?;
        Ok(DataResponse::create(self.search_query(&query)))
    }

    /// Like [`Self::search`], but folds failures into an error envelope.
    #[must_use]
    pub fn respond(&self, request: &ImageSearchRequest) -> DataResponse<RankedResult> {
        self.search(request)
            .unwrap_or_else(|err| DataResponse::error(err.result()))
    }

    /// Rank the label matches for an already validated query.
    #[must_use]
    pub fn search_query(&self, query: &ImageQuery) -> RankedResult {
        let candidates: Vec<CandidateImage> =
            self.store.lookup_by_any_label(query.labels()).collect();
        debug!(
            "ranking {} candidates for {} labels and {} colours",
            candidates.len(),
            query.labels().len(),
            query.colors().len()
        );
        self.ranker.rank(query, candidates)
    }
}
