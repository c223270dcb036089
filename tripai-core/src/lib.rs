//! Core domain types for the Tripai image similarity engine.
//!
//! The crate defines the values exchanged between the store, the ranker and
//! the request layer:
//! - [`Color`] and [`LabelSet`] describe image content;
//! - [`CandidateImage`] is a stored image returned by an [`ImageStore`];
//! - [`ImageSearchRequest`] parses into a validated [`ImageQuery`];
//! - [`Ranker`] turns a query and candidates into a [`RankedResult`];
//! - [`ImageResult`] and [`DataResponse`] form the response catalogue.

#![forbid(unsafe_code)]

mod color;
mod image;
mod label;
mod query;
mod ranker;
mod result;
mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use color::{
    CHANNEL_SEPARATOR, COLOR_SEPARATOR, Color, ColorParseError, MAX_DISTANCE_SQUARED,
    parse_colors,
};
pub use image::CandidateImage;
pub use label::{LabelSet, normalise_label};
pub use query::{ImageQuery, ImageSearchRequest, SearchRequestError};
pub use ranker::{RankedResult, Ranker, RecommendedImage, sanitise_score};
pub use result::{DataResponse, ImageResult};
pub use store::ImageStore;
