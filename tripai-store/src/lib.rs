//! SQLite persistence for Tripai destination images.
//!
//! [`persist_images_to_sqlite`] writes imported images and their label index
//! to disk. [`SqliteImageStore`] opens the same database read-only, loads
//! every image into memory and answers
//! [`ImageStore`](tripai_core::ImageStore) lookups from an inverted label
//! index.
//!
//! The [`fs`] module holds the capability-based filesystem helpers shared with
//! the command-line tooling.

#![forbid(unsafe_code)]

pub mod fs;
mod persist;
mod sqlite;

pub use persist::{PersistImagesError, persist_images_to_sqlite};
pub use sqlite::{SqliteImageStore, SqliteImageStoreError};
