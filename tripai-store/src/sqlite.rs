//! SQLite-backed store implementation for persisted images.

use std::{
    collections::{BTreeSet, HashMap},
    fmt,
    path::{Path, PathBuf},
};

use log::{debug, info};
use rusqlite::{Connection, OpenFlags};
use thiserror::Error;
use tripai_core::{CandidateImage, Color, ImageStore, LabelSet};

/// Error raised when reading or validating persisted images.
#[derive(Debug, Error)]
pub enum SqliteImageStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A stored identifier was negative.
    #[error("stored image id {id} is negative")]
    InvalidImageId {
        /// Raw identifier read from the database.
        id: i64,
    },
    /// A stored label or colour payload was not valid JSON.
    #[error("failed to parse {column} for image {id}: {source}")]
    InvalidPayload {
        /// Identifier of the image whose payload failed to parse.
        id: u64,
        /// Column holding the payload.
        column: &'static str,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// The label index referenced an image missing from the `images` table.
    #[error("image {id} listed under label {label:?} is missing from the database")]
    MissingImage {
        /// Identifier of the missing image.
        id: u64,
        /// Label whose index entry is dangling.
        label: String,
    },
    /// Generic SQLite error when reading rows.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

/// Read-only image store loaded from a SQLite database.
///
/// Images are held in memory in ascending id order, with an inverted index
/// from each label to the images that carry it. Lookups yield each matching
/// image once, in ascending id order.
pub struct SqliteImageStore {
    images: Vec<CandidateImage>,
    by_label: HashMap<String, Vec<usize>>,
}

impl fmt::Debug for SqliteImageStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteImageStore")
            .field("images", &self.images.len())
            .field("labels", &self.by_label.len())
            .finish_non_exhaustive()
    }
}

impl SqliteImageStore {
    /// Open a store backed by the provided SQLite database.
    ///
    /// # Errors
    /// Returns [`SqliteImageStoreError`] when the database cannot be opened,
    /// a row holds an invalid id or JSON payload, or the label index points at
    /// a missing image.
    pub fn open<P>(database_path: P) -> Result<Self, SqliteImageStoreError>
    where
        P: AsRef<Path>,
    {
        let database_path = database_path.as_ref();
        let connection =
            Connection::open_with_flags(database_path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(
                |source| SqliteImageStoreError::OpenDatabase {
                    path: database_path.to_path_buf(),
                    source,
                },
            )?;

        let images = load_images(&connection)?;
        let by_label = load_label_index(&connection, &images)?;
        info!(
            "loaded {} images under {} labels from {}",
            images.len(),
            by_label.len(),
            database_path.display()
        );

        Ok(Self { images, by_label })
    }

    /// Number of images held by the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Report whether the store holds no images.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ImageStore for SqliteImageStore {
    fn lookup_by_any_label(
        &self,
        labels: &LabelSet,
    ) -> Box<dyn Iterator<Item = CandidateImage> + Send + '_> {
        let positions: BTreeSet<usize> = labels
            .iter()
            .filter_map(|label| self.by_label.get(label))
            .flatten()
            .copied()
            .collect();
        debug!(
            "{} images match {} query labels",
            positions.len(),
            labels.len()
        );

        Box::new(
            positions
                .into_iter()
                .filter_map(|position| self.images.get(position).cloned()),
        )
    }
}

fn load_images(connection: &Connection) -> Result<Vec<CandidateImage>, SqliteImageStoreError> {
    let mut statement =
        connection.prepare("SELECT id, url, place, labels, colors FROM images ORDER BY id")?;
    let mut rows = statement.query([])?;
    let mut images = Vec::new();

    while let Some(row) = rows.next()? {
        let raw_id: i64 = row.get(0)?;
        let id = u64::try_from(raw_id)
            .map_err(|_| SqliteImageStoreError::InvalidImageId { id: raw_id })?;
        let url: String = row.get(1)?;
        let place: String = row.get(2)?;
        let labels_json: String = row.get(3)?;
        let colors_json: String = row.get(4)?;

        let labels: LabelSet = parse_payload(id, "labels", &labels_json)?;
        let colors: Vec<Color> = parse_payload(id, "colors", &colors_json)?;

        let mut image = CandidateImage::new(id, url, place).with_colors(colors);
        image.labels = labels;
        images.push(image);
    }

    Ok(images)
}

fn parse_payload<T>(id: u64, column: &'static str, json: &str) -> Result<T, SqliteImageStoreError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json).map_err(|source| SqliteImageStoreError::InvalidPayload {
        id,
        column,
        source,
    })
}

fn load_label_index(
    connection: &Connection,
    images: &[CandidateImage],
) -> Result<HashMap<String, Vec<usize>>, SqliteImageStoreError> {
    let mut statement =
        connection.prepare("SELECT image_id, label FROM image_labels ORDER BY label, image_id")?;
    let mut rows = statement.query([])?;
    let mut by_label: HashMap<String, Vec<usize>> = HashMap::new();

    while let Some(row) = rows.next()? {
        let raw_id: i64 = row.get(0)?;
        let label: String = row.get(1)?;
        let id = u64::try_from(raw_id)
            .map_err(|_| SqliteImageStoreError::InvalidImageId { id: raw_id })?;
        let Ok(position) = images.binary_search_by_key(&id, |image| image.id) else {
            return Err(SqliteImageStoreError::MissingImage { id, label });
        };
        let Some(label) = tripai_core::normalise_label(&label) else {
            debug!("skipping blank label for image {id}");
            continue;
        };
        by_label.entry(label).or_default().push(position);
    }

    Ok(by_label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist_images_to_sqlite;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    struct Database {
        _dir: TempDir,
        path: Utf8PathBuf,
    }

    #[fixture]
    fn database() -> Database {
        let dir = TempDir::new().expect("tempdir");
        let path =
            Utf8PathBuf::from_path_buf(dir.path().join("images.db")).expect("utf-8 db path");
        let images = [
            CandidateImage::new(30, "https://img.example/30.jpg", "Sokcho")
                .with_labels(["beach", "sunset"])
                .with_colors([Color::new(255, 0, 0)]),
            CandidateImage::new(10, "https://img.example/10.jpg", "Jeju")
                .with_labels(["beach"])
                .with_colors([Color::new(250, 10, 10)]),
            CandidateImage::new(20, "https://img.example/20.jpg", "Seoul").with_labels(["city"]),
        ];
        persist_images_to_sqlite(&path, &images).expect("seed database");
        Database { _dir: dir, path }
    }

    fn lookup_ids(store: &SqliteImageStore, labels: &[&str]) -> Vec<u64> {
        let labels: LabelSet = labels.iter().collect();
        store.lookup_by_any_label(&labels).map(|image| image.id).collect()
    }

    #[rstest]
    fn loads_every_persisted_image(database: Database) {
        let store = SqliteImageStore::open(database.path.as_std_path()).expect("open store");
        assert_eq!(store.len(), 3);
        assert!(!store.is_empty());
    }

    #[rstest]
    fn lookup_yields_each_match_once_in_id_order(database: Database) {
        let store = SqliteImageStore::open(database.path.as_std_path()).expect("open store");

        assert_eq!(lookup_ids(&store, &["sunset", "beach"]), vec![10, 30]);
        assert_eq!(lookup_ids(&store, &["city", "sunset"]), vec![20, 30]);
        assert!(lookup_ids(&store, &["glacier"]).is_empty());
        assert!(lookup_ids(&store, &[]).is_empty());
    }

    #[rstest]
    fn lookup_returns_full_candidates(database: Database) {
        let store = SqliteImageStore::open(database.path.as_std_path()).expect("open store");
        let labels: LabelSet = ["sunset"].into_iter().collect();

        let images: Vec<_> = store.lookup_by_any_label(&labels).collect();

        let [image] = images.as_slice() else {
            panic!("expected a single match, found {images:?}");
        };
        assert_eq!(image.place, "Sokcho");
        assert!(image.labels.contains("beach"));
        assert_eq!(image.colors, vec![Color::new(255, 0, 0)]);
    }

    #[rstest]
    fn missing_database_reports_path() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("absent.db");

        let err = SqliteImageStore::open(&path).expect_err("missing database");

        match err {
            SqliteImageStoreError::OpenDatabase { path: reported, .. } => {
                assert_eq!(reported, path);
            }
            other => panic!("expected OpenDatabase, found {other:?}"),
        }
    }

    #[rstest]
    fn corrupt_colour_payload_is_reported(database: Database) {
        let connection = Connection::open(database.path.as_std_path()).expect("open for write");
        connection
            .execute("UPDATE images SET colors = 'not json' WHERE id = 20", [])
            .expect("corrupt colours");
        drop(connection);

        let err = SqliteImageStore::open(database.path.as_std_path()).expect_err("invalid json");

        assert!(matches!(
            err,
            SqliteImageStoreError::InvalidPayload {
                id: 20,
                column: "colors",
                ..
            }
        ));
    }

    #[rstest]
    fn dangling_label_index_is_reported(database: Database) {
        let connection = Connection::open(database.path.as_std_path()).expect("open for write");
        connection
            .execute(
                "INSERT INTO image_labels (image_id, label) VALUES (99, 'beach')",
                [],
            )
            .expect("insert dangling label");
        drop(connection);

        let err = SqliteImageStore::open(database.path.as_std_path()).expect_err("dangling index");

        assert!(matches!(
            err,
            SqliteImageStoreError::MissingImage { id: 99, .. }
        ));
    }
}
