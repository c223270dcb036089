//! SQLite persistence for imported destination images.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use rusqlite::{Connection, Error as SqliteError, Statement, Transaction};
use serde_json::to_string;
use thiserror::Error;
use tripai_core::CandidateImage;

use crate::fs::ensure_parent_dir;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS images (
        id INTEGER PRIMARY KEY,
        url TEXT NOT NULL,
        place TEXT NOT NULL,
        labels TEXT NOT NULL,
        colors TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS image_labels (
        image_id INTEGER NOT NULL REFERENCES images(id) ON DELETE CASCADE,
        label TEXT NOT NULL,
        PRIMARY KEY (image_id, label)
    );
    CREATE INDEX IF NOT EXISTS image_labels_by_label ON image_labels (label);
";

/// Errors raised when persisting images to SQLite.
#[derive(Debug, Error)]
pub enum PersistImagesError {
    /// Failed to create the parent directory for the database.
    #[error("failed to create parent directory for {path:?}")]
    CreateDirectory {
        /// Destination database path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path:?}")]
    Open {
        /// Destination database path.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Enabling SQLite foreign keys failed.
    #[error("failed to enable SQLite foreign keys")]
    ForeignKeys {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Beginning the transaction failed.
    #[error("failed to begin image persistence transaction")]
    BeginTransaction {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Creating the image tables failed.
    #[error("failed to create image tables")]
    CreateSchema {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Preparing a write statement failed.
    #[error("failed to prepare image write statements")]
    PrepareStatement {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// An image identifier could not be represented as an SQLite integer.
    #[error("image id {image_id} exceeds SQLite i64 range")]
    ImageIdOutOfRange {
        /// Identifier that failed the conversion.
        image_id: u64,
    },
    /// Serialising labels or colours to JSON failed.
    #[error("failed to serialise {column} for image {image_id}")]
    Serialise {
        /// Identifier of the image being persisted.
        image_id: u64,
        /// Column whose payload failed to serialise.
        column: &'static str,
        /// Source error produced by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Writing an image row or its label index failed.
    #[error("failed to persist image {image_id}")]
    PersistRow {
        /// Identifier of the image being persisted.
        image_id: u64,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Committing the transaction failed.
    #[error("failed to commit image persistence transaction")]
    Commit {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
}

/// Persist destination images to a SQLite database on disk.
///
/// The write is idempotent: existing rows are updated in place and their
/// label index is rebuilt. Parent directories are created automatically and
/// the tables are initialised when missing. Labels and colours are stored as
/// JSON text. Either every image is written or none is.
///
/// # Errors
/// Returns [`PersistImagesError`] naming the step that failed.
pub fn persist_images_to_sqlite(
    path: &Utf8Path,
    images: &[CandidateImage],
) -> Result<(), PersistImagesError> {
    ensure_parent_dir(path).map_err(|source| PersistImagesError::CreateDirectory {
        path: path.to_path_buf(),
        source,
    })?;
    let mut connection =
        Connection::open(path.as_std_path()).map_err(|source| PersistImagesError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    connection
        .pragma_update(None, "foreign_keys", true)
        .map_err(|source| PersistImagesError::ForeignKeys { source })?;

    let transaction = connection
        .transaction()
        .map_err(|source| PersistImagesError::BeginTransaction { source })?;

    transaction
        .execute_batch(SCHEMA)
        .map_err(|source| PersistImagesError::CreateSchema { source })?;
    persist_rows(&transaction, images)?;

    transaction
        .commit()
        .map_err(|source| PersistImagesError::Commit { source })?;
    info!("persisted {} images to {path}", images.len());
    Ok(())
}

fn persist_rows(
    transaction: &Transaction<'_>,
    images: &[CandidateImage],
) -> Result<(), PersistImagesError> {
    if images.is_empty() {
        return Ok(());
    }

    let mut upsert = prepare(
        transaction,
        "INSERT INTO images (id, url, place, labels, colors) VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(id) DO UPDATE SET
            url = excluded.url,
            place = excluded.place,
            labels = excluded.labels,
            colors = excluded.colors",
    )?;
    let mut clear_labels = prepare(transaction, "DELETE FROM image_labels WHERE image_id = ?1")?;
    let mut insert_label = prepare(
        transaction,
        "INSERT INTO image_labels (image_id, label) VALUES (?1, ?2)",
    )?;

    for image in images {
        let image_id = i64::try_from(image.id).map_err(|_| {
            PersistImagesError::ImageIdOutOfRange {
                image_id: image.id,
            }
        })?;
        let labels = to_string(&image.labels).map_err(|source| PersistImagesError::Serialise {
            image_id: image.id,
            column: "labels",
            source,
        })?;
        let colors = to_string(&image.colors).map_err(|source| PersistImagesError::Serialise {
            image_id: image.id,
            column: "colors",
            source,
        })?;
        let row_error = |source: SqliteError| PersistImagesError::PersistRow {
            image_id: image.id,
            source,
        };

        upsert
            .execute((image_id, &image.url, &image.place, labels, colors))
            .map_err(row_error)?;
        clear_labels.execute((image_id,)).map_err(row_error)?;
        for label in image.labels.iter() {
            insert_label.execute((image_id, label)).map_err(row_error)?;
        }
    }

    Ok(())
}

fn prepare<'conn>(
    transaction: &'conn Transaction<'_>,
    sql: &str,
) -> Result<Statement<'conn>, PersistImagesError> {
    transaction
        .prepare(sql)
        .map_err(|source| PersistImagesError::PrepareStatement { source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;
    use tripai_core::Color;

    #[fixture]
    fn image() -> CandidateImage {
        CandidateImage::new(7, "https://img.example/jeju.jpg", "Jeju")
            .with_labels(["Beach", "sunset"])
            .with_colors([Color::new(250, 10, 10)])
    }

    fn db_path(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().join("nested/images.db")).expect("utf-8 path")
    }

    fn label_rows(path: &Utf8Path) -> Vec<(i64, String)> {
        let connection = Connection::open(path.as_std_path()).expect("open database");
        let mut statement = connection
            .prepare("SELECT image_id, label FROM image_labels ORDER BY image_id, label")
            .expect("prepare label query");
        statement
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .expect("query labels")
            .collect::<Result<_, _>>()
            .expect("read labels")
    }

    #[rstest]
    fn persists_rows_and_label_index(image: CandidateImage) {
        let tmp = TempDir::new().expect("tempdir");
        let path = db_path(&tmp);

        persist_images_to_sqlite(&path, &[image]).expect("persist image");

        let connection = Connection::open(path.as_std_path()).expect("open database");
        let (place, labels, colors): (String, String, String) = connection
            .query_row(
                "SELECT place, labels, colors FROM images WHERE id = 7",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .expect("image row");
        assert_eq!(place, "Jeju");
        assert_eq!(labels, r#"["beach","sunset"]"#);
        assert_eq!(colors, r#"[{"r":250,"g":10,"b":10}]"#);
        assert_eq!(
            label_rows(&path),
            vec![(7, "beach".to_owned()), (7, "sunset".to_owned())]
        );
    }

    #[rstest]
    fn rewriting_an_image_replaces_its_labels(image: CandidateImage) {
        let tmp = TempDir::new().expect("tempdir");
        let path = db_path(&tmp);
        persist_images_to_sqlite(&path, &[image]).expect("first write");

        let updated = CandidateImage::new(7, "https://img.example/jeju-2.jpg", "Jeju")
            .with_labels(["forest"]);
        persist_images_to_sqlite(&path, &[updated]).expect("second write");

        assert_eq!(label_rows(&path), vec![(7, "forest".to_owned())]);
        let connection = Connection::open(path.as_std_path()).expect("open database");
        let count: i64 = connection
            .query_row("SELECT COUNT(*) FROM images", [], |row| row.get(0))
            .expect("count images");
        assert_eq!(count, 1);
    }

    #[rstest]
    fn rejects_ids_beyond_sqlite_range() {
        let tmp = TempDir::new().expect("tempdir");
        let path = db_path(&tmp);
        let image = CandidateImage::new(u64::MAX, "u", "p").with_labels(["beach"]);

        let err = persist_images_to_sqlite(&path, &[image]).expect_err("id out of range");

        assert!(matches!(
            err,
            PersistImagesError::ImageIdOutOfRange { image_id: u64::MAX }
        ));
    }

    #[rstest]
    fn failed_batches_leave_no_rows(image: CandidateImage) {
        let tmp = TempDir::new().expect("tempdir");
        let path = db_path(&tmp);
        let bad = CandidateImage::new(u64::MAX, "u", "p");

        persist_images_to_sqlite(&path, &[image, bad]).expect_err("batch should fail");

        let connection = Connection::open(path.as_std_path()).expect("open database");
        let tables: i64 = connection
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE name = 'images'",
                [],
                |row| row.get(0),
            )
            .expect("inspect schema");
        assert_eq!(tables, 0);
    }
}
