//! SQLite-backed rating store.
//!
//! Menu ratings are stored one row per submission with the scores encoded
//! as a JSON object, so the schema does not change when the recognised
//! dimensions do. Venue star ratings live in a separate append-only table.

use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
};

use log::{debug, warn};
use rusqlite::{Connection, OpenFlags, params};
use thiserror::Error;

use crate::{MenuKey, RatingSubmission, VenueRating};

use super::{RatingSink, RatingSource};

const SCHEMA_SQL: &str = "
    CREATE TABLE IF NOT EXISTS menu_ratings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        venue TEXT NOT NULL,
        menu TEXT NOT NULL,
        scores TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS menu_ratings_by_menu ON menu_ratings (venue, menu);
    CREATE TABLE IF NOT EXISTS venue_ratings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        venue TEXT NOT NULL,
        stars REAL NOT NULL
    );
    CREATE INDEX IF NOT EXISTS venue_ratings_by_venue ON venue_ratings (venue);
";

/// Error raised when reading or writing the rating database.
#[derive(Debug, Error)]
pub enum SqliteRatingStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Creating the rating tables failed.
    #[error("failed to prepare rating schema: {source}")]
    Schema {
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Preparing or executing a statement failed.
    #[error("failed to {operation}: {source}")]
    Query {
        /// Description of the failed operation.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Encoding a submission's scores as JSON failed.
    #[error("failed to encode scores for {key}: {source}")]
    EncodeScores {
        /// Menu the scores belong to.
        key: MenuKey,
        /// JSON encoding failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Rating store backed by a single SQLite database file.
pub struct SqliteRatingStore {
    connection: Connection,
}

impl fmt::Debug for SqliteRatingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteRatingStore")
            .field("path", &self.connection.path())
            .finish_non_exhaustive()
    }
}

impl SqliteRatingStore {
    /// Open or create a writable store at `path`, creating tables on demand.
    ///
    /// # Errors
    /// Returns [`SqliteRatingStoreError`] when the file cannot be opened or
    /// the schema cannot be created.
    pub fn open<P>(path: P) -> Result<Self, SqliteRatingStoreError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let connection =
            Connection::open(path).map_err(|source| SqliteRatingStoreError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        Self::with_schema(connection)
    }

    /// Open an existing store without write access.
    ///
    /// # Errors
    /// Returns [`SqliteRatingStoreError::OpenDatabase`] when the file is
    /// missing or unreadable.
    pub fn open_read_only<P>(path: P) -> Result<Self, SqliteRatingStoreError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|source| SqliteRatingStoreError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { connection })
    }

    /// Create a transient store held in memory.
    ///
    /// # Errors
    /// Returns [`SqliteRatingStoreError`] when SQLite cannot allocate the
    /// database or create the schema.
    pub fn open_in_memory() -> Result<Self, SqliteRatingStoreError> {
        let connection =
            Connection::open_in_memory().map_err(|source| SqliteRatingStoreError::OpenDatabase {
                path: PathBuf::from(":memory:"),
                source,
            })?;
        Self::with_schema(connection)
    }

    fn with_schema(connection: Connection) -> Result<Self, SqliteRatingStoreError> {
        connection
            .execute_batch(SCHEMA_SQL)
            .map_err(|source| SqliteRatingStoreError::Schema { source })?;
        Ok(Self { connection })
    }

    fn read_submissions(
        &self,
        venue: Option<&str>,
    ) -> Result<Vec<RatingSubmission>, SqliteRatingStoreError> {
        let mut statement = self
            .connection
            .prepare_cached(
                "SELECT id, venue, menu, scores FROM menu_ratings
                 WHERE ?1 IS NULL OR venue = ?1
                 ORDER BY id",
            )
            .map_err(|source| SqliteRatingStoreError::Query {
                operation: "prepare menu rating selection",
                source,
            })?;
        let rows = statement
            .query_map([venue], |row| {
                let id: i64 = row.get(0)?;
                let venue_name: String = row.get(1)?;
                let menu: String = row.get(2)?;
                let scores: String = row.get(3)?;
                Ok((id, venue_name, menu, scores))
            })
            .map_err(|source| SqliteRatingStoreError::Query {
                operation: "query menu ratings",
                source,
            })?;

        let mut submissions = Vec::new();
        for row in rows {
            let (id, venue_name, menu, payload) =
                row.map_err(|source| SqliteRatingStoreError::Query {
                    operation: "read menu rating row",
                    source,
                })?;
            submissions.push(RatingSubmission {
                key: MenuKey::new(venue_name, menu),
                scores: decode_scores(id, &payload),
            });
        }
        debug!("read {} menu ratings", submissions.len());
        Ok(submissions)
    }
}

/// Decode a stored score payload, keeping only numeric entries.
///
/// Unreadable payloads yield an empty map so one corrupt row cannot abort a
/// whole aggregation.
fn decode_scores(id: i64, payload: &str) -> BTreeMap<String, f64> {
    let object: serde_json::Map<String, serde_json::Value> = match serde_json::from_str(payload) {
        Ok(object) => object,
        Err(err) => {
            warn!("ignoring unreadable scores in menu rating {id}: {err}");
            return BTreeMap::new();
        }
    };
    object
        .into_iter()
        .filter_map(|(name, value)| {
            let number = value.as_f64();
            if number.is_none() {
                debug!("ignoring non-numeric '{name}' score in menu rating {id}");
            }
            number.map(|score| (name, score))
        })
        .collect()
}

impl RatingSource for SqliteRatingStore {
    type Error = SqliteRatingStoreError;

    fn submissions(&self) -> Result<Vec<RatingSubmission>, Self::Error> {
        self.read_submissions(None)
    }

    fn venue_submissions(&self, venue: &str) -> Result<Vec<RatingSubmission>, Self::Error> {
        self.read_submissions(Some(venue))
    }

    fn venue_ratings(&self, venue: &str) -> Result<Vec<VenueRating>, Self::Error> {
        let mut statement = self
            .connection
            .prepare_cached("SELECT stars FROM venue_ratings WHERE venue = ?1 ORDER BY id")
            .map_err(|source| SqliteRatingStoreError::Query {
                operation: "prepare venue rating selection",
                source,
            })?;
        let rows = statement
            .query_map([venue], |row| row.get::<_, f64>(0))
            .map_err(|source| SqliteRatingStoreError::Query {
                operation: "query venue ratings",
                source,
            })?;
        rows.map(|row| {
            row.map(VenueRating)
                .map_err(|source| SqliteRatingStoreError::Query {
                    operation: "read venue rating row",
                    source,
                })
        })
        .collect()
    }
}

impl RatingSink for SqliteRatingStore {
    type Error = SqliteRatingStoreError;

    fn record_menu_rating(&mut self, submission: &RatingSubmission) -> Result<(), Self::Error> {
        let scores = serde_json::to_string(&submission.scores).map_err(|source| {
            SqliteRatingStoreError::EncodeScores {
                key: submission.key.clone(),
                source,
            }
        })?;
        self.connection
            .execute(
                "INSERT INTO menu_ratings (venue, menu, scores) VALUES (?1, ?2, ?3)",
                params![submission.key.venue, submission.key.menu, scores],
            )
            .map_err(|source| SqliteRatingStoreError::Query {
                operation: "insert menu rating",
                source,
            })?;
        debug!("recorded menu rating for {}", submission.key);
        Ok(())
    }

    fn record_venue_rating(
        &mut self,
        venue: &str,
        rating: VenueRating,
    ) -> Result<(), Self::Error> {
        self.connection
            .execute(
                "INSERT INTO venue_ratings (venue, stars) VALUES (?1, ?2)",
                params![venue, rating.0],
            )
            .map_err(|source| SqliteRatingStoreError::Query {
                operation: "insert venue rating",
                source,
            })?;
        debug!("recorded venue rating for {venue}");
        Ok(())
    }
}
