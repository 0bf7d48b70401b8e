//! Opening the ratings database for a subcommand.

use cafeteria_core::SqliteRatingStore;
use camino::Utf8Path;
use log::debug;

use crate::{ARG_DATABASE, CliError, fs};

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path) -> Result<(), CliError> {
    match fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::DatabaseNotFile {
            field: ARG_DATABASE,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingDatabase {
                field: ARG_DATABASE,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectDatabase {
            field: ARG_DATABASE,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Open an existing database for queries.
pub(crate) fn open_for_reading(path: &Utf8Path) -> Result<SqliteRatingStore, CliError> {
    require_existing(path)?;
    debug!("opening ratings database {path} read-only");
    Ok(SqliteRatingStore::open_read_only(path.as_std_path())?)
}

/// Open the database for appending, creating it and its directory on demand.
pub(crate) fn open_for_writing(path: &Utf8Path) -> Result<SqliteRatingStore, CliError> {
    fs::ensure_parent_dir(path).map_err(|source| CliError::InspectDatabase {
        field: ARG_DATABASE,
        path: path.to_path_buf(),
        source,
    })?;
    debug!("opening ratings database {path} for writing");
    Ok(SqliteRatingStore::open(path.as_std_path())?)
}
