//! Test helpers for seeding ratings databases and invoking subcommands.

use super::*;
use cafeteria_core::{MenuKey, RatingSink, RatingSubmission, SqliteRatingStore};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Temporary directory holding a ratings database path.
pub(super) struct Workspace {
    _dir: TempDir,
    database: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        Self {
            _dir: dir,
            database: root.join("ratings.db"),
        }
    }

    pub(super) fn database(&self) -> &Utf8Path {
        &self.database
    }

    /// Write two menus whose weighted scores are easy to check by hand.
    pub(super) fn seed_two_menus(&self) {
        let mut store = SqliteRatingStore::open(self.database.as_std_path()).expect("open store");
        for (menu, taste, portion, price) in [
            ("curry", 4.0, 1.0, 5.0),
            ("curry", 4.0, 3.0, 5.0),
            ("salad", 1.0, 5.0, 2.0),
            ("salad", 3.0, 5.0, 2.0),
        ] {
            let submission = RatingSubmission::new(MenuKey::new("Annex", menu))
                .with_score("taste", taste)
                .with_score("portion", portion)
                .with_score("price", price);
            store.record_menu_rating(&submission).expect("seed rating");
        }
    }
}

/// Parse `argv` and run the selected subcommand, capturing stdout.
pub(super) fn invoke<I, S>(argv: I, stdout: &mut Vec<u8>) -> Result<(), CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::try_parse_from(argv)?;
    dispatch(cli.command, stdout)
}
