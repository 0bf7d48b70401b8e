//! Database path checks built on `cap-std` and `camino`.

use std::io;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};

/// Directory holding `path`, treating a bare file name as the working directory.
fn parent_of(path: &Utf8Path) -> &Utf8Path {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    }
}

/// Return whether the database at `path` exists and is a regular file.
///
/// A missing file or parent directory surfaces as [`io::ErrorKind::NotFound`].
pub(crate) fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other("database path should include a file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent_of(path), ambient_authority())?;
    dir.metadata(name).map(|meta| meta.is_file())
}

/// Create the directories leading to a new database file.
pub(crate) fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    fs_utf8::Dir::create_ambient_dir_all(parent_of(path), ambient_authority())
}
