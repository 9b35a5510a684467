//! Capability-based filesystem helpers built on `cap-std` and `camino`.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open a UTF-8 file path using ambient authority.
///
/// # Errors
///
/// Returns the I/O error raised when opening the file.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Create every missing directory above `path`.
///
/// # Errors
///
/// Returns the I/O error raised while creating a directory.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }

    let (base, relative) = split_base(parent);
    if relative.as_str().is_empty() {
        return Ok(());
    }
    let dir = fs_utf8::Dir::open_ambient_dir(base, ambient_authority())?;
    dir.create_dir_all(&relative)
}

/// Whether `path` exists and is a regular file.
///
/// # Errors
///
/// Returns the underlying I/O error, including `NotFound` when the path or
/// its parent directory is missing.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other("path should include a file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(name).map(|meta| meta.is_file())
}

/// Split a directory into an ambient root and the relative remainder.
fn split_base(parent: &Utf8Path) -> (&'static str, Utf8PathBuf) {
    if parent.is_absolute() {
        let relative = parent.strip_prefix("/").unwrap_or(parent);
        ("/", relative.to_path_buf())
    } else {
        (".", parent.to_path_buf())
    }
}
