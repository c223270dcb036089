//! Filesystem helpers built on `cap-std` and `camino`.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use std::io;

/// Open a UTF-8 file path using ambient authority.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Return whether `path` exists and is a regular file.
///
/// # Errors
/// Returns the underlying I/O error when the parent directory cannot be
/// opened or the entry cannot be inspected; a missing entry reports
/// [`io::ErrorKind::NotFound`].
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("path should include a file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(file_name).map(|meta| meta.is_file())
}

/// Create the parent directory of `path` when it does not exist yet.
///
/// Missing directories are created beneath the nearest existing ancestor,
/// which is opened with ambient authority so relative parents may start
/// with `..`.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty()
        || fs_utf8::Dir::open_ambient_dir(parent, ambient_authority()).is_ok()
    {
        return Ok(());
    }

    let (base, relative) = nearest_existing_ancestor(parent)?;
    base.create_dir_all(relative)
}

fn nearest_existing_ancestor(dir: &Utf8Path) -> io::Result<(fs_utf8::Dir, &Utf8Path)> {
    for ancestor in dir.ancestors().skip(1) {
        let base = if ancestor.as_str().is_empty() {
            Utf8Path::new(".")
        } else {
            ancestor
        };
        match fs_utf8::Dir::open_ambient_dir(base, ambient_authority()) {
            Ok(opened) => {
                let relative = dir.strip_prefix(ancestor).map_err(io::Error::other)?;
                return Ok((opened, relative));
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
    }
    Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("no existing ancestor directory for {dir}"),
    ))
}
