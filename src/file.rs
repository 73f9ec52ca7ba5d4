//! Seekable file-backend convenience constructors (spec §6).
//!
//! `std::fs::File` already satisfies [`SeekableRead`](crate::backend::SeekableRead)
//! and `Write`, so these are thin helpers around [`fs::OpenOptions`] rather
//! than a distinct backend type — there is nothing to wrap beyond the two
//! open modes spec §6 names.

use std::fs::{self, File};
use std::path::Path;

use crate::archive::Archive;
use crate::builder::Builder;
use crate::error::{Error, Result};

/// Opens `path` read-only and returns an [`Archive`] positioned at the
/// archive origin. Mode `"r"` in spec §6.
pub fn open_archive<P: AsRef<Path>>(path: P) -> Result<Archive<File>> {
    let file = File::open(path).map_err(Error::OpenFail)?;
    Ok(Archive::new(file))
}

/// Creates (truncating any existing file) `path` for writing and returns a
/// [`Builder`] ready to receive headers. Mode `"w"` in spec §6.
pub fn create_archive<P: AsRef<Path>>(path: P) -> Result<Builder<File>> {
    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(Error::OpenFail)?;
    Ok(Builder::new(file))
}
