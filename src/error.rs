use std::io;

/// Everything that can go wrong while decoding, encoding, or transporting a
/// tar record.
///
/// Variants correspond to the error kinds of the source format: `Success` has
/// no variant because it is simply `Ok(())`/`Ok(T)`. [`Error::NullRecord`] is
/// structurally an error but semantically a normal end-of-archive marker —
/// callers that iterate headers are expected to match on it explicitly
/// rather than treat it as a failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backend reported an I/O failure during a read.
    #[error("backend read failed: {0}")]
    ReadFail(#[source] io::Error),

    /// The backend reported an I/O failure during a write.
    #[error("backend write failed: {0}")]
    WriteFail(#[source] io::Error),

    /// The backend reported an I/O failure during a seek.
    #[error("backend seek failed: {0}")]
    SeekFail(#[source] io::Error),

    /// Opening the backend (file, custom stream) did not succeed.
    #[error("failed to open backend: {0}")]
    OpenFail(#[source] io::Error),

    /// A header's checksum field did not match the computed checksum of its
    /// 512 bytes. Fatal for the current record; the decoder does not attempt
    /// to resynchronize.
    #[error("header checksum mismatch")]
    BadChecksum,

    /// A single all-zero 512-byte record was observed. This is the normal
    /// end-of-archive indicator, not a failure.
    #[error("null record (end of archive)")]
    NullRecord,

    /// `find` exhausted the archive without a matching name.
    #[error("name not found in archive")]
    NotFound,

    /// A declared payload size, a name/linkname, or a write would overflow
    /// the field or the space available for it (size fields hold at most 11
    /// octal digits, i.e. payloads must be smaller than 8 GiB; names and
    /// linknames are capped at 99 bytes plus the terminating NUL; writing
    /// more payload bytes than declared also lands here).
    #[error("value overflows its on-wire field")]
    Overflow,

    /// The memory backend could not grow its buffer.
    #[error("memory backend allocation failed")]
    Memory,

    /// An operation was attempted out of the order the handle requires (for
    /// example `read_data` before `read_header`, or `finalize` while a
    /// payload is still owed).
    #[error("operation used out of order: {0}")]
    OutOfOrder(&'static str),

    /// The backend reported an unspecified failure.
    #[error("backend failure: {0}")]
    Failure(#[source] io::Error),
}

impl Error {
    /// A short, stable, ASCII name for the error kind — the Rust analogue of
    /// the source format's `strerror`-style kind-to-name mapping.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Error::ReadFail(_) => "READFAIL",
            Error::WriteFail(_) => "WRITEFAIL",
            Error::SeekFail(_) => "SEEKFAIL",
            Error::OpenFail(_) => "OPENFAIL",
            Error::BadChecksum => "BADCHKSUM",
            Error::NullRecord => "NULLRECORD",
            Error::NotFound => "NOTFOUND",
            Error::Overflow => "OVERFLOW",
            Error::Memory => "MEMORY",
            Error::OutOfOrder(_) => "OUTOFORDER",
            Error::Failure(_) => "FAILURE",
        }
    }

    /// True for [`Error::NullRecord`], the one variant callers are expected
    /// to treat as a normal terminator rather than a failure.
    pub fn is_null_record(&self) -> bool {
        matches!(self, Error::NullRecord)
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn bad_archive() -> Error {
    Error::BadChecksum
}
