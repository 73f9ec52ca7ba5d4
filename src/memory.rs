//! The memory backend (spec §4.6): a growable buffer substrate for writing,
//! and an addressable view over caller-owned bytes for reading.

use std::io;
use std::io::{Read, Seek, SeekFrom, Write};

/// A growable in-memory archive buffer, suitable as the `W` in
/// [`Builder`](crate::builder::Builder).
///
/// Writes append and double the backing allocation as needed (minimum
/// growth is always at least the write length, same as `Vec`'s own growth
/// policy) — there is no separate doubling logic to maintain, `Vec<u8>`
/// already provides it. This type exists to name the "take buffer after
/// finalize" ownership-transfer operation spec §9 calls out explicitly,
/// which a bare `Vec<u8>` has no need for since the caller already owns it
/// outright; it is kept as a thin wrapper for symmetry with [`MemoryReader`]
/// and to give `mem_size()` a home.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    buf: Vec<u8>,
}

impl MemoryWriter {
    /// A fresh, empty write buffer.
    pub fn new() -> MemoryWriter {
        MemoryWriter { buf: Vec::new() }
    }

    /// The logical size written so far.
    pub fn mem_size(&self) -> usize {
        self.buf.len()
    }

    /// Hands the backing buffer to the caller, leaving this writer empty.
    ///
    /// This is the explicit "take buffer" operation from spec §9: ownership
    /// of the grown allocation transfers to the caller, who becomes
    /// responsible for it. Call this after
    /// [`Builder::finalize`](crate::builder::Builder::finalize).
    pub fn take_buffer(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buf)
    }
}

impl Write for MemoryWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A read-only, seekable view over caller-owned bytes, for use as the `R`
/// in [`Archive`](crate::archive::Archive).
///
/// Spec §6 describes the memory-read backend as a non-copying view that the
/// caller must keep alive until close; borrowing `&'a [u8]` directly, rather
/// than cloning, is the Rust rendering of that constraint — the borrow
/// checker enforces the "keep it alive" obligation instead of it being a
/// documented precondition.
#[derive(Debug)]
pub struct MemoryReader<'a> {
    bytes: &'a [u8],
    pos: u64,
}

impl<'a> MemoryReader<'a> {
    /// A view over `bytes`, cursor at the start.
    pub fn new(bytes: &'a [u8]) -> MemoryReader<'a> {
        MemoryReader { bytes, pos: 0 }
    }
}

impl<'a> Read for MemoryReader<'a> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let pos = self.pos as usize;
        if pos >= self.bytes.len() {
            return Ok(0);
        }
        let n = out.len().min(self.bytes.len() - pos);
        out[..n].copy_from_slice(&self.bytes[pos..pos + n]);
        self.pos += n as u64;
        Ok(n)
    }
}

impl<'a> Seek for MemoryReader<'a> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(n) => n as i64,
            SeekFrom::End(n) => self.bytes.len() as i64 + n,
            SeekFrom::Current(n) => self.pos as i64 + n,
        };
        if target < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek before byte 0",
            ));
        }
        self.pos = target as u64;
        Ok(self.pos)
    }
}
