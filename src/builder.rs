//! The writer (spec §4.4): emits headers, payload, per-record zero-padding,
//! and the two-block terminator.

use std::io::Write;

use log::trace;

use crate::entry_type::EntryType;
use crate::error::{Error, Result};
use crate::header::{Header, BLOCK_SIZE};

/// Writer state machine: `Idle -> HeaderWritten(remaining) -> Idle` once
/// `remaining` reaches zero, which is also when the padding block for that
/// entry is emitted. Under correct use `finalize` only runs from `Idle`;
/// see [`Builder::finalize`] for what happens if a caller violates that.
enum State {
    Idle,
    HeaderWritten { remaining: u64 },
}

/// A handle for building an archive from scratch into any writer.
pub struct Builder<W: Write> {
    inner: W,
    written: u64,
    state: State,
    finished: bool,
}

impl<W: Write> Builder<W> {
    /// Creates a new builder writing into `inner`.
    pub fn new(inner: W) -> Builder<W> {
        Builder {
            inner,
            written: 0,
            state: State::Idle,
            finished: false,
        }
    }

    /// The number of bytes written to the underlying writer so far.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        self.inner.write_all(buf).map_err(Error::WriteFail)?;
        self.written += buf.len() as u64;
        Ok(())
    }

    fn require_idle(&self, op: &'static str) -> Result<()> {
        match self.state {
            State::Idle => Ok(()),
            State::HeaderWritten { .. } => Err(Error::OutOfOrder(op)),
        }
    }

    /// Writes a regular-file header declaring `size` bytes of payload to
    /// follow.
    pub fn write_file_header(&mut self, name: &str, size: u64) -> Result<()> {
        self.require_idle("write_file_header called while a payload is owed")?;
        let mut header = Header::new();
        header.name = name.to_string();
        header.size = size;
        header.entry_type = EntryType::file();
        self.write_header(&header)
    }

    /// Writes a directory-type header (type `'5'`, size 0, no payload or
    /// padding follows).
    pub fn write_dir_header(&mut self, name: &str) -> Result<()> {
        self.require_idle("write_dir_header called while a payload is owed")?;
        let mut header = Header::new();
        header.name = name.to_string();
        header.size = 0;
        header.entry_type = EntryType::dir();
        self.write_header(&header)
    }

    /// Writes an arbitrary caller-constructed header and transitions into
    /// `HeaderWritten` for `header.size` bytes of payload — or straight back
    /// to `Idle` when `header.size` is 0, since no `write_data` call will
    /// ever arrive to drive that transition itself (e.g. directory entries).
    pub fn write_header(&mut self, header: &Header) -> Result<()> {
        self.require_idle("write_header called while a payload is owed")?;
        let block = header.encode()?;
        self.write_all(&block)?;
        trace!("wrote header {}", header);
        if header.size == 0 {
            self.pad_current_entry()?;
            self.state = State::Idle;
        } else {
            self.state = State::HeaderWritten { remaining: header.size };
        }
        Ok(())
    }

    /// Writes payload bytes for the entry whose header was just written.
    ///
    /// When the running count of bytes written for this entry reaches the
    /// size declared in the header, the padding needed to reach the next
    /// 512-byte boundary is emitted automatically and the state machine
    /// returns to `Idle`. Writing more than declared is refused; writing
    /// less and moving on (a "payload underrun") is permitted and leaves the
    /// archive truncated for that entry — the caller's bug, not a condition
    /// this library repairs or crashes on.
    pub fn write_data(&mut self, buf: &[u8]) -> Result<()> {
        let remaining = match self.state {
            State::HeaderWritten { remaining } => remaining,
            State::Idle => {
                return Err(Error::OutOfOrder("write_data called before write_file_header"))
            }
        };
        if buf.len() as u64 > remaining {
            return Err(Error::Overflow);
        }
        self.write_all(buf)?;
        let remaining = remaining - buf.len() as u64;
        if remaining == 0 {
            self.pad_current_entry()?;
            self.state = State::Idle;
        } else {
            self.state = State::HeaderWritten { remaining };
        }
        Ok(())
    }

    fn pad_current_entry(&mut self) -> Result<()> {
        let overhang = self.written % BLOCK_SIZE;
        if overhang != 0 {
            let pad = vec![0u8; (BLOCK_SIZE - overhang) as usize];
            self.write_all(&pad)?;
        }
        Ok(())
    }

    /// Writes two 512-byte all-zero blocks, terminating the archive.
    ///
    /// Under correct use this only runs from `Idle` (no payload owed). If a
    /// caller finalizes mid-entry anyway — a payload underrun they never
    /// closed out — this still succeeds: the terminator is written wherever
    /// the cursor happens to be, leaving that entry's trailing bytes (and
    /// block alignment) undefined rather than panicking or blocking the
    /// caller's intentionally-permitted underrun.
    pub fn finalize(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.write_all(&[0u8; BLOCK_SIZE as usize])?;
        self.write_all(&[0u8; BLOCK_SIZE as usize])?;
        self.finished = true;
        Ok(())
    }

    /// Unwraps this builder, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_entry_archive_has_the_spec_length() {
        let mut b = Builder::new(Vec::new());
        b.write_file_header("test1.txt", 11).unwrap();
        b.write_data(b"Hello world").unwrap();
        b.finalize().unwrap();
        let bytes = b.into_inner();
        // header(512) + payload rounded to 512 + terminator(1024)
        assert_eq!(bytes.len() as u64, 512 + 512 + 1024);
    }

    #[test]
    fn two_entry_archive_matches_invariant_1() {
        let mut b = Builder::new(Vec::new());
        b.write_file_header("test1.txt", 11).unwrap();
        b.write_data(b"Hello world").unwrap();
        b.write_file_header("test2.txt", 13).unwrap();
        b.write_data(b"Goodbye world").unwrap();
        b.finalize().unwrap();
        let bytes = b.into_inner();
        assert_eq!(bytes.len(), 3584);
        assert_eq!(&bytes[0..10], b"test1.txt\0");
    }

    #[test]
    fn last_1024_bytes_of_a_finalized_archive_are_zero() {
        let mut b = Builder::new(Vec::new());
        b.write_file_header("a", 1).unwrap();
        b.write_data(b"x").unwrap();
        b.finalize().unwrap();
        let bytes = b.into_inner();
        let tail = &bytes[bytes.len() - 1024..];
        assert!(tail.iter().all(|&b| b == 0));
    }

    #[test]
    fn writing_more_than_declared_size_is_refused() {
        let mut b = Builder::new(Vec::new());
        b.write_file_header("a", 2).unwrap();
        assert!(matches!(b.write_data(b"abc"), Err(Error::Overflow)));
    }

    #[test]
    fn underrun_then_finalize_succeeds_but_leaves_the_entry_truncated() {
        // Spec scenario S6: declare size 3, write only 1 byte, finalize.
        let mut b = Builder::new(Vec::new());
        b.write_file_header("a", 3).unwrap();
        b.write_data(b"a").unwrap();
        b.finalize().unwrap();
        let bytes = b.into_inner();
        // header(512) + 1 byte actually written + terminator(1024); no
        // padding was ever emitted because `remaining` never hit 0.
        assert_eq!(bytes.len(), 512 + 1 + 1024);
        assert_eq!(bytes[512], b'a');
    }

    #[test]
    fn directory_header_has_no_payload_or_padding() {
        let mut b = Builder::new(Vec::new());
        b.write_dir_header("dir").unwrap();
        b.finalize().unwrap();
        let bytes = b.into_inner();
        assert_eq!(bytes.len(), 512 + 1024);
    }

    #[test]
    fn a_header_after_a_directory_entry_is_not_out_of_order() {
        // A zero-size header (directory) never gets a matching `write_data`
        // call, so it must return the builder to `Idle` on its own.
        let mut b = Builder::new(Vec::new());
        b.write_dir_header("d").unwrap();
        b.write_file_header("d/f", 5).unwrap();
        b.write_data(b"hello").unwrap();
        b.finalize().unwrap();
        let bytes = b.into_inner();
        assert_eq!(bytes.len(), 512 + 512 + 512 + 1024);
    }

    #[test]
    fn finalize_is_idempotent() {
        let mut b = Builder::new(Vec::new());
        b.finalize().unwrap();
        b.finalize().unwrap();
        assert_eq!(b.into_inner().len(), 1024);
    }

    #[test]
    fn write_data_before_any_header_is_out_of_order() {
        let mut b = Builder::new(Vec::new());
        assert!(matches!(b.write_data(b"x"), Err(Error::OutOfOrder(_))));
    }

    #[test]
    fn second_header_while_payload_owed_is_out_of_order() {
        let mut b = Builder::new(Vec::new());
        b.write_file_header("a", 5).unwrap();
        assert!(matches!(b.write_file_header("b", 1), Err(Error::OutOfOrder(_))));
    }
}
