//! The seekable reader (spec §4.3): header iteration, positional payload
//! reads, and name lookup over any `Read + Seek` transport.

use std::io::{Read, Seek, SeekFrom};

use log::trace;

use crate::backend::SeekableRead;
use crate::error::{Error, Result};
use crate::header::{pad_to_block, Header};

struct Cached {
    header: Header,
    header_pos: u64,
    payload_pos: u64,
    payload_size: u64,
    data_read: u64,
}

/// A handle over a seekable tar archive.
///
/// A correctly written client pattern is `read_header -> (read_data)? ->
/// next`, repeated until `read_header` returns `Error::NullRecord`.
pub struct Archive<R: ?Sized> {
    pos: u64,
    cached: Option<Cached>,
    inner: R,
}

impl<R: SeekableRead> Archive<R> {
    /// Opens a handle over `inner`, positioned at the archive origin.
    pub fn new(inner: R) -> Archive<R> {
        Archive {
            pos: 0,
            cached: None,
            inner,
        }
    }

    /// Unwraps this handle, returning the underlying transport. The
    /// transport is not touched further — there is nothing to finalize on
    /// the read side.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.inner
            .seek(SeekFrom::Start(offset))
            .map(|_| ())
            .map_err(Error::SeekFail)
    }

    /// Reads the header at the current offset.
    ///
    /// Idempotent: calling this twice in a row without an intervening
    /// `next()` returns the same header without touching the backend again.
    /// Returns `Err(Error::NullRecord)` on the terminator.
    pub fn read_header(&mut self) -> Result<&Header> {
        if let Some(c) = &self.cached {
            if c.header_pos == self.pos {
                return Ok(&self.cached.as_ref().unwrap().header);
            }
        }

        self.seek_to(self.pos)?;
        let mut block = [0u8; 512];
        self.inner.read_exact(&mut block).map_err(Error::ReadFail)?;
        let header = Header::decode(&block)?;

        trace!("read_header at {}: {}", self.pos, header);

        let payload_size = header.size;
        self.cached = Some(Cached {
            header,
            header_pos: self.pos,
            payload_pos: self.pos + 512,
            payload_size,
            data_read: 0,
        });
        Ok(&self.cached.as_ref().unwrap().header)
    }

    /// Returns the header last read by `read_header`, if any, without
    /// touching the backend.
    pub fn current_header(&self) -> Option<&Header> {
        self.cached.as_ref().map(|c| &c.header)
    }

    /// Reads exactly `buf.len()` bytes from the current entry's payload.
    ///
    /// Requires a prior `read_header` call for the current record. Reading
    /// past the declared payload size is refused outright rather than
    /// silently crossing into the next record.
    pub fn read_data(&mut self, buf: &mut [u8]) -> Result<()> {
        let (payload_pos, data_read, payload_size) = {
            let c = self
                .cached
                .as_ref()
                .ok_or(Error::OutOfOrder("read_data called before read_header"))?;
            (c.payload_pos, c.data_read, c.payload_size)
        };
        let remaining = payload_size - data_read;
        if buf.len() as u64 > remaining {
            return Err(Error::Overflow);
        }

        self.seek_to(payload_pos + data_read)?;
        self.inner.read_exact(buf).map_err(Error::ReadFail)?;
        self.cached.as_mut().unwrap().data_read += buf.len() as u64;
        Ok(())
    }

    /// Advances the cursor past the current record's header and its payload,
    /// rounded up to the next 512-byte boundary. Uses the cached payload
    /// size, so a preceding `read_data` call is optional.
    pub fn next(&mut self) -> Result<()> {
        let c = self
            .cached
            .take()
            .ok_or(Error::OutOfOrder("next called before read_header"))?;
        self.pos = c.header_pos + 512 + pad_to_block(c.payload_size);
        Ok(())
    }

    /// Rewinds to the archive origin and clears any cached header state.
    pub fn rewind(&mut self) -> Result<()> {
        self.pos = 0;
        self.cached = None;
        Ok(())
    }

    /// Rewinds, then iterates `read_header`/`next` until a header whose
    /// name equals `name` byte-exactly is found. Leaves the cursor
    /// positioned so `read_data` reads that entry's payload.
    pub fn find(&mut self, name: &str) -> Result<&Header> {
        self.rewind()?;
        loop {
            match self.read_header() {
                Ok(_) => {
                    if self.cached.as_ref().unwrap().header.name == name {
                        return Ok(&self.cached.as_ref().unwrap().header);
                    }
                    self.next()?;
                }
                Err(Error::NullRecord) => return Err(Error::NotFound),
                Err(e) => return Err(e),
            }
        }
    }

    /// An iterator convenience over `read_header`/`next`, yielding cloned
    /// headers and stopping (rather than surfacing an error) on the
    /// terminator.
    pub fn headers(&mut self) -> Headers<'_, R> {
        Headers { archive: self, done: false }
    }
}

/// Iterator returned by [`Archive::headers`].
pub struct Headers<'a, R: ?Sized> {
    archive: &'a mut Archive<R>,
    done: bool,
}

impl<'a, R: SeekableRead> Iterator for Headers<'a, R> {
    type Item = Result<Header>;

    fn next(&mut self) -> Option<Result<Header>> {
        if self.done {
            return None;
        }
        match self.archive.read_header() {
            Ok(h) => {
                let h = h.clone();
                if let Err(e) = self.archive.next() {
                    self.done = true;
                    return Some(Err(e));
                }
                Some(Ok(h))
            }
            Err(Error::NullRecord) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
