//! The linear (non-seekable) decoder (spec §4.5) — the hard subsystem.
//!
//! Consumes a tar byte stream fed in arbitrary chunk sizes, never seeking
//! backward, while presenting the same header-then-payload shape as the
//! seekable reader. All cross-feed state fits in a fixed footprint: a
//! 512-byte scratch block (partial header), a remaining-payload counter,
//! and a residual-pad counter — independent of how big each fed chunk is.
//!
//! The source C codec stores the caller's chunk as a raw pointer that must
//! outlive however many calls it takes to drain it. Rust has no sound way to
//! stash a borrow across calls without tying it to a lifetime parameter, so
//! this is rendered as a short-lived [`Feed`] borrowing the chunk for
//! exactly as long as the caller is draining it — the persistent state
//! (scratch buffer, remaining/pad counters) lives in [`LinearDecoder`]
//! itself, with no lifetime, and survives across `feed` calls. This keeps
//! the "do not modify the chunk until fully processed" precondition a
//! borrow-checker guarantee instead of a documented caller obligation.

use log::trace;

use crate::error::{Error, Result};
use crate::header::{pad_to_block, Header, BLOCK_SIZE};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum State {
    NeedHeader,
    HavePayload,
    End,
}

/// The persistent, fixed-size state of a linear decoder.
pub struct LinearDecoder {
    state: State,
    scratch: [u8; 512],
    held: usize,
    payload_remaining: u64,
    pad_remaining: u64,
}

impl LinearDecoder {
    /// A fresh decoder positioned at the start of an archive.
    pub fn new() -> LinearDecoder {
        LinearDecoder {
            state: State::NeedHeader,
            scratch: [0u8; 512],
            held: 0,
            payload_remaining: 0,
            pad_remaining: 0,
        }
    }

    /// True once the terminator has been observed; no further input is
    /// consumed.
    pub fn is_end(&self) -> bool {
        self.state == State::End
    }

    /// Payload bytes still owed for the entry currently in progress.
    pub fn file_data_remaining(&self) -> u64 {
        self.payload_remaining
    }

    /// Begins processing a freshly-fed chunk, returning a handle that
    /// borrows it until the caller is done draining headers/payload from
    /// it.
    pub fn feed<'d>(&mut self, data: &'d [u8]) -> Feed<'d, '_> {
        Feed { decoder: self, window: data }
    }
}

impl Default for LinearDecoder {
    fn default() -> LinearDecoder {
        LinearDecoder::new()
    }
}

/// A chunk currently being drained by the decoder.
///
/// Borrows the chunk for as long as the caller holds this value; dropping
/// it (to fetch the next chunk) is always safe even if payload bytes remain
/// undrained — the decoder's counters pick up exactly where they left off
/// on the next `feed` call.
pub struct Feed<'d, 'a> {
    decoder: &'a mut LinearDecoder,
    window: &'d [u8],
}

impl<'d, 'a> Feed<'d, 'a> {
    /// Bytes of this chunk not yet consumed.
    pub fn linear_data_available(&self) -> usize {
        self.window.len()
    }

    /// True once any payload and trailing padding owed by the entry currently
    /// in progress has been fully drained and the decoder is ready to decode
    /// the next header. A correct caller loop keeps calling
    /// `read_linear_data` — even once [`file_data_remaining`](LinearDecoder::file_data_remaining)
    /// reaches zero, since padding may still be outstanding — until this
    /// returns `true`, then switches back to `process`.
    pub fn ready_for_header(&self) -> bool {
        self.decoder.state == State::NeedHeader
    }

    /// Accumulates header bytes from the window.
    ///
    /// Returns `Ok(None)` if the window was exhausted before a full 512-byte
    /// block was collected (feed more data and call again) or if an entry's
    /// payload/padding is still being drained (keep calling
    /// `read_linear_data` until [`ready_for_header`](Feed::ready_for_header)
    /// is true); `Ok(Some(h))` once a header decodes successfully; or
    /// `Err(Error::NullRecord)` on the terminator — propagated rather than
    /// swallowed, same as the seekable reader. Once the terminator has been
    /// seen, further calls return `Ok(None)` — the state table's "ignore
    /// further input" for `End`.
    pub fn process(&mut self) -> Result<Option<Header>> {
        if self.decoder.state != State::NeedHeader {
            return Ok(None);
        }

        let avail = 512 - self.decoder.held;
        let take = avail.min(self.window.len());
        self.decoder.scratch[self.decoder.held..self.decoder.held + take]
            .copy_from_slice(&self.window[..take]);
        self.decoder.held += take;
        self.window = &self.window[take..];

        if self.decoder.held < 512 {
            return Ok(None);
        }
        self.decoder.held = 0;

        match Header::decode(&self.decoder.scratch) {
            Err(Error::NullRecord) => {
                self.decoder.state = State::End;
                Err(Error::NullRecord)
            }
            Err(e) => Err(e),
            Ok(header) => {
                trace!("linear decoder parsed header {}", header);
                let size = header.size;
                self.decoder.payload_remaining = size;
                self.decoder.pad_remaining = pad_to_block(size) - size;
                self.decoder.state = State::HavePayload;
                Ok(Some(header))
            }
        }
    }

    /// Pulls up to `out.len()` payload bytes from the window into `out`.
    ///
    /// Silently drains trailing padding once the payload is exhausted —
    /// padding may span feeds, in which case the residual pad count is
    /// retained on the decoder until a later feed finishes draining it,
    /// after which the decoder returns to `NeedHeader`. Returns the number
    /// of payload bytes copied into `out` (padding bytes consumed are not
    /// counted, since they carry no data).
    pub fn read_linear_data(&mut self, out: &mut [u8]) -> Result<usize> {
        if self.decoder.state != State::HavePayload {
            return Err(Error::OutOfOrder(
                "read_linear_data called before a header was decoded",
            ));
        }

        let take = out
            .len()
            .min(self.decoder.payload_remaining as usize)
            .min(self.window.len());
        out[..take].copy_from_slice(&self.window[..take]);
        self.window = &self.window[take..];
        self.decoder.payload_remaining -= take as u64;

        if self.decoder.payload_remaining == 0 {
            let pad_take = (self.decoder.pad_remaining as usize).min(self.window.len());
            self.window = &self.window[pad_take..];
            self.decoder.pad_remaining -= pad_take as u64;
            if self.decoder.pad_remaining == 0 {
                self.decoder.state = State::NeedHeader;
            }
        }

        Ok(take)
    }
}

const _: () = assert!(BLOCK_SIZE == 512);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;

    fn sample_archive() -> Vec<u8> {
        let mut b = Builder::new(Vec::new());
        b.write_file_header("test1.txt", 11).unwrap();
        b.write_data(b"Hello world").unwrap();
        b.write_file_header("test2.txt", 13).unwrap();
        b.write_data(b"Goodbye world").unwrap();
        b.finalize().unwrap();
        b.into_inner()
    }

    /// Feeds `chunks` through `dec` one at a time and returns the sequence
    /// of (name, payload) pairs observed, in order.
    ///
    /// Keeps draining an in-progress entry with `read_linear_data` until the
    /// decoder itself reports [`ready_for_header`](Feed::ready_for_header) —
    /// not merely once the payload byte count hits zero, since trailing
    /// padding can still be outstanding (and may span further feeds).
    fn drain(dec: &mut LinearDecoder, chunks: &[&[u8]]) -> Vec<(String, Vec<u8>)> {
        let mut out = Vec::new();
        let mut current: Option<(String, Vec<u8>)> = None;

        'feeding: for chunk in chunks {
            let mut f = dec.feed(chunk);
            loop {
                if current.is_some() {
                    let mut buf = [0u8; 512];
                    let n = f.read_linear_data(&mut buf).unwrap();
                    if n > 0 {
                        current.as_mut().unwrap().1.extend_from_slice(&buf[..n]);
                    }
                    if f.ready_for_header() {
                        let (name, collected) = current.take().unwrap();
                        out.push((name, collected));
                        continue;
                    }
                    if n == 0 {
                        continue 'feeding;
                    }
                } else {
                    match f.process() {
                        Ok(Some(header)) => {
                            current = Some((header.name.clone(), Vec::new()));
                        }
                        Ok(None) => continue 'feeding,
                        Err(Error::NullRecord) => break 'feeding,
                        Err(e) => panic!("unexpected error: {e:?}"),
                    }
                }
            }
        }
        out
    }

    fn split_fixed(bytes: &[u8], chunk_size: usize) -> Vec<&[u8]> {
        bytes.chunks(chunk_size).collect()
    }

    #[test]
    fn equivalent_to_the_seekable_reader_for_several_chunk_sizes() {
        let bytes = sample_archive();
        for &chunk in &[1usize, 7, 512, 3072, 1_000_000] {
            let mut dec = LinearDecoder::new();
            let chunks = split_fixed(&bytes, chunk);
            let result = drain(&mut dec, &chunks);
            assert_eq!(
                result,
                vec![
                    ("test1.txt".to_string(), b"Hello world".to_vec()),
                    ("test2.txt".to_string(), b"Goodbye world".to_vec()),
                ],
                "mismatch at chunk size {chunk}"
            );
            assert!(dec.is_end());
        }
    }

    #[test]
    fn random_chunk_sizes_produce_the_same_result() {
        use rand::rngs::SmallRng;
        use rand::{Rng, SeedableRng};

        let bytes = sample_archive();
        let mut rng = SmallRng::seed_from_u64(42);

        let mut pieces = Vec::new();
        let mut offset = 0;
        while offset < bytes.len() {
            let take = rng.gen_range(1..=37).min(bytes.len() - offset);
            pieces.push(&bytes[offset..offset + take]);
            offset += take;
        }

        let mut dec = LinearDecoder::new();
        let result = drain(&mut dec, &pieces);
        assert_eq!(
            result,
            vec![
                ("test1.txt".to_string(), b"Hello world".to_vec()),
                ("test2.txt".to_string(), b"Goodbye world".to_vec()),
            ]
        );
    }

    #[test]
    fn linear_data_available_reflects_the_current_window() {
        let bytes = sample_archive();
        let mut dec = LinearDecoder::new();
        let mut f = dec.feed(&bytes[..10]);
        assert_eq!(f.linear_data_available(), 10);
        f.process().unwrap();
        assert_eq!(f.linear_data_available(), 0);
    }

    #[test]
    fn corrupted_checksum_is_reported_mid_stream() {
        let mut bytes = sample_archive();
        bytes[148] ^= 0xff;
        let mut dec = LinearDecoder::new();
        let mut f = dec.feed(&bytes);
        assert!(matches!(f.process(), Err(Error::BadChecksum)));
    }

    #[test]
    fn read_before_header_is_out_of_order() {
        let mut dec = LinearDecoder::new();
        let mut f = dec.feed(&[0u8; 4]);
        let mut buf = [0u8; 4];
        assert!(matches!(f.read_linear_data(&mut buf), Err(Error::OutOfOrder(_))));
    }
}
