//! Linear-stream and custom backends (spec §6).
//!
//! A linear *read* stream needs nothing beyond [`LinearDecoder`](crate::linear::LinearDecoder)
//! itself — data is pushed into it directly, there is no backend object to
//! construct. A linear *write* stream pushes each emission out through a
//! caller-supplied sink rather than into a buffer or file; [`SinkWriter`]
//! adapts that sink to `Write` so it plugs straight into
//! [`Builder`](crate::builder::Builder).
//!
//! The fully custom backend named in spec §6 — "zero-initialize a handle,
//! install the needed callbacks, use it directly; `open` must not be called
//! on it" — has no dedicated type here at all: implementing `Read`/`Write`/
//! `Seek` (or neither, for the linear variants) on a caller's own type *is*
//! installing the callbacks, and passing that value straight to
//! [`Archive::new`](crate::archive::Archive::new) or
//! [`Builder::new`](crate::builder::Builder::new) *is* using the handle
//! directly. There is no `open` to call by construction.

use std::io;
use std::io::Write;

/// Adapts a sink callback `FnMut(&[u8]) -> io::Result<()>` to `Write`, so a
/// [`Builder`](crate::builder::Builder) can drive a linear write stream
/// without knowing its destination is a callback rather than a file or
/// buffer.
///
/// The codec calls the sink once per emission (header, payload chunk, pad,
/// terminator block) exactly as spec §6 describes; `SinkWriter` does not
/// batch or buffer them.
pub struct SinkWriter<F> {
    sink: F,
}

impl<F> SinkWriter<F>
where
    F: FnMut(&[u8]) -> io::Result<()>,
{
    /// Wraps `sink` so it can be used as a [`Builder`](crate::builder::Builder) writer.
    pub fn new(sink: F) -> SinkWriter<F> {
        SinkWriter { sink }
    }
}

impl<F> Write for SinkWriter<F>
where
    F: FnMut(&[u8]) -> io::Result<()>,
{
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        (self.sink)(data)?;
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;

    #[test]
    fn sink_writer_receives_every_emission() {
        let mut emissions: Vec<Vec<u8>> = Vec::new();
        {
            let sink = SinkWriter::new(|data: &[u8]| {
                emissions.push(data.to_vec());
                Ok(())
            });
            let mut b = Builder::new(sink);
            b.write_file_header("a", 1).unwrap();
            b.write_data(b"x").unwrap();
            b.finalize().unwrap();
        }
        // header, payload, pad (separate write_all calls), terminator x2
        assert_eq!(emissions.len(), 5);
        assert_eq!(emissions[0].len(), 512);
        let total: usize = emissions.iter().map(|e| e.len()).sum();
        assert_eq!(total, 512 + 512 + 1024);
    }

    #[test]
    fn sink_error_propagates_as_a_write_failure() {
        use crate::error::Error;

        let sink = SinkWriter::new(|_: &[u8]| {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "downstream gone"))
        });
        let mut b = Builder::new(sink);
        assert!(matches!(b.write_file_header("a", 0), Err(Error::WriteFail(_))));
    }
}
