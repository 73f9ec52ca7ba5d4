//! A small, portable codec for the ustar/"old GNU" tar archive family.
//!
//! This crate targets embedded and resource-constrained contexts where a
//! general archiving utility is unwanted: it does no compression, owns no
//! threads, and allocates only when the [`memory`] backend is selected. The
//! codec is reachable through three access modalities:
//!
//! - [`Archive`] — a seekable reader over any `Read + Seek` transport, with
//!   header re-reading, name lookup, and an iterator convenience.
//! - [`LinearDecoder`] — a non-seekable decoder driven by feeding it byte
//!   chunks of arbitrary size, for streams that can't be rewound.
//! - [`Builder`] — a writer that emits conforming records, padding, and the
//!   terminator onto any `Write` transport.
//!
//! [`memory`] and [`file`] provide ready-made backends; [`custom`] shows how
//! to drive the codec over a caller-supplied sink or any other `Read`/
//! `Write`/`Seek` implementation without a dedicated backend type.

pub mod archive;
pub mod backend;
pub mod builder;
pub mod custom;
pub mod entry_type;
pub mod error;
pub mod file;
pub mod header;
pub mod linear;
pub mod memory;

pub use archive::{Archive, Headers};
pub use backend::SeekableRead;
pub use builder::Builder;
pub use custom::SinkWriter;
pub use entry_type::EntryType;
pub use error::{Error, Result};
pub use file::{create_archive, open_archive};
pub use header::{Header, BLOCK_SIZE, MAX_NAME_LEN, MAX_SIZE};
pub use linear::{Feed, LinearDecoder};
pub use memory::{MemoryReader, MemoryWriter};
