//! The capability set a handle needs from its transport (spec §4.2).
//!
//! The source codec expresses this as a struct of function pointers
//! (`read`/`write`/`seek`/`close`) installed per backend. Rust expresses the
//! same polymorphism as trait bounds: [`Archive`](crate::archive::Archive)
//! requires [`SeekableRead`], [`Builder`](crate::builder::Builder) requires
//! plain `Write`, and the push-based linear/custom variants need neither —
//! they are driven directly rather than pulled through a trait object.
//! `close` has no explicit method; it falls out of `Drop` on the underlying
//! transport, the same as any other owned Rust resource.

use std::io::{Read, Seek};

/// The read-plus-seek capability pair the seekable reader needs.
///
/// A blanket impl covers every type that is already `Read + Seek` — a file,
/// an in-memory cursor, or a caller's own type wired up with both traits —
/// so this exists purely to give the pair a name, matching how spec §4.2
/// names "read+seek" as reading's required capability set rather than
/// inventing a new trait per backend.
pub trait SeekableRead: Read + Seek {}

impl<T: Read + Seek + ?Sized> SeekableRead for T {}
