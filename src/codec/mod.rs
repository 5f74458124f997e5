//! The codec contract, and every codec built on top of it.
//!
//! A codec is constructed once (often as a `const`/static value, or a
//! cheap composite built from other codecs) and then used immutably:
//! any number of threads may call its operations concurrently against
//! disjoint buffers or streams. Composition is by parametric generics —
//! `SliceCodec<StringCodec>`, `PointerCodec<I64Codec>`, and so on — rather
//! than trait objects, so `requires_terminator` stays a compile-time fact
//! about the concrete codec type, resolved through the type system
//! instead of at runtime.

pub mod bignum;
pub mod bool_codec;
pub mod complex;
pub mod float;
pub mod int;
pub mod map;
pub mod pointer;
pub mod slice;
pub mod text;
pub mod tuple_struct;

use std::io::Read;
use std::io::Write;

use crate::error::Result;

/// A codec over logical type `Value`: bytes produced by `Append`, `Put`,
/// and `Write` for the same value are identical, and `Get`/`Read` accept
/// each other's output (the two-mode equivalence invariant).
///
/// `REQUIRES_TERMINATOR` is the static property an aggregate codec
/// consults to decide whether to wrap this codec in
/// [`crate::escape::Terminated`] before nesting it: `true` means this
/// codec's encoding has no intrinsic length and must be escape-terminated
/// to be embedded in a larger encoding.
pub trait Codec {
    type Value;

    const REQUIRES_TERMINATOR: bool;

    /// Grows `dst` with the encoding of `value`.
    fn append(&self, dst: &mut Vec<u8>, value: &Self::Value);

    /// Writes the encoding of `value` into the front of `dst`, which must
    /// be at least as long as the encoding, returning the number of bytes
    /// written.
    fn put(&self, dst: &mut [u8], value: &Self::Value) -> usize;

    /// Consumes a prefix of `src`, returning the decoded value and the
    /// number of bytes consumed.
    fn get(&self, src: &[u8]) -> Result<(Self::Value, usize)>;

    /// Streaming counterpart of [`Codec::append`]/[`Codec::put`]. The
    /// default routes through `append` and a single `write_all`; codecs
    /// whose encoding is itself a stream of sub-values (aggregates)
    /// override this to avoid buffering the whole value in memory.
    fn write<W: Write>(&self, w: &mut W, value: &Self::Value) -> Result<()> {
        let mut buf = Vec::new();
        self.append(&mut buf, value);
        w.write_all(&buf)?;
        Ok(())
    }

    /// Streaming counterpart of [`Codec::get`]. Must not read past the end
    /// of the value: implementations may not wrap `r` in a buffered
    /// reader that could swallow bytes belonging to whatever comes next
    /// in the caller's stream.
    fn read<R: Read>(&self, r: &mut R) -> Result<Self::Value>;

    /// The number of bytes `append`/`put`/`write` will produce for
    /// `value`, when it can be computed without actually encoding. Used by
    /// aggregate codecs to presize buffers; the default falls back to
    /// encoding into a scratch buffer.
    fn encoded_len(&self, value: &Self::Value) -> usize {
        let mut buf = Vec::new();
        self.append(&mut buf, value);
        buf.len()
    }
}
