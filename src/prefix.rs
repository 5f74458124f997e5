//! Nil/non-nil prefix bytes and their ordering.
//!
//! Every nil-able codec is constructed with a [`NilOrdering`] choice, fixed
//! for the lifetime of the codec: nils-first or nils-last. The prefix byte
//! written is the only thing that differs between the two; everything else
//! about encoding the non-nil payload is identical.

use std::io::Read;
use std::io::Write;

use log::debug;

use crate::error::CodecError;
use crate::error::Result;
use crate::primitive::read_exact_distinguishing_eof;

/// Sorts nil below every non-nil encoding.
pub const NIL_FIRST: u8 = 0x02;
/// Marks a non-nil value; sorts between the two nil prefixes.
pub const NON_NIL: u8 = 0x03;
/// Sorts nil above every non-nil encoding.
pub const NIL_LAST: u8 = 0xFD;

/// Which end of the ordering nil sorts to. Chosen once, at codec
/// construction; a decoder built for one ordering rejects encodings
/// produced by the other.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NilOrdering {
    NilsFirst,
    NilsLast,
}

impl NilOrdering {
    fn nil_byte(self) -> u8 {
        match self {
            NilOrdering::NilsFirst => NIL_FIRST,
            NilOrdering::NilsLast => NIL_LAST,
        }
    }
}

/// The result of decoding a prefix byte: either the value was nil (`done`
/// callers return immediately), or a non-nil value follows.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PrefixOutcome {
    Nil,
    NonNil,
}

impl PrefixOutcome {
    pub fn is_nil(self) -> bool {
        matches!(self, PrefixOutcome::Nil)
    }
}

/// A constructed nil/non-nil prefix codec for one [`NilOrdering`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Prefix {
    ordering: NilOrdering,
}

impl Prefix {
    pub const fn new(ordering: NilOrdering) -> Self {
        Prefix { ordering }
    }

    pub const fn nils_first() -> Self {
        Prefix::new(NilOrdering::NilsFirst)
    }

    pub const fn nils_last() -> Self {
        Prefix::new(NilOrdering::NilsLast)
    }

    pub fn ordering(&self) -> NilOrdering {
        self.ordering
    }

    pub fn append(&self, dst: &mut Vec<u8>, is_nil: bool) {
        dst.push(if is_nil { self.ordering.nil_byte() } else { NON_NIL });
    }

    pub fn put(&self, dst: &mut [u8], is_nil: bool) -> usize {
        dst[0] = if is_nil { self.ordering.nil_byte() } else { NON_NIL };
        1
    }

    /// Reads a single prefix byte from `src` and validates it against this
    /// codec's declared ordering.
    pub fn get(&self, src: &[u8]) -> Result<(PrefixOutcome, usize)> {
        if src.is_empty() {
            return Err(CodecError::Eof);
        }
        let outcome = self.classify(src[0])?;
        Ok((outcome, 1))
    }

    pub fn write<W: Write>(&self, w: &mut W, is_nil: bool) -> Result<()> {
        let b = if is_nil { self.ordering.nil_byte() } else { NON_NIL };
        w.write_all(&[b])?;
        Ok(())
    }

    pub fn read<R: Read>(&self, r: &mut R) -> Result<PrefixOutcome> {
        let mut b = [0u8; 1];
        read_exact_distinguishing_eof(r, &mut b)?;
        self.classify(b[0])
    }

    fn classify(&self, b: u8) -> Result<PrefixOutcome> {
        match b {
            NON_NIL => Ok(PrefixOutcome::NonNil),
            NIL_FIRST | NIL_LAST => {
                if b == self.ordering.nil_byte() {
                    Ok(PrefixOutcome::Nil)
                } else {
                    debug!(
                        "prefix byte {:#04x} does not match this codec's {:?} ordering",
                        b, self.ordering
                    );
                    Err(match self.ordering {
                        NilOrdering::NilsFirst => CodecError::UnexpectedNilsFirst(b),
                        NilOrdering::NilsLast => CodecError::UnexpectedNilsLast(b),
                    })
                }
            }
            other => {
                debug!("unrecognised prefix byte {:#04x}", other);
                Err(CodecError::UnexpectedPrefix(other))
            }
        }
    }
}
