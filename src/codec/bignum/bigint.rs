//! Arbitrary-precision signed integer codec.
//!
//! The signed byte-length of the magnitude is the primary sort key
//! (longer magnitudes sit farther from zero in either direction than
//! shorter ones), and the magnitude bytes are the tie-breaker, bit-flipped
//! for negative values so that a larger magnitude — which is a *smaller*
//! negative number — sorts first.

use std::io::Read;
use std::io::Write;

use num_bigint::BigInt;
use num_bigint::Sign;

use crate::codec::int::I64Codec;
use crate::codec::Codec;
use crate::error::CodecError;
use crate::error::Result;
use crate::prefix::NilOrdering;
use crate::prefix::Prefix;
use crate::prefix::PrefixOutcome;

/// Codec for `Option<BigInt>`: `None` is the nil value, nil-ordering
/// chosen at construction.
#[derive(Copy, Clone, Debug)]
pub struct BigIntCodec {
    prefix: Prefix,
}

impl BigIntCodec {
    pub const fn new(ordering: NilOrdering) -> Self {
        BigIntCodec {
            prefix: Prefix::new(ordering),
        }
    }

    fn magnitude_bytes(value: &BigInt) -> Vec<u8> {
        let (sign, bytes) = value.to_bytes_be();
        if sign == Sign::NoSign {
            Vec::new()
        } else {
            bytes
        }
    }

    /// Encodes the signed-length-then-magnitude payload with no nil prefix;
    /// reused by [`super::bigrational`] for numerator/denominator, which
    /// are never independently nil.
    pub(crate) fn encode_non_nil(dst: &mut Vec<u8>, value: &BigInt) {
        let magnitude = Self::magnitude_bytes(value);
        let negative = value.sign() == Sign::Minus;
        let size: i64 = if negative {
            -(magnitude.len() as i64)
        } else {
            magnitude.len() as i64
        };
        I64Codec.append(dst, &size);
        if negative {
            dst.extend(magnitude.iter().map(|b| !b));
        } else {
            dst.extend_from_slice(&magnitude);
        }
    }

    pub(crate) fn decode_non_nil(src: &[u8]) -> Result<(BigInt, usize)> {
        let (size, size_n) = I64Codec.get(src)?;
        let negative = size < 0;
        let len = size.unsigned_abs() as usize;
        let rest = &src[size_n..];
        if rest.len() < len {
            return Err(CodecError::UnexpectedEof);
        }
        let mut bytes = rest[..len].to_vec();
        if negative {
            for b in bytes.iter_mut() {
                *b = !*b;
            }
        }
        let value = if bytes.is_empty() {
            BigInt::from(0)
        } else if negative {
            BigInt::from_bytes_be(Sign::Minus, &bytes)
        } else {
            BigInt::from_bytes_be(Sign::Plus, &bytes)
        };
        Ok((value, size_n + len))
    }
}

impl Codec for BigIntCodec {
    type Value = Option<BigInt>;
    const REQUIRES_TERMINATOR: bool = false;

    fn append(&self, dst: &mut Vec<u8>, value: &Option<BigInt>) {
        self.prefix.append(dst, value.is_none());
        if let Some(v) = value {
            Self::encode_non_nil(dst, v);
        }
    }

    fn put(&self, dst: &mut [u8], value: &Option<BigInt>) -> usize {
        let mut buf = Vec::new();
        self.append(&mut buf, value);
        dst[..buf.len()].copy_from_slice(&buf);
        buf.len()
    }

    fn get(&self, src: &[u8]) -> Result<(Option<BigInt>, usize)> {
        let (outcome, prefix_n) = self.prefix.get(src)?;
        if outcome == PrefixOutcome::Nil {
            return Ok((None, prefix_n));
        }
        let (value, n) = Self::decode_non_nil(&src[prefix_n..])?;
        Ok((Some(value), prefix_n + n))
    }

    fn write<W: Write>(&self, w: &mut W, value: &Option<BigInt>) -> Result<()> {
        let mut buf = Vec::new();
        self.append(&mut buf, value);
        w.write_all(&buf)?;
        Ok(())
    }

    fn read<R: Read>(&self, r: &mut R) -> Result<Option<BigInt>> {
        let outcome = self.prefix.read(r)?;
        if outcome == PrefixOutcome::Nil {
            return Ok(None);
        }
        let size = crate::primitive::read_i64(r)?;
        let negative = size < 0;
        let len = size.unsigned_abs() as usize;
        let mut bytes = vec![0u8; len];
        if len > 0 {
            crate::primitive::read_exact_distinguishing_eof(r, &mut bytes)?;
        }
        if negative {
            for b in bytes.iter_mut() {
                *b = !*b;
            }
        }
        let value = if bytes.is_empty() {
            BigInt::from(0)
        } else if negative {
            BigInt::from_bytes_be(Sign::Minus, &bytes)
        } else {
            BigInt::from_bytes_be(Sign::Plus, &bytes)
        };
        Ok(Some(value))
    }
}
