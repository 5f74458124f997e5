//! Arbitrary-precision rational codec.
//!
//! Non-nil prefix, then numerator then denominator, each via the
//! big-integer codec's payload encoding (no independent nil prefix on
//! either -- only the rational as a whole can be nil). The denominator is
//! assumed already positive and the fraction already reduced to lowest
//! terms; this codec does not normalise either.

use std::io::Read;
use std::io::Write;

use num_bigint::BigInt;
use num_rational::BigRational;

use crate::codec::bignum::bigint::BigIntCodec;
use crate::codec::Codec;
use crate::error::Result;
use crate::prefix::NilOrdering;
use crate::prefix::Prefix;
use crate::prefix::PrefixOutcome;

/// Codec for `Option<BigRational>`: `None` is the nil value, nil-ordering
/// chosen at construction.
#[derive(Copy, Clone, Debug)]
pub struct BigRationalCodec {
    prefix: Prefix,
}

impl BigRationalCodec {
    pub const fn new(ordering: NilOrdering) -> Self {
        BigRationalCodec {
            prefix: Prefix::new(ordering),
        }
    }
}

impl Codec for BigRationalCodec {
    type Value = Option<BigRational>;
    const REQUIRES_TERMINATOR: bool = false;

    fn append(&self, dst: &mut Vec<u8>, value: &Option<BigRational>) {
        self.prefix.append(dst, value.is_none());
        if let Some(v) = value {
            BigIntCodec::encode_non_nil(dst, v.numer());
            BigIntCodec::encode_non_nil(dst, v.denom());
        }
    }

    fn put(&self, dst: &mut [u8], value: &Option<BigRational>) -> usize {
        let mut buf = Vec::new();
        self.append(&mut buf, value);
        dst[..buf.len()].copy_from_slice(&buf);
        buf.len()
    }

    fn get(&self, src: &[u8]) -> Result<(Option<BigRational>, usize)> {
        let (outcome, mut n) = self.prefix.get(src)?;
        if outcome == PrefixOutcome::Nil {
            return Ok((None, n));
        }
        let (numer, numer_n) = BigIntCodec::decode_non_nil(&src[n..])?;
        n += numer_n;
        let (denom, denom_n) = BigIntCodec::decode_non_nil(&src[n..])?;
        n += denom_n;
        Ok((Some(BigRational::new(numer, denom)), n))
    }

    fn write<W: Write>(&self, w: &mut W, value: &Option<BigRational>) -> Result<()> {
        let mut buf = Vec::new();
        self.append(&mut buf, value);
        w.write_all(&buf)?;
        Ok(())
    }

    fn read<R: Read>(&self, r: &mut R) -> Result<Option<BigRational>> {
        let outcome = self.prefix.read(r)?;
        if outcome == PrefixOutcome::Nil {
            return Ok(None);
        }
        let numer = read_bigint_payload(r)?;
        let denom = read_bigint_payload(r)?;
        Ok(Some(BigRational::new(numer, denom)))
    }
}

fn read_bigint_payload<R: Read>(r: &mut R) -> Result<BigInt> {
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
    Ok(if bytes.is_empty() {
        BigInt::from(0)
    } else if negative {
        BigInt::from_bytes_be(num_bigint::Sign::Minus, &bytes)
    } else {
        BigInt::from_bytes_be(num_bigint::Sign::Plus, &bytes)
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn codec() -> BigRationalCodec {
        BigRationalCodec::new(NilOrdering::NilsFirst)
    }

    #[test]
    fn nil_round_trips() {
        let c = codec();
        let mut buf = Vec::new();
        c.append(&mut buf, &None);
        let (decoded, n) = c.get(&buf).unwrap();
        assert_eq!(decoded, None);
        assert_eq!(n, buf.len());
    }

    #[test]
    fn round_trips_reduced_fraction() {
        let c = codec();
        let value = BigRational::new(BigInt::from(3), BigInt::from(4));
        let mut buf = Vec::new();
        c.append(&mut buf, &Some(value.clone()));
        let (decoded, n) = c.get(&buf).unwrap();
        assert_eq!(decoded, Some(value));
        assert_eq!(n, buf.len());
    }

    #[test]
    fn round_trips_negative_fraction() {
        let c = codec();
        let value = BigRational::new(BigInt::from(-7), BigInt::from(9));
        let mut buf = Vec::new();
        c.append(&mut buf, &Some(value.clone()));
        let (decoded, _) = c.get(&buf).unwrap();
        assert_eq!(decoded, Some(value));
    }

    #[test]
    fn orders_by_numerator_then_denominator() {
        let c = codec();
        let mut a = Vec::new();
        let mut b = Vec::new();
        c.append(&mut a, &Some(BigRational::new(BigInt::from(1), BigInt::from(4))));
        c.append(&mut b, &Some(BigRational::new(BigInt::from(1), BigInt::from(2))));
        assert!(a < b);
    }

    #[test]
    fn no_over_read() {
        let c = codec();
        let mut buf = Vec::new();
        c.append(&mut buf, &Some(BigRational::new(BigInt::from(5), BigInt::from(6))));
        let expected_len = buf.len();
        buf.extend_from_slice(b"suffix");
        let (_, n) = c.get(&buf).unwrap();
        assert_eq!(n, expected_len);
    }

    #[test]
    fn stream_mode_matches_slice_mode() {
        let c = codec();
        let value = Some(BigRational::new(BigInt::from(-11), BigInt::from(13)));
        let mut buf = Vec::new();
        c.write(&mut buf, &value).unwrap();
        let (sliced, _) = c.get(&buf).unwrap();
        let mut r = &buf[..];
        let streamed = c.read(&mut r).unwrap();
        assert_eq!(sliced, value);
        assert_eq!(streamed, value);
    }
}
