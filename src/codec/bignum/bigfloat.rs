//! Arbitrary-precision floating-point codec.
//!
//! Layout after the non-nil prefix: a signed `kind` byte drawn from
//! `{-3 negInf, -2 negFinite, -1 negZero, +1 posZero, +2 posFinite, +3 posInf}`
//! (sign-flipped like any other signed-int codec, so unsigned byte order
//! already matches semantic order), and for finite values: exponent,
//! mantissa, precision, rounding mode. Negative finite values negate the
//! exponent and precision fields and write the mantissa bytes through the
//! escape/terminate wrapper's bit-inverting mode, which is why this codec
//! requires a terminator at the aggregate layer -- the inverted mantissa
//! has no natural bound.
//!
//! Within finite values of one sign, `kind` ties, so exponent dominates
//! (larger exponent is larger magnitude), mantissa tie-breaks, and
//! precision comes last -- negating it for negative values keeps "higher
//! precision sorts greater for positives, lesser for negatives" true after
//! the whole-field negation. The rounding-mode byte trails as a
//! disambiguator with no semantic ordering of its own.

use std::io::Read;
use std::io::Write;

use num_bigint::BigUint;
use num_traits::ToPrimitive;

use crate::codec::int::I32Codec;
use crate::codec::int::I8Codec;
use crate::codec::Codec;
use crate::error::CodecError;
use crate::error::Result;
use crate::escape;
use crate::prefix::NilOrdering;
use crate::prefix::Prefix;
use crate::prefix::PrefixOutcome;

const KIND_NEG_INF: i8 = -3;
const KIND_NEG_FINITE: i8 = -2;
const KIND_NEG_ZERO: i8 = -1;
const KIND_POS_ZERO: i8 = 1;
const KIND_POS_FINITE: i8 = 2;
const KIND_POS_INF: i8 = 3;

/// A finite big-float magnitude: `mantissa * 2^(exponent - precision)`,
/// with `mantissa` holding exactly `precision` significant bits (so
/// `0.5 <= mantissa / 2^precision < 1`, i.e. the top bit of `mantissa` is
/// always set once it has any bits at all).
#[derive(Clone, Debug, PartialEq)]
pub struct FiniteBigFloat {
    pub negative: bool,
    pub mantissa: BigUint,
    pub precision: u32,
    pub exponent: i32,
    pub mode: u8,
}

impl FiniteBigFloat {
    fn adjustment(precision: u32) -> u32 {
        (8 - precision % 8) % 8
    }

    /// Left-shifts the mantissa up to the next byte boundary, so the
    /// trailing bits of the last byte are always the guaranteed-zero pad
    /// the wire format relies on rather than real mantissa bits.
    fn mantissa_bytes(&self) -> Vec<u8> {
        let shifted = &self.mantissa << Self::adjustment(self.precision);
        shifted.to_bytes_be()
    }

    fn mantissa_from_bytes(bytes: &[u8], precision: u32) -> BigUint {
        BigUint::from_bytes_be(bytes) >> Self::adjustment(precision)
    }

    /// Decomposes a finite, non-zero `f64` into mantissa/exponent/precision
    /// with rounding mode `mode`. Use [`BigFloatValue::from_f64`] to cover
    /// the full `f64` domain, including zero and the infinities.
    pub fn from_f64(value: f64, mode: u8) -> Self {
        assert!(value.is_finite() && value != 0.0, "not a finite, non-zero f64");
        let negative = value.is_sign_negative();
        let bits = value.to_bits();
        let biased_exp = (bits >> 52) & 0x7FF;
        let fraction = bits & 0x000F_FFFF_FFFF_FFFF;
        let (significand, base_exp): (u64, i32) = if biased_exp == 0 {
            (fraction, -1074) // subnormal: value = fraction * 2^-1074
        } else {
            (fraction | (1u64 << 52), biased_exp as i32 - 1075) // 1.fraction * 2^(biased_exp-1023-52)
        };
        let mantissa = BigUint::from(significand);
        let precision = mantissa.bits() as u32;
        let exponent = base_exp + precision as i32;
        FiniteBigFloat {
            negative,
            mantissa,
            precision,
            exponent,
            mode,
        }
    }

    pub fn to_f64(&self) -> f64 {
        let base_exp = self.exponent - self.precision as i32;
        let magnitude = self.mantissa.to_f64().unwrap_or(f64::INFINITY) * 2f64.powi(base_exp);
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }
}

/// Codec for `Option<BigFloatValue>`: `None` is the nil value, nil-ordering
/// chosen at construction.
#[derive(Clone, Debug, PartialEq)]
pub enum BigFloatValue {
    NegInf,
    NegZero,
    PosZero,
    PosInf,
    Finite(FiniteBigFloat),
}

impl BigFloatValue {
    /// Converts any `f64` except `NaN` to its big-float representation.
    /// `mode` is stored verbatim for finite values and carries no ordering
    /// meaning of its own.
    pub fn from_f64(value: f64, mode: u8) -> Self {
        assert!(!value.is_nan(), "big-float has no NaN representation");
        if value == 0.0 {
            if value.is_sign_negative() {
                BigFloatValue::NegZero
            } else {
                BigFloatValue::PosZero
            }
        } else if value == f64::INFINITY {
            BigFloatValue::PosInf
        } else if value == f64::NEG_INFINITY {
            BigFloatValue::NegInf
        } else {
            BigFloatValue::Finite(FiniteBigFloat::from_f64(value, mode))
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            BigFloatValue::NegInf => f64::NEG_INFINITY,
            BigFloatValue::NegZero => -0.0,
            BigFloatValue::PosZero => 0.0,
            BigFloatValue::PosInf => f64::INFINITY,
            BigFloatValue::Finite(f) => f.to_f64(),
        }
    }

    fn kind(&self) -> i8 {
        match self {
            BigFloatValue::NegInf => KIND_NEG_INF,
            BigFloatValue::NegZero => KIND_NEG_ZERO,
            BigFloatValue::PosZero => KIND_POS_ZERO,
            BigFloatValue::PosInf => KIND_POS_INF,
            BigFloatValue::Finite(f) if f.negative => KIND_NEG_FINITE,
            BigFloatValue::Finite(_) => KIND_POS_FINITE,
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct BigFloatCodec {
    prefix: Prefix,
}

impl BigFloatCodec {
    pub const fn new(ordering: NilOrdering) -> Self {
        BigFloatCodec {
            prefix: Prefix::new(ordering),
        }
    }

    fn encode_non_nil(dst: &mut Vec<u8>, value: &BigFloatValue) -> Result<()> {
        I8Codec.append(dst, &value.kind());
        if let BigFloatValue::Finite(f) = value {
            let sign: i32 = if f.negative { -1 } else { 1 };
            let exp_field = f.exponent.checked_mul(sign).ok_or(CodecError::BigFloatOverflow)?;
            I32Codec.append(dst, &exp_field);
            escape::escape_append(dst, &f.mantissa_bytes(), f.negative);
            let prec_field = (f.precision as i32)
                .checked_mul(sign)
                .ok_or(CodecError::BigFloatOverflow)?;
            I32Codec.append(dst, &prec_field);
            dst.push(f.mode);
        }
        Ok(())
    }

    fn decode_non_nil(src: &[u8]) -> Result<(BigFloatValue, usize)> {
        let (kind, mut n) = I8Codec.get(src)?;
        let value = match kind {
            KIND_NEG_INF => BigFloatValue::NegInf,
            KIND_NEG_ZERO => BigFloatValue::NegZero,
            KIND_POS_ZERO => BigFloatValue::PosZero,
            KIND_POS_INF => BigFloatValue::PosInf,
            KIND_NEG_FINITE | KIND_POS_FINITE => {
                let negative = kind == KIND_NEG_FINITE;

                let (exp_field, exp_n) = I32Codec.get(&src[n..])?;
                n += exp_n;

                let (mantissa_bytes, mantissa_n) = escape::unescape(&src[n..], negative)?;
                n += mantissa_n;

                let (prec_field, prec_n) = I32Codec.get(&src[n..])?;
                n += prec_n;

                let mode = *src.get(n).ok_or(CodecError::UnexpectedEof)?;
                n += 1;

                let exponent = if negative {
                    exp_field.checked_neg().ok_or(CodecError::BigFloatOverflow)?
                } else {
                    exp_field
                };
                let precision_signed = if negative {
                    prec_field.checked_neg().ok_or(CodecError::BigFloatOverflow)?
                } else {
                    prec_field
                };
                let precision = u32::try_from(precision_signed).map_err(|_| CodecError::BigFloatOverflow)?;
                let mantissa = FiniteBigFloat::mantissa_from_bytes(&mantissa_bytes, precision);

                BigFloatValue::Finite(FiniteBigFloat {
                    negative,
                    mantissa,
                    precision,
                    exponent,
                    mode,
                })
            }
            other => return Err(CodecError::UnexpectedPrefix(other as u8)),
        };
        Ok((value, n))
    }
}

impl Codec for BigFloatCodec {
    type Value = Option<BigFloatValue>;
    const REQUIRES_TERMINATOR: bool = true;

    fn append(&self, dst: &mut Vec<u8>, value: &Option<BigFloatValue>) {
        self.prefix.append(dst, value.is_none());
        if let Some(v) = value {
            // Only a signed-overflow of exponent/precision on negation can
            // fail here, which `from_f64` never produces; any caller
            // constructing one by hand accepts that `append` may panic,
            // matching this trait's infallible signature.
            Self::encode_non_nil(dst, v).expect("big-float exponent/precision out of i32 range");
        }
    }

    fn put(&self, dst: &mut [u8], value: &Option<BigFloatValue>) -> usize {
        let mut buf = Vec::new();
        self.append(&mut buf, value);
        dst[..buf.len()].copy_from_slice(&buf);
        buf.len()
    }

    fn get(&self, src: &[u8]) -> Result<(Option<BigFloatValue>, usize)> {
        let (outcome, prefix_n) = self.prefix.get(src)?;
        if outcome == PrefixOutcome::Nil {
            return Ok((None, prefix_n));
        }
        let (value, n) = Self::decode_non_nil(&src[prefix_n..])?;
        Ok((Some(value), prefix_n + n))
    }

    fn write<W: Write>(&self, w: &mut W, value: &Option<BigFloatValue>) -> Result<()> {
        let mut buf = Vec::new();
        self.append(&mut buf, value);
        w.write_all(&buf)?;
        Ok(())
    }

    fn read<R: Read>(&self, r: &mut R) -> Result<Option<BigFloatValue>> {
        let outcome = self.prefix.read(r)?;
        if outcome == PrefixOutcome::Nil {
            return Ok(None);
        }
        let kind = crate::primitive::read_i8(r)?;
        let value = match kind {
            KIND_NEG_INF => BigFloatValue::NegInf,
            KIND_NEG_ZERO => BigFloatValue::NegZero,
            KIND_POS_ZERO => BigFloatValue::PosZero,
            KIND_POS_INF => BigFloatValue::PosInf,
            KIND_NEG_FINITE | KIND_POS_FINITE => {
                let negative = kind == KIND_NEG_FINITE;
                let exp_field = crate::primitive::read_i32(r)?;
                let mantissa_bytes = escape::unescape_read(r, negative)?;
                let prec_field = crate::primitive::read_i32(r)?;
                let mut mode_buf = [0u8; 1];
                crate::primitive::read_exact_distinguishing_eof(r, &mut mode_buf)?;

                let exponent = if negative {
                    exp_field.checked_neg().ok_or(CodecError::BigFloatOverflow)?
                } else {
                    exp_field
                };
                let precision_signed = if negative {
                    prec_field.checked_neg().ok_or(CodecError::BigFloatOverflow)?
                } else {
                    prec_field
                };
                let precision = u32::try_from(precision_signed).map_err(|_| CodecError::BigFloatOverflow)?;
                let mantissa = FiniteBigFloat::mantissa_from_bytes(&mantissa_bytes, precision);

                BigFloatValue::Finite(FiniteBigFloat {
                    negative,
                    mantissa,
                    precision,
                    exponent,
                    mode: mode_buf[0],
                })
            }
            other => return Err(CodecError::UnexpectedPrefix(other as u8)),
        };
        Ok(Some(value))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn codec() -> BigFloatCodec {
        BigFloatCodec::new(NilOrdering::NilsFirst)
    }

    fn encode(v: &Option<BigFloatValue>) -> Vec<u8> {
        let mut buf = Vec::new();
        codec().append(&mut buf, v);
        buf
    }

    #[test]
    fn nil_round_trips() {
        let c = codec();
        let buf = encode(&None);
        let (decoded, n) = c.get(&buf).unwrap();
        assert_eq!(decoded, None);
        assert_eq!(n, buf.len());
    }

    #[test]
    fn finite_round_trips_bit_exact() {
        let c = codec();
        for v in [1.0, -1.0, 0.1, -0.1, 1.0e300, -1.0e300, f64::MIN_POSITIVE, 123_456.789] {
            let value = Some(BigFloatValue::from_f64(v, 0));
            let mut buf = Vec::new();
            c.append(&mut buf, &value);
            let (decoded, n) = c.get(&buf).unwrap();
            assert_eq!(n, buf.len());
            match decoded {
                Some(BigFloatValue::Finite(f)) => assert_eq!(f.to_f64(), v),
                other => panic!("expected finite, got {:?}", other),
            }
        }
    }

    #[test]
    fn zero_and_infinity_round_trip() {
        let c = codec();
        for v in [0.0, -0.0, f64::INFINITY, f64::NEG_INFINITY] {
            let value = Some(BigFloatValue::from_f64(v, 0));
            let mut buf = Vec::new();
            c.append(&mut buf, &value);
            let (decoded, _) = c.get(&buf).unwrap();
            assert_eq!(decoded.unwrap().to_f64().to_bits(), v.to_bits());
        }
    }

    #[test]
    fn kind_byte_orders_coarsely() {
        let landmarks = [
            f64::NEG_INFINITY,
            -1.0e300,
            -1.0,
            -0.0,
            0.0,
            1.0,
            1.0e300,
            f64::INFINITY,
        ];
        let encoded: Vec<Vec<u8>> = landmarks
            .iter()
            .map(|&v| encode(&Some(BigFloatValue::from_f64(v, 0))))
            .collect();
        for pair in encoded.windows(2) {
            assert!(pair[0] < pair[1], "{:?} should sort before {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn larger_magnitude_negative_sorts_first() {
        let small = encode(&Some(BigFloatValue::from_f64(-1.0, 0)));
        let large = encode(&Some(BigFloatValue::from_f64(-1.0e30, 0)));
        assert!(large < small, "more negative value should sort first");
    }

    #[test]
    fn no_over_read() {
        let c = codec();
        let mut buf = encode(&Some(BigFloatValue::from_f64(-42.5, 3)));
        let expected_len = buf.len();
        buf.extend_from_slice(b"trailing junk");
        let (_, n) = c.get(&buf).unwrap();
        assert_eq!(n, expected_len);
    }

    #[test]
    fn subnormal_round_trips() {
        let v = f64::from_bits(0x0000_0000_0000_0007); // smallest subnormals
        let value = Some(BigFloatValue::from_f64(v, 0));
        let mut buf = Vec::new();
        codec().append(&mut buf, &value);
        let (decoded, _) = codec().get(&buf).unwrap();
        match decoded {
            Some(BigFloatValue::Finite(f)) => assert_eq!(f.to_f64(), v),
            other => panic!("expected finite, got {:?}", other),
        }
    }
}
