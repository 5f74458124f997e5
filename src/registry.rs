//! Facade `encode`/`decode` functions, and a small registry of default
//! codecs for the library's built-in primitive types.

use crate::codec::bool_codec::BoolCodec;
use crate::codec::int::I16Codec;
use crate::codec::int::I32Codec;
use crate::codec::int::I64Codec;
use crate::codec::int::I8Codec;
use crate::codec::int::IsizeCodec;
use crate::codec::int::U16Codec;
use crate::codec::int::U32Codec;
use crate::codec::int::U64Codec;
use crate::codec::int::U8Codec;
use crate::codec::int::UsizeCodec;
use crate::codec::float::Float32Codec;
use crate::codec::float::Float64Codec;
use crate::codec::text::StringCodec;
use crate::codec::text::TerminatedStringCodec;
use crate::codec::Codec;
use crate::error::Result;

/// Allocates a fresh buffer and encodes `value` through `codec`.
pub fn encode<C: Codec>(codec: &C, value: &C::Value) -> Vec<u8> {
    let mut buf = Vec::new();
    codec.append(&mut buf, value);
    buf
}

/// Decodes a value of `codec`'s type from the front of `bytes`, discarding
/// the count of bytes consumed. Use [`Codec::get`] directly if the caller
/// needs that count (e.g. to keep decoding further values from the same
/// buffer).
pub fn decode<C: Codec>(codec: &C, bytes: &[u8]) -> Result<C::Value> {
    codec.get(bytes).map(|(value, _)| value)
}

/// A type witness naming one of this crate's built-in primitive codecs,
/// for callers that need to pick a codec by a runtime type descriptor
/// (e.g. a schema loaded from configuration) rather than at compile time.
/// [`decode_primitive`] is the dispatch this witness exists for: it maps a
/// `PrimitiveKind` straight to the matching codec in [`default_codecs`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PrimitiveKind {
    Bool,
    U8,
    U16,
    U32,
    U64,
    Usize,
    I8,
    I16,
    I32,
    I64,
    Isize,
    F32,
    F64,
    Str,
    TerminatedStr,
}

/// The default, `'static` codec instance for a [`PrimitiveKind`]. Returned
/// through a closure per-variant rather than a trait object, so the
/// concrete codec type -- and with it `REQUIRES_TERMINATOR` -- stays
/// resolved at compile time for whichever arm the caller matches on.
pub mod default_codecs {
    use super::*;

    pub const BOOL: BoolCodec = BoolCodec;
    pub const U8: U8Codec = U8Codec;
    pub const U16: U16Codec = U16Codec;
    pub const U32: U32Codec = U32Codec;
    pub const U64: U64Codec = U64Codec;
    pub const USIZE: UsizeCodec = UsizeCodec;
    pub const I8: I8Codec = I8Codec;
    pub const I16: I16Codec = I16Codec;
    pub const I32: I32Codec = I32Codec;
    pub const I64: I64Codec = I64Codec;
    pub const ISIZE: IsizeCodec = IsizeCodec;
    pub const F32: Float32Codec = Float32Codec;
    pub const F64: Float64Codec = Float64Codec;
    pub const STR: StringCodec = StringCodec;
    pub const TERMINATED_STR: TerminatedStringCodec = TerminatedStringCodec;
}

/// A decoded value of one of this crate's built-in primitive types, tagged
/// by which one so it can flow through code that only knows the type at
/// runtime (see [`PrimitiveKind`]).
#[derive(Clone, Debug, PartialEq)]
pub enum PrimitiveValue {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    F32(f32),
    F64(f64),
    Str(String),
    TerminatedStr(String),
}

impl PrimitiveValue {
    /// The [`PrimitiveKind`] this value was decoded as, or would encode
    /// under.
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            PrimitiveValue::Bool(_) => PrimitiveKind::Bool,
            PrimitiveValue::U8(_) => PrimitiveKind::U8,
            PrimitiveValue::U16(_) => PrimitiveKind::U16,
            PrimitiveValue::U32(_) => PrimitiveKind::U32,
            PrimitiveValue::U64(_) => PrimitiveKind::U64,
            PrimitiveValue::Usize(_) => PrimitiveKind::Usize,
            PrimitiveValue::I8(_) => PrimitiveKind::I8,
            PrimitiveValue::I16(_) => PrimitiveKind::I16,
            PrimitiveValue::I32(_) => PrimitiveKind::I32,
            PrimitiveValue::I64(_) => PrimitiveKind::I64,
            PrimitiveValue::Isize(_) => PrimitiveKind::Isize,
            PrimitiveValue::F32(_) => PrimitiveKind::F32,
            PrimitiveValue::F64(_) => PrimitiveKind::F64,
            PrimitiveValue::Str(_) => PrimitiveKind::Str,
            PrimitiveValue::TerminatedStr(_) => PrimitiveKind::TerminatedStr,
        }
    }
}

/// Encodes `value` through the default codec matching its own kind.
pub fn encode_primitive(value: &PrimitiveValue) -> Vec<u8> {
    match value {
        PrimitiveValue::Bool(v) => encode(&default_codecs::BOOL, v),
        PrimitiveValue::U8(v) => encode(&default_codecs::U8, v),
        PrimitiveValue::U16(v) => encode(&default_codecs::U16, v),
        PrimitiveValue::U32(v) => encode(&default_codecs::U32, v),
        PrimitiveValue::U64(v) => encode(&default_codecs::U64, v),
        PrimitiveValue::Usize(v) => encode(&default_codecs::USIZE, v),
        PrimitiveValue::I8(v) => encode(&default_codecs::I8, v),
        PrimitiveValue::I16(v) => encode(&default_codecs::I16, v),
        PrimitiveValue::I32(v) => encode(&default_codecs::I32, v),
        PrimitiveValue::I64(v) => encode(&default_codecs::I64, v),
        PrimitiveValue::Isize(v) => encode(&default_codecs::ISIZE, v),
        PrimitiveValue::F32(v) => encode(&default_codecs::F32, v),
        PrimitiveValue::F64(v) => encode(&default_codecs::F64, v),
        PrimitiveValue::Str(v) => encode(&default_codecs::STR, v),
        PrimitiveValue::TerminatedStr(v) => encode(&default_codecs::TERMINATED_STR, v),
    }
}

/// Decodes `bytes` using the default codec named by `kind`. This is the
/// registry's runtime-type-descriptor dispatch: the caller only has a
/// `PrimitiveKind` (e.g. read back from a stored schema) and gets back a
/// value tagged with the kind it was decoded as.
pub fn decode_primitive(kind: PrimitiveKind, bytes: &[u8]) -> Result<PrimitiveValue> {
    Ok(match kind {
        PrimitiveKind::Bool => PrimitiveValue::Bool(decode(&default_codecs::BOOL, bytes)?),
        PrimitiveKind::U8 => PrimitiveValue::U8(decode(&default_codecs::U8, bytes)?),
        PrimitiveKind::U16 => PrimitiveValue::U16(decode(&default_codecs::U16, bytes)?),
        PrimitiveKind::U32 => PrimitiveValue::U32(decode(&default_codecs::U32, bytes)?),
        PrimitiveKind::U64 => PrimitiveValue::U64(decode(&default_codecs::U64, bytes)?),
        PrimitiveKind::Usize => PrimitiveValue::Usize(decode(&default_codecs::USIZE, bytes)?),
        PrimitiveKind::I8 => PrimitiveValue::I8(decode(&default_codecs::I8, bytes)?),
        PrimitiveKind::I16 => PrimitiveValue::I16(decode(&default_codecs::I16, bytes)?),
        PrimitiveKind::I32 => PrimitiveValue::I32(decode(&default_codecs::I32, bytes)?),
        PrimitiveKind::I64 => PrimitiveValue::I64(decode(&default_codecs::I64, bytes)?),
        PrimitiveKind::Isize => PrimitiveValue::Isize(decode(&default_codecs::ISIZE, bytes)?),
        PrimitiveKind::F32 => PrimitiveValue::F32(decode(&default_codecs::F32, bytes)?),
        PrimitiveKind::F64 => PrimitiveValue::F64(decode(&default_codecs::F64, bytes)?),
        PrimitiveKind::Str => PrimitiveValue::Str(decode(&default_codecs::STR, bytes)?),
        PrimitiveKind::TerminatedStr => {
            PrimitiveValue::TerminatedStr(decode(&default_codecs::TERMINATED_STR, bytes)?)
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codec::int::I32Codec;

    #[test]
    fn encode_decode_round_trip() {
        let bytes = encode(&I32Codec, &-12345);
        let value = decode(&I32Codec, &bytes).unwrap();
        assert_eq!(value, -12345);
    }

    #[test]
    fn default_codecs_are_usable_directly() {
        let bytes = encode(&default_codecs::U64, &42u64);
        assert_eq!(decode(&default_codecs::U64, &bytes).unwrap(), 42);
    }

    #[test]
    fn primitive_kind_dispatch_round_trips() {
        let value = PrimitiveValue::I64(-99);
        let bytes = encode_primitive(&value);
        let decoded = decode_primitive(value.kind(), &bytes).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn primitive_kind_dispatch_covers_every_variant() {
        let values = [
            PrimitiveValue::Bool(true),
            PrimitiveValue::U8(7),
            PrimitiveValue::U16(7),
            PrimitiveValue::U32(7),
            PrimitiveValue::U64(7),
            PrimitiveValue::Usize(7),
            PrimitiveValue::I8(-7),
            PrimitiveValue::I16(-7),
            PrimitiveValue::I32(-7),
            PrimitiveValue::I64(-7),
            PrimitiveValue::Isize(-7),
            PrimitiveValue::F32(1.5),
            PrimitiveValue::F64(1.5),
            PrimitiveValue::Str("hi".to_string()),
            PrimitiveValue::TerminatedStr("hi".to_string()),
        ];
        for value in values {
            let bytes = encode_primitive(&value);
            assert_eq!(decode_primitive(value.kind(), &bytes).unwrap(), value);
        }
    }
}
