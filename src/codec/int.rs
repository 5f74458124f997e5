//! Fixed-width and platform-width integer codecs.
//!
//! Unsigned integers are already lexicographically ordered once written
//! big-endian. Signed integers need their sign bit flipped first: that
//! maps `most-negative -> 0x00..00`, `-1 -> 0x7F..FF`, `0 -> 0x80..00`,
//! `max -> 0xFF..FF`, which is exactly two's-complement order reinterpreted
//! as unsigned order.

use std::io::Read;
use std::io::Write;

use crate::codec::Codec;
use crate::error::CodecError;
use crate::error::Result;
use crate::primitive;

macro_rules! unsigned_codec {
    ($name:ident, $ty:ty, $n:literal, $append:path, $put:path, $get:path, $write:path, $read:path) => {
        #[doc = concat!("Codec for `", stringify!($ty), "`: ", stringify!($n), " big-endian bytes, no transform needed.")]
        #[derive(Copy, Clone, Debug, Default)]
        pub struct $name;

        impl Codec for $name {
            type Value = $ty;
            const REQUIRES_TERMINATOR: bool = false;

            fn append(&self, dst: &mut Vec<u8>, value: &$ty) {
                $append(dst, *value);
            }

            fn put(&self, dst: &mut [u8], value: &$ty) -> usize {
                $put(dst, *value)
            }

            fn get(&self, src: &[u8]) -> Result<($ty, usize)> {
                $get(src)
            }

            fn write<W: Write>(&self, w: &mut W, value: &$ty) -> Result<()> {
                $write(w, *value)
            }

            fn read<R: Read>(&self, r: &mut R) -> Result<$ty> {
                $read(r)
            }

            fn encoded_len(&self, _value: &$ty) -> usize {
                $n
            }
        }
    };
}

unsigned_codec!(
    U8Codec,
    u8,
    1,
    primitive::append_u8,
    primitive::put_u8,
    primitive::get_u8,
    primitive::write_u8,
    primitive::read_u8
);
unsigned_codec!(
    U16Codec,
    u16,
    2,
    primitive::append_u16,
    primitive::put_u16,
    primitive::get_u16,
    primitive::write_u16,
    primitive::read_u16
);
unsigned_codec!(
    U32Codec,
    u32,
    4,
    primitive::append_u32,
    primitive::put_u32,
    primitive::get_u32,
    primitive::write_u32,
    primitive::read_u32
);
unsigned_codec!(
    U64Codec,
    u64,
    8,
    primitive::append_u64,
    primitive::put_u64,
    primitive::get_u64,
    primitive::write_u64,
    primitive::read_u64
);

macro_rules! signed_codec {
    ($name:ident, $ty:ty, $uty:ty, $n:literal, $sign_bit:expr) => {
        #[doc = concat!("Codec for `", stringify!($ty), "`: ", stringify!($n), " big-endian bytes with the sign bit flipped.")]
        #[derive(Copy, Clone, Debug, Default)]
        pub struct $name;

        impl $name {
            fn to_ordered(value: $ty) -> $uty {
                (value as $uty) ^ $sign_bit
            }

            fn from_ordered(ordered: $uty) -> $ty {
                (ordered ^ $sign_bit) as $ty
            }
        }

        impl Codec for $name {
            type Value = $ty;
            const REQUIRES_TERMINATOR: bool = false;

            fn append(&self, dst: &mut Vec<u8>, value: &$ty) {
                dst.extend_from_slice(&Self::to_ordered(*value).to_be_bytes());
            }

            fn put(&self, dst: &mut [u8], value: &$ty) -> usize {
                dst[..$n].copy_from_slice(&Self::to_ordered(*value).to_be_bytes());
                $n
            }

            fn get(&self, src: &[u8]) -> Result<($ty, usize)> {
                let bytes = primitive::take::<$n>(src)?;
                Ok((Self::from_ordered(<$uty>::from_be_bytes(bytes)), $n))
            }

            fn write<W: Write>(&self, w: &mut W, value: &$ty) -> Result<()> {
                w.write_all(&Self::to_ordered(*value).to_be_bytes())?;
                Ok(())
            }

            fn read<R: Read>(&self, r: &mut R) -> Result<$ty> {
                let mut bytes = [0u8; $n];
                primitive::read_exact_distinguishing_eof(r, &mut bytes)?;
                Ok(Self::from_ordered(<$uty>::from_be_bytes(bytes)))
            }

            fn encoded_len(&self, _value: &$ty) -> usize {
                $n
            }
        }
    };
}

signed_codec!(I8Codec, i8, u8, 1, 0x80u8);
signed_codec!(I16Codec, i16, u16, 2, 0x8000u16);
signed_codec!(I32Codec, i32, u32, 4, 0x8000_0000u32);
signed_codec!(I64Codec, i64, u64, 8, 0x8000_0000_0000_0000u64);

/// `usize`, encoded as `u64` regardless of host pointer width. Decoding
/// fails with [`CodecError::PlatformWidthOverflow`] if the stored value
/// does not fit a 32-bit host's `usize`.
#[derive(Copy, Clone, Debug, Default)]
pub struct UsizeCodec;

impl Codec for UsizeCodec {
    type Value = usize;
    const REQUIRES_TERMINATOR: bool = false;

    fn append(&self, dst: &mut Vec<u8>, value: &usize) {
        primitive::append_u64(dst, *value as u64);
    }

    fn put(&self, dst: &mut [u8], value: &usize) -> usize {
        primitive::put_u64(dst, *value as u64)
    }

    fn get(&self, src: &[u8]) -> Result<(usize, usize)> {
        let (v, n) = primitive::get_u64(src)?;
        Ok((usize::try_from(v).map_err(|_| CodecError::PlatformWidthOverflow)?, n))
    }

    fn write<W: Write>(&self, w: &mut W, value: &usize) -> Result<()> {
        primitive::write_u64(w, *value as u64)
    }

    fn read<R: Read>(&self, r: &mut R) -> Result<usize> {
        let v = primitive::read_u64(r)?;
        usize::try_from(v).map_err(|_| CodecError::PlatformWidthOverflow)
    }

    fn encoded_len(&self, _value: &usize) -> usize {
        8
    }
}

/// `isize`, encoded as `i64` regardless of host pointer width. Decoding
/// fails with [`CodecError::PlatformWidthOverflow`] if the stored value
/// does not fit a 32-bit host's `isize`.
#[derive(Copy, Clone, Debug, Default)]
pub struct IsizeCodec;

impl Codec for IsizeCodec {
    type Value = isize;
    const REQUIRES_TERMINATOR: bool = false;

    fn append(&self, dst: &mut Vec<u8>, value: &isize) {
        I64Codec.append(dst, &(*value as i64));
    }

    fn put(&self, dst: &mut [u8], value: &isize) -> usize {
        I64Codec.put(dst, &(*value as i64))
    }

    fn get(&self, src: &[u8]) -> Result<(isize, usize)> {
        let (v, n) = I64Codec.get(src)?;
        Ok((isize::try_from(v).map_err(|_| CodecError::PlatformWidthOverflow)?, n))
    }

    fn write<W: Write>(&self, w: &mut W, value: &isize) -> Result<()> {
        I64Codec.write(w, &(*value as i64))
    }

    fn read<R: Read>(&self, r: &mut R) -> Result<isize> {
        let v = I64Codec.read(r)?;
        isize::try_from(v).map_err(|_| CodecError::PlatformWidthOverflow)
    }

    fn encoded_len(&self, _value: &isize) -> usize {
        8
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    #[test_case(-1, [0x7F, 0xFF, 0xFF, 0xFF])]
    #[test_case(0, [0x80, 0x00, 0x00, 0x00])]
    #[test_case(i32::MIN, [0x00, 0x00, 0x00, 0x00])]
    #[test_case(i32::MAX, [0xFF, 0xFF, 0xFF, 0xFF])]
    fn i32_matches_documented_bytes(value: i32, expected: [u8; 4]) {
        let mut buf = Vec::new();
        I32Codec.append(&mut buf, &value);
        assert_eq!(buf, expected);
    }

    #[test_case(i64::MIN, -1)]
    #[test_case(-5, -1)]
    #[test_case(-1, 0)]
    #[test_case(0, 1)]
    #[test_case(1, i64::MAX)]
    fn i64_order_preserved(smaller: i64, larger: i64) {
        assert!(smaller < larger);
        let mut a = Vec::new();
        let mut b = Vec::new();
        I64Codec.append(&mut a, &smaller);
        I64Codec.append(&mut b, &larger);
        assert!(a < b, "{:?} should sort before {:?}", a, b);
    }

    #[test]
    fn unsigned_round_trip() {
        for v in [0u64, 1, u64::MAX, 1 << 40] {
            let mut buf = Vec::new();
            U64Codec.append(&mut buf, &v);
            let (decoded, n) = U64Codec.get(&buf).unwrap();
            assert_eq!(decoded, v);
            assert_eq!(n, 8);
        }
    }

    #[test]
    fn signed_round_trip_every_width() {
        let mut buf = Vec::new();
        I8Codec.append(&mut buf, &-42);
        assert_eq!(I8Codec.get(&buf).unwrap().0, -42);

        buf.clear();
        I16Codec.append(&mut buf, &-1234);
        assert_eq!(I16Codec.get(&buf).unwrap().0, -1234);

        buf.clear();
        I64Codec.append(&mut buf, &i64::MIN);
        assert_eq!(I64Codec.get(&buf).unwrap().0, i64::MIN);
    }

    #[test]
    fn platform_width_round_trip() {
        let mut buf = Vec::new();
        UsizeCodec.append(&mut buf, &12345usize);
        assert_eq!(UsizeCodec.get(&buf).unwrap().0, 12345usize);

        buf.clear();
        IsizeCodec.append(&mut buf, &-12345isize);
        assert_eq!(IsizeCodec.get(&buf).unwrap().0, -12345isize);
    }

    #[test]
    fn stream_mode_matches_slice_mode() {
        let mut buf = Vec::new();
        I32Codec.write(&mut buf, &-99).unwrap();
        let (sliced, _) = I32Codec.get(&buf).unwrap();
        let mut r = &buf[..];
        let streamed = I32Codec.read(&mut r).unwrap();
        assert_eq!(sliced, streamed);
    }
}
