//! Big-endian fixed-width byte read/write helpers.
//!
//! Every multi-byte value in this crate is laid out big-endian; nothing
//! else is supported; the order-preservation argument for the rest of the
//! crate relies on that layout throughout.

use std::io::Read;
use std::io::Write;

use crate::error::CodecError;
use crate::error::Result;

/// Reads exactly `buf.len()` bytes from `r`, distinguishing a clean EOF
/// (zero bytes read before the end of input) from a truncated read (at
/// least one byte read, then end of input).
///
/// `std::io::Read::read_exact` collapses both cases into one error and
/// leaves `buf`'s partially-filled contents unspecified, so primitive and
/// aggregate decoders route through this instead.
pub(crate) fn read_exact_distinguishing_eof<R: Read>(r: &mut R, buf: &mut [u8]) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(if filled == 0 {
                    CodecError::Eof
                } else {
                    CodecError::UnexpectedEof
                });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CodecError::Io(e)),
        }
    }
    Ok(())
}

/// Takes a fixed-size prefix of `src`, distinguishing clean EOF (`src`
/// empty) from a truncated value (`src` non-empty but too short).
pub(crate) fn take<const N: usize>(src: &[u8]) -> Result<[u8; N]> {
    if src.len() < N {
        return Err(if src.is_empty() {
            CodecError::Eof
        } else {
            CodecError::UnexpectedEof
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&src[..N]);
    Ok(out)
}

macro_rules! be_primitive {
    ($ty:ty, $n:literal, $append:ident, $put:ident, $get:ident, $write:ident, $read:ident) => {
        /// Appends the big-endian encoding of `v` to `dst`.
        pub fn $append(dst: &mut Vec<u8>, v: $ty) {
            dst.extend_from_slice(&v.to_be_bytes());
        }

        /// Writes the big-endian encoding of `v` into `dst`, returning the
        /// number of bytes written (always
        #[doc = stringify!($n)]
        /// ).
        pub fn $put(dst: &mut [u8], v: $ty) -> usize {
            dst[..$n].copy_from_slice(&v.to_be_bytes());
            $n
        }

        /// Reads a big-endian
        #[doc = stringify!($ty)]
        /// from the front of `src`, returning the value and the number of
        /// bytes consumed.
        pub fn $get(src: &[u8]) -> Result<($ty, usize)> {
            let bytes = take::<$n>(src)?;
            Ok((<$ty>::from_be_bytes(bytes), $n))
        }

        /// Streaming counterpart of the `put` function above.
        pub fn $write<W: Write>(w: &mut W, v: $ty) -> Result<()> {
            w.write_all(&v.to_be_bytes())?;
            Ok(())
        }

        /// Streaming counterpart of the `get` function above.
        pub fn $read<R: Read>(r: &mut R) -> Result<$ty> {
            let mut bytes = [0u8; $n];
            read_exact_distinguishing_eof(r, &mut bytes)?;
            Ok(<$ty>::from_be_bytes(bytes))
        }
    };
}

be_primitive!(u8, 1, append_u8, put_u8, get_u8, write_u8, read_u8);
be_primitive!(u16, 2, append_u16, put_u16, get_u16, write_u16, read_u16);
be_primitive!(u32, 4, append_u32, put_u32, get_u32, write_u32, read_u32);
be_primitive!(u64, 8, append_u64, put_u64, get_u64, write_u64, read_u64);
be_primitive!(i8, 1, append_i8, put_i8, get_i8, write_i8, read_i8);
be_primitive!(i16, 2, append_i16, put_i16, get_i16, write_i16, read_i16);
be_primitive!(i32, 4, append_i32, put_i32, get_i32, write_i32, read_i32);
be_primitive!(i64, 8, append_i64, put_i64, get_i64, write_i64, read_i64);
