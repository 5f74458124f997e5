//! Fixed-arity struct codec: a tuple of field codecs applied in declared
//! order, with no per-field prefix. Ordering is strict lexicographic by
//! field, since each field is either fixed-width or escape-terminated and
//! lexicographic comparison of the concatenation agrees with comparing
//! field by field.
//!
//! Rust has no runtime struct reflection, and a proc-macro derive would be
//! exactly the kind of generic reflection this crate leaves to its
//! callers, so a struct codec is composed by hand from a small number of
//! field codecs: `Tuple2::new(a, b)`, `Tuple3::new(a, b, c)`, and so on.

use std::io::Read;
use std::io::Write;

use crate::codec::Codec;
use crate::error::Result;
use crate::escape;

fn append_field<C: Codec>(dst: &mut Vec<u8>, codec: &C, value: &C::Value) {
    if C::REQUIRES_TERMINATOR {
        let mut raw = Vec::new();
        codec.append(&mut raw, value);
        escape::escape_append(dst, &raw, false);
    } else {
        codec.append(dst, value);
    }
}

fn get_field<C: Codec>(src: &[u8], codec: &C) -> Result<(C::Value, usize)> {
    if C::REQUIRES_TERMINATOR {
        let (raw, consumed) = escape::unescape(src, false)?;
        let (value, _) = codec.get(&raw)?;
        Ok((value, consumed))
    } else {
        codec.get(src)
    }
}

fn write_field<C: Codec, W: Write>(w: &mut W, codec: &C, value: &C::Value) -> Result<()> {
    if C::REQUIRES_TERMINATOR {
        let mut raw = Vec::new();
        codec.append(&mut raw, value);
        escape::escape_write(w, &raw, false)
    } else {
        codec.write(w, value)
    }
}

fn read_field<C: Codec, R: Read>(r: &mut R, codec: &C) -> Result<C::Value> {
    if C::REQUIRES_TERMINATOR {
        let raw = escape::unescape_read(r, false)?;
        let (value, _) = codec.get(&raw)?;
        Ok(value)
    } else {
        codec.read(r)
    }
}

macro_rules! tuple_codec {
    ($name:ident, $requires_terminator:expr, ($($field:ident : $ty:ident),+)) => {
        #[doc = concat!(
            "`", stringify!($name),
            "`: a struct codec over a fixed tuple of field codecs, applied in order."
        )]
        #[derive(Copy, Clone, Debug)]
        pub struct $name<$($ty),+> {
            $($field: $ty),+
        }

        impl<$($ty: Codec),+> $name<$($ty),+> {
            pub const fn new($($field: $ty),+) -> Self {
                $name { $($field),+ }
            }
        }

        impl<$($ty: Codec),+> Codec for $name<$($ty),+> {
            type Value = ($($ty::Value),+,);

            const REQUIRES_TERMINATOR: bool = $requires_terminator;

            fn append(&self, dst: &mut Vec<u8>, value: &Self::Value) {
                let ($($field),+,) = value;
                $(append_field(dst, &self.$field, $field);)+
            }

            fn put(&self, dst: &mut [u8], value: &Self::Value) -> usize {
                let mut buf = Vec::new();
                self.append(&mut buf, value);
                dst[..buf.len()].copy_from_slice(&buf);
                buf.len()
            }

            fn get(&self, src: &[u8]) -> Result<(Self::Value, usize)> {
                let mut n = 0;
                $(
                    let (($field), consumed) = get_field(&src[n..], &self.$field)?;
                    n += consumed;
                )+
                Ok((($($field),+,), n))
            }

            fn write<W: Write>(&self, w: &mut W, value: &Self::Value) -> Result<()> {
                let ($($field),+,) = value;
                $(write_field(w, &self.$field, $field)?;)+
                Ok(())
            }

            fn read<R: Read>(&self, r: &mut R) -> Result<Self::Value> {
                Ok(($(read_field(r, &self.$field)?),+,))
            }
        }
    };
}

tuple_codec!(Tuple2, true, (f0: A, f1: B));
tuple_codec!(Tuple3, true, (f0: A, f1: B, f2: C));
tuple_codec!(Tuple4, true, (f0: A, f1: B, f2: C, f3: D));
tuple_codec!(Tuple5, true, (f0: A, f1: B, f2: C, f3: D, f4: E));
