//! `String`/`Vec<u8>` codecs.
//!
//! Both emit the raw payload bytes with no length prefix and no transform:
//! they require a terminator for aggregate use, since nothing about the
//! bytes themselves marks where the value ends. A bare read of zero bytes
//! decodes as the empty string/byte string; nil is only representable via
//! a nil-able wrapper such as [`crate::codec::pointer::PointerCodec`].

use std::io::Read;
use std::io::Write;

use crate::codec::Codec;
use crate::error::CodecError;
use crate::error::Result;

/// Codec for `String`. Slice-mode `get` consumes every remaining byte of
/// `src` (there being no length prefix of its own), so this codec is
/// normally used wrapped in [`crate::escape::Terminated`] or as the last
/// field of a composite key.
#[derive(Copy, Clone, Debug, Default)]
pub struct StringCodec;

impl Codec for StringCodec {
    type Value = String;
    const REQUIRES_TERMINATOR: bool = true;

    fn append(&self, dst: &mut Vec<u8>, value: &String) {
        dst.extend_from_slice(value.as_bytes());
    }

    fn put(&self, dst: &mut [u8], value: &String) -> usize {
        let bytes = value.as_bytes();
        dst[..bytes.len()].copy_from_slice(bytes);
        bytes.len()
    }

    fn get(&self, src: &[u8]) -> Result<(String, usize)> {
        String::from_utf8(src.to_vec())
            .map(|s| (s, src.len()))
            .map_err(|_| CodecError::InvalidUtf8)
    }

    fn write<W: Write>(&self, w: &mut W, value: &String) -> Result<()> {
        w.write_all(value.as_bytes())?;
        Ok(())
    }

    fn read<R: Read>(&self, r: &mut R) -> Result<String> {
        let mut bytes = Vec::new();
        r.read_to_end(&mut bytes)?;
        String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)
    }

    fn encoded_len(&self, value: &String) -> usize {
        value.len()
    }
}

/// Codec for raw `Vec<u8>`. Same shape as [`StringCodec`], with no UTF-8
/// validation.
#[derive(Copy, Clone, Debug, Default)]
pub struct BytesCodec;

impl Codec for BytesCodec {
    type Value = Vec<u8>;
    const REQUIRES_TERMINATOR: bool = true;

    fn append(&self, dst: &mut Vec<u8>, value: &Vec<u8>) {
        dst.extend_from_slice(value);
    }

    fn put(&self, dst: &mut [u8], value: &Vec<u8>) -> usize {
        dst[..value.len()].copy_from_slice(value);
        value.len()
    }

    fn get(&self, src: &[u8]) -> Result<(Vec<u8>, usize)> {
        Ok((src.to_vec(), src.len()))
    }

    fn write<W: Write>(&self, w: &mut W, value: &Vec<u8>) -> Result<()> {
        w.write_all(value)?;
        Ok(())
    }

    fn read<R: Read>(&self, r: &mut R) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        r.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    fn encoded_len(&self, value: &Vec<u8>) -> usize {
        value.len()
    }
}

/// `String` with the terminator/escape framing built in, so
/// `REQUIRES_TERMINATOR` is `false` and it can be appended directly into a
/// composite key without an outer wrapper.
#[derive(Copy, Clone, Debug, Default)]
pub struct TerminatedStringCodec;

impl Codec for TerminatedStringCodec {
    type Value = String;
    const REQUIRES_TERMINATOR: bool = false;

    fn append(&self, dst: &mut Vec<u8>, value: &String) {
        crate::escape::escape_append(dst, value.as_bytes(), false);
    }

    fn put(&self, dst: &mut [u8], value: &String) -> usize {
        crate::escape::escape_put(dst, value.as_bytes(), false)
    }

    fn get(&self, src: &[u8]) -> Result<(String, usize)> {
        let (raw, n) = crate::escape::unescape(src, false)?;
        let s = String::from_utf8(raw).map_err(|_| CodecError::InvalidUtf8)?;
        Ok((s, n))
    }

    fn write<W: Write>(&self, w: &mut W, value: &String) -> Result<()> {
        crate::escape::escape_write(w, value.as_bytes(), false)
    }

    fn read<R: Read>(&self, r: &mut R) -> Result<String> {
        let raw = crate::escape::unescape_read(r, false)?;
        String::from_utf8(raw).map_err(|_| CodecError::InvalidUtf8)
    }
}
