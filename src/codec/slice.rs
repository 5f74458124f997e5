//! Slice codec: nil, empty, and non-empty slices are three distinct,
//! correctly-ordered encodings (`nil < [] < [...]`).

use std::io::Read;
use std::io::Write;

use crate::codec::Codec;
use crate::error::CodecError;
use crate::error::Result;
use crate::escape;
use crate::prefix::NilOrdering;
use crate::prefix::Prefix;
use crate::prefix::PrefixOutcome;

/// Codec for `Option<Vec<C::Value>>`. Writes the nil prefix, then (for
/// `Some`) each element back to back -- escape-terminated if
/// `C::REQUIRES_TERMINATOR`, otherwise relying on each element's own
/// intrinsic length. There is no separate empty/non-empty marker: `[]`
/// encodes as the bare non-nil prefix, and since that is a byte-for-byte
/// prefix of any non-empty encoding, lexicographic comparison already
/// places `[] < [...]` without any extra byte.
#[derive(Copy, Clone, Debug)]
pub struct SliceCodec<C> {
    prefix: Prefix,
    element: C,
}

impl<C: Codec> SliceCodec<C> {
    pub const fn new(element: C, ordering: NilOrdering) -> Self {
        SliceCodec {
            prefix: Prefix::new(ordering),
            element,
        }
    }

    fn append_element(&self, dst: &mut Vec<u8>, value: &C::Value) {
        if C::REQUIRES_TERMINATOR {
            let mut raw = Vec::new();
            self.element.append(&mut raw, value);
            escape::escape_append(dst, &raw, false);
        } else {
            self.element.append(dst, value);
        }
    }

    fn get_element(&self, src: &[u8]) -> Result<(C::Value, usize)> {
        if C::REQUIRES_TERMINATOR {
            let (raw, consumed) = escape::unescape(src, false)?;
            let (value, _) = self.element.get(&raw)?;
            Ok((value, consumed))
        } else {
            self.element.get(src)
        }
    }

    fn write_element<W: Write>(&self, w: &mut W, value: &C::Value) -> Result<()> {
        if C::REQUIRES_TERMINATOR {
            let mut raw = Vec::new();
            self.element.append(&mut raw, value);
            escape::escape_write(w, &raw, false)
        } else {
            self.element.write(w, value)
        }
    }

    fn read_element<R: Read>(&self, r: &mut R) -> Result<C::Value> {
        if C::REQUIRES_TERMINATOR {
            let raw = escape::unescape_read(r, false)?;
            let (value, _) = self.element.get(&raw)?;
            Ok(value)
        } else {
            self.element.read(r)
        }
    }
}

impl<C: Codec> Codec for SliceCodec<C> {
    type Value = Option<Vec<C::Value>>;

    /// A slice's own encoding has no intrinsic length (element count is
    /// never written) unless every element is fixed-width, so nested use
    /// always escape-terminates it.
    const REQUIRES_TERMINATOR: bool = true;

    fn append(&self, dst: &mut Vec<u8>, value: &Option<Vec<C::Value>>) {
        self.prefix.append(dst, value.is_none());
        if let Some(elements) = value {
            for element in elements {
                self.append_element(dst, element);
            }
        }
    }

    fn put(&self, dst: &mut [u8], value: &Option<Vec<C::Value>>) -> usize {
        let mut buf = Vec::new();
        self.append(&mut buf, value);
        dst[..buf.len()].copy_from_slice(&buf);
        buf.len()
    }

    fn get(&self, src: &[u8]) -> Result<(Option<Vec<C::Value>>, usize)> {
        let (outcome, mut n) = self.prefix.get(src)?;
        if outcome == PrefixOutcome::Nil {
            return Ok((None, n));
        }
        let mut elements = Vec::new();
        // Slice-mode decode has no outer length, so it keeps consuming
        // elements until the rest of `src` is empty; callers embedding a
        // slice inside a larger aggregate must wrap it (which this codec
        // requires, via `REQUIRES_TERMINATOR`) so the outer terminator
        // bounds how much of `src` belongs to this slice.
        while n < src.len() {
            let (element, consumed) = self.get_element(&src[n..])?;
            elements.push(element);
            n += consumed;
        }
        Ok((Some(elements), n))
    }

    fn write<W: Write>(&self, w: &mut W, value: &Option<Vec<C::Value>>) -> Result<()> {
        self.prefix.write(w, value.is_none())?;
        if let Some(elements) = value {
            for element in elements {
                self.write_element(w, element)?;
            }
        }
        Ok(())
    }

    fn read<R: Read>(&self, r: &mut R) -> Result<Option<Vec<C::Value>>> {
        let outcome = self.prefix.read(r)?;
        if outcome == PrefixOutcome::Nil {
            return Ok(None);
        }
        let mut elements = Vec::new();
        loop {
            match self.read_element(r) {
                Ok(element) => elements.push(element),
                Err(CodecError::Eof) => break,
                Err(e) => return Err(e),
            }
        }
        Ok(Some(elements))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codec::text::TerminatedStringCodec;

    fn codec() -> SliceCodec<TerminatedStringCodec> {
        SliceCodec::new(TerminatedStringCodec, NilOrdering::NilsFirst)
    }

    #[test]
    fn matches_expected_bytes_for_mixed_strings() {
        let c = codec();
        let mut buf = Vec::new();
        c.append(&mut buf, &Some(vec!["a".to_string(), "".to_string(), "xyz".to_string()]));
        let expected = hex_literal::hex!("03 6100 00 78797A00");
        // non-nil(03) | "a" terminated | "" terminated | "xyz" terminated -- no
        // separate emptiness byte: `[]` is the bare non-nil prefix, which is
        // already a lexicographic prefix of every non-empty encoding.
        assert!(
            buf == expected,
            "got {:02x}, expected {:02x}",
            hex_slice::AsHex::as_hex(&buf[..]),
            hex_slice::AsHex::as_hex(&expected[..])
        );
    }

    #[test]
    fn matches_documented_bytes_for_nested_empty_and_singleton_slices() {
        let inner = SliceCodec::new(TerminatedStringCodec, NilOrdering::NilsFirst);
        let outer = SliceCodec::new(inner, NilOrdering::NilsFirst);
        let mut buf = Vec::new();
        outer.append(&mut buf, &Some(vec![Some(vec![]), Some(vec!["".to_string()])]));
        assert_eq!(buf, hex_literal::hex!("03 0300 03010000"));
    }

    #[test]
    fn nil_empty_and_non_empty_sort_in_order() {
        let c = codec();
        let mut nil_buf = Vec::new();
        c.append(&mut nil_buf, &None);
        let mut empty_buf = Vec::new();
        c.append(&mut empty_buf, &Some(vec![]));
        let mut non_empty_buf = Vec::new();
        c.append(&mut non_empty_buf, &Some(vec!["a".to_string()]));
        assert!(nil_buf < empty_buf);
        assert!(empty_buf < non_empty_buf);
    }

    #[test]
    fn round_trips_nested_slices() {
        let inner = SliceCodec::new(TerminatedStringCodec, NilOrdering::NilsFirst);
        let outer = SliceCodec::new(inner, NilOrdering::NilsFirst);
        let value = Some(vec![Some(vec![]), Some(vec!["".to_string()])]);
        let mut buf = Vec::new();
        outer.append(&mut buf, &value);
        let (decoded, n) = outer.get(&buf).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(n, buf.len());
    }

    #[test]
    fn nested_empty_slice_sorts_before_nested_non_empty() {
        let inner = SliceCodec::new(TerminatedStringCodec, NilOrdering::NilsFirst);
        let outer = SliceCodec::new(inner, NilOrdering::NilsFirst);
        let mut a = Vec::new();
        let mut b = Vec::new();
        outer.append(&mut a, &Some(vec![Some(vec![])]));
        outer.append(&mut b, &Some(vec![Some(vec!["".to_string()])]));
        assert!(a < b);
    }

    #[test]
    fn stream_mode_matches_slice_mode() {
        let c = codec();
        let value = Some(vec!["one".to_string(), "two".to_string()]);
        let mut buf = Vec::new();
        c.write(&mut buf, &value).unwrap();
        let (sliced, _) = c.get(&buf).unwrap();
        let mut r = &buf[..];
        let streamed = c.read(&mut r).unwrap();
        assert_eq!(sliced, value);
        assert_eq!(streamed, value);
    }

    #[test]
    fn no_over_read_when_wrapped() {
        let inner = codec();
        let wrapped = crate::escape::Terminated::new(inner);
        let mut buf = Vec::new();
        wrapped.append(&mut buf, &Some(vec!["a".to_string()]));
        buf.extend_from_slice(b"trailing");
        let (_, n) = wrapped.get(&buf).unwrap();
        assert_eq!(n, buf.len() - "trailing".len());
    }
}
