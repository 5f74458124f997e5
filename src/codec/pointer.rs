//! Nil-able wrapper over any codec for values whose type doesn't already
//! have a nil representation of its own (unlike the big-number codecs,
//! which bake the nil prefix in directly).

use std::io::Read;
use std::io::Write;

use crate::codec::Codec;
use crate::error::Result;
use crate::prefix::NilOrdering;
use crate::prefix::Prefix;
use crate::prefix::PrefixOutcome;

/// Writes the nil prefix, then, if non-nil, the wrapped value via `C`.
/// `REQUIRES_TERMINATOR` mirrors `C`'s, since the only byte this codec
/// itself adds is the fixed-width prefix.
#[derive(Copy, Clone, Debug)]
pub struct PointerCodec<C> {
    prefix: Prefix,
    inner: C,
}

impl<C: Codec> PointerCodec<C> {
    pub const fn new(inner: C, ordering: NilOrdering) -> Self {
        PointerCodec {
            prefix: Prefix::new(ordering),
            inner,
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: Codec> Codec for PointerCodec<C> {
    type Value = Option<C::Value>;
    const REQUIRES_TERMINATOR: bool = C::REQUIRES_TERMINATOR;

    fn append(&self, dst: &mut Vec<u8>, value: &Option<C::Value>) {
        self.prefix.append(dst, value.is_none());
        if let Some(v) = value {
            self.inner.append(dst, v);
        }
    }

    fn put(&self, dst: &mut [u8], value: &Option<C::Value>) -> usize {
        let n = self.prefix.put(dst, value.is_none());
        n + value.as_ref().map_or(0, |v| self.inner.put(&mut dst[n..], v))
    }

    fn get(&self, src: &[u8]) -> Result<(Option<C::Value>, usize)> {
        let (outcome, prefix_n) = self.prefix.get(src)?;
        if outcome == PrefixOutcome::Nil {
            return Ok((None, prefix_n));
        }
        let (value, n) = self.inner.get(&src[prefix_n..])?;
        Ok((Some(value), prefix_n + n))
    }

    fn write<W: Write>(&self, w: &mut W, value: &Option<C::Value>) -> Result<()> {
        self.prefix.write(w, value.is_none())?;
        if let Some(v) = value {
            self.inner.write(w, v)?;
        }
        Ok(())
    }

    fn read<R: Read>(&self, r: &mut R) -> Result<Option<C::Value>> {
        let outcome = self.prefix.read(r)?;
        if outcome == PrefixOutcome::Nil {
            return Ok(None);
        }
        Ok(Some(self.inner.read(r)?))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codec::int::U8Codec;

    #[test]
    fn nil_is_a_single_byte() {
        let c = PointerCodec::new(U8Codec, NilOrdering::NilsFirst);
        let mut buf = Vec::new();
        c.append(&mut buf, &None);
        assert_eq!(buf, vec![0x02]);
    }

    #[test]
    fn non_nil_round_trips() {
        let c = PointerCodec::new(U8Codec, NilOrdering::NilsFirst);
        let mut buf = Vec::new();
        c.append(&mut buf, &Some(7u8));
        let (decoded, n) = c.get(&buf).unwrap();
        assert_eq!(decoded, Some(7));
        assert_eq!(n, 2);
    }

    #[test]
    fn nil_sorts_before_every_non_nil_value_when_nils_first() {
        let c = PointerCodec::new(U8Codec, NilOrdering::NilsFirst);
        let mut nil_buf = Vec::new();
        c.append(&mut nil_buf, &None);
        let mut min_buf = Vec::new();
        c.append(&mut min_buf, &Some(0u8));
        assert!(nil_buf < min_buf);
    }

    #[test]
    fn nil_sorts_after_every_non_nil_value_when_nils_last() {
        let c = PointerCodec::new(U8Codec, NilOrdering::NilsLast);
        let mut nil_buf = Vec::new();
        c.append(&mut nil_buf, &None);
        let mut max_buf = Vec::new();
        c.append(&mut max_buf, &Some(u8::MAX));
        assert!(nil_buf > max_buf);
    }

    #[test]
    fn stream_mode_matches_slice_mode() {
        let c = PointerCodec::new(U8Codec, NilOrdering::NilsFirst);
        let mut buf = Vec::new();
        c.write(&mut buf, &Some(9u8)).unwrap();
        let (sliced, _) = c.get(&buf).unwrap();
        let mut r = &buf[..];
        let streamed = c.read(&mut r).unwrap();
        assert_eq!(sliced, streamed);
    }
}
