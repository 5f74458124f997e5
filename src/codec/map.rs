//! Map codecs: unordered (encodes in the input's iteration order) and
//! ordered (canonical output, entries sorted by key encoding).

use std::collections::HashMap;
use std::hash::Hash;
use std::io::Read;
use std::io::Write;

use crate::codec::Codec;
use crate::error::Result;
use crate::escape;
use crate::prefix::NilOrdering;
use crate::prefix::Prefix;
use crate::prefix::PrefixOutcome;

fn append_entry<K: Codec, V: Codec>(dst: &mut Vec<u8>, key_codec: &K, value_codec: &V, key: &K::Value, value: &V::Value) {
    if K::REQUIRES_TERMINATOR {
        let mut raw = Vec::new();
        key_codec.append(&mut raw, key);
        escape::escape_append(dst, &raw, false);
    } else {
        key_codec.append(dst, key);
    }
    if V::REQUIRES_TERMINATOR {
        let mut raw = Vec::new();
        value_codec.append(&mut raw, value);
        escape::escape_append(dst, &raw, false);
    } else {
        value_codec.append(dst, value);
    }
}

fn get_entry<K: Codec, V: Codec>(src: &[u8], key_codec: &K, value_codec: &V) -> Result<(K::Value, V::Value, usize)> {
    let mut n = 0;
    let key = if K::REQUIRES_TERMINATOR {
        let (raw, consumed) = escape::unescape(&src[n..], false)?;
        n += consumed;
        key_codec.get(&raw)?.0
    } else {
        let (k, consumed) = key_codec.get(&src[n..])?;
        n += consumed;
        k
    };
    let value = if V::REQUIRES_TERMINATOR {
        let (raw, consumed) = escape::unescape(&src[n..], false)?;
        n += consumed;
        value_codec.get(&raw)?.0
    } else {
        let (v, consumed) = value_codec.get(&src[n..])?;
        n += consumed;
        v
    };
    Ok((key, value, n))
}

/// Codec for `Option<HashMap<K::Value, V::Value>>` whose encoded entry
/// order is whatever order the input `HashMap` iterates in: round-trips
/// the map, but two equal maps can produce different bytes.
#[derive(Copy, Clone, Debug)]
pub struct UnorderedMapCodec<K, V> {
    prefix: Prefix,
    key: K,
    value: V,
}

impl<K: Codec, V: Codec> UnorderedMapCodec<K, V> {
    pub const fn new(key: K, value: V, ordering: NilOrdering) -> Self {
        UnorderedMapCodec {
            prefix: Prefix::new(ordering),
            key,
            value,
        }
    }
}

impl<K: Codec, V: Codec> Codec for UnorderedMapCodec<K, V>
where
    K::Value: Eq + Hash,
{
    type Value = Option<HashMap<K::Value, V::Value>>;
    const REQUIRES_TERMINATOR: bool = true;

    fn append(&self, dst: &mut Vec<u8>, value: &Self::Value) {
        self.prefix.append(dst, value.is_none());
        if let Some(map) = value {
            for (k, v) in map {
                append_entry(dst, &self.key, &self.value, k, v);
            }
        }
    }

    fn put(&self, dst: &mut [u8], value: &Self::Value) -> usize {
        let mut buf = Vec::new();
        self.append(&mut buf, value);
        dst[..buf.len()].copy_from_slice(&buf);
        buf.len()
    }

    fn get(&self, src: &[u8]) -> Result<(Self::Value, usize)> {
        let (outcome, mut n) = self.prefix.get(src)?;
        if outcome == PrefixOutcome::Nil {
            return Ok((None, n));
        }
        let mut map = HashMap::new();
        while n < src.len() {
            let (k, v, consumed) = get_entry(&src[n..], &self.key, &self.value)?;
            map.insert(k, v);
            n += consumed;
        }
        Ok((Some(map), n))
    }

    fn write<W: Write>(&self, w: &mut W, value: &Self::Value) -> Result<()> {
        let mut buf = Vec::new();
        self.append(&mut buf, value);
        w.write_all(&buf)?;
        Ok(())
    }

    fn read<R: Read>(&self, r: &mut R) -> Result<Self::Value> {
        let mut buf = Vec::new();
        r.read_to_end(&mut buf)?;
        Ok(self.get(&buf)?.0)
    }
}

/// Codec for `Option<HashMap<K::Value, V::Value>>` whose encoded entry
/// order is ascending by key encoding, making the output canonical for a
/// given map.
#[derive(Copy, Clone, Debug)]
pub struct OrderedMapCodec<K, V> {
    prefix: Prefix,
    key: K,
    value: V,
}

impl<K: Codec, V: Codec> OrderedMapCodec<K, V> {
    pub const fn new(key: K, value: V, ordering: NilOrdering) -> Self {
        OrderedMapCodec {
            prefix: Prefix::new(ordering),
            key,
            value,
        }
    }
}

impl<K: Codec, V: Codec> Codec for OrderedMapCodec<K, V>
where
    K::Value: Eq + Hash,
{
    type Value = Option<HashMap<K::Value, V::Value>>;
    const REQUIRES_TERMINATOR: bool = true;

    fn append(&self, dst: &mut Vec<u8>, value: &Self::Value) {
        self.prefix.append(dst, value.is_none());
        if let Some(map) = value {
            let mut entries: Vec<(Vec<u8>, &K::Value, &V::Value)> = map
                .iter()
                .map(|(k, v)| {
                    let mut key_bytes = Vec::new();
                    self.key.append(&mut key_bytes, k);
                    (key_bytes, k, v)
                })
                .collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            for (_, k, v) in entries {
                append_entry(dst, &self.key, &self.value, k, v);
            }
        }
    }

    fn put(&self, dst: &mut [u8], value: &Self::Value) -> usize {
        let mut buf = Vec::new();
        self.append(&mut buf, value);
        dst[..buf.len()].copy_from_slice(&buf);
        buf.len()
    }

    fn get(&self, src: &[u8]) -> Result<(Self::Value, usize)> {
        let (outcome, mut n) = self.prefix.get(src)?;
        if outcome == PrefixOutcome::Nil {
            return Ok((None, n));
        }
        let mut map = HashMap::new();
        while n < src.len() {
            let (k, v, consumed) = get_entry(&src[n..], &self.key, &self.value)?;
            map.insert(k, v);
            n += consumed;
        }
        Ok((Some(map), n))
    }

    fn write<W: Write>(&self, w: &mut W, value: &Self::Value) -> Result<()> {
        let mut buf = Vec::new();
        self.append(&mut buf, value);
        w.write_all(&buf)?;
        Ok(())
    }

    fn read<R: Read>(&self, r: &mut R) -> Result<Self::Value> {
        let mut buf = Vec::new();
        r.read_to_end(&mut buf)?;
        Ok(self.get(&buf)?.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codec::int::U8Codec;
    use crate::codec::text::TerminatedStringCodec;

    #[test]
    fn unordered_round_trips() {
        let c = UnorderedMapCodec::new(TerminatedStringCodec, U8Codec, NilOrdering::NilsFirst);
        let mut map = HashMap::new();
        map.insert("a".to_string(), 1u8);
        map.insert("b".to_string(), 2u8);
        let mut buf = Vec::new();
        c.append(&mut buf, &Some(map.clone()));
        let (decoded, n) = c.get(&buf).unwrap();
        assert_eq!(decoded, Some(map));
        assert_eq!(n, buf.len());
    }

    #[test]
    fn ordered_is_deterministic_across_insertion_orders() {
        let c = OrderedMapCodec::new(TerminatedStringCodec, U8Codec, NilOrdering::NilsFirst);
        let mut m1 = HashMap::new();
        m1.insert("z".to_string(), 1u8);
        m1.insert("a".to_string(), 2u8);
        let mut m2 = HashMap::new();
        m2.insert("a".to_string(), 2u8);
        m2.insert("z".to_string(), 1u8);
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        c.append(&mut buf1, &Some(m1));
        c.append(&mut buf2, &Some(m2));
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn ordered_entries_sort_ascending_by_key_encoding() {
        let c = OrderedMapCodec::new(TerminatedStringCodec, U8Codec, NilOrdering::NilsFirst);
        let mut map = HashMap::new();
        map.insert("b".to_string(), 1u8);
        map.insert("a".to_string(), 2u8);
        let mut buf = Vec::new();
        c.append(&mut buf, &Some(map));
        // non-nil prefix, then entries sorted by key: "a" (0x61 0x00) then
        // "b" (0x62 0x00) -- no separate emptiness byte.
        assert_eq!(buf, vec![0x03, 0x61, 0x00, 2, 0x62, 0x00, 1]);
    }

    #[test]
    fn empty_and_nil_round_trip() {
        let c = UnorderedMapCodec::new(TerminatedStringCodec, U8Codec, NilOrdering::NilsFirst);
        let mut nil_buf = Vec::new();
        c.append(&mut nil_buf, &None);
        assert_eq!(c.get(&nil_buf).unwrap().0, None);

        let mut empty_buf = Vec::new();
        c.append(&mut empty_buf, &Some(HashMap::new()));
        assert_eq!(c.get(&empty_buf).unwrap().0, Some(HashMap::new()));
        assert!(nil_buf < empty_buf);
    }
}
