//! bool codec: one byte, `0x00` false, `0x01` true.

use std::io::Read;
use std::io::Write;

use crate::codec::Codec;
use crate::error::CodecError;
use crate::error::Result;
use crate::primitive::read_exact_distinguishing_eof;

#[derive(Copy, Clone, Debug, Default)]
pub struct BoolCodec;

impl Codec for BoolCodec {
    type Value = bool;
    const REQUIRES_TERMINATOR: bool = false;

    fn append(&self, dst: &mut Vec<u8>, value: &bool) {
        dst.push(u8::from(*value));
    }

    fn put(&self, dst: &mut [u8], value: &bool) -> usize {
        dst[0] = u8::from(*value);
        1
    }

    fn get(&self, src: &[u8]) -> Result<(bool, usize)> {
        if src.is_empty() {
            return Err(CodecError::Eof);
        }
        Ok((src[0] != 0, 1))
    }

    fn write<W: Write>(&self, w: &mut W, value: &bool) -> Result<()> {
        w.write_all(&[u8::from(*value)])?;
        Ok(())
    }

    fn read<R: Read>(&self, r: &mut R) -> Result<bool> {
        let mut b = [0u8; 1];
        read_exact_distinguishing_eof(r, &mut b)?;
        Ok(b[0] != 0)
    }

    fn encoded_len(&self, _value: &bool) -> usize {
        1
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn orders_false_below_true() {
        let codec = BoolCodec;
        let mut a = Vec::new();
        let mut b = Vec::new();
        codec.append(&mut a, &false);
        codec.append(&mut b, &true);
        assert!(a < b);
    }

    #[test]
    fn round_trips() {
        let codec = BoolCodec;
        for v in [false, true] {
            let mut buf = Vec::new();
            codec.append(&mut buf, &v);
            let (decoded, n) = codec.get(&buf).unwrap();
            assert_eq!(decoded, v);
            assert_eq!(n, 1);
        }
    }
}
