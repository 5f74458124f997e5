//! Terminator/escape framing for variable-length inner encodings.
//!
//! The shape of this state machine mirrors the emulation-prevention byte
//! scanning H.264 bitstream readers use: scan for a reserved byte
//! sequence, treat an escape byte as "the next byte is literal", and do
//! not read one byte past the value being decoded. Here the alphabet is
//! just two reserved bytes (`0x00` terminator, `0x01` escape) instead of
//! three, and the result is a composable framing any codec can sit behind.
//!
//! `0x00` is the smallest byte and never appears unescaped inside a
//! payload, so two escaped-and-terminated encodings compare correctly
//! whenever their unescaped payloads do: at the first differing position
//! either both sides are still payload bytes (same order as the inner
//! codec), or the shorter one has already hit its terminator and sorts
//! first, exactly as lexicographic comparison requires.

use std::io::Read;
use std::io::Write;

use log::trace;

use crate::error::CodecError;
use crate::error::Result;

const TERMINATOR: u8 = 0x00;
const ESCAPE: u8 = 0x01;

/// Number of bytes `escape_append`/`escape_put` will produce for `raw`.
pub(crate) fn escaped_len(raw: &[u8]) -> usize {
    raw.len() + raw.iter().filter(|&&b| b == TERMINATOR || b == ESCAPE).count() + 1
}

/// Appends `raw`, escaped, terminated, and optionally bit-inverted
/// (`invert`, used by the big-float codec's negative-value mantissa), to
/// `dst`.
pub(crate) fn escape_append(dst: &mut Vec<u8>, raw: &[u8], invert: bool) {
    dst.reserve(escaped_len(raw));
    for &b in raw {
        match b {
            TERMINATOR | ESCAPE => dst.push(xor_if(ESCAPE, invert)),
            _ => {}
        }
        dst.push(xor_if(b, invert));
    }
    dst.push(xor_if(TERMINATOR, invert));
}

pub(crate) fn escape_put(dst: &mut [u8], raw: &[u8], invert: bool) -> usize {
    let mut i = 0;
    for &b in raw {
        if b == TERMINATOR || b == ESCAPE {
            dst[i] = xor_if(ESCAPE, invert);
            i += 1;
        }
        dst[i] = xor_if(b, invert);
        i += 1;
    }
    dst[i] = xor_if(TERMINATOR, invert);
    i + 1
}

fn xor_if(b: u8, invert: bool) -> u8 {
    if invert {
        !b
    } else {
        b
    }
}

#[derive(Copy, Clone, Debug)]
enum ScanState {
    Normal,
    Escaped,
}

/// Scans `src` for an escaped-and-terminated run, returning the unescaped
/// payload and the total number of bytes consumed (including the
/// terminator). `invert` undoes the big-float negative-mantissa bit
/// inversion before interpreting control bytes.
///
/// Uses `memchr::memchr2` to jump straight to the next control byte
/// instead of inspecting every byte of a payload run one at a time; a
/// composite key's string/bytes fields are typically long stretches with
/// no `0x00`/`0x01` at all, so this turns most of the scan into a single
/// vectorised search.
pub(crate) fn unescape(src: &[u8], invert: bool) -> Result<(Vec<u8>, usize)> {
    if src.is_empty() {
        return Err(CodecError::Eof);
    }
    let (term_byte, esc_byte) = if invert {
        (!TERMINATOR, !ESCAPE)
    } else {
        (TERMINATOR, ESCAPE)
    };
    let mut out = Vec::with_capacity(src.len());
    let mut pos = 0;
    loop {
        let Some(offset) = memchr::memchr2(term_byte, esc_byte, &src[pos..]) else {
            return Err(CodecError::UnterminatedBuffer);
        };
        let run = &src[pos..pos + offset];
        if invert {
            out.extend(run.iter().map(|&b| !b));
        } else {
            out.extend_from_slice(run);
        }
        let control = src[pos + offset];
        pos += offset + 1;
        if control == term_byte {
            return Ok((out, pos));
        }
        let literal = *src.get(pos).ok_or(CodecError::UnterminatedBuffer)?;
        out.push(xor_if(literal, invert));
        pos += 1;
    }
}

/// Streaming counterpart of [`escape_append`]; writes directly, with no
/// intermediate buffering of `raw`.
pub(crate) fn escape_write<W: Write>(w: &mut W, raw: &[u8], invert: bool) -> Result<()> {
    for &b in raw {
        if b == TERMINATOR || b == ESCAPE {
            w.write_all(&[xor_if(ESCAPE, invert)])?;
        }
        w.write_all(&[xor_if(b, invert)])?;
    }
    w.write_all(&[xor_if(TERMINATOR, invert)])?;
    Ok(())
}

/// Streaming counterpart of [`unescape`]. Reads one byte at a time so it
/// never consumes bytes belonging to the next value: a wrapped codec must
/// not buffer ahead of its own value's end, per the crate's no-over-read
/// rule.
pub(crate) fn unescape_read<R: Read>(r: &mut R, invert: bool) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut state = ScanState::Normal;
    let mut byte = [0u8; 1];
    let mut consumed_any = false;
    loop {
        match r.read(&mut byte) {
            Ok(0) => {
                return if consumed_any {
                    trace!("unescape_read: end of stream before an unescaped terminator");
                    Err(CodecError::UnterminatedBuffer)
                } else {
                    Err(CodecError::Eof)
                };
            }
            Ok(_) => {
                consumed_any = true;
                let b = xor_if(byte[0], invert);
                match state {
                    ScanState::Normal => match b {
                        ESCAPE => state = ScanState::Escaped,
                        TERMINATOR => return Ok(out),
                        _ => out.push(b),
                    },
                    ScanState::Escaped => {
                        out.push(b);
                        state = ScanState::Normal;
                    }
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CodecError::Io(e)),
        }
    }
}

/// Wraps any codec so its encoding is escaped and terminated, making the
/// result safe to nest inside an aggregate regardless of whether the
/// inner codec's own encoding is fixed- or variable-length.
pub struct Terminated<C> {
    inner: C,
}

impl<C> Terminated<C> {
    pub const fn new(inner: C) -> Self {
        Terminated { inner }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: crate::codec::Codec> crate::codec::Codec for Terminated<C> {
    type Value = C::Value;
    const REQUIRES_TERMINATOR: bool = false;

    fn append(&self, dst: &mut Vec<u8>, value: &Self::Value) {
        let mut raw = Vec::new();
        self.inner.append(&mut raw, value);
        escape_append(dst, &raw, false);
    }

    fn put(&self, dst: &mut [u8], value: &Self::Value) -> usize {
        let mut raw = Vec::new();
        self.inner.append(&mut raw, value);
        escape_put(dst, &raw, false)
    }

    fn get(&self, src: &[u8]) -> Result<(Self::Value, usize)> {
        let (raw, consumed) = unescape(src, false)?;
        let (value, _) = self.inner.get(&raw)?;
        Ok((value, consumed))
    }

    fn write<W: Write>(&self, w: &mut W, value: &Self::Value) -> Result<()> {
        let mut raw = Vec::new();
        self.inner.append(&mut raw, value);
        escape_write(w, &raw, false)
    }

    fn read<R: Read>(&self, r: &mut R) -> Result<Self::Value> {
        let raw = unescape_read(r, false)?;
        let (value, _) = self.inner.get(&raw)?;
        Ok(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_payload_is_just_a_terminator() {
        let mut buf = Vec::new();
        escape_append(&mut buf, &[], false);
        assert_eq!(buf, vec![0x00]);
    }

    #[test]
    fn escapes_both_control_bytes() {
        let mut buf = Vec::new();
        escape_append(&mut buf, &[0x00, 0x01, 0x02], false);
        assert_eq!(buf, vec![0x01, 0x00, 0x01, 0x01, 0x02, 0x00]);
        let (raw, consumed) = unescape(&buf, false).unwrap();
        assert_eq!(raw, vec![0x00, 0x01, 0x02]);
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn no_over_read_with_trailing_suffix() {
        let mut buf = Vec::new();
        escape_append(&mut buf, b"abc", false);
        buf.extend_from_slice(b"trailing garbage");
        let (raw, consumed) = unescape(&buf, false).unwrap();
        assert_eq!(raw, b"abc");
        assert_eq!(consumed, 4); // "abc" + terminator, none of the suffix
    }

    #[test]
    fn unterminated_input_is_an_error() {
        let err = unescape(b"abc", false).unwrap_err();
        assert!(matches!(err, CodecError::UnterminatedBuffer));
    }

    #[test]
    fn clean_eof_on_empty_input() {
        assert!(matches!(unescape(&[], false), Err(CodecError::Eof)));
    }

    #[test]
    fn stream_mode_matches_slice_mode() {
        let mut buf = Vec::new();
        escape_append(&mut buf, &[0x01, 0x00, 0xFF], false);
        let mut r = &buf[..];
        let streamed = unescape_read(&mut r, false).unwrap();
        let (sliced, _) = unescape(&buf, false).unwrap();
        assert_eq!(streamed, sliced);
    }

    #[test]
    fn inverted_round_trip() {
        let mut buf = Vec::new();
        escape_append(&mut buf, &[0x00, 0x01, 0x7F], true);
        let (raw, consumed) = unescape(&buf, true).unwrap();
        assert_eq!(raw, vec![0x00, 0x01, 0x7F]);
        assert_eq!(consumed, buf.len());
    }
}
