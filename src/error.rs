//! Error kinds shared by every codec in this crate.

use std::fmt;

/// Everything that can go wrong decoding (or, for [`CodecError::Io`], encoding
/// into a stream) a value through one of this crate's codecs.
///
/// Mirrors the error kinds a codec contract promises to its callers: no kind
/// here is specific to a single primitive, so every codec can share one type.
#[derive(Debug)]
pub enum CodecError {
    /// No bytes at all were available where a value was expected. Distinct
    /// from [`CodecError::UnexpectedEof`] so callers can tell "no more
    /// values" from "a value was cut short".
    Eof,

    /// Fewer bytes were available than the value (or its framing) required,
    /// after at least one byte had already been consumed.
    UnexpectedEof,

    /// A nil/non-nil prefix byte was not one of `0x02`, `0x03`, `0xFD`.
    UnexpectedPrefix(u8),

    /// A prefix byte was valid but did not match a nils-first codec.
    UnexpectedNilsFirst(u8),

    /// A prefix byte was valid but did not match a nils-last codec.
    UnexpectedNilsLast(u8),

    /// The terminator/escape wrapper reached the end of its input without
    /// finding an unescaped terminator byte.
    UnterminatedBuffer,

    /// A big-float exponent or precision did not fit in `i32` once negated
    /// for a negative value, or would overflow on decode.
    BigFloatOverflow,

    /// A platform-width integer decoded to a value that does not fit the
    /// host's `usize`/`isize`.
    PlatformWidthOverflow,

    /// A string codec decoded bytes that are not valid UTF-8.
    InvalidUtf8,

    /// An I/O error from the caller's `Read`/`Write`, surfaced verbatim.
    Io(std::io::Error),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Eof => write!(f, "no data to decode"),
            CodecError::UnexpectedEof => write!(f, "unexpected end of input decoding a value"),
            CodecError::UnexpectedPrefix(b) => write!(f, "unexpected prefix byte {:#04x}", b),
            CodecError::UnexpectedNilsFirst(b) => write!(
                f,
                "prefix byte {:#04x} does not belong to a nils-first codec",
                b
            ),
            CodecError::UnexpectedNilsLast(b) => write!(
                f,
                "prefix byte {:#04x} does not belong to a nils-last codec",
                b
            ),
            CodecError::UnterminatedBuffer => {
                write!(f, "reached end of input before an unescaped terminator")
            }
            CodecError::BigFloatOverflow => {
                write!(f, "big-float exponent or precision out of range")
            }
            CodecError::PlatformWidthOverflow => {
                write!(f, "platform-width integer does not fit this host's word size")
            }
            CodecError::InvalidUtf8 => write!(f, "decoded bytes are not valid utf-8"),
            CodecError::Io(e) => write!(f, "i/o error: {}", e),
        }
    }
}

impl From<std::io::Error> for CodecError {
    fn from(e: std::io::Error) -> Self {
        CodecError::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
