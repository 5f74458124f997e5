//! Fuzz test: decoding arbitrary bytes through a slice codec never panics,
//! only returns `Err` for malformed, truncated, or unterminated input.

#![no_main]
use libfuzzer_sys::fuzz_target;
use ordkey::codec::int::I32Codec;
use ordkey::codec::slice::SliceCodec;
use ordkey::codec::text::TerminatedStringCodec;
use ordkey::codec::Codec;
use ordkey::prefix::NilOrdering;

fuzz_target!(|data: &[u8]| {
    let strings = SliceCodec::new(TerminatedStringCodec, NilOrdering::NilsFirst);
    let _ = strings.get(data);

    let ints = SliceCodec::new(I32Codec, NilOrdering::NilsLast);
    let _ = ints.get(data);

    let nested = SliceCodec::new(
        SliceCodec::new(TerminatedStringCodec, NilOrdering::NilsFirst),
        NilOrdering::NilsFirst,
    );
    let _ = nested.get(data);
});
