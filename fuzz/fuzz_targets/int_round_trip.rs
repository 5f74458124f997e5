//! Fuzz test: decode(encode(v)) == v for every i64 the fuzzer can produce,
//! and decoding arbitrary bytes never panics.

#![no_main]
use libfuzzer_sys::fuzz_target;
use ordkey::codec::int::I64Codec;
use ordkey::codec::Codec;

fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&data[..8]);
    let v = i64::from_le_bytes(bytes);

    let mut encoded = Vec::new();
    I64Codec.append(&mut encoded, &v);
    let (decoded, n) = I64Codec.get(&encoded).expect("round-trip decode must succeed");
    assert_eq!(decoded, v);
    assert_eq!(n, encoded.len());

    // Decoding arbitrary fuzzer bytes directly must never panic, only
    // return `Err` for malformed or truncated input.
    let _ = I64Codec.get(data);
});
