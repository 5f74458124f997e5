//! Fuzz test: decode(encode(v)) == v for arbitrary-precision integers built
//! from the fuzzer's raw bytes, and decoding arbitrary bytes never panics.

#![no_main]
use libfuzzer_sys::fuzz_target;
use num_bigint::BigInt;
use num_bigint::Sign;
use ordkey::codec::bignum::BigIntCodec;
use ordkey::codec::Codec;
use ordkey::prefix::NilOrdering;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let codec = BigIntCodec::new(NilOrdering::NilsFirst);

    let sign = if data[0] & 1 == 0 { Sign::Plus } else { Sign::Minus };
    let value = if data.len() == 1 {
        Some(BigInt::from(0))
    } else {
        Some(BigInt::from_bytes_be(sign, &data[1..]))
    };

    let mut encoded = Vec::new();
    codec.append(&mut encoded, &value);
    let (decoded, n) = codec.get(&encoded).expect("round-trip decode must succeed");
    assert_eq!(decoded, value);
    assert_eq!(n, encoded.len());

    // Decoding arbitrary fuzzer bytes directly must never panic, only
    // return `Err` for malformed or truncated input.
    let _ = codec.get(data);
});
