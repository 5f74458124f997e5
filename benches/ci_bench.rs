use std::hint::black_box;

use iai_callgrind::library_benchmark;
use iai_callgrind::library_benchmark_group;
use iai_callgrind::main;
use num_bigint::BigInt;

use ordkey::codec::bignum::BigIntCodec;
use ordkey::codec::float::Float64Codec;
use ordkey::codec::int::I64Codec;
use ordkey::codec::Codec;
use ordkey::prefix::NilOrdering;

#[library_benchmark]
fn encode_i64() {
    let codec = I64Codec;
    let mut buf = Vec::new();
    codec.append(&mut buf, black_box(&-123_456_789i64));
    black_box(buf);
}

#[library_benchmark]
fn encode_f64() {
    let codec = Float64Codec;
    let mut buf = Vec::new();
    codec.append(&mut buf, black_box(&-1.0e300f64));
    black_box(buf);
}

#[library_benchmark]
fn round_trip_bigint() {
    let codec = BigIntCodec::new(NilOrdering::NilsFirst);
    let value = Some(BigInt::parse_bytes(b"-123456789012345678901234567890", 10).unwrap());
    let mut buf = Vec::new();
    codec.append(&mut buf, black_box(&value));
    let (decoded, _) = codec.get(&buf).unwrap();
    black_box(decoded);
}

library_benchmark_group!(
    name = ci;
    benchmarks = encode_i64, encode_f64, round_trip_bigint
);

main!(library_benchmark_groups = ci);
