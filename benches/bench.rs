#[macro_use]
extern crate criterion;

use criterion::Criterion;
use criterion::Throughput;

use ordkey::codec::bignum::BigIntCodec;
use ordkey::codec::int::I64Codec;
use ordkey::codec::slice::SliceCodec;
use ordkey::codec::text::TerminatedStringCodec;
use ordkey::codec::Codec;
use ordkey::prefix::NilOrdering;
use num_bigint::BigInt;

fn encode_i64(c: &mut Criterion) {
    let codec = I64Codec;
    let mut buf = Vec::new();
    c.bench_function("encode i64", |b| {
        b.iter(|| {
            buf.clear();
            codec.append(&mut buf, &-123_456_789i64);
        })
    });
}

fn round_trip_bigint(c: &mut Criterion) {
    let codec = BigIntCodec::new(NilOrdering::NilsFirst);
    let value = Some(BigInt::parse_bytes(b"-123456789012345678901234567890", 10).unwrap());
    let mut buf = Vec::new();
    codec.append(&mut buf, &value);
    let size = buf.len();
    let mut group = c.benchmark_group("bigint round trip");
    group.throughput(Throughput::Bytes(size as u64));
    group.bench_function("round_trip", |b| {
        b.iter(|| {
            let (decoded, _) = codec.get(&buf).unwrap();
            decoded
        })
    });
    group.finish();
}

fn encode_string_slice(c: &mut Criterion) {
    let codec = SliceCodec::new(TerminatedStringCodec, NilOrdering::NilsFirst);
    let value = Some(vec![
        "alice".to_string(),
        "bob".to_string(),
        "carol".to_string(),
        "dave".to_string(),
    ]);
    let mut buf = Vec::new();
    codec.append(&mut buf, &value);
    let size = buf.len();
    let mut group = c.benchmark_group("string slice");
    group.throughput(Throughput::Bytes(size as u64));
    group.bench_function("append", |b| {
        b.iter(|| {
            buf.clear();
            codec.append(&mut buf, &value);
        })
    });
    group.finish();
}

criterion_group!(benches, encode_i64, round_trip_bigint, encode_string_slice);
criterion_main!(benches);
