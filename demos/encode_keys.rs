//! Builds composite sorted keys out of a `(String, i64)` tuple codec and
//! prints them, proving that lexicographic byte order on the encodings
//! matches the natural order on the tuples.

use ordkey::codec::int::I64Codec;
use ordkey::codec::text::TerminatedStringCodec;
use ordkey::codec::tuple_struct::Tuple2;
use ordkey::registry::encode;

fn main() {
    let codec = Tuple2::new(TerminatedStringCodec, I64Codec);

    let rows = [
        ("alice".to_string(), 3i64),
        ("alice".to_string(), -1i64),
        ("bob".to_string(), 0i64),
        ("".to_string(), i64::MIN),
    ];

    let mut keys: Vec<(Vec<u8>, &(String, i64))> = rows
        .iter()
        .map(|row| (encode(&codec, row), row))
        .collect();
    keys.sort_by(|a, b| a.0.cmp(&b.0));

    for (bytes, row) in &keys {
        println!("{:?} -> {}", row, hex(bytes));
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect::<Vec<_>>().join(" ")
}
