//! Encodes a single value through one of this crate's built-in primitive
//! codecs and prints the resulting bytes, for poking at the wire format
//! from the command line.
//!
//! Usage: `dump_codec <kind> <value>`, where `<kind>` is one of
//! `bool`, `u64`, `i64`, `f64`, `str`. Parses `<kind>` into a
//! [`PrimitiveKind`] and goes through [`encode_primitive`], the same
//! descriptor-driven path a caller holding only a runtime type tag (e.g.
//! from a stored schema) would use.

use ordkey::registry::encode_primitive;
use ordkey::registry::PrimitiveKind;
use ordkey::registry::PrimitiveValue;

fn main() {
    let mut args = std::env::args().skip(1);
    let (kind, value) = match (args.next(), args.next()) {
        (Some(kind), Some(value)) => (kind, value),
        _ => {
            eprintln!("Usage: dump_codec <bool|u64|i64|f64|str> <value>");
            std::process::exit(1);
        }
    };

    let kind = match kind.as_str() {
        "bool" => PrimitiveKind::Bool,
        "u64" => PrimitiveKind::U64,
        "i64" => PrimitiveKind::I64,
        "f64" => PrimitiveKind::F64,
        "str" => PrimitiveKind::TerminatedStr,
        other => {
            eprintln!("unknown codec kind {other:?}");
            std::process::exit(1);
        }
    };

    let value = match kind {
        PrimitiveKind::Bool => PrimitiveValue::Bool(parse(&value)),
        PrimitiveKind::U64 => PrimitiveValue::U64(parse(&value)),
        PrimitiveKind::I64 => PrimitiveValue::I64(parse(&value)),
        PrimitiveKind::F64 => PrimitiveValue::F64(parse(&value)),
        PrimitiveKind::TerminatedStr => PrimitiveValue::TerminatedStr(value),
        _ => unreachable!("not offered by the kind match above"),
    };

    println!("{}", hex(&encode_primitive(&value)));
}

fn parse<T: std::str::FromStr>(s: &str) -> T
where
    T::Err: std::fmt::Debug,
{
    s.parse().unwrap_or_else(|e| panic!("invalid value {s:?}: {e:?}"))
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect::<Vec<_>>().join(" ")
}
