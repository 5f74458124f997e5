//! Arbitrary-precision codecs: big integer, big float, big rational.
//!
//! All three are nil-able (a big number has no natural "zero value" that
//! could double as absence, unlike a fixed-width int) and variable length.

pub mod bigfloat;
pub mod bigint;
pub mod bigrational;

pub use bigfloat::BigFloatCodec;
pub use bigfloat::BigFloatValue;
pub use bigint::BigIntCodec;
pub use bigrational::BigRationalCodec;
