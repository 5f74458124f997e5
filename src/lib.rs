//! Order-preserving binary codecs for keys in sorted key-value stores.
//!
//! Every codec in this crate is chosen so that comparing two encodings as
//! plain byte strings agrees with comparing the original values: encode a
//! tuple of fields as a composite key, and lexicographic byte order on the
//! keys matches the natural order on the tuples. See [`codec::Codec`] for
//! the contract every codec implements, and [`registry`] for the
//! `encode`/`decode` facade.

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;
#[cfg(test)]
extern crate hex_literal;
#[cfg(test)]
extern crate hex_slice;

pub mod codec;
pub mod error;
pub mod escape;
pub mod prefix;
pub(crate) mod primitive;
pub mod registry;
