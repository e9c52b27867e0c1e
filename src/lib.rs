//! Runtime-configurable binary BCH encoder/decoder over GF(2^m), 5 <= m <= 15.
//!
//! Construct a [`Codec`] for a chosen field exponent `m` and designed
//! error-correction capability `t`, then [`Codec::encode`] data into parity
//! bytes and [`Codec::decode`] a received codeword to locate (not correct
//! in place - see [`correct`]/[`correctbits`]) up to `t` bit errors.

mod arena;
mod bits;
mod bm;
mod codec;
mod encode;
mod error;
mod generator;
mod gf;
mod params;
mod poly;
mod roots;
mod syndrome;

pub use arena::ArenaBudget;
pub use bits::correctbits;
pub use codec::{correct, Codec, DecodeInput};
pub use error::BchError;
pub use params::BchParams;
