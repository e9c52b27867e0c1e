//! Construction parameters for a [`crate::Codec`].

use serde::{Deserialize, Serialize};

/// Parameters needed to build a [`crate::Codec`].
///
/// `m` selects the Galois field GF(2^m) (valid range 5..=15) and `t` is the
/// designed error-correction capability in bits. `prim_poly` overrides the
/// built-in default primitive polynomial for `m`; leave it `None` unless you
/// have a specific interoperability reason to pick a different one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BchParams {
    pub m: u8,
    pub t: u8,
    #[serde(default)]
    pub prim_poly: Option<u32>,
}

impl BchParams {
    pub fn new(m: u8, t: u8) -> Self {
        Self { m, t, prim_poly: None }
    }

    pub fn with_prim_poly(m: u8, t: u8, prim_poly: u32) -> Self {
        Self { m, t, prim_poly: Some(prim_poly) }
    }
}
