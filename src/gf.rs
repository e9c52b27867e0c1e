//! GF(2^m) arithmetic: pow/log table construction and field operations.
//!
//! All non-zero elements of GF(2^m) are powers of a primitive element alpha;
//! `pow_tab[i] = alpha^i` and `log_tab[x] = log_alpha(x)` are inverses of
//! each other on `[1, n]`. `log_tab[0]` is a poison value (always 0) -
//! every caller must guard field-element arguments with `x != 0` before
//! trusting a log lookup, exactly as in the reference C implementation.

use crate::error::BchError;

/// Default primitive polynomials for m = 5..=15, indexed by `m - 5`.
pub(crate) const DEFAULT_PRIM_POLY: [u32; 11] = [
    0x25, 0x43, 0x83, 0x11d, 0x211, 0x409, 0x805, 0x1053, 0x201b, 0x402b, 0x8003,
];

pub(crate) fn default_prim_poly(m: u32) -> u32 {
    DEFAULT_PRIM_POLY[(m - 5) as usize]
}

/// Index of the highest set bit of a non-zero value (its polynomial degree).
#[inline]
pub(crate) fn msb_index(x: u32) -> u32 {
    31 - x.leading_zeros()
}

/// Pow/log tables over the multiplicative group of GF(2^m).
pub(crate) struct GfTables {
    m: u32,
    n: u32,
    pow_tab: Vec<u16>,
    log_tab: Vec<u16>,
}

impl GfTables {
    /// Build pow/log tables from a primitive polynomial of degree `m`.
    ///
    /// Fails if `prim_poly` does not have degree exactly `m`, or if it turns
    /// out not to be primitive (alpha returns to 1 before the full period).
    pub(crate) fn build(m: u32, prim_poly: u32) -> Result<Self, BchError> {
        if prim_poly == 0 || msb_index(prim_poly) != m {
            return Err(BchError::InvalidArgument(
                "primitive polynomial must have degree m",
            ));
        }
        let n = (1u32 << m) - 1;
        let k = 1u32 << m;
        let mut pow_tab = vec![0u16; (n + 1) as usize];
        let mut log_tab = vec![0u16; (n + 1) as usize];
        let mut x: u32 = 1;
        for i in 0..n {
            pow_tab[i as usize] = x as u16;
            log_tab[x as usize] = i as u16;
            if i != 0 && x == 1 {
                return Err(BchError::InvalidArgument(
                    "polynomial is not primitive",
                ));
            }
            x <<= 1;
            if x & k != 0 {
                x ^= prim_poly;
            }
        }
        pow_tab[n as usize] = 1;
        log_tab[0] = 0;
        Ok(Self { m, n, pow_tab, log_tab })
    }

    #[inline]
    pub(crate) fn m(&self) -> u32 {
        self.m
    }

    #[inline]
    pub(crate) fn n(&self) -> u32 {
        self.n
    }

    /// Raw, unreduced pow-table lookup; `i` must already be in `[0, n]`.
    #[inline]
    pub(crate) fn pow_idx(&self, i: u32) -> u16 {
        self.pow_tab[i as usize]
    }

    #[inline]
    pub(crate) fn log(&self, x: u16) -> u16 {
        self.log_tab[x as usize]
    }

    /// Reduce `v` (assumed non-negative) modulo n = 2^m - 1.
    pub(crate) fn modulo(&self, mut v: i64) -> u32 {
        let n = self.n as i64;
        let m = self.m;
        while v >= n {
            v -= n;
            v = (v & n) + (v >> m);
        }
        v as u32
    }

    /// Faster modulo for `0 <= v < 2n`.
    #[inline]
    pub(crate) fn mod_s(&self, v: i64) -> u32 {
        let n = self.n as i64;
        (if v < n { v } else { v - n }) as u32
    }

    /// alpha^i for any (non-negative) integer exponent i.
    #[inline]
    pub(crate) fn pow(&self, i: i64) -> u16 {
        self.pow_tab[self.modulo(i) as usize]
    }

    #[inline]
    pub(crate) fn mul(&self, a: u16, b: u16) -> u16 {
        if a == 0 || b == 0 {
            0
        } else {
            self.pow_tab[self.mod_s(self.log(a) as i64 + self.log(b) as i64) as usize]
        }
    }

    #[inline]
    pub(crate) fn sqr(&self, a: u16) -> u16 {
        if a == 0 {
            0
        } else {
            self.pow_tab[self.mod_s(2 * self.log(a) as i64) as usize]
        }
    }

    #[inline]
    pub(crate) fn div(&self, a: u16, b: u16) -> u16 {
        if a == 0 {
            0
        } else {
            self.pow_tab[self.mod_s(self.log(a) as i64 + self.n as i64 - self.log(b) as i64) as usize]
        }
    }

    #[inline]
    pub(crate) fn inv(&self, a: u16) -> u16 {
        self.pow_tab[(self.n - self.log(a) as u32) as usize]
    }
}
