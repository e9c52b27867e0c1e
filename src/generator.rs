//! Generator polynomial synthesis and the derived lookup tables that make
//! encoding and decoding table-driven instead of bit-by-bit.

use crate::error::BchError;
use crate::gf::GfTables;
use crate::poly::GfPoly;

/// Build g(X), the product of the minimal polynomials of alpha^1, alpha^3,
/// ..., alpha^(2t-1), via cyclotomic coset enumeration. Returns the
/// left-justified 32-bit-word packing of g's coefficients (MSB-first,
/// highest-degree coefficient first) and g's degree (`ecc_bits`).
pub(crate) fn compute_generator_polynomial(gf: &GfTables, t: u32) -> (Vec<u32>, u32) {
    let n = gf.n();
    let mut in_roots = vec![false; (n + 1) as usize];
    for i in 0..t {
        let mut r = 2 * i + 1;
        for _ in 0..gf.m() {
            in_roots[r as usize] = true;
            r = gf.mod_s(2 * r as i64);
        }
    }

    let max_deg = (gf.m() * t) as usize;
    let mut g = GfPoly::one(max_deg);
    for i in 0..n {
        if in_roots[i as usize] {
            let r = gf.pow_idx(i);
            g.c[g.deg + 1] = 1;
            for j in (1..=g.deg).rev() {
                g.c[j] = gf.mul(g.c[j], r) ^ g.c[j - 1];
            }
            g.c[0] = gf.mul(g.c[0], r);
            g.deg += 1;
        }
    }

    let mut remaining = (g.deg + 1) as i64;
    let mut words = Vec::with_capacity(((remaining + 31) / 32) as usize);
    while remaining > 0 {
        let nbits = remaining.min(32);
        let mut word: u32 = 0;
        for j in 0..nbits {
            let idx = (remaining - 1 - j) as usize;
            if g.c[idx] != 0 {
                word |= 1u32 << (31 - j);
            }
        }
        words.push(word);
        remaining -= nbits;
    }
    (words, g.deg as u32)
}

/// Build the four 256-entry mod-8 remainder tables used to encode a byte of
/// data (at each of the four positions within a 32-bit word) against g(X) in
/// a single XOR per byte, instead of bit-by-bit long division.
pub(crate) fn build_mod8_tables(g: &[u32], ecc_bits: u32, ecc_words: usize) -> Vec<u32> {
    use crate::gf::msb_index;

    let l = ecc_words;
    let plen = ((ecc_bits as usize + 1) + 31) / 32;
    let ecclen = (ecc_bits as usize + 31) / 32;
    let mut tab = vec![0u32; 4 * 256 * l];
    for i in 0u32..256 {
        for b in 0u32..4 {
            let base = ((b as usize) * 256 + i as usize) * l;
            let mut data: u32 = i << (8 * b);
            while data != 0 {
                let d = msb_index(data);
                data ^= g[0] >> (31 - d);
                for j in 0..ecclen {
                    let hi = if d < 31 { g[j] << (d + 1) } else { 0 };
                    let lo = if j + 1 < plen { g[j + 1] >> (31 - d) } else { 0 };
                    tab[base + j] ^= hi | lo;
                }
            }
        }
    }
    tab
}

/// Build the basis used by the degree-2 BTZ root solver: for each `i < m`,
/// `xi_tab[i]` is an element `x` with `Tr(x^2 + x) = 1`'s i-th basis bit.
pub(crate) fn build_deg2_base(gf: &GfTables) -> Result<Vec<u16>, BchError> {
    let m = gf.m();
    let mut ak: u16 = 0;
    for i in 0..m {
        let mut sum: u16 = 0;
        for j in 0..m {
            sum ^= gf.pow((i * (1u32 << j)) as i64);
        }
        if sum != 0 {
            ak = gf.pow_idx(i);
            break;
        }
    }

    let mut xi_tab = vec![0u16; m as usize];
    let mut found = vec![false; m as usize];
    let mut remaining = m;
    let mut x: u32 = 0;
    while x <= gf.n() && remaining > 0 {
        let mut y = gf.sqr(x as u16) ^ (x as u16);
        for _ in 0..2 {
            if y != 0 {
                let r = gf.log(y) as u32;
                if r < m && !found[r as usize] {
                    xi_tab[r as usize] = x as u16;
                    found[r as usize] = true;
                    remaining -= 1;
                    break;
                }
            }
            y ^= ak;
        }
        x += 1;
    }

    if remaining != 0 {
        Err(BchError::InvalidArgument(
            "failed to build degree-2 solver basis for this field",
        ))
    } else {
        Ok(xi_tab)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn m5_t2_has_ten_ecc_bits() {
        let gf = GfTables::build(5, 0x25).unwrap();
        let (_, ecc_bits) = compute_generator_polynomial(&gf, 2);
        assert_eq!(ecc_bits, 10);
    }

    #[test]
    fn deg2_base_resolves_every_log_below_m() {
        let gf = GfTables::build(6, 0x43).unwrap();
        let xi = build_deg2_base(&gf).unwrap();
        assert_eq!(xi.len(), 6);
    }

    #[test]
    fn mod8_tables_have_expected_shape() {
        let gf = GfTables::build(5, 0x25).unwrap();
        let (g, ecc_bits) = compute_generator_polynomial(&gf, 2);
        let ecc_words = (5 * 2 + 31) / 32;
        let tab = build_mod8_tables(&g, ecc_bits, ecc_words);
        assert_eq!(tab.len(), 4 * 256 * ecc_words);
    }
}
