//! Syndrome computation: `S_j = r(alpha^j)` for `j = 1, 3, 5, ..., 2t-1`,
//! plus the even-indexed syndromes derived by squaring (since squaring is
//! linear over GF(2), `S_2j = S_j^2`, so only the odd ones need an actual
//! bit walk over the received remainder).

use crate::gf::{msb_index, GfTables};

/// Walk the bits of the (already-masked) received remainder `ecc`, summing
/// `alpha^(j*(bit position))` into each odd syndrome as each set bit is
/// visited.
pub(crate) fn compute_syndromes(gf: &GfTables, t: u32, ecc_bits: u32, ecc: &mut [u32]) -> Vec<u16> {
    let mut syn = vec![0u16; (2 * t) as usize];

    let tail = ecc_bits & 31;
    if tail != 0 {
        let last = (ecc_bits / 32) as usize;
        ecc[last] &= !((1u32 << (32 - tail)) - 1);
    }

    let mut s: i64 = ecc_bits as i64;
    let mut idx = 0usize;
    loop {
        let mut poly = ecc[idx];
        idx += 1;
        s -= 32;
        while poly != 0 {
            let i = msb_index(poly) as i64;
            let mut j = 0u32;
            while j < 2 * t {
                syn[j as usize] ^= gf.pow((j as i64 + 1) * (i + s));
                j += 2;
            }
            poly ^= 1 << i;
        }
        if s <= 0 {
            break;
        }
    }

    for j in 0..t {
        syn[(2 * j + 1) as usize] = gf.sqr(syn[(2 * j) as usize]);
    }
    syn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{encode_bch, load_ecc8};
    use crate::generator::{build_mod8_tables, compute_generator_polynomial};

    #[test]
    fn syndromes_of_a_valid_codeword_are_all_zero() {
        let gf = GfTables::build(5, 0x25).unwrap();
        let t = 2;
        let (g, ecc_bits) = compute_generator_polynomial(&gf, t);
        let ecc_words = (5 * t as usize + 31) / 32;
        let ecc_bytes = (ecc_bits as usize + 7) / 8;
        let tab = build_mod8_tables(&g, ecc_bits, ecc_words);

        let data = [0xa5u8, 0x3c, 0x91];
        let mut ecc_w = vec![0u32; ecc_words];
        encode_bch(&tab, ecc_words, &data, &mut ecc_w);

        let mut ecc_bytes_buf = vec![0u8; ecc_bytes];
        crate::encode::store_ecc8(ecc_words, ecc_bytes, &mut ecc_bytes_buf, &ecc_w);

        let mut recalc = vec![0u32; ecc_words];
        encode_bch(&tab, ecc_words, &data, &mut recalc);
        let mut received = vec![0u32; ecc_words];
        load_ecc8(ecc_words, ecc_bytes, &mut received, &ecc_bytes_buf);
        for i in 0..ecc_words {
            recalc[i] ^= received[i];
        }

        let syn = compute_syndromes(&gf, t, ecc_bits, &mut recalc);
        assert!(syn.iter().all(|&s| s == 0));
    }
}
