//! Berlekamp-Massey error-locator polynomial, specialized for GF(2)-linear
//! BCH codes (syndromes satisfy `S_2j = S_j^2`, so the discrepancy recursion
//! only needs the odd-degree terms, which is why this variant runs in
//! `O(t)` steps rather than `O(2t)`).

use crate::gf::GfTables;
use crate::poly::GfPoly;

/// Compute the error-locator polynomial Lambda(X) from `2t` syndromes.
/// Returns a polynomial of degree `<= t` when the syndromes describe a
/// correctable pattern; callers must check `elp.deg > t` to detect failure.
pub(crate) fn compute_error_locator(gf: &GfTables, t: u32, syn: &[u16]) -> GfPoly {
    let max_deg = 2 * t as usize;
    let mut elp = GfPoly::one(max_deg);
    let mut pelp = GfPoly::one(max_deg);

    let n = gf.n() as i64;
    let mut pd: u16 = 1;
    let mut d: u16 = syn[0];
    let mut pp: i64 = -1;

    let mut i: i64 = 0;
    let t_i = t as i64;
    while i < t_i && elp.deg <= t as usize {
        if d != 0 {
            let k = 2 * i - pp;
            let elp_copy = elp.clone();
            let tmp = gf.log(d) as i64 + n - gf.log(pd) as i64;
            for j in 0..=pelp.deg {
                if pelp.c[j] != 0 {
                    let l = gf.log(pelp.c[j]) as i64;
                    let idx = (j as i64 + k) as usize;
                    elp.c[idx] ^= gf.pow(tmp + l);
                }
            }
            let new_deg = pelp.deg as i64 + k;
            if new_deg > elp.deg as i64 {
                elp.deg = new_deg as usize;
                pelp = elp_copy;
                pd = d;
                pp = 2 * i;
            }
        }
        if i < t_i - 1 {
            let mut next = syn[(2 * i + 2) as usize];
            for j in 1..=elp.deg {
                next ^= gf.mul(elp.c[j], syn[(2 * i + 2 - j as i64) as usize]);
            }
            d = next;
        }
        i += 1;
    }

    elp
}
