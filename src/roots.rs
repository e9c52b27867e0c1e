//! Root finding for the error-locator polynomial via the Berlekamp Trace
//! Algorithm (BTA) with closed-form solvers for degree 1-4, rather than an
//! exhaustive Chien search. Every returned root is `log(1/r)`, i.e. the
//! exponent such that `alpha^root = 1/r` - this is what lets the caller turn
//! a root directly into a bit position (`nbits - 1 - root`) without a second
//! inversion.

use crate::gf::GfTables;
use crate::poly::GfPoly;

#[inline]
fn a_ilog(gf: &GfTables, x: u16) -> u32 {
    gf.mod_s(gf.n() as i64 - gf.log(x) as i64)
}

fn find_deg1_roots(gf: &GfTables, poly: &GfPoly, roots: &mut Vec<u32>) {
    if poly.c[0] != 0 {
        let l0 = gf.log(poly.c[0]) as i64;
        let l1 = gf.log(poly.c[1]) as i64;
        roots.push(gf.mod_s(gf.n() as i64 - l0 + l1));
    }
}

fn find_deg2_roots(gf: &GfTables, xi_tab: &[u16], poly: &GfPoly, roots: &mut Vec<u32>) {
    if poly.c[0] == 0 || poly.c[1] == 0 {
        return;
    }
    let n = gf.n() as i64;
    let l0 = gf.log(poly.c[0]) as i64;
    let l1 = gf.log(poly.c[1]) as i64;
    let l2 = gf.log(poly.c[2]) as i64;
    let u = gf.pow(l0 + l2 + 2 * (n - l1));

    let mut r: u16 = 0;
    let mut v = u;
    while v != 0 {
        let i = crate::gf::msb_index(v as u32);
        r ^= xi_tab[i as usize];
        v ^= 1 << i;
    }

    if gf.sqr(r) ^ r == u {
        let base = 2 * n - l1 + l2;
        roots.push(gf.modulo(base - gf.log(r) as i64));
        roots.push(gf.modulo(base - gf.log(r ^ 1) as i64));
    }
}

/// Solve the linear system built by [`find_affine4_roots`] over GF(2),
/// returning the number of solutions actually found (0 on inconsistency).
fn solve_linear_system(gf: &GfTables, rows: &mut [u32; 16], sol: &mut [u32; 4], nsol: usize) -> usize {
    let m = gf.m() as usize;
    let mut param = vec![0usize; m];
    let mut k = 0usize;
    let mut mask: u32 = 1 << m;

    for c in 0..m {
        let p = c - k;
        let mut pivot: Option<usize> = None;
        for r in p..m {
            if rows[r] & mask != 0 {
                if r != p {
                    rows.swap(r, p);
                }
                pivot = Some(p + 1);
                break;
            }
        }
        if let Some(start) = pivot {
            let tmp = rows[p];
            for r in start..m {
                if rows[r] & mask != 0 {
                    rows[r] ^= tmp;
                }
            }
        } else {
            param[k] = c;
            k += 1;
        }
        mask >>= 1;
    }

    if k > 0 {
        let mut p = k;
        for r in (0..m).rev() {
            if r > m - 1 - k && rows[r] != 0 {
                return 0;
            }
            if p > 0 && r == param[p - 1] {
                p -= 1;
                rows[r] = 1u32 << (m - r);
            } else {
                rows[r] = rows[r - p];
            }
        }
    }

    if nsol != (1 << k) {
        return 0;
    }

    for p in 0..nsol {
        for (c, &pc) in param.iter().enumerate().take(k) {
            rows[pc] = (rows[pc] & !1u32) | (((p >> c) & 1) as u32);
        }
        let mut tmp: u32 = 0;
        for r in (0..m).rev() {
            let bits = rows[r] & (tmp | 1);
            tmp |= parity(bits) << (m - r);
        }
        sol[p] = tmp >> 1;
    }
    nsol
}

fn parity(x: u32) -> u32 {
    let mut x = x;
    x ^= x >> 1;
    x ^= x >> 2;
    x = (x & 0x1111_1111).wrapping_mul(0x1111_1111);
    (x >> 28) & 1
}

/// Solve `X^4 + a*X^2 + b*X + c = 0` by building a 16x16 GF(2) linear system
/// from the bit-decomposition of X over a normal basis, then Gaussian
/// eliminating it. Returns 0, or 4 roots (with multiplicity) in `out`.
fn find_affine4_roots(gf: &GfTables, a: u16, b: u16, c: u16, out: &mut [u32; 4]) -> usize {
    let m = gf.m() as usize;
    let mut j = if b != 0 { gf.log(b) as i64 } else { 0 };
    let mut k = if a != 0 { gf.log(a) as i64 } else { 0 };
    let mut rows = [0u32; 16];
    rows[0] = c as u32;
    for i in 0..m {
        let mut val = gf.pow_idx((4 * i) as u32) as u32;
        if a != 0 {
            val ^= gf.pow_idx(gf.mod_s(k)) as u32;
        }
        if b != 0 {
            val ^= gf.pow_idx(gf.mod_s(j)) as u32;
        }
        rows[i + 1] = val;
        j += 1;
        k += 2;
    }

    let mut mask: u32 = 0xff;
    let mut jj: i32 = 8;
    while jj != 0 {
        let mut kk: i32 = 0;
        while kk < 16 {
            let t = ((rows[kk as usize] >> jj) ^ rows[(kk + jj) as usize]) & mask;
            rows[kk as usize] ^= t << jj;
            rows[(kk + jj) as usize] ^= t;
            kk = (kk + jj + 1) & !jj;
        }
        jj >>= 1;
        mask ^= mask << jj;
    }

    solve_linear_system(gf, &mut rows, out, 4)
}

fn find_deg3_roots(gf: &GfTables, poly: &GfPoly, roots: &mut Vec<u32>) {
    if poly.c[0] == 0 {
        return;
    }
    let e3 = poly.c[3];
    let c2 = gf.div(poly.c[0], e3);
    let b2 = gf.div(poly.c[1], e3);
    let a2 = gf.div(poly.c[2], e3);

    let c = gf.mul(a2, c2);
    let b = gf.mul(a2, b2) ^ c2;
    let a = gf.sqr(a2) ^ b2;

    let mut tmp = [0u32; 4];
    if find_affine4_roots(gf, a, b, c, &mut tmp) == 4 {
        for &root in &tmp {
            if root != a2 as u32 {
                roots.push(a_ilog(gf, root as u16));
            }
        }
    }
}

fn find_deg4_roots(gf: &GfTables, poly: &GfPoly, roots: &mut Vec<u32>) {
    if poly.c[0] == 0 {
        return;
    }
    let e4 = poly.c[4];
    let mut d = gf.div(poly.c[0], e4);
    let c = gf.div(poly.c[1], e4);
    let mut b = gf.div(poly.c[2], e4);
    let a = gf.div(poly.c[3], e4);
    let mut e: u16 = 0;

    let (a2, b2, c2): (u16, u16, u16);
    if a != 0 {
        if c != 0 {
            let f = gf.div(c, a);
            let mut l = gf.log(f) as i64;
            if l & 1 != 0 {
                l += gf.n() as i64;
            }
            e = gf.pow(l / 2);
            d = gf.pow(2 * l) ^ gf.mul(b, f) ^ d;
            b = gf.mul(a, e) ^ b;
        }
        if d == 0 {
            return;
        }
        c2 = gf.inv(d);
        b2 = gf.div(a, d);
        a2 = gf.div(b, d);
    } else {
        c2 = d;
        b2 = c;
        a2 = b;
    }

    let mut tmp = [0u32; 4];
    if find_affine4_roots(gf, a2, b2, c2, &mut tmp) == 4 {
        for &root in &tmp {
            let f = if a != 0 { gf.inv(root as u16) } else { root as u16 };
            roots.push(a_ilog(gf, f ^ e));
        }
    }
}

/// Split `f` via the trace polynomial `Tr(alpha^k * X) mod f`: if that trace
/// has degree > 0, its gcd with `f` is a proper factor `g` and `f/g` the
/// complement.
fn factor(gf: &GfTables, k: u32, f: &GfPoly, cap: usize) -> (GfPoly, Option<GfPoly>) {
    let tk = GfPoly::trace_bk_mod(gf, k, f, cap);
    if tk.deg > 0 {
        let g = GfPoly::gcd(f.clone(), tk, gf);
        if g.deg < f.deg {
            let mut a = f.clone();
            let mut q = GfPoly::zeroed(cap);
            a.div_into(gf, &g, &mut q);
            return (g, Some(q));
        }
    }
    (f.clone(), None)
}

/// Recursively find all roots of `poly` (degree <= t), dispatching to the
/// closed-form solver for degrees 1-4 and falling back to BTA splitting for
/// higher degrees.
pub(crate) fn find_poly_roots(
    gf: &GfTables,
    xi_tab: &[u16],
    k: u32,
    poly: &GfPoly,
    cap: usize,
    m: u32,
) -> Vec<u32> {
    let mut roots = Vec::new();
    match poly.deg {
        0 => {}
        1 => find_deg1_roots(gf, poly, &mut roots),
        2 => find_deg2_roots(gf, xi_tab, poly, &mut roots),
        3 => find_deg3_roots(gf, poly, &mut roots),
        4 => find_deg4_roots(gf, poly, &mut roots),
        _ => {
            if poly.deg != 0 && k <= m {
                let (g, h) = factor(gf, k, poly, cap);
                roots.extend(find_poly_roots(gf, xi_tab, k + 1, &g, cap, m));
                if let Some(h) = h {
                    roots.extend(find_poly_roots(gf, xi_tab, k + 1, &h, cap, m));
                }
            }
        }
    }
    roots
}
