//! Polynomials over GF(2^m): Euclidean division, gcd, and the trace-mod
//! computation used by the root finder.

use crate::gf::GfTables;

/// A polynomial over GF(2^m). `c[i]` is the coefficient of X^i; `deg` is the
/// degree. The backing buffer is sized once (`zeroed`/`one`) for the largest
/// degree the caller will ever need, so in-place reduction never reallocates.
#[derive(Clone, Debug)]
pub(crate) struct GfPoly {
    pub(crate) deg: usize,
    pub(crate) c: Vec<u16>,
}

impl GfPoly {
    pub(crate) fn zeroed(max_deg: usize) -> Self {
        GfPoly { deg: 0, c: vec![0u16; max_deg + 1] }
    }

    pub(crate) fn one(max_deg: usize) -> Self {
        let mut p = Self::zeroed(max_deg);
        p.c[0] = 1;
        p
    }

    fn trim(&mut self) {
        while self.deg > 0 && self.c[self.deg] == 0 {
            self.deg -= 1;
        }
    }

    /// Log-representation of this polynomial's coefficients relative to its
    /// own (monic-normalized) leading term: `rep[i] = log(c[i]) - log(c[deg])`
    /// mod n, or `-1` where `c[i] == 0`. Lets repeated reductions by the same
    /// divisor skip recomputing this every time.
    pub(crate) fn log_rep(&self, gf: &GfTables) -> Vec<i32> {
        let d = self.deg;
        let l = gf.n() as i64 - gf.log(self.c[d]) as i64;
        (0..d)
            .map(|i| {
                if self.c[i] != 0 {
                    gf.mod_s(gf.log(self.c[i]) as i64 + l) as i32
                } else {
                    -1
                }
            })
            .collect()
    }

    /// `self %= b`, in place. `rep` is `b`'s log-representation; pass `None`
    /// to have it computed on the fly.
    pub(crate) fn rem_assign(&mut self, gf: &GfTables, b: &GfPoly, rep: Option<&[i32]>) {
        if b.deg == 0 {
            // Dividing by a non-zero constant always leaves remainder 0.
            self.deg = 0;
            self.c[0] = 0;
            return;
        }
        if self.deg < b.deg {
            return;
        }
        let d = b.deg;
        let owned;
        let rep = match rep {
            Some(r) => r,
            None => {
                owned = b.log_rep(gf);
                &owned[..]
            }
        };
        for j in (d..=self.deg).rev() {
            if self.c[j] != 0 {
                let la = gf.log(self.c[j]) as i64;
                for (i, &m) in rep.iter().enumerate() {
                    if m >= 0 {
                        let p = j - d + i;
                        self.c[p] ^= gf.pow(m as i64 + la);
                    }
                }
            }
        }
        self.deg = d - 1;
        self.trim();
    }

    /// `q, r = self / b, self % b`. `self` becomes the remainder; `q` must
    /// already have capacity for degree `self.deg - b.deg`.
    pub(crate) fn div_into(&mut self, gf: &GfTables, b: &GfPoly, q: &mut GfPoly) {
        if b.deg == 0 {
            let inv = gf.inv(b.c[0]);
            q.deg = self.deg;
            for i in 0..=self.deg {
                q.c[i] = gf.mul(self.c[i], inv);
            }
            self.deg = 0;
            self.c[0] = 0;
            return;
        }
        if self.deg < b.deg {
            q.deg = 0;
            q.c[0] = 0;
            return;
        }
        let orig_deg = self.deg;
        q.deg = orig_deg - b.deg;
        self.rem_assign(gf, b, None);
        for i in 0..=q.deg {
            q.c[i] = self.c[b.deg + i];
        }
    }

    /// Euclidean gcd(a, b). Consumes both operands.
    pub(crate) fn gcd(mut a: GfPoly, mut b: GfPoly, gf: &GfTables) -> GfPoly {
        if a.deg < b.deg {
            std::mem::swap(&mut a, &mut b);
        }
        while b.deg > 0 {
            a.rem_assign(gf, &b, None);
            std::mem::swap(&mut a, &mut b);
        }
        a
    }

    /// Tr(alpha^k * X) mod f(X), used to split f during Berlekamp's trace
    /// algorithm. `cap` must be at least `2 * f.deg`.
    pub(crate) fn trace_bk_mod(gf: &GfTables, k: u32, f: &GfPoly, cap: usize) -> GfPoly {
        let m = gf.m();
        let mut z = GfPoly::zeroed(cap.max(2));
        z.deg = 1;
        z.c[0] = 0;
        z.c[1] = gf.pow(k as i64);
        let mut out = GfPoly::zeroed(f.deg.max(1));
        out.deg = 0;
        let f_rep = f.log_rep(gf);
        for i in 0..m {
            for j in (0..=z.deg).rev() {
                out.c[j] ^= z.c[j];
                z.c[2 * j] = gf.sqr(z.c[j]);
                z.c[2 * j + 1] = 0;
            }
            if z.deg > out.deg {
                out.deg = z.deg;
            }
            if i < m - 1 {
                z.deg *= 2;
                z.rem_assign(gf, f, Some(&f_rep));
            }
        }
        out.trim();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rem_of_zero_is_zero() {
        let gf = GfTables::build(6, 0x43).unwrap();
        let mut a = GfPoly::zeroed(4);
        let mut b = GfPoly::one(2);
        b.deg = 1;
        b.c[0] = gf.pow_idx(3);
        b.c[1] = 1;
        a.rem_assign(&gf, &b, None);
        assert_eq!(a.deg, 0);
        assert_eq!(a.c[0], 0);
    }

    #[test]
    fn div_then_remultiply_recovers_dividend() {
        let gf = GfTables::build(6, 0x43).unwrap();
        // a(X) = X^3 + alpha*X + 1, b(X) = X + alpha^2 (monic linear divisor).
        let mut a = GfPoly::zeroed(5);
        a.deg = 3;
        a.c[0] = 1;
        a.c[1] = gf.pow_idx(1);
        a.c[2] = 0;
        a.c[3] = 1;
        let mut b = GfPoly::zeroed(1);
        b.deg = 1;
        b.c[0] = gf.pow_idx(2);
        b.c[1] = 1;

        let a_orig = a.clone();
        let mut q = GfPoly::zeroed(3);
        a.div_into(&gf, &b, &mut q);
        let r = a.clone();

        // Reconstruct a = q*b + r and compare against the original.
        let mut rebuilt = GfPoly::zeroed(5);
        for i in 0..=q.deg {
            for j in 0..=b.deg {
                rebuilt.c[i + j] ^= gf.mul(q.c[i], b.c[j]);
            }
        }
        for i in 0..=r.deg {
            rebuilt.c[i] ^= r.c[i];
        }
        rebuilt.deg = 4;
        rebuilt.trim();
        assert_eq!(rebuilt.deg, a_orig.deg);
        assert_eq!(&rebuilt.c[..=rebuilt.deg], &a_orig.c[..=a_orig.deg]);
    }

    #[test]
    fn gcd_of_equal_polys_is_itself() {
        let gf = GfTables::build(6, 0x43).unwrap();
        let mut a = GfPoly::zeroed(2);
        a.deg = 2;
        a.c[0] = gf.pow_idx(1);
        a.c[1] = gf.pow_idx(4);
        a.c[2] = 1;
        let b = a.clone();
        let g = GfPoly::gcd(a.clone(), b, &gf);
        assert_eq!(g.deg, a.deg);
    }
}
