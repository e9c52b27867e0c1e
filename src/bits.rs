//! Bit-oriented adapter over [`Codec`]: callers that keep data and ecc as
//! one bit per byte (a common representation for NAND flash ecc engines and
//! test harnesses) can skip packing/unpacking themselves.
//!
//! Internally this packs bits into a left-padded scratch byte buffer
//! (`databuf`, lazily sized and cached on the codec), runs the ordinary
//! byte-oriented encode/decode path against it, then unpacks the result.
//! Padding bits live at the *front* of the data region so that `databuf`'s
//! byte layout is `[pad | data | ecc]` with the data+pad portion always a
//! whole number of bytes; decoded bit positions are shifted back by the pad
//! width (`nPad`) before being handed to the caller, since the caller's bit
//! stream has no padding at all.

use crate::bm::compute_error_locator;
use crate::encode::{encode_bch, load_ecc8, store_ecc8};
use crate::error::BchError;
use crate::roots::find_poly_roots;
use crate::Codec;

impl Codec {
    fn ensure_databuf(&self, total: usize) {
        let mut scratch = self.scratch_for_bits();
        let need_resize = match &scratch.databuf {
            Some(buf) => buf.len() < total,
            None => true,
        };
        if need_resize {
            scratch.databuf = Some(vec![0u8; total]);
        }
    }

    // `scratch` is private to `codec.rs`; bits.rs reaches it only through
    // this accessor so the RefCell stays the single source of truth.
    fn scratch_for_bits(&self) -> std::cell::RefMut<'_, crate::codec::ScratchHandle> {
        self.scratch_handle()
    }

    fn data_layout(&self) -> (usize, usize, usize) {
        let k = (self.n() - self.ecc_bits()) as usize;
        let ndatabytes = (k + 7) / 8;
        let npad = ndatabytes * 8 - k;
        (k, ndatabytes, npad)
    }

    /// Pack `data_bits` (one bit per byte, length `n - ecc_bits`) and
    /// compute ecc for them, unpacked into `ecc_bits_out` (one bit per byte,
    /// length `ecc_bits()`).
    pub fn encodebits(&self, data_bits: &[u8], ecc_bits_out: &mut [u8]) {
        let (k, ndatabytes, npad) = self.data_layout();
        assert_eq!(data_bits.len(), k, "data_bits must be n - ecc_bits long");
        assert_eq!(ecc_bits_out.len(), self.ecc_bits() as usize);

        let total = ndatabytes + self.ecc_bytes();
        self.ensure_databuf(total);
        let mut scratch = self.scratch_for_bits();
        let buf = scratch.databuf.as_mut().unwrap();

        for b in buf[..ndatabytes].iter_mut() {
            *b = 0;
        }
        for (kk, &bit) in data_bits.iter().enumerate() {
            if bit & 1 != 0 {
                let i = kk + npad;
                buf[i >> 3] |= 1u8 << (7 - (i & 7));
            }
        }
        for b in buf[ndatabytes..total].iter_mut() {
            *b = 0;
        }

        let mut ecc_words = vec![0u32; self.ecc_words()];
        encode_bch(self.mod8_tab(), self.ecc_words(), &buf[..ndatabytes], &mut ecc_words);
        store_ecc8(self.ecc_words(), self.ecc_bytes(), &mut buf[ndatabytes..total], &ecc_words);

        for (kk, slot) in ecc_bits_out.iter_mut().enumerate() {
            *slot = ((buf[ndatabytes + (kk >> 3)] & (1 << (7 - (kk & 7)))) != 0) as u8;
        }
    }

    /// Locate bit errors given `data_bits` and the received ecc bits (both
    /// one bit per byte). `errloc` entries are indices into `data_bits`
    /// (values `>= data_bits.len()` denote an ecc-region error).
    pub fn decodebits(&self, data_bits: &[u8], recv_ecc_bits: &[u8], errloc: &mut [u32]) -> Result<usize, BchError> {
        let (k, ndatabytes, npad) = self.data_layout();
        if data_bits.len() != k {
            return Err(BchError::InvalidArgument("data_bits must be n - ecc_bits long"));
        }
        if recv_ecc_bits.len() != self.ecc_bits() as usize {
            return Err(BchError::InvalidArgument("recv_ecc_bits must be ecc_bits() long"));
        }
        if errloc.len() < self.t() as usize {
            return Err(BchError::InvalidArgument("errloc buffer must hold at least t entries"));
        }

        let total = ndatabytes + self.ecc_bytes();
        self.ensure_databuf(total);

        let sum;
        let mut calc_words = vec![0u32; self.ecc_words()];
        {
            let mut scratch = self.scratch_for_bits();
            let buf = scratch.databuf.as_mut().unwrap();

            for b in buf[..ndatabytes].iter_mut() {
                *b = 0;
            }
            for (kk, &bit) in data_bits.iter().enumerate() {
                if bit & 1 != 0 {
                    let i = kk + npad;
                    buf[i >> 3] |= 1u8 << (7 - (i & 7));
                }
            }
            for b in buf[ndatabytes..total].iter_mut() {
                *b = 0;
            }
            for (kk, &bit) in recv_ecc_bits.iter().enumerate() {
                if bit & 1 != 0 {
                    buf[ndatabytes + (kk >> 3)] |= 1u8 << (7 - (kk & 7));
                }
            }

            encode_bch(self.mod8_tab(), self.ecc_words(), &buf[..ndatabytes], &mut calc_words);
            let mut recv_words = vec![0u32; self.ecc_words()];
            load_ecc8(self.ecc_words(), self.ecc_bytes(), &mut recv_words, &buf[ndatabytes..total]);

            let mut acc = 0u32;
            for i in 0..self.ecc_words() {
                calc_words[i] ^= recv_words[i];
                acc |= calc_words[i];
            }
            sum = acc;
        }

        if sum == 0 {
            return Ok(0);
        }

        let syn = crate::syndrome::compute_syndromes(self.gf(), self.t(), self.ecc_bits(), &mut calc_words);
        let elp = compute_error_locator(self.gf(), self.t(), &syn);
        if elp.deg > self.t() as usize {
            return Err(BchError::BadMessage);
        }
        let err_count = elp.deg;
        let cap = (2 * self.t() as usize).max(4);
        let xi_tab = self.xi_tab();
        let roots = find_poly_roots(self.gf(), xi_tab, 1, &elp, cap, self.m());
        if roots.len() != err_count {
            return Err(BchError::BadMessage);
        }
        if errloc.len() < roots.len() {
            return Err(BchError::InvalidArgument("errloc buffer too small for the errors found"));
        }

        let nbits = (ndatabytes as u32) * 8 + self.ecc_bits();
        for (i, &r) in roots.iter().enumerate() {
            if r >= nbits {
                return Err(BchError::BadMessage);
            }
            let pos = nbits - 1 - r;
            errloc[i] = pos.wrapping_sub(npad as u32);
        }
        Ok(roots.len())
    }
}

/// Flip bits located by [`Codec::decodebits`] within `data_bits` (one bit
/// per byte). Indices `>= data_bits.len()` (ecc/padding-region errors) are
/// ignored.
pub fn correctbits(data_bits: &mut [u8], errloc: &[u32]) {
    for &e in errloc {
        if (e as usize) < data_bits.len() {
            data_bits[e as usize] ^= 1;
        }
    }
}
