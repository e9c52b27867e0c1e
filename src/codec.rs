//! `Codec`: the public facade over GF(2^m) table construction, encoding,
//! and decoding.

use std::cell::RefCell;

use crate::arena::{estimate_table_bytes, ArenaBudget};
use crate::bm::compute_error_locator;
use crate::encode::{encode_bch, load_ecc8, store_ecc8};
use crate::error::BchError;
use crate::generator::{build_deg2_base, build_mod8_tables, compute_generator_polynomial};
use crate::gf::{default_prim_poly, GfTables};
use crate::params::BchParams;
use crate::roots::find_poly_roots;

/// Scratch buffers reused across `encode`/`decode` calls on the same codec.
/// Reused to avoid a heap allocation per call; see `src/bits.rs` for the
/// additional lazily-sized `databuf`.
pub(crate) struct Scratch {
    ecc_buf: Vec<u32>,
    ecc_buf2: Vec<u32>,
    pub(crate) databuf: Option<Vec<u8>>,
}

/// Handle type `src/bits.rs` borrows to reach the shared scratch buffers
/// without duplicating the `RefCell` the rest of this module already owns.
pub(crate) type ScratchHandle = Scratch;

/// A runtime-configured binary BCH encoder/decoder for a chosen `(m, t)`.
///
/// Not `Sync`: the internal scratch buffers are behind a `RefCell`, so a
/// `Codec` may be moved between threads (`Send`) but not shared by reference
/// across them without external synchronization. Methods borrow the scratch
/// for the duration of the call only; nested/reentrant calls on the same
/// codec (e.g. from within a panic hook) will panic on the double borrow
/// rather than corrupt state.
pub struct Codec {
    m: u32,
    t: u32,
    n: u32,
    ecc_bits: u32,
    ecc_bytes: usize,
    ecc_words: usize,
    gf: GfTables,
    mod8_tab: Vec<u32>,
    xi_tab: Vec<u16>,
    scratch: RefCell<Scratch>,
}

/// The four call shapes the reference decoder supports, unified behind one
/// enum instead of a cluster of nullable-pointer parameters.
pub enum DecodeInput<'a> {
    /// Raw data plus the ecc bytes as received; the codec re-encodes `data`
    /// internally and XORs against `recv_ecc`.
    Data { data: &'a [u8], recv_ecc: &'a [u8] },
    /// Received ecc bytes plus separately-computed ecc bytes for the same
    /// data (e.g. read back from two different sources).
    RecvCalc { recv_ecc: &'a [u8], calc_ecc: &'a [u8] },
    /// The two ecc buffers already XORed together by the caller.
    XoredEcc { ecc: &'a [u8] },
    /// Syndromes already computed by the caller (e.g. from hardware).
    Syndromes { syn: &'a [u16] },
}

impl Codec {
    /// Build a codec for GF(2^m) with designed distance `t`, using the
    /// built-in default primitive polynomial for `m`.
    pub fn new(m: u32, t: u32, prim_poly: Option<u32>) -> Result<Self, BchError> {
        Self::build(m, t, prim_poly, None)
    }

    /// Build from a [`BchParams`] value (e.g. one deserialized from config).
    pub fn from_params(params: BchParams) -> Result<Self, BchError> {
        Self::new(params.m as u32, params.t as u32, params.prim_poly)
    }

    /// Build a codec the same way as [`Codec::new`], but first check that
    /// its tables fit within `budget`. This does not change the allocation
    /// strategy (see `src/arena.rs`); it lets an embedded caller fail fast
    /// with a clear error instead of discovering a memory shortfall later.
    pub fn with_arena(m: u32, t: u32, prim_poly: Option<u32>, budget: &mut ArenaBudget) -> Result<Self, BchError> {
        if !budget.reserve(estimate_table_bytes(m, t)) {
            return Err(BchError::InvalidArgument(
                "arena budget too small for the requested (m, t)",
            ));
        }
        Self::build(m, t, prim_poly, None)
    }

    fn build(m: u32, t: u32, prim_poly: Option<u32>, _reserved: Option<()>) -> Result<Self, BchError> {
        if !(5..=15).contains(&m) {
            return Err(BchError::InvalidArgument("m must be in 5..=15"));
        }
        if t < 1 {
            return Err(BchError::InvalidArgument("t must be at least 1"));
        }
        let n = (1u32 << m) - 1;
        if m * t >= n {
            return Err(BchError::InvalidArgument("m * t must be less than 2^m - 1"));
        }

        let poly = prim_poly.unwrap_or_else(|| default_prim_poly(m));
        let gf = GfTables::build(m, poly)?;
        let (genpoly, ecc_bits) = compute_generator_polynomial(&gf, t);
        let ecc_words = ((m * t) as usize + 31) / 32;
        let ecc_bytes = (ecc_bits as usize + 7) / 8;
        let mod8_tab = build_mod8_tables(&genpoly, ecc_bits, ecc_words);
        let xi_tab = build_deg2_base(&gf)?;

        Ok(Codec {
            m,
            t,
            n,
            ecc_bits,
            ecc_bytes,
            ecc_words,
            gf,
            mod8_tab,
            xi_tab,
            scratch: RefCell::new(Scratch {
                ecc_buf: vec![0u32; ecc_words],
                ecc_buf2: vec![0u32; ecc_words],
                databuf: None,
            }),
        })
    }

    pub fn m(&self) -> u32 {
        self.m
    }

    pub fn t(&self) -> u32 {
        self.t
    }

    pub fn n(&self) -> u32 {
        self.n
    }

    pub fn ecc_bits(&self) -> u32 {
        self.ecc_bits
    }

    pub fn ecc_bytes(&self) -> usize {
        self.ecc_bytes
    }

    /// Largest data payload (in bytes) this codec can protect.
    pub fn max_data_bytes(&self) -> usize {
        ((self.n - self.ecc_bits) as usize + 7) / 8
    }

    pub(crate) fn ecc_words(&self) -> usize {
        self.ecc_words
    }

    pub(crate) fn mod8_tab(&self) -> &[u32] {
        &self.mod8_tab
    }

    pub(crate) fn gf(&self) -> &GfTables {
        &self.gf
    }

    pub(crate) fn xi_tab(&self) -> &[u16] {
        &self.xi_tab
    }

    /// Borrow the shared scratch buffers; used by `src/bits.rs` to reach
    /// the lazily-sized `databuf` alongside the ordinary ecc scratch words.
    pub(crate) fn scratch_handle(&self) -> std::cell::RefMut<'_, ScratchHandle> {
        self.scratch.borrow_mut()
    }

    /// Compute `ecc` (exactly `ecc_bytes` long) for `data`.
    pub fn encode(&self, data: &[u8], ecc: &mut [u8]) {
        assert_eq!(ecc.len(), self.ecc_bytes, "ecc buffer must be ecc_bytes() long");
        let mut scratch = self.scratch.borrow_mut();
        for w in scratch.ecc_buf.iter_mut() {
            *w = 0;
        }
        let mut buf = std::mem::take(&mut scratch.ecc_buf);
        encode_bch(&self.mod8_tab, self.ecc_words, data, &mut buf);
        store_ecc8(self.ecc_words, self.ecc_bytes, ecc, &buf);
        scratch.ecc_buf = buf;
    }

    /// Convenience wrapper over [`Codec::encode`] that allocates its own
    /// output buffer.
    pub fn encode_to_vec(&self, data: &[u8]) -> Vec<u8> {
        let mut ecc = vec![0u8; self.ecc_bytes];
        self.encode(data, &mut ecc);
        ecc
    }

    /// Locate bit errors in a received codeword of `len` data bytes.
    ///
    /// Returns the number of errors found (0 meaning the codeword is
    /// unchanged), filling `errloc` with bit positions from the start of
    /// `data` (positions `>= len * 8` land in the ecc region). Fails with
    /// [`BchError::BadMessage`] if the syndromes describe more than `t`
    /// errors.
    pub fn decode(&self, input: DecodeInput, len: usize, errloc: &mut [u32]) -> Result<usize, BchError> {
        if len > self.max_data_bytes() {
            return Err(BchError::InvalidArgument("data length exceeds codec capacity"));
        }
        if errloc.len() < self.t as usize {
            return Err(BchError::InvalidArgument("errloc buffer must hold at least t entries"));
        }

        let mut scratch = self.scratch.borrow_mut();
        let syn_owned;
        let syn: &[u16] = match input {
            DecodeInput::Syndromes { syn } => syn,
            DecodeInput::XoredEcc { ecc } => {
                load_ecc8(self.ecc_words, self.ecc_bytes, &mut scratch.ecc_buf, ecc);
                let mut buf = std::mem::take(&mut scratch.ecc_buf);
                syn_owned = crate::syndrome::compute_syndromes(&self.gf, self.t, self.ecc_bits, &mut buf);
                scratch.ecc_buf = buf;
                &syn_owned
            }
            DecodeInput::RecvCalc { recv_ecc, calc_ecc } => {
                load_ecc8(self.ecc_words, self.ecc_bytes, &mut scratch.ecc_buf, calc_ecc);
                load_ecc8(self.ecc_words, self.ecc_bytes, &mut scratch.ecc_buf2, recv_ecc);
                let mut sum = 0u32;
                for i in 0..self.ecc_words {
                    scratch.ecc_buf[i] ^= scratch.ecc_buf2[i];
                    sum |= scratch.ecc_buf[i];
                }
                if sum == 0 {
                    return Ok(0);
                }
                let mut buf = std::mem::take(&mut scratch.ecc_buf);
                syn_owned = crate::syndrome::compute_syndromes(&self.gf, self.t, self.ecc_bits, &mut buf);
                scratch.ecc_buf = buf;
                &syn_owned
            }
            DecodeInput::Data { data, recv_ecc } => {
                for w in scratch.ecc_buf.iter_mut() {
                    *w = 0;
                }
                let mut buf = std::mem::take(&mut scratch.ecc_buf);
                encode_bch(&self.mod8_tab, self.ecc_words, data, &mut buf);
                scratch.ecc_buf = buf;
                load_ecc8(self.ecc_words, self.ecc_bytes, &mut scratch.ecc_buf2, recv_ecc);
                let mut sum = 0u32;
                for i in 0..self.ecc_words {
                    scratch.ecc_buf[i] ^= scratch.ecc_buf2[i];
                    sum |= scratch.ecc_buf[i];
                }
                if sum == 0 {
                    return Ok(0);
                }
                let mut buf = std::mem::take(&mut scratch.ecc_buf);
                syn_owned = crate::syndrome::compute_syndromes(&self.gf, self.t, self.ecc_bits, &mut buf);
                scratch.ecc_buf = buf;
                &syn_owned
            }
        };

        let elp = compute_error_locator(&self.gf, self.t, syn);
        if elp.deg > self.t as usize {
            return Err(BchError::BadMessage);
        }
        let err_count = elp.deg;
        let cap = (2 * self.t as usize).max(4);
        let roots = find_poly_roots(&self.gf, &self.xi_tab, 1, &elp, cap, self.m);
        if roots.len() != err_count {
            return Err(BchError::BadMessage);
        }
        if errloc.len() < roots.len() {
            return Err(BchError::InvalidArgument("errloc buffer too small for the errors found"));
        }

        let nbits = (len as u32) * 8 + self.ecc_bits;
        for (i, &r) in roots.iter().enumerate() {
            if r >= nbits {
                return Err(BchError::BadMessage);
            }
            let e = nbits - 1 - r;
            errloc[i] = (e & !7) | (7 - (e & 7));
        }
        Ok(roots.len())
    }
}

/// Flip the bits at `errloc` (as returned by [`Codec::decode`]) within
/// `data`. Positions beyond `data`'s length (ecc-region errors) are ignored.
pub fn correct(data: &mut [u8], errloc: &[u32]) {
    for &e in errloc {
        let byte = (e / 8) as usize;
        if byte < data.len() {
            data[byte] ^= 1 << (e % 8);
        }
    }
}
