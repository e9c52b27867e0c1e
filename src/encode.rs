//! Table-driven systematic BCH encoding.
//!
//! Rather than shifting a linear feedback register one bit at a time, the
//! remainder of `data(X) * X^ecc_bits mod g(X)` is accumulated one byte at a
//! time using the precomputed mod-8 tables, 32 bits (four bytes) per step
//! with a byte-wise fallback for the final 0-3 trailing bytes. There is no
//! pointer-alignment concern here (unlike the C original, which must align
//! to `u32` boundaries before it can cast); every byte is processed through
//! the word path in strict order, so the result is identical regardless of
//! where the data buffer starts.

/// Unpack a big-endian ecc byte buffer into `ecc_words` 32-bit words.
///
/// `ecc_bytes` (tied to `ecc_bits`, the generator polynomial's degree) can be
/// well short of `4 * ecc_words` (`ecc_words` is sized off `m*t`, the ceiling
/// on `ecc_bits`), so this walks `src` by its own length rather than assuming
/// the two line up: the bytes land at the high-order end of `dst` and
/// everything after them - the rest of the split word plus any trailing
/// whole words - is zero.
pub(crate) fn load_ecc8(ecc_words: usize, ecc_bytes: usize, dst: &mut [u32], src: &[u8]) {
    for w in dst.iter_mut().take(ecc_words) {
        *w = 0;
    }
    let full_words = ecc_bytes / 4;
    let mut idx = 0;
    for w in dst.iter_mut().take(full_words) {
        *w = u32::from_be_bytes([src[idx], src[idx + 1], src[idx + 2], src[idx + 3]]);
        idx += 4;
    }
    let rem = ecc_bytes - 4 * full_words;
    if rem > 0 {
        let mut pad = [0u8; 4];
        pad[..rem].copy_from_slice(&src[idx..idx + rem]);
        dst[full_words] = u32::from_be_bytes(pad);
    }
}

/// Inverse of [`load_ecc8`]: read the leading `ecc_bytes` bytes back out of
/// `src`, ignoring any trailing words beyond what `ecc_bytes` covers.
pub(crate) fn store_ecc8(ecc_words: usize, ecc_bytes: usize, dst: &mut [u8], src: &[u32]) {
    let _ = ecc_words;
    let full_words = ecc_bytes / 4;
    let mut idx = 0;
    for &w in src.iter().take(full_words) {
        dst[idx..idx + 4].copy_from_slice(&w.to_be_bytes());
        idx += 4;
    }
    let rem = ecc_bytes - 4 * full_words;
    if rem > 0 {
        let pad = src[full_words].to_be_bytes();
        dst[idx..idx + rem].copy_from_slice(&pad[..rem]);
    }
}

/// Byte-at-a-time fallback, using only the b=0 column of the mod-8 tables.
pub(crate) fn encode_unaligned(mod8_tab: &[u32], ecc_words: usize, data: &[u8], ecc: &mut [u32]) {
    let l = ecc_words - 1;
    for &byte in data {
        let idx = (((ecc[0] >> 24) ^ byte as u32) & 0xff) as usize;
        let p = &mod8_tab[idx * ecc_words..idx * ecc_words + ecc_words];
        for i in 0..l {
            ecc[i] = ((ecc[i] << 8) | (ecc[i + 1] >> 24)) ^ p[i];
        }
        ecc[l] = (ecc[l] << 8) ^ p[l];
    }
}

/// Accumulate the remainder of `data` into `ecc` (already holding the
/// current partial remainder, typically all-zero for a fresh encode).
pub(crate) fn encode_bch(mod8_tab: &[u32], ecc_words: usize, data: &[u8], ecc: &mut [u32]) {
    let l = ecc_words - 1;
    let tab0 = &mod8_tab[0..];
    let tab1 = &mod8_tab[256 * ecc_words..];
    let tab2 = &mod8_tab[2 * 256 * ecc_words..];
    let tab3 = &mod8_tab[3 * 256 * ecc_words..];

    let mut chunks = data.chunks_exact(4);
    let mut r = ecc.to_vec();
    for w in &mut chunks {
        let word = u32::from_be_bytes([w[0], w[1], w[2], w[3]]);
        let v = r[0] ^ word;
        let p0 = &tab0[(((v) & 0xff) as usize) * ecc_words..];
        let p1 = &tab1[(((v >> 8) & 0xff) as usize) * ecc_words..];
        let p2 = &tab2[(((v >> 16) & 0xff) as usize) * ecc_words..];
        let p3 = &tab3[(((v >> 24) & 0xff) as usize) * ecc_words..];
        for i in 0..l {
            r[i] = r[i + 1] ^ p0[i] ^ p1[i] ^ p2[i] ^ p3[i];
        }
        r[l] = p0[l] ^ p1[l] ^ p2[l] ^ p3[l];
    }
    ecc.copy_from_slice(&r);

    let remainder = chunks.remainder();
    if !remainder.is_empty() {
        encode_unaligned(mod8_tab, ecc_words, remainder, ecc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{build_mod8_tables, compute_generator_polynomial};
    use crate::gf::GfTables;

    #[test]
    fn encoding_zero_data_gives_zero_ecc() {
        let gf = GfTables::build(5, 0x25).unwrap();
        let (g, ecc_bits) = compute_generator_polynomial(&gf, 2);
        let ecc_words = (5 * 2 + 31) / 32;
        let tab = build_mod8_tables(&g, ecc_bits, ecc_words);
        let mut ecc = vec![0u32; ecc_words];
        encode_bch(&tab, ecc_words, &[0u8; 3], &mut ecc);
        assert!(ecc.iter().all(|&w| w == 0));
    }

    #[test]
    fn unaligned_tail_matches_word_path_when_length_is_a_multiple_of_four() {
        let gf = GfTables::build(5, 0x25).unwrap();
        let (g, ecc_bits) = compute_generator_polynomial(&gf, 2);
        let ecc_words = (5 * 2 + 31) / 32;
        let tab = build_mod8_tables(&g, ecc_bits, ecc_words);
        let data = [0x12u8, 0x34, 0x56, 0x78];

        let mut via_words = vec![0u32; ecc_words];
        encode_bch(&tab, ecc_words, &data, &mut via_words);

        let mut via_bytes = vec![0u32; ecc_words];
        encode_unaligned(&tab, ecc_words, &data, &mut via_bytes);

        assert_eq!(via_words, via_bytes);
    }

    #[test]
    fn ecc8_round_trip() {
        let ecc_words = 2;
        let ecc_bytes = 5;
        let src = [0xde, 0xad, 0xbe, 0xef, 0x11];
        let mut words = vec![0u32; ecc_words];
        load_ecc8(ecc_words, ecc_bytes, &mut words, &src);
        let mut back = vec![0u8; ecc_bytes];
        store_ecc8(ecc_words, ecc_bytes, &mut back, &words);
        assert_eq!(back, src);
    }

    /// Mirrors `Codec::new(7, 14, None)`, where `ecc_bits` (deg g) sits well
    /// below `m*t`: `ecc_bytes` (11) is short of `4*(ecc_words-1)` (12), the
    /// case that used to index past both buffers.
    #[test]
    fn ecc8_round_trip_when_ecc_bytes_is_short_of_four_times_ecc_words() {
        let ecc_words = 4;
        let ecc_bytes = 11;
        let src = [1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];
        let mut words = vec![0u32; ecc_words];
        load_ecc8(ecc_words, ecc_bytes, &mut words, &src);
        assert_eq!(words[3], 0);
        let mut back = vec![0u8; ecc_bytes];
        store_ecc8(ecc_words, ecc_bytes, &mut back, &words);
        assert_eq!(back, src);
    }
}
