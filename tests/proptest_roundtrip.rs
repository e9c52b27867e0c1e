//! Property-based round-trip and invariant tests across random (m, t, data,
//! error-pattern) tuples, grounded in the same proptest harness shape used
//! by `examples/mohnishsalian0-qrism/tests/qr_tests.rs`.

use openflash_bch::{correct, correctbits, Codec, DecodeInput};
use proptest::prelude::*;

/// (m, t) pairs spanning the field-size boundary (m=5) up through a
/// mid-sized field, kept small enough that proptest shrinking stays fast.
fn mt_strategy() -> impl Strategy<Value = (u32, u32)> {
    prop_oneof![
        Just((5u32, 1u32)),
        Just((5, 2)),
        Just((6, 2)),
        Just((7, 3)),
        Just((8, 4)),
        Just((9, 2)),
    ]
}

proptest! {
    #[test]
    fn encode_decode_round_trips_with_no_errors(
        (m, t) in mt_strategy(),
        data in prop::collection::vec(any::<u8>(), 0..8),
    ) {
        let codec = Codec::new(m, t, None).unwrap();
        let max = codec.max_data_bytes();
        let data = &data[..data.len().min(max)];
        let ecc = codec.encode_to_vec(data);

        let mut errloc = vec![0u32; codec.t() as usize];
        let n = codec
            .decode(DecodeInput::Data { data, recv_ecc: &ecc }, data.len(), &mut errloc)
            .unwrap();
        prop_assert_eq!(n, 0);
    }

    #[test]
    fn up_to_t_errors_are_located_and_corrected(
        (m, t) in mt_strategy(),
        data in prop::collection::vec(any::<u8>(), 1..8),
        seed in any::<u64>(),
    ) {
        let codec = Codec::new(m, t, None).unwrap();
        let max = codec.max_data_bytes();
        prop_assume!(max > 0);
        let data = data[..data.len().min(max).max(1)].to_vec();
        let ecc = codec.encode_to_vec(&data);

        // Flip up to t distinct bits across data||ecc, deterministically
        // from `seed` (proptest forbids non-deterministic sources). Ecc-side
        // flips stay within `ecc_bits` (the left-justified parity region) -
        // the handful of low zero-padding bits beyond it are masked away
        // before the syndrome walk and would not register as an error.
        let ecc_bits = codec.ecc_bits() as usize;
        let nbits = data.len() * 8 + ecc_bits;
        let mut state = seed | 1;
        let mut flipped = std::collections::HashSet::new();
        let weight = (seed as usize % t as usize) + 1;
        while flipped.len() < weight {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let bit = (state >> 33) as usize % nbits;
            flipped.insert(bit);
        }

        let mut corrupted = data.clone();
        let mut corrupted_ecc = ecc.clone();
        for &bit in &flipped {
            if bit < data.len() * 8 {
                corrupted[bit / 8] ^= 1 << (bit % 8);
            } else {
                let b = bit - data.len() * 8;
                corrupted_ecc[b / 8] ^= 1 << (7 - (b % 8));
            }
        }

        let mut errloc = vec![0u32; codec.t() as usize];
        let n = codec
            .decode(
                DecodeInput::Data { data: &corrupted, recv_ecc: &corrupted_ecc },
                corrupted.len(),
                &mut errloc,
            )
            .unwrap();
        prop_assert_eq!(n, flipped.len());
        correct(&mut corrupted, &errloc[..n]);
        prop_assert_eq!(corrupted, data);
    }

    #[test]
    fn decode_call_shapes_agree(
        (m, t) in mt_strategy(),
        data in prop::collection::vec(any::<u8>(), 1..8),
    ) {
        let codec = Codec::new(m, t, None).unwrap();
        let max = codec.max_data_bytes();
        prop_assume!(max > 0);
        let data = data[..data.len().min(max).max(1)].to_vec();
        let ecc = codec.encode_to_vec(&data);

        let mut corrupted = data.clone();
        corrupted[0] ^= 0x01;
        let corrupted_ecc = codec.encode_to_vec(&corrupted);

        let mut xored = vec![0u8; codec.ecc_bytes()];
        for i in 0..codec.ecc_bytes() {
            xored[i] = ecc[i] ^ corrupted_ecc[i];
        }

        let mut errloc_a = vec![0u32; t as usize];
        let na = codec
            .decode(DecodeInput::Data { data: &corrupted, recv_ecc: &ecc }, corrupted.len(), &mut errloc_a)
            .unwrap();

        let mut errloc_b = vec![0u32; t as usize];
        let nb = codec
            .decode(DecodeInput::RecvCalc { recv_ecc: &ecc, calc_ecc: &corrupted_ecc }, corrupted.len(), &mut errloc_b)
            .unwrap();

        let mut errloc_c = vec![0u32; t as usize];
        let nc = codec
            .decode(DecodeInput::XoredEcc { ecc: &xored }, corrupted.len(), &mut errloc_c)
            .unwrap();

        prop_assert_eq!(na, nb);
        prop_assert_eq!(na, nc);
        prop_assert_eq!(&errloc_a[..na], &errloc_b[..nb]);
        prop_assert_eq!(&errloc_a[..na], &errloc_c[..nc]);
    }

    #[test]
    fn bit_api_round_trips_with_one_error(
        (m, t) in mt_strategy(),
        fill in any::<u8>(),
    ) {
        let codec = Codec::new(m, t, None).unwrap();
        let k = (codec.n() - codec.ecc_bits()) as usize;
        let data_bits: Vec<u8> = (0..k).map(|i| (fill >> (i % 8)) & 1).collect();

        let mut ecc_bits = vec![0u8; codec.ecc_bits() as usize];
        codec.encodebits(&data_bits, &mut ecc_bits);

        let mut corrupted = data_bits.clone();
        corrupted[0] ^= 1;

        let mut errloc = vec![0u32; t as usize];
        let n = codec.decodebits(&corrupted, &ecc_bits, &mut errloc).unwrap();
        prop_assert_eq!(n, 1);
        correctbits(&mut corrupted, &errloc[..n]);
        prop_assert_eq!(corrupted, data_bits);
    }
}
