#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use ctr_core::constants::test_vectors::{IV, KEY_128};
    use ctr_core::constants::BLOCK_LEN;
    use ctr_core::crypto::{sequential_transform, CipherSession, Counter};
    use ctr_core::engine::{LoopSync, Variant};
    use ctr_core::utils::random_bytes;

    const SWEEP: [usize; 5] = [1, 2, 4, 8, 16];

    fn oracle(data: &[u8]) -> (Vec<u8>, Counter) {
        let mut session = CipherSession::new(&KEY_128, &IV).unwrap();
        let mut out = data.to_vec();
        sequential_transform(&mut session, &mut out);
        (out, session.counter)
    }

    fn run(variant: Variant, data: &[u8], workers: usize) -> (Vec<u8>, Counter) {
        let mut session = CipherSession::new(&KEY_128, &IV).unwrap();
        let mut out = data.to_vec();
        variant.transform_with_workers(&mut session, &mut out, workers).unwrap();
        (out, session.counter)
    }

    #[test]
    fn test_one_mib_all_variants_all_worker_counts() {
        let data = random_bytes(1024 * 1024, 42);
        let expected = oracle(&data);
        for workers in SWEEP {
            for variant in Variant::ALL {
                let got = run(variant, &data, workers);
                assert!(got.0 == expected.0, "{variant} with {workers} workers diverged");
                assert_eq!(got.1, expected.1, "{variant} with {workers} workers");
            }
        }
    }

    #[test]
    fn test_17_byte_tail_path() {
        let data: Vec<u8> = (0..17u8).collect();
        let expected = oracle(&data);
        for variant in Variant::ALL {
            for workers in [1, 3] {
                assert_eq!(run(variant, &data, workers), expected);
            }
        }
        assert_eq!(expected.1, Counter::new(IV).advanced(2));
    }

    #[test]
    fn test_sub_block_and_empty_buffers() {
        for len in [0usize, 1, 15] {
            let data = random_bytes(len, len as u64);
            let expected = oracle(&data);
            for variant in Variant::ALL {
                assert_eq!(run(variant, &data, 4), expected, "{variant} len={len}");
            }
        }
    }

    #[test]
    fn test_counter_carries_across_transform_calls() {
        // two calls on one session must equal one call over the concatenation
        let data = random_bytes(5 * BLOCK_LEN + 7, 9);
        let expected = oracle(&data);

        for variant in Variant::ALL {
            let mut session = CipherSession::new(&KEY_128, &IV).unwrap();
            let mut out = data.clone();
            let (head, rest) = out.split_at_mut(3 * BLOCK_LEN);
            variant.transform_with_workers(&mut session, head, 2).unwrap();
            variant.transform_with_workers(&mut session, rest, 2).unwrap();
            assert_eq!(out, expected.0, "{variant}");
            assert_eq!(session.counter, expected.1, "{variant}");
        }
    }

    #[test]
    fn test_counter_wraps_inside_a_transform() {
        let iv = [0xFF; 16];
        let data = random_bytes(8 * BLOCK_LEN, 3);

        let mut seq = CipherSession::new(&KEY_128, &iv).unwrap();
        let mut expected = data.clone();
        sequential_transform(&mut seq, &mut expected);

        for variant in Variant::ALL {
            let mut session = CipherSession::new(&KEY_128, &iv).unwrap();
            let mut out = data.clone();
            variant.transform_with_workers(&mut session, &mut out, 4).unwrap();
            assert_eq!(out, expected, "{variant}");
            assert_eq!(session.counter, seq.counter);
        }
    }

    #[test]
    fn test_report_counts_blocks_and_idle_workers() {
        let mut session = CipherSession::new(&KEY_128, &IV).unwrap();
        let mut buf = vec![0u8; 3 * BLOCK_LEN + 4];
        let report = Variant::Private.transform_with_workers(&mut session, &mut buf, 5).unwrap();

        assert_eq!(report.counters.bytes, buf.len() as u64);
        assert_eq!(report.counters.blocks, 3);
        assert_eq!(report.counters.tail_bytes, 4);
        assert_eq!(report.counters.workers, 5);
        assert_eq!(report.counters.idle_workers, 2);
        assert_eq!(report.counters.counter_advance(), 4);
    }

    #[test]
    fn test_invalid_worker_count_leaves_session_untouched() {
        let mut session = CipherSession::new(&KEY_128, &IV).unwrap();
        let mut buf = vec![7u8; 64];
        assert!(Variant::SharedRoundKey.transform_with_workers(&mut session, &mut buf, 0).is_err());
        assert_eq!(buf, vec![7u8; 64]);
        assert_eq!(session.counter.to_bytes(), IV);
    }

    #[test]
    fn test_variant_names_round_trip() {
        for v in Variant::ALL {
            assert_eq!(v.label().parse::<Variant>().unwrap(), v);
        }
        assert_eq!("false-sharing".parse::<Variant>().unwrap(), Variant::FalseSharing);
        assert_eq!("shared-round-key".parse::<Variant>().unwrap(), Variant::SharedRoundKey);
        assert!("bogus".parse::<Variant>().is_err());
    }

    #[test]
    fn test_only_relaxed_skips_loop_barrier() {
        assert_eq!(Variant::Relaxed.loop_sync(), LoopSync::NoWait);
        for v in [Variant::Private, Variant::SharedRoundKey, Variant::FalseSharing] {
            assert_eq!(v.loop_sync(), LoopSync::Barrier);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_output_independent_of_worker_count(
            data in prop::collection::vec(any::<u8>(), 0..2048),
            workers in 1usize..=16,
            idx in 0usize..4,
        ) {
            let variant = Variant::ALL[idx];
            let single = run(variant, &data, 1);
            let many = run(variant, &data, workers);
            prop_assert_eq!(&many, &single);
            prop_assert_eq!(single, oracle(&data));
        }

        #[test]
        fn prop_transform_twice_restores_input(
            data in prop::collection::vec(any::<u8>(), 0..1024),
            workers in 1usize..=8,
            idx in 0usize..4,
        ) {
            let variant = Variant::ALL[idx];
            let (once, _) = run(variant, &data, workers);
            let (twice, _) = run(variant, &once, workers);
            prop_assert_eq!(twice, data);
        }

        #[test]
        fn prop_counter_advances_by_ceil_blocks(len in 0usize..4096, workers in 1usize..=8) {
            let data = vec![0u8; len];
            let expected = Counter::new(IV).advanced(len.div_ceil(BLOCK_LEN) as u64);
            for variant in Variant::ALL {
                prop_assert_eq!(run(variant, &data, workers).1, expected);
            }
        }
    }
}
