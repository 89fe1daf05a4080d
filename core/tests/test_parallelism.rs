#[cfg(test)]
mod tests {
    use ctr_core::constants::test_vectors::{IV, KEY_128};
    use ctr_core::constants::MAX_WORKERS;
    use ctr_core::crypto::{sequential_transform, CipherSession};
    use ctr_core::engine::Variant;
    use ctr_core::parallelism::{reset_worker_count, set_worker_count, worker_count, ParallelismProfile};
    use ctr_core::types::CtrError;
    use ctr_core::utils::random_bytes;

    // The worker count is process-wide; keep every check that touches it in one test.
    #[test]
    fn test_ambient_worker_count() {
        assert!(matches!(set_worker_count(0), Err(CtrError::InvalidWorkerCount { .. })));
        assert!(set_worker_count(MAX_WORKERS + 1).is_err());

        set_worker_count(3).unwrap();
        assert_eq!(worker_count(), 3);

        let data = random_bytes(10 * 16 + 1, 5);
        let mut expected = data.clone();
        let mut seq = CipherSession::new(&KEY_128, &IV).unwrap();
        sequential_transform(&mut seq, &mut expected);

        for variant in Variant::ALL {
            let mut session = CipherSession::new(&KEY_128, &IV).unwrap();
            let mut buf = data.clone();
            let report = variant.transform(&mut session, &mut buf).unwrap();
            assert_eq!(report.counters.workers, 3);
            assert_eq!(buf, expected);
            assert_eq!(session.counter, seq.counter);
        }

        reset_worker_count();
        assert!(worker_count() >= 1);
    }

    #[test]
    fn test_profiles() {
        let single = ParallelismProfile::single_threaded();
        assert_eq!(single.worker_count, 1);
        assert!(single.fits_in_memory(u64::MAX));

        let host = ParallelismProfile::dynamic();
        assert!(host.max_workers >= 1 && host.max_workers <= MAX_WORKERS);
        assert!(host.fits_in_memory(1));
    }
}
