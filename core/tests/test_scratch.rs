#[cfg(test)]
mod tests {
    use ctr_core::constants::{BLOCK_LEN, CACHE_LINE_BYTES, MAX_WORKERS};
    use ctr_core::constants::test_vectors::{IV, KEY_128};
    use ctr_core::crypto::{CipherSession, Counter};
    use ctr_core::engine::{xcrypt_parallel, LoopSync, ScratchArena, SharedScratch};
    use ctr_core::types::CtrError;

    #[test]
    fn test_slots_are_unpadded() {
        let arena = ScratchArena::new(8);
        assert_eq!(arena.slot_stride(), BLOCK_LEN);
        assert_eq!(arena.slots_per_cache_line(), CACHE_LINE_BYTES / BLOCK_LEN);
        assert_eq!(arena.slots_per_cache_line(), 4);
    }

    #[test]
    fn test_default_capacity() {
        assert_eq!(ScratchArena::default().capacity(), MAX_WORKERS);
    }

    #[test]
    fn test_slots_mut_over_capacity() {
        let mut arena = ScratchArena::new(2);
        assert!(matches!(
            arena.slots_mut(3),
            Err(CtrError::ScratchCapacity { requested: 3, capacity: 2 })
        ));
    }

    #[test]
    fn test_slots_mut_hands_out_distinct_slots() {
        let mut arena = ScratchArena::new(4);
        {
            let slots = arena.slots_mut(4).unwrap();
            for (i, (counter, keystream)) in slots.into_iter().enumerate() {
                counter[0] = i as u8 + 1;
                keystream[0] = i as u8 + 10;
            }
        }
        for i in 0..4 {
            assert_eq!(arena.counter_slot(i).unwrap()[0], i as u8 + 1);
            assert_eq!(arena.keystream_slot(i).unwrap()[0], i as u8 + 10);
        }
        assert!(arena.counter_slot(4).is_none());
    }

    #[test]
    fn test_each_worker_leaves_its_last_counter_in_its_slot() {
        // 8 blocks over 4 workers: ranges 0..2, 2..4, 4..6, 6..8
        let mut session = CipherSession::new(&KEY_128, &IV).unwrap();
        let mut scratch = SharedScratch::new(4);
        let mut buf = vec![0u8; 8 * BLOCK_LEN];
        xcrypt_parallel(&mut scratch, LoopSync::Barrier, &mut session, &mut buf, 4).unwrap();

        let start = Counter::new(IV);
        for worker in 0..4 {
            let last_block = worker as u64 * 2 + 1;
            let slot = scratch.arena().counter_slot(worker).unwrap();
            assert_eq!(*slot, start.advanced(last_block).to_bytes());
        }
    }

    #[test]
    fn test_small_arena_rejects_large_pool() {
        let mut session = CipherSession::new(&KEY_128, &IV).unwrap();
        let mut scratch = SharedScratch::new(2);
        let mut buf = vec![0u8; 64];
        let err = xcrypt_parallel(&mut scratch, LoopSync::Barrier, &mut session, &mut buf, 4).unwrap_err();
        assert!(matches!(err, CtrError::ScratchCapacity { requested: 4, capacity: 2 }));
        assert_eq!(session.counter.to_bytes(), IV);
    }
}
