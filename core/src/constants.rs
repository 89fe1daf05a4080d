/// AES block length in bytes. Counters, keystream blocks and slots all use it.
pub const BLOCK_LEN: usize = 16;

/// Assumed hardware cache line (x86-64, AArch64).
/// Four unpadded `BLOCK_LEN` slots fit in one line.
pub const CACHE_LINE_BYTES: usize = 64;

/// Upper bound on the worker pool, and the capacity of the scratch arena.
pub const MAX_WORKERS: usize = 256;

/// Environment override for the ambient worker count.
pub const WORKERS_ENV: &str = "CTR_NUM_WORKERS";

/// How many byte mismatches a divergence report keeps.
pub const MAX_REPORTED_MISMATCHES: usize = 10;

pub const MIB: usize = 1024 * 1024;

/// Buffer size used by the correctness gate.
pub const GATE_BUFFER_LEN: usize = MIB;

/// Default benchmark sizes (MiB).
pub const DEFAULT_BENCH_SIZES_MIB: &[usize] = &[1, 10, 100];

/// Default worker-count sweep.
pub const DEFAULT_THREAD_SWEEP: &[usize] = &[1, 2, 4, 8, 16];

/// Iterations per measurement. Sizes at or above `LARGE_SIZE_MIB` use fewer.
pub const DEFAULT_ITERATIONS: usize = 5;
pub const LARGE_ITERATIONS: usize = 3;
pub const LARGE_SIZE_MIB: usize = 64;

/// FIPS-197 / SP 800-38A AES-128 test key and CTR initial counter block.
pub mod test_vectors {
    pub const KEY_128: [u8; 16] = [
        0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6,
        0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f, 0x3c,
    ];
    pub const IV: [u8; 16] = [
        0xf0, 0xf1, 0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xf7,
        0xf8, 0xf9, 0xfa, 0xfb, 0xfc, 0xfd, 0xfe, 0xff,
    ];
}
