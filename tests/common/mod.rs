/*
 * Utility functions used by the tests.
 */

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use dxt_ans::Symbol;

#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Draws `num_symbols` symbols from the distribution described by `freqs`,
/// deterministically from `seed`.
#[allow(dead_code)]
pub fn draw_symbols(freqs: &[u32], num_symbols: usize, seed: u64) -> Vec<Symbol> {
    let m: u32 = freqs.iter().sum();
    let mut rng = StdRng::seed_from_u64(seed);

    (0..num_symbols)
        .map(|_| {
            let r = rng.gen_range(0..m);
            let mut cumul = 0;
            for (symbol, &freq) in freqs.iter().enumerate() {
                cumul += freq;
                if r < cumul {
                    return symbol as Symbol;
                }
            }
            unreachable!("the cumulative walk covers [0, M)");
        })
        .collect()
}

/// A deterministic counts vector with a guaranteed nonzero entry; some
/// entries may be zero.
#[allow(dead_code)]
pub fn random_counts(len: usize, seed: u64) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut counts: Vec<u32> = (0..len).map(|_| rng.gen_range(0..100)).collect();
    counts[0] += 1;
    counts
}
