//! Conditioning of empirical symbol counts into a fixed-denominator
//! frequency table.
//!
//! The normalization follows the scheme discussed by Charles Bloom
//! (cbloomrants, "Understanding ANS"): counts are first scaled and rounded
//! toward the geometric mean, then the residual is distributed one unit at a
//! time to whichever symbol pays the smallest code-length penalty for the
//! adjustment.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use anyhow::{ensure, Result};

/// A symbol eligible for a ±1 frequency correction, ranked by the cost of
/// applying it.
struct Candidate {
    symbol: usize,
    cost: f64,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; order by descending cost so that popping
        // yields the cheapest correction.
        self.cost.total_cmp(&other.cost).reverse()
    }
}

/// The change in total code length caused by moving `freq` one step in the
/// direction of `sign`, for a symbol observed `count` times.
fn correction_cost(count: u32, freq: u32, sign: i32) -> f64 {
    count as f64 * (freq as f64 / (freq as f64 + sign as f64)).log2()
}

/// Scales `counts` to a frequency table summing exactly to `m`.
///
/// The result keeps the support of the input: `F[i] = 0` iff `counts[i] = 0`,
/// and every populated symbol gets a frequency of at least one. Rejects a
/// zero `m`, an all-zero `counts`, and an `m` too small to give each
/// populated symbol a nonzero frequency.
pub fn normalize_counts(counts: &[u32], m: u32) -> Result<Vec<u32>> {
    ensure!(m > 0, "target denominator must be positive");

    let total: u64 = counts.iter().map(|&c| c as u64).sum();
    ensure!(total > 0, "no symbol has a nonzero count");

    let populated = counts.iter().filter(|&&c| c > 0).count();
    ensure!(
        populated as u64 <= m as u64,
        "denominator {} is too small for {} populated symbols",
        m,
        populated
    );

    // Initial rounding: floor(scaled) or floor(scaled) + 1, whichever is
    // closer to `scaled` on the geometric scale.
    let mut freqs = Vec::with_capacity(counts.len());
    for &count in counts {
        if count == 0 {
            freqs.push(0u32);
            continue;
        }

        let scaled = count as f64 * m as f64 / total as f64;
        let down = scaled.floor();
        let rounded = if scaled * scaled <= down * (down + 1.0) {
            down
        } else {
            down + 1.0
        };
        freqs.push((rounded as u32).max(1));
    }

    let mut correction = m as i64 - freqs.iter().map(|&f| f as i64).sum::<i64>();
    if correction == 0 {
        return Ok(freqs);
    }
    let sign: i32 = if correction > 0 { 1 } else { -1 };

    // A symbol stays eligible as long as adjusting it cannot drop a populated
    // frequency to zero.
    let mut heap = BinaryHeap::with_capacity(populated);
    for (symbol, &count) in counts.iter().enumerate() {
        if count > 0 && (freqs[symbol] > 1 || sign > 0) {
            heap.push(Candidate {
                symbol,
                cost: correction_cost(count, freqs[symbol], sign),
            });
        }
    }

    while correction != 0 {
        let Candidate { symbol, .. } = heap
            .pop()
            .expect("at least one symbol must be eligible for correction");

        freqs[symbol] = (freqs[symbol] as i64 + sign as i64) as u32;
        correction -= sign as i64;

        if freqs[symbol] > 1 || sign > 0 {
            heap.push(Candidate {
                symbol,
                cost: correction_cost(counts[symbol], freqs[symbol], sign),
            });
        }
    }

    Ok(freqs)
}

/// Exclusive prefix sum of a frequency table.
///
/// `B[0] = 0` and `B[i] = F[0] + … + F[i−1]`; together with `F` this
/// partitions `[0, M)` into per-symbol slots.
pub fn cumulative_freqs(freqs: &[u32]) -> Vec<u32> {
    let mut cumulative = Vec::with_capacity(freqs.len());
    let mut sum = 0u32;
    for &freq in freqs {
        cumulative.push(sum);
        sum += freq;
    }
    cumulative
}
