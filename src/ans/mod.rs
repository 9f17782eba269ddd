//! The rANS coder: shared models, encoder, decoder and the interleaved
//! multi-stream layer.

pub mod decoder;
pub mod encoder;
pub mod interleaved;
pub mod model4decoder;
pub mod model4encoder;
pub mod model_builder;

use anyhow::{ensure, Result};
use epserde::Epserde;
use mem_dbg::{MemDbg, MemSize};

use crate::histogram::normalize_counts;
use crate::{Freq, State};

/// Runtime parameters of the coder: the renormalization radix `b` and the
/// lower-state multiplier `k`.
///
/// With a frequency table summing to `M`, the coder keeps its state inside
/// `[k·M, b·k·M)` and moves `log2(b)` bits per renormalization step. Both
/// values must be powers of two, and `b·k·M` must stay below 2³² so that the
/// state always fits in 32 bits; the product bound is checked against the
/// actual table at model construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodecParams {
    b: u32,
    k: u32,
}

impl CodecParams {
    pub fn new(b: u32, k: u32) -> Self {
        assert!(
            b.is_power_of_two() && b >= 2,
            "the renormalization radix must be a power of two"
        );
        assert!(
            k.is_power_of_two(),
            "the lower-state multiplier must be a power of two"
        );
        Self { b, k }
    }

    #[inline(always)]
    pub fn b(&self) -> u32 {
        self.b
    }

    #[inline(always)]
    pub fn k(&self) -> u32 {
        self.k
    }

    /// Bits moved between the state and the bit stream per renormalization
    /// step.
    #[inline(always)]
    pub fn log_b(&self) -> u32 {
        self.b.ilog2()
    }
}

/// Denominator of the frequency tables consumed by the SIMT texture decoder.
pub const TEXTURE_TABLE_SIZE: u32 = 1 << 11;

/// Symbols each interleaved stream carries within one encoding group.
pub const SYMBOLS_PER_STREAM: usize = 256;

/// Interleaved streams per encoding group, one per lane of the decoding
/// work group.
pub const STREAMS_PER_GROUP: usize = 16;

/// The coder parameters the texture pipeline encodes with.
///
/// `b = 2¹⁶` keeps every renormalization byte-aligned, which is what lets
/// the GPU decoder walk the blob backwards bytewise.
pub fn texture_params() -> CodecParams {
    CodecParams::new(1 << 16, 1 << 4)
}

/// Normalizes raw counts straight to [`TEXTURE_TABLE_SIZE`].
pub fn normalize_for_texture(counts: &[u32]) -> Result<Vec<u32>> {
    normalize_counts(counts, TEXTURE_TABLE_SIZE)
}

/// A complete single-table rANS message: the frequency table, the final
/// encoder states (one per interleaved stream) and the blob of
/// renormalization bits.
///
/// The blob is LIFO: the decoder traverses it in reverse byte order and
/// recovers the symbols in write-reversed order. State words are
/// little-endian on the wire.
#[derive(Clone, Debug, Epserde, MemDbg, MemSize)]
pub struct Prelude {
    pub frequencies: Vec<Freq>,

    /// The state of each encoder after its last symbol, in encoder order.
    pub states: Vec<State>,

    /// The normalized bits spilled during the encoding process.
    pub stream: Vec<u8>,
}

/// Validates a frequency table against the coder parameters and returns its
/// denominator.
pub(crate) fn checked_denominator(freqs: &[u32], params: CodecParams) -> Result<u32> {
    ensure!(!freqs.is_empty(), "the alphabet must not be empty");

    let m: u64 = freqs.iter().map(|&f| f as u64).sum();
    ensure!(m > 0, "the frequency table sums to zero");
    ensure!(
        m <= 1u64 << Freq::BITS,
        "the denominator must fit cumulative frequencies in {} bits",
        Freq::BITS
    );
    ensure!(
        freqs.iter().all(|&f| f <= Freq::MAX as u32),
        "each frequency must fit in {} bits",
        Freq::BITS
    );
    ensure!(
        (params.b() as u64) * (params.k() as u64) * m < 1u64 << 32,
        "b·k·M must stay below 2^32 for the state to fit in a 32-bit word"
    );

    Ok(m as u32)
}
